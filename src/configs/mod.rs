use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::H160;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

const SEPOLIA_CONFIG: &str = include_str!("sepolia.yaml");

#[derive(Debug)]
pub enum ConfigError {
    EnvVarMissing(String),
    MiddlewareInitError(String),
    WalletInitError(String),
    NetworkLoadError(String),
    TokenMissing(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::EnvVarMissing(var) => write!(f, "Missing env variable: {}", var),
            ConfigError::MiddlewareInitError(e) => {
                write!(f, "Middleware initialization error: {}", e)
            }
            ConfigError::WalletInitError(e) => write!(f, "Wallet initialization error: {}", e),
            ConfigError::NetworkLoadError(e) => write!(f, "Network config loading error: {}", e),
            ConfigError::TokenMissing(symbol) => {
                write!(f, "Token {} is not listed in the network config", symbol)
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub chain_id: u64,
    pub address: H160,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub explorer_url: String,
    pub uniswap_v3_factory: H160,
    pub uniswap_v3_router: H160,
    pub aave_v3_pool: H160,
    pub pool_fee: u32,
    pub supply_gas_limit: u64,
    pub token_in: String,
    pub token_out: String,
    pub tokens: HashMap<String, TokenInfo>,
}

impl NetworkConfig {
    pub fn sepolia() -> Result<Self, ConfigError> {
        Self::from_yaml(SEPOLIA_CONFIG)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::NetworkLoadError(e.to_string()))
    }

    pub fn token(&self, symbol: &str) -> Result<&TokenInfo, ConfigError> {
        self.tokens
            .get(symbol)
            .ok_or_else(|| ConfigError::TokenMissing(symbol.to_string()))
    }

    pub fn token_in(&self) -> Result<&TokenInfo, ConfigError> {
        self.token(&self.token_in)
    }

    pub fn token_out(&self) -> Result<&TokenInfo, ConfigError> {
        self.token(&self.token_out)
    }

    pub fn tx_url(&self, tx_hash: impl fmt::Debug) -> String {
        format!("{}/tx/{:?}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

pub struct Config {
    pub client: Arc<SignerClient>,
    pub network: NetworkConfig,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        let rpc_endpoint = std::env::var("RPC_URL")
            .map_err(|_| ConfigError::EnvVarMissing("RPC_URL".to_string()))?;
        let private_key = std::env::var("PRIVATE_KEY")
            .map_err(|_| ConfigError::EnvVarMissing("PRIVATE_KEY".to_string()))?;
        Self::with_credentials(&rpc_endpoint, &private_key)
    }

    pub fn with_credentials(rpc_endpoint: &str, private_key: &str) -> Result<Self, ConfigError> {
        let network = NetworkConfig::sepolia()?;

        let provider = Provider::<Http>::try_from(rpc_endpoint)
            .map_err(|e| ConfigError::MiddlewareInitError(e.to_string()))?;
        let wallet = private_key
            .trim()
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map_err(|e| ConfigError::WalletInitError(e.to_string()))?
            .with_chain_id(network.chain_id);

        Ok(Config {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            network,
        })
    }
}
