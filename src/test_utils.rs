use std::sync::Arc;

use ethers::{
    abi::Token,
    middleware::SignerMiddleware,
    providers::{MockProvider, Provider},
    signers::{LocalWallet, Signer},
    types::{Bytes, U256},
};

// anvil's first dev account
pub const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub type MockedSigner = SignerMiddleware<Provider<MockProvider>, LocalWallet>;

/// One ABI word that decodes both as an address and as a uint24, so every
/// mocked eth_call can share it regardless of the order calls are issued in.
pub fn shared_word(value: u64) -> Bytes {
    Bytes::from(ethers::abi::encode(&[Token::Uint(U256::from(value))]))
}

pub fn mocked_signer(chain_id: u64) -> (Arc<MockedSigner>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let wallet = TEST_KEY
        .trim_start_matches("0x")
        .parse::<LocalWallet>()
        .unwrap()
        .with_chain_id(chain_id);
    (Arc::new(SignerMiddleware::new(provider, wallet)), mock)
}
