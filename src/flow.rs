use std::sync::Arc;

use chrono::{DateTime, Utc};
use ethers::{
    providers::Middleware,
    types::{TransactionReceipt, H160, H256, U256},
};
use serde::Serialize;

use crate::{
    amm::uniswap_v3::{
        factory::UniswapV3Factory,
        router::{build_swap_params, ExactInputSingleParams, UniswapV3Router},
        UniswapV3Pool,
    },
    configs::{ConfigError, NetworkConfig},
    erc20::Erc20Token,
    errors::SwapSupplyError,
    lending::aave_v3::AaveV3Pool,
};

/// Everything one successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub wallet: H160,
    pub pool: H160,
    pub amount_in: U256,
    pub swapped_amount: U256,
    pub swapped_amount_formatted: String,
    pub approval_tx: H256,
    pub swap_tx: H256,
    pub lending_approval_tx: H256,
    pub supply_tx: H256,
}

/// Amount of output token received, or an error if the balance went down.
pub fn swap_delta<M: Middleware>(before: U256, after: U256) -> Result<U256, SwapSupplyError<M>> {
    after
        .checked_sub(before)
        .ok_or(SwapSupplyError::NegativeSwapDelta { before, after })
}

pub struct SwapAndSupply<M> {
    pub network: NetworkConfig,
    pub wallet: H160,
    pub token_in: Erc20Token,
    pub token_out: Erc20Token,
    pub factory: UniswapV3Factory,
    pub router: UniswapV3Router,
    pub lending_pool: AaveV3Pool,
    middleware: Arc<M>,
}

impl<M: Middleware> SwapAndSupply<M> {
    pub fn new(
        network: NetworkConfig,
        wallet: H160,
        middleware: Arc<M>,
    ) -> Result<Self, ConfigError> {
        let token_in = Erc20Token::new(network.token_in()?.clone());
        let token_out = Erc20Token::new(network.token_out()?.clone());

        Ok(SwapAndSupply {
            wallet,
            token_in,
            token_out,
            factory: UniswapV3Factory::new(network.uniswap_v3_factory),
            router: UniswapV3Router::new(network.uniswap_v3_router),
            lending_pool: AaveV3Pool::new(network.aave_v3_pool, network.supply_gas_limit),
            network,
            middleware,
        })
    }

    pub async fn fetch_pool_details(&self) -> Result<UniswapV3Pool, SwapSupplyError<M>> {
        self.factory
            .fetch_pool(
                self.middleware.clone(),
                self.token_in.address(),
                self.token_out.address(),
                self.network.pool_fee,
            )
            .await
    }

    pub async fn authorize_token_usage(
        &self,
        amount: U256,
    ) -> Result<TransactionReceipt, SwapSupplyError<M>> {
        let spender = self.router.address;
        let receipt = self
            .token_in
            .approve(spender, amount, self.middleware.clone())
            .await
            .map_err(|e| SwapSupplyError::approval_failed(spender, e))?;
        tracing::info!(
            "Token approval successful: {}",
            self.network.tx_url(receipt.transaction_hash)
        );
        Ok(receipt)
    }

    pub fn create_swap_params(
        &self,
        pool: &UniswapV3Pool,
        amount_in: U256,
    ) -> ExactInputSingleParams {
        build_swap_params(
            pool,
            self.token_in.address(),
            self.token_out.address(),
            self.wallet,
            amount_in,
        )
    }

    pub async fn retrieve_token_balance(&self) -> Result<U256, SwapSupplyError<M>> {
        self.token_out
            .balance_of(self.wallet, self.middleware.clone())
            .await
    }

    /// Executes the swap and returns its receipt with the output-token balance delta.
    pub async fn perform_swap(
        &self,
        params: ExactInputSingleParams,
    ) -> Result<(TransactionReceipt, U256), SwapSupplyError<M>> {
        let balance_before = self.retrieve_token_balance().await?;
        let receipt = self
            .router
            .swap_exact_input_single(params, self.middleware.clone())
            .await?;
        tracing::info!(
            "Swap confirmed: {}",
            self.network.tx_url(receipt.transaction_hash)
        );

        let balance_after = self.retrieve_token_balance().await?;
        let swapped_amount = swap_delta(balance_before, balance_after)?;
        tracing::info!(
            "Swapped {} amount: {}",
            self.token_out.info.symbol,
            self.token_out.format_amount(swapped_amount)?
        );
        Ok((receipt, swapped_amount))
    }

    pub async fn authorize_lending_pool(
        &self,
        amount: U256,
    ) -> Result<TransactionReceipt, SwapSupplyError<M>> {
        let spender = self.lending_pool.address;
        let receipt = self
            .token_out
            .approve(spender, amount, self.middleware.clone())
            .await
            .map_err(|e| SwapSupplyError::approval_failed(spender, e))?;
        tracing::info!(
            "Lending pool approval successful for {} {}",
            amount,
            self.token_out.info.symbol
        );
        Ok(receipt)
    }

    pub async fn supply_tokens(
        &self,
        amount: U256,
    ) -> Result<TransactionReceipt, SwapSupplyError<M>> {
        let receipt = self
            .lending_pool
            .supply(
                self.token_out.address(),
                amount,
                self.wallet,
                self.middleware.clone(),
            )
            .await?;
        tracing::info!(
            "Supply to Aave successful: {}",
            self.network.tx_url(receipt.transaction_hash)
        );
        Ok(receipt)
    }

    /// Swaps `amount` whole units of the input token and supplies the output
    /// to the lending pool. Stops at the first failing step.
    pub async fn run<S: ToString>(&self, amount: S) -> Result<RunReport, SwapSupplyError<M>> {
        let started_at = Utc::now();
        let amount_in = self.token_in.parse_amount(amount)?;

        let pool = self.fetch_pool_details().await?;
        let approval = self.authorize_token_usage(amount_in).await?;
        let params = self.create_swap_params(&pool, amount_in);
        let (swap, swapped_amount) = self.perform_swap(params).await?;
        let lending_approval = self.authorize_lending_pool(swapped_amount).await?;
        let supply = self.supply_tokens(swapped_amount).await?;

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            wallet: self.wallet,
            pool: pool.address,
            amount_in,
            swapped_amount,
            swapped_amount_formatted: self.token_out.format_amount(swapped_amount)?,
            approval_tx: approval.transaction_hash,
            swap_tx: swap.transaction_hash,
            lending_approval_tx: lending_approval.transaction_hash,
            supply_tx: supply.transaction_hash,
        })
    }
}
