use std::sync::Arc;

use ethers::{
    prelude::abigen,
    providers::Middleware,
    types::{TransactionReceipt, H160, U256},
};

use super::UniswapV3Pool;
use crate::{errors::SwapSupplyError, transactions};

abigen!(
    ISwapRouter02,
    r#"[
        struct ExactInputSingleParams { address tokenIn; address tokenOut; uint24 fee; address recipient; uint256 amountIn; uint256 amountOutMinimum; uint160 sqrtPriceLimitX96; }
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut)
    ]"#;
);

/// Exact-input single-hop parameters for `pool`. No slippage bound and no
/// price limit are set.
pub fn build_swap_params(
    pool: &UniswapV3Pool,
    token_in: H160,
    token_out: H160,
    recipient: H160,
    amount_in: U256,
) -> ExactInputSingleParams {
    ExactInputSingleParams {
        token_in,
        token_out,
        fee: pool.fee,
        recipient,
        amount_in,
        amount_out_minimum: U256::zero(),
        sqrt_price_limit_x96: U256::zero(),
    }
}

#[derive(Debug, Clone)]
pub struct UniswapV3Router {
    pub address: H160,
}

impl UniswapV3Router {
    pub fn new(address: H160) -> UniswapV3Router {
        UniswapV3Router { address }
    }

    pub fn contract<M: Middleware>(&self, middleware: Arc<M>) -> ISwapRouter02<M> {
        ISwapRouter02::new(self.address, middleware)
    }

    pub async fn swap_exact_input_single<M: Middleware>(
        &self,
        params: ExactInputSingleParams,
        middleware: Arc<M>,
    ) -> Result<TransactionReceipt, SwapSupplyError<M>> {
        let router = self.contract(middleware);
        let call = router.exact_input_single(params);
        let pending = call.send().await?;
        transactions::confirm(pending, "Swap").await
    }
}
