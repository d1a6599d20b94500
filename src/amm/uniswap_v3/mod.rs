pub mod factory;
pub mod router;

use std::sync::Arc;

use ethers::{prelude::abigen, providers::Middleware, types::H160};
use serde::{Deserialize, Serialize};

use crate::errors::SwapSupplyError;

abigen!(
    IUniswapV3Pool,
    r#"[
        function token0() external view returns (address)
        function token1() external view returns (address)
        function fee() external view returns (uint24)
    ]"#;
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniswapV3Pool {
    pub address: H160,
    pub token_0: H160,
    pub token_1: H160,
    pub fee: u32,
}

impl UniswapV3Pool {
    pub fn new(address: H160, token_0: H160, token_1: H160, fee: u32) -> UniswapV3Pool {
        UniswapV3Pool {
            address,
            token_0,
            token_1,
            fee,
        }
    }

    pub fn contract<M: Middleware>(&self, middleware: Arc<M>) -> IUniswapV3Pool<M> {
        IUniswapV3Pool::new(self.address, middleware)
    }

    pub fn contains(&self, token: H160) -> bool {
        self.token_0 == token || self.token_1 == token
    }

    // Reads token0, token1 and fee of the pool at `address` in one round of concurrent calls
    pub async fn new_from_address<M: Middleware>(
        address: H160,
        middleware: Arc<M>,
    ) -> Result<Self, SwapSupplyError<M>> {
        let pool = IUniswapV3Pool::new(address, middleware);
        let token_0_call = pool.token_0();
        let token_1_call = pool.token_1();
        let fee_call = pool.fee();
        let (token_0, token_1, fee) =
            futures::try_join!(token_0_call.call(), token_1_call.call(), fee_call.call())?;

        Ok(UniswapV3Pool::new(address, token_0, token_1, fee))
    }
}
