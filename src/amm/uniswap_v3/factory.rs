use std::sync::Arc;

use ethers::{prelude::abigen, providers::Middleware, types::H160};
use serde::{Deserialize, Serialize};

use super::UniswapV3Pool;
use crate::errors::SwapSupplyError;

abigen!(
    IUniswapV3Factory,
    r#"[
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool)
    ]"#;
);

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct UniswapV3Factory {
    pub address: H160,
}

impl UniswapV3Factory {
    pub fn new(address: H160) -> UniswapV3Factory {
        UniswapV3Factory { address }
    }

    pub fn contract<M: Middleware>(&self, middleware: Arc<M>) -> IUniswapV3Factory<M> {
        IUniswapV3Factory::new(self.address, middleware)
    }

    /// Returns the pool address for the pair, or `PoolNotFound` when the factory
    /// has no pool at this fee tier (it answers with the zero address).
    pub async fn get_pool_address<M: Middleware>(
        &self,
        middleware: Arc<M>,
        token_a: H160,
        token_b: H160,
        fee: u32,
    ) -> Result<H160, SwapSupplyError<M>> {
        let pool_address = self
            .contract(middleware)
            .get_pool(token_a, token_b, fee)
            .call()
            .await?;

        if pool_address.is_zero() {
            return Err(SwapSupplyError::PoolNotFound {
                token_a,
                token_b,
                fee,
            });
        }
        Ok(pool_address)
    }

    pub async fn fetch_pool<M: Middleware>(
        &self,
        middleware: Arc<M>,
        token_a: H160,
        token_b: H160,
        fee: u32,
    ) -> Result<UniswapV3Pool, SwapSupplyError<M>> {
        let pool_address = self
            .get_pool_address(middleware.clone(), token_a, token_b, fee)
            .await?;
        tracing::debug!("Found pool {pool_address:?} for {token_a:?}/{token_b:?} at fee {fee}");
        UniswapV3Pool::new_from_address(pool_address, middleware).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::shared_word;
    use ethers::{
        providers::Provider,
        types::{Bytes, U256},
    };

    fn tokens() -> (H160, H160) {
        (H160::from_low_u64_be(0xa), H160::from_low_u64_be(0xb))
    }

    #[tokio::test]
    async fn test_missing_pool() {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(shared_word(0)).unwrap();

        let (token_a, token_b) = tokens();
        let factory = UniswapV3Factory::new(H160::from_low_u64_be(0xf));
        let result = factory
            .fetch_pool(Arc::new(provider), token_a, token_b, 3000)
            .await;

        match result {
            Err(SwapSupplyError::PoolNotFound {
                token_a: a,
                token_b: b,
                fee,
            }) => {
                assert_eq!(a, token_a);
                assert_eq!(b, token_b);
                assert_eq!(fee, 3000);
            }
            other => panic!("Expected PoolNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_pool() {
        let (provider, mock) = Provider::mocked();
        // getPool, token0, token1 and fee all answer with the same word
        for _ in 0..4 {
            mock.push::<Bytes, _>(shared_word(3000)).unwrap();
        }

        let (token_a, token_b) = tokens();
        let factory = UniswapV3Factory::new(H160::from_low_u64_be(0xf));
        let pool = factory
            .fetch_pool(Arc::new(provider), token_a, token_b, 3000)
            .await
            .unwrap();

        assert_eq!(pool.address, H160::from_low_u64_be(3000));
        assert_eq!(pool.fee, 3000);
    }

    #[test]
    fn test_get_pool_calldata() {
        let (provider, _mock) = Provider::mocked();
        let (token_a, token_b) = tokens();
        let factory = UniswapV3Factory::new(H160::from_low_u64_be(0xf));
        let call = factory
            .contract(Arc::new(provider))
            .get_pool(token_a, token_b, 3000);
        let calldata = call.calldata().unwrap();

        // getPool(address,address,uint24)
        assert_eq!(&calldata[..4], &[0x16, 0x98, 0xee, 0x82]);
        assert_eq!(
            ethers::abi::decode(
                &[
                    ethers::abi::ParamType::Address,
                    ethers::abi::ParamType::Address,
                    ethers::abi::ParamType::Uint(24)
                ],
                &calldata[4..]
            )
            .unwrap(),
            vec![
                ethers::abi::Token::Address(token_a),
                ethers::abi::Token::Address(token_b),
                ethers::abi::Token::Uint(U256::from(3000))
            ]
        );
    }
}
