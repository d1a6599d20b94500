use ethers::{
    prelude::{AbiError, ContractError},
    providers::{Middleware, ProviderError},
    types::{H160, H256, U256},
    utils::ConversionError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwapSupplyError<M>
where
    M: Middleware,
{
    #[error("Middleware error: {0}")]
    MiddlewareError(<M as Middleware>::Error),
    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),
    #[error("Contract error: {0}")]
    ContractError(#[from] ContractError<M>),
    #[error("ABI codec error: {0}")]
    ABICodecError(#[from] AbiError),
    #[error("Unit conversion error: {0}")]
    ConversionError(#[from] ConversionError),
    #[error("Pool address not found for {token_a:?}/{token_b:?} at fee tier {fee}")]
    PoolNotFound {
        token_a: H160,
        token_b: H160,
        fee: u32,
    },
    #[error("Transaction {0:?} was dropped before confirmation")]
    TransactionDropped(H256),
    #[error("Transaction {0:?} reverted")]
    TransactionReverted(H256),
    #[error("Balance went down during swap (before {before}, after {after})")]
    NegativeSwapDelta { before: U256, after: U256 },
    #[error("Token approval for spender {spender:?} failed: {reason}")]
    ApprovalFailed { spender: H160, reason: String },
}

impl<M: Middleware> SwapSupplyError<M> {
    pub fn approval_failed(spender: H160, cause: SwapSupplyError<M>) -> Self {
        SwapSupplyError::ApprovalFailed {
            spender,
            reason: cause.to_string(),
        }
    }
}
