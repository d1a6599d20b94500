use std::time::Duration;

use ethers::{
    providers::{JsonRpcClient, Middleware, PendingTransaction},
    types::{TransactionReceipt, H256, U64},
};
use indicatif::ProgressBar;

use crate::errors::SwapSupplyError;

/// Logs the hash of a just-submitted transaction and waits for its receipt.
/// A missing receipt or a receipt with status 0 is an error.
pub async fn confirm<M, P>(
    pending: PendingTransaction<'_, P>,
    label: &str,
) -> Result<TransactionReceipt, SwapSupplyError<M>>
where
    M: Middleware,
    P: JsonRpcClient,
{
    let tx_hash = pending.tx_hash();
    tracing::info!("{label} transaction sent: {tx_hash:?}");

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Waiting for {label} transaction to be mined"));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let receipt = pending.await;
    spinner.finish_and_clear();

    check_receipt(tx_hash, receipt?)
}

pub fn check_receipt<M: Middleware>(
    tx_hash: H256,
    receipt: Option<TransactionReceipt>,
) -> Result<TransactionReceipt, SwapSupplyError<M>> {
    let receipt = receipt.ok_or(SwapSupplyError::TransactionDropped(tx_hash))?;
    if receipt.status != Some(U64::one()) {
        return Err(SwapSupplyError::TransactionReverted(tx_hash));
    }
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::{MockProvider, Provider};

    type Mocked = Provider<MockProvider>;

    fn receipt_with_status(status: Option<u64>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: H256::repeat_byte(1),
            status: status.map(U64::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_successful_receipt() {
        let receipt =
            check_receipt::<Mocked>(H256::repeat_byte(1), Some(receipt_with_status(Some(1))))
                .unwrap();
        assert_eq!(receipt.transaction_hash, H256::repeat_byte(1));
    }

    #[test]
    fn test_reverted_receipt() {
        let result =
            check_receipt::<Mocked>(H256::repeat_byte(1), Some(receipt_with_status(Some(0))));
        assert!(matches!(
            result,
            Err(SwapSupplyError::TransactionReverted(hash)) if hash == H256::repeat_byte(1)
        ));
    }

    #[test]
    fn test_pre_byzantium_receipt_is_not_trusted() {
        let result = check_receipt::<Mocked>(H256::repeat_byte(1), Some(receipt_with_status(None)));
        assert!(matches!(result, Err(SwapSupplyError::TransactionReverted(_))));
    }

    #[test]
    fn test_dropped_transaction() {
        let result = check_receipt::<Mocked>(H256::repeat_byte(2), None);
        assert!(matches!(
            result,
            Err(SwapSupplyError::TransactionDropped(hash)) if hash == H256::repeat_byte(2)
        ));
    }
}
