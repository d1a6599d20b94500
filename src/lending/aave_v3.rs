use std::sync::Arc;

use ethers::{
    prelude::abigen,
    providers::Middleware,
    types::{TransactionReceipt, H160, U256},
};
use serde::{Deserialize, Serialize};

use crate::{errors::SwapSupplyError, transactions};

abigen!(
    IAaveV3Pool,
    r#"[
        function supply(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external
        function getUserAccountData(address user) external view returns (uint256 totalCollateralBase, uint256 totalDebtBase, uint256 availableBorrowsBase, uint256 currentLiquidationThreshold, uint256 ltv, uint256 healthFactor)
    ]"#;
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccountData {
    pub total_collateral_base: U256,
    pub total_debt_base: U256,
    pub available_borrows_base: U256,
    pub current_liquidation_threshold: U256,
    pub ltv: U256,
    pub health_factor: U256,
}

#[derive(Debug, Clone)]
pub struct AaveV3Pool {
    pub address: H160,
    pub supply_gas_limit: u64,
}

impl AaveV3Pool {
    pub fn new(address: H160, supply_gas_limit: u64) -> AaveV3Pool {
        AaveV3Pool {
            address,
            supply_gas_limit,
        }
    }

    pub fn contract<M: Middleware>(&self, middleware: Arc<M>) -> IAaveV3Pool<M> {
        IAaveV3Pool::new(self.address, middleware)
    }

    /// Deposits `amount` of `asset` for `on_behalf_of` with referral code 0.
    /// The pool must already hold an allowance for `amount`.
    pub async fn supply<M: Middleware>(
        &self,
        asset: H160,
        amount: U256,
        on_behalf_of: H160,
        middleware: Arc<M>,
    ) -> Result<TransactionReceipt, SwapSupplyError<M>> {
        let pool = self.contract(middleware);
        let call = pool
            .supply(asset, amount, on_behalf_of, 0)
            .gas(self.supply_gas_limit);
        let pending = call.send().await?;
        transactions::confirm(pending, "Supply").await
    }

    pub async fn user_account_data<M: Middleware>(
        &self,
        user: H160,
        middleware: Arc<M>,
    ) -> Result<UserAccountData, SwapSupplyError<M>> {
        let (
            total_collateral_base,
            total_debt_base,
            available_borrows_base,
            current_liquidation_threshold,
            ltv,
            health_factor,
        ) = self
            .contract(middleware)
            .get_user_account_data(user)
            .call()
            .await?;

        Ok(UserAccountData {
            total_collateral_base,
            total_debt_base,
            available_borrows_base,
            current_liquidation_threshold,
            ltv,
            health_factor,
        })
    }
}
