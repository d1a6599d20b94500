use std::sync::Arc;

use ethers::{
    prelude::abigen,
    providers::Middleware,
    types::{TransactionReceipt, H160, U256},
    utils::{format_units, parse_units, ConversionError},
};

use crate::{configs::TokenInfo, errors::SwapSupplyError, transactions};

abigen!(
    IErc20,
    r#"[
        function approve(address spender, uint256 amount) external returns (bool)
        function allowance(address owner, address spender) external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
        function decimals() external view returns (uint8)
    ]"#;
);

#[derive(Debug, Clone)]
pub struct Erc20Token {
    pub info: TokenInfo,
}

impl Erc20Token {
    pub fn new(info: TokenInfo) -> Erc20Token {
        Erc20Token { info }
    }

    pub fn address(&self) -> H160 {
        self.info.address
    }

    pub fn contract<M: Middleware>(&self, middleware: Arc<M>) -> IErc20<M> {
        IErc20::new(self.info.address, middleware)
    }

    /// Whole-unit amount (e.g. `1`, `"0.5"`) to base units.
    pub fn parse_amount<S: ToString>(&self, amount: S) -> Result<U256, ConversionError> {
        Ok(parse_units(amount, self.info.decimals as u32)?.into())
    }

    pub fn format_amount(&self, amount: U256) -> Result<String, ConversionError> {
        format_units(amount, self.info.decimals as u32)
    }

    pub async fn balance_of<M: Middleware>(
        &self,
        owner: H160,
        middleware: Arc<M>,
    ) -> Result<U256, SwapSupplyError<M>> {
        Ok(self.contract(middleware).balance_of(owner).call().await?)
    }

    pub async fn allowance<M: Middleware>(
        &self,
        owner: H160,
        spender: H160,
        middleware: Arc<M>,
    ) -> Result<U256, SwapSupplyError<M>> {
        Ok(self
            .contract(middleware)
            .allowance(owner, spender)
            .call()
            .await?)
    }

    /// Submits `approve(spender, amount)` and waits for it to be mined.
    pub async fn approve<M: Middleware>(
        &self,
        spender: H160,
        amount: U256,
        middleware: Arc<M>,
    ) -> Result<TransactionReceipt, SwapSupplyError<M>> {
        let token = self.contract(middleware);
        let call = token.approve(spender, amount);
        let pending = call.send().await?;
        transactions::confirm(pending, "Approval").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{configs::NetworkConfig, test_utils::shared_word};
    use ethers::{providers::Provider, types::Bytes};

    fn aave() -> Erc20Token {
        let network = NetworkConfig::sepolia().unwrap();
        Erc20Token::new(network.token_in().unwrap().clone())
    }

    #[test]
    fn test_parse_amount() {
        let token = aave();
        assert_eq!(token.parse_amount(1).unwrap(), U256::exp10(18));
        assert_eq!(token.parse_amount("0.25").unwrap(), U256::exp10(17) * 25 / 10);
        assert!(token.parse_amount("one").is_err());
    }

    #[test]
    fn test_format_amount() {
        let token = aave();
        assert_eq!(
            token.format_amount(U256::exp10(18) * 3 / 2).unwrap(),
            "1.500000000000000000"
        );
    }

    #[tokio::test]
    async fn test_balance_of() {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(shared_word(42)).unwrap();

        let balance = aave()
            .balance_of(H160::from_low_u64_be(1), Arc::new(provider))
            .await
            .unwrap();
        assert_eq!(balance, U256::from(42));
    }

    #[test]
    fn test_approve_calldata() {
        let (provider, _mock) = Provider::mocked();
        let spender = H160::from_low_u64_be(0x5);
        let token = aave();
        let contract = token.contract(Arc::new(provider));
        let call = contract.approve(spender, U256::exp10(18));
        let calldata = call.calldata().unwrap();

        // approve(address,uint256)
        assert_eq!(&calldata[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(call.tx.to_addr(), Some(&token.address()));
    }
}
