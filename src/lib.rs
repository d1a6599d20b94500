pub mod amm;
pub mod configs;
pub mod erc20;
pub mod errors;
pub mod flow;
pub mod lending;
pub mod logging;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_utils;
