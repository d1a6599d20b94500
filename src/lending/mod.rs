pub mod aave_v3;
