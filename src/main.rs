use swap_supply::{configs::Config, flow::SwapAndSupply, logging};

const SWAP_AMOUNT: u64 = 1;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let json_logs = std::env::var("LOG_FORMAT").map_or(false, |f| f.eq_ignore_ascii_case("json"));
    logging::setup_logging(&log_level, json_logs);

    let config = Config::new()?;
    let wallet = config.client.address();
    tracing::info!("Using wallet {wallet:?} on chain {}", config.network.chain_id);

    let flow = SwapAndSupply::new(config.network, wallet, config.client)?;
    match flow.run(SWAP_AMOUNT).await {
        Ok(report) => tracing::info!("Run report: {}", serde_json::to_string(&report)?),
        Err(err) => {
            tracing::error!("An error occurred during the swap and deposit process: {err}")
        }
    }
    Ok(())
}
