use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const QUIET_DEPENDENCIES: &str = "hyper=info,reqwest=info,rustls=info,ethers_providers=info";

/// Builds the filter directive string. A bare level such as `debug` gets the
/// HTTP stack pinned to `info`; anything containing `,` or `=` is used as-is.
pub fn filter_spec(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.is_empty() {
        format!("info,{QUIET_DEPENDENCIES}")
    } else if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("{normalized},{QUIET_DEPENDENCIES}")
    }
}

pub fn setup_logging(log_level: &str, json_format: bool) {
    let filter_spec = filter_spec(log_level);
    let filter = EnvFilter::from_str(&filter_spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    if json_format {
        subscriber
            .with(fmt::layer().json().with_target(false))
            .init();
    } else {
        subscriber.with(fmt::layer().with_target(true).compact()).init();
    }

    tracing::debug!(
        "Logging initialized with `{filter_spec}` ({})",
        if json_format { "json" } else { "compact" }
    );
}
