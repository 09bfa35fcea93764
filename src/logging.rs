// src/logging.rs

use crate::models::ApiCallLog;
use env_logger::{Builder, Env};
use log::{info, LevelFilter};
use std::str::FromStr;

pub const API_LOG_TARGET: &str = "folio::api";

/// Installs the `env_logger` backend. `RUST_LOG` wins over `level`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: &str) {
    let default_level = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
    let _ = Builder::from_env(Env::default().default_filter_or(default_level.to_string()))
        .format_timestamp_millis()
        .try_init();
}

/// Logs an API call under the `folio::api` target.
pub fn log_api_call(log: &ApiCallLog) {
    info!(
        target: API_LOG_TARGET,
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
