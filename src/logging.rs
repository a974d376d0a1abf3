// src/logging.rs

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::errors::ChatResult;
use crate::models::ApiCallLog;
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle};
use std::fs;

/// Starts the file logger. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr. Keep the returned handle alive for the
/// lifetime of the program.
pub fn init_logging(config: &Config) -> ChatResult<LoggerHandle> {
    let dir = config.log_dir();
    fs::create_dir_all(&dir)?;

    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(FileSpec::default().directory(dir).basename(APP_NAME))
        .append()
        .format(detailed_format)
        .start()?;

    Ok(handle)
}

pub fn format_api_call(log: &ApiCallLog) -> String {
    format!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    )
}

/// Logs an API call under the `api_calls` target.
pub fn log_api_call(log: &ApiCallLog) {
    log::info!(target: "api_calls", "{}", format_api_call(log));
}
