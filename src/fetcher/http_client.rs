use crate::config::Config;
use crate::error::AppError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for the whole run.
///
/// The invalid-certificate override is scoped to this client rather than any
/// process-wide setting, so it only affects calendar fetches and only when
/// explicitly enabled in the config.
pub fn create_http_client(config: &Config) -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(AppError::from)
}
