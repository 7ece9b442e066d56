use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch calendar page: {0}")]
    PageFetch(#[from] reqwest::Error),

    #[error("Calendar page not found (404): {url}")]
    PageNotFound { url: String },

    #[error("Calendar server error ({status}): {url}")]
    PageServerError { status: u16, url: String },

    #[error("Calendar request rejected ({status}): {url}")]
    PageClientError { status: u16, url: String },

    #[error("Invalid HTML selector: {0}")]
    Selector(String),

    #[error("Unexpected calendar row shape: {reason} ({cells} cells)")]
    UnexpectedRowShape { cells: usize, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Sync run failed: all {failed} roster syncs failed")]
    RunFailed { failed: usize },
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a selector error with context
    pub fn selector_error(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    /// Create a page not found error
    pub fn page_not_found(url: impl Into<String>) -> Self {
        Self::PageNotFound { url: url.into() }
    }

    /// Create a page server error (5xx status codes)
    pub fn page_server_error(status: u16, url: impl Into<String>) -> Self {
        Self::PageServerError {
            status,
            url: url.into(),
        }
    }

    /// Create a page client error (4xx status codes except 404)
    pub fn page_client_error(status: u16, url: impl Into<String>) -> Self {
        Self::PageClientError {
            status,
            url: url.into(),
        }
    }

    /// Create an unexpected row shape error
    pub fn row_shape(cells: usize, reason: impl Into<String>) -> Self {
        Self::UnexpectedRowShape {
            cells,
            reason: reason.into(),
        }
    }

    /// Check if error is retryable (network issues, server errors)
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::PageServerError { .. } => true,
            AppError::PageFetch(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
