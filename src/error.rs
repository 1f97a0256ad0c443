//! Error types for the omnibox engine
//!
//! Caller-visible failures are limited to API misuse (selecting a row that
//! does not exist) and settings I/O. Data-source failures are reported
//! through here too, but the controller only logs them.

use thiserror::Error;

/// Errors that can occur in the omnibox engine
#[derive(Debug, Error)]
pub enum OmniboxError {
    /// A selection index outside `-1..len`
    #[error("Invalid selection {index} (list has {len} entries)")]
    InvalidSelection { index: i32, len: usize },

    /// The external data source failed a query
    #[error("Data source error {code}: {message}")]
    DataSource { code: i32, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON snapshot errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OmniboxError {
    pub fn data_source(code: i32, message: impl Into<String>) -> Self {
        OmniboxError::DataSource {
            code,
            message: message.into(),
        }
    }
}

/// Result type alias for omnibox operations
pub type OmniboxResult<T> = Result<T, OmniboxError>;
