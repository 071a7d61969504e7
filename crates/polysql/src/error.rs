//! Error types for polysql

use thiserror::Error;

/// Result type alias for polysql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types raised while building SQL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// A required clause has no content (e.g. missing FROM)
    #[error("Construction error: {0}")]
    Construction(String),

    /// Null/blank or otherwise invalid argument
    #[error("Argument error: {0}")]
    Argument(String),

    /// Internal invariant violated (e.g. parameter-name collision)
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl SqlError {
    /// Create a construction error
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    /// Create an argument error
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a construction error
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }

    /// Check if this is an argument error
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
