//! Error types for settings store operations

use std::fmt;

/// Result type alias for settings store operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur while reading or writing settings
#[derive(Debug)]
pub enum SettingsError {
    /// Database connection failed
    ConnectionFailed(String),

    /// Database query failed
    QueryFailed(String),

    /// Migration failed
    MigrationFailed(String),

    /// Settings document could not be (de)serialized
    SerializationError(String),

    /// I/O error (file access, etc.)
    IoError(std::io::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ConnectionFailed(msg) => {
                write!(f, "failed to connect to settings store: {}", msg)
            }
            SettingsError::QueryFailed(msg) => write!(f, "settings query failed: {}", msg),
            SettingsError::MigrationFailed(msg) => {
                write!(f, "settings migration failed: {}", msg)
            }
            SettingsError::SerializationError(msg) => {
                write!(f, "settings serialization error: {}", msg)
            }
            SettingsError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::IoError(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::SerializationError(err.to_string())
    }
}

#[cfg(feature = "settings-sqlite")]
impl From<sqlx::Error> for SettingsError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(io_err) => SettingsError::IoError(io_err),
            _ => SettingsError::QueryFailed(err.to_string()),
        }
    }
}

#[cfg(feature = "settings-sqlite")]
impl From<sqlx::migrate::MigrateError> for SettingsError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        SettingsError::MigrationFailed(err.to_string())
    }
}
