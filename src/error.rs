//! Error handling for the gold price monitor
//!
//! Feed and storage failures inside a run are absorbed by the loop. The
//! errors here cover startup (config, database open, client construction),
//! storage calls and the operator-facing commands.

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// Main error type for the monitor
#[derive(Debug)]
pub enum MonitorError {
    // Configuration errors
    ConfigNotFound(String),
    ConfigParse(String),
    ConfigValidation(String),

    // Database errors
    DatabaseConnection(String),
    DatabaseQuery(String),
    DatabaseConstraint(String),

    // API errors
    ApiConnection(String),
    ApiTimeout(String),

    // Operator input
    InvalidInput(String, String), // (field, reason)

    // IO errors
    FileNotFound(String),
    FileRead(String),
    FileWrite(String),

    Internal(String),
}

impl MonitorError {
    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            MonitorError::ConfigValidation(msg) => {
                format!(
                    "Configuration validation error: {}\n\n\
                    💡 Check monitor.toml or the command-line flags for:\n\
                    - low threshold not above high threshold\n\
                    - at least one check\n\
                    - a positive request timeout",
                    msg
                )
            }
            MonitorError::DatabaseConnection(msg) => {
                format!(
                    "Database connection failed: {}\n\n\
                    💡 Try:\n\
                    1. Check the database path in monitor.toml\n\
                    2. Check directory permissions\n\
                    3. Ensure disk space available",
                    msg
                )
            }
            MonitorError::InvalidInput(field, reason) => {
                format!(
                    "Invalid value for {}: {}\n\n\
                    💡 Press Enter to accept the default shown in brackets",
                    field, reason
                )
            }
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            MonitorError::ConfigNotFound(_)
            | MonitorError::ConfigParse(_)
            | MonitorError::ConfigValidation(_) => "config",

            MonitorError::DatabaseConnection(_)
            | MonitorError::DatabaseQuery(_)
            | MonitorError::DatabaseConstraint(_) => "database",

            MonitorError::ApiConnection(_)
            | MonitorError::ApiTimeout(_) => "api",

            MonitorError::InvalidInput(_, _) => "input",

            MonitorError::FileNotFound(_)
            | MonitorError::FileRead(_)
            | MonitorError::FileWrite(_) => "io",

            MonitorError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path)
            }
            MonitorError::ConfigParse(msg) => {
                write!(f, "Configuration parse error: {}", msg)
            }
            MonitorError::ConfigValidation(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }

            MonitorError::DatabaseConnection(msg) => {
                write!(f, "Database connection error: {}", msg)
            }
            MonitorError::DatabaseQuery(msg) => {
                write!(f, "Database query error: {}", msg)
            }
            MonitorError::DatabaseConstraint(msg) => {
                write!(f, "Database constraint violation: {}", msg)
            }

            MonitorError::ApiConnection(msg) => {
                write!(f, "API connection error: {}", msg)
            }
            MonitorError::ApiTimeout(msg) => {
                write!(f, "API timeout: {}", msg)
            }

            MonitorError::InvalidInput(field, reason) => {
                write!(f, "Invalid input for '{}': {}", field, reason)
            }

            MonitorError::FileNotFound(path) => {
                write!(f, "File not found: {}", path)
            }
            MonitorError::FileRead(msg) => {
                write!(f, "File read error: {}", msg)
            }
            MonitorError::FileWrite(msg) => {
                write!(f, "File write error: {}", msg)
            }

            MonitorError::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for MonitorError {}

// Conversion implementations for common error types

impl From<io::Error> for MonitorError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => MonitorError::FileNotFound(err.to_string()),
            io::ErrorKind::PermissionDenied => MonitorError::FileRead(err.to_string()),
            _ => MonitorError::Internal(format!("IO error: {}", err)),
        }
    }
}

impl From<rusqlite::Error> for MonitorError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, _) = &err {
            if failure.code == rusqlite::ErrorCode::CannotOpen {
                return MonitorError::DatabaseConnection(err.to_string());
            }
        }

        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("constraint") {
                    MonitorError::DatabaseConstraint(msg)
                } else {
                    MonitorError::DatabaseQuery(msg)
                }
            }
            _ => MonitorError::DatabaseQuery(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(err: serde_json::Error) -> Self {
        MonitorError::Internal(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for MonitorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MonitorError::ApiTimeout(err.to_string())
        } else {
            MonitorError::ApiConnection(err.to_string())
        }
    }
}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileRead(msg) => MonitorError::FileRead(msg),
            ConfigError::FileWrite(msg) => MonitorError::FileWrite(msg),
            ConfigError::Parse(msg) => MonitorError::ConfigParse(msg),
            ConfigError::Serialize(msg) => MonitorError::Internal(msg),
            ConfigError::Validation(msg) => MonitorError::ConfigValidation(msg),
        }
    }
}

/// Result type alias using MonitorError
pub type MonitorResult<T> = Result<T, MonitorError>;
