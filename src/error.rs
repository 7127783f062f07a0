//! Error Handling Infrastructure
//!
//! This module defines all error types used throughout rdshell.
//!
//! # Error Categories
//! - `Fetch`: an RDS management API call failed; the pipeline continues with
//!   whatever records loaded, so this is reported rather than fatal
//! - `UnsupportedEngine`: the selected endpoint's engine family has no client
//!   invocation template
//! - `SelectionCancelled`: the operator aborted the interactive picker
//! - `Subprocess`: the spawned client failed to start or exited non-zero
//! - `Config`: the client-binary override file could not be read or parsed

use thiserror::Error;

/// Main error type for rdshell operations
#[derive(Error, Debug)]
pub enum RdshellError {
    /// RDS management API call failed
    #[error("Fetch failed ({call}): {detail}")]
    Fetch { call: String, detail: String },

    /// No invocation template exists for this engine family
    #[error("Unsupported engine type: {0}")]
    UnsupportedEngine(String),

    /// The operator aborted the interactive picker
    #[error("Selection cancelled")]
    SelectionCancelled,

    /// Spawned database client failed to start or exited non-zero
    #[error("Client process failed: {0}")]
    Subprocess(String),

    /// Configuration file error (unreadable file, invalid JSON, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RdshellError {
    /// Convert error to a stable code string for logging
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "FETCH_FAILED",
            Self::UnsupportedEngine(_) => "UNSUPPORTED_ENGINE",
            Self::SelectionCancelled => "SELECTION_CANCELLED",
            Self::Subprocess(_) => "SUBPROCESS_FAILED",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Create a fetch error naming the API call that failed
    pub fn fetch(call: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Fetch { call: call.into(), detail: detail.into() }
    }

    /// Create an unsupported-engine error
    pub fn unsupported_engine(engine: impl Into<String>) -> Self {
        Self::UnsupportedEngine(engine.into())
    }

    /// Create a subprocess error
    pub fn subprocess(message: impl Into<String>) -> Self {
        Self::Subprocess(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for rdshell operations
pub type Result<T> = std::result::Result<T, RdshellError>;
