// SPDX-License-Identifier: Apache-2.0

//! Error types for Labelbot.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during Labelbot operations.
#[derive(Error, Debug)]
pub enum LabelbotError {
    /// GitHub API error from octocrab.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// Key-phrase service error (non-200 response).
    ///
    /// Note: the event handler never sees this error. The key-phrase client
    /// degrades failures to an empty extraction; this variant exists for the
    /// client internals and for logging.
    #[error("key-phrase service error (HTTP {status}): {message}")]
    KeyPhrase {
        /// Error message from the service.
        message: String,
        /// HTTP status code returned by the service.
        status: u16,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Sample catalog data error.
    #[error("Sample catalog error: {message}")]
    Catalog {
        /// Error message.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<octocrab::Error> for LabelbotError {
    fn from(err: octocrab::Error) -> Self {
        LabelbotError::GitHub {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for LabelbotError {
    fn from(err: config::ConfigError) -> Self {
        LabelbotError::Config {
            message: err.to_string(),
        }
    }
}
