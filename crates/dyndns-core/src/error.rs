//! Error types for the dyndns system
//!
//! One variant per failure class. Every variant is fatal for the current
//! invocation; retry belongs to the external scheduler.

use thiserror::Error;

/// Result type alias for dyndns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dyndns system
#[derive(Error, Debug)]
pub enum Error {
    /// Missing, empty, or unrecognized configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Push-mode shared secret missing or mismatched
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Push-mode request parameter absent
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// HTTP transport failure (IP-echo service or provider API)
    #[error("network error: {0}")]
    Network(String),

    /// The configured domain has no zone at the provider
    #[error("domain not found: {0}")]
    DomainNotFound(String),

    /// Non-success response from the provider API
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Human-readable message from the provider
        message: String,
    },

    /// Address cache could not be read or written
    #[error("cache error: {0}")]
    Cache(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a missing-parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a domain-not-found error
    pub fn domain_not_found(domain: impl Into<String>) -> Self {
        Self::DomainNotFound(domain.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }
}
