//! Configuration and signing error types
//!
//! Verification never produces these: an untrusted token is reported as empty
//! claims. `TokenError` covers the mistakes a caller must hear about, such as
//! a missing key at construction time or a payload that cannot be serialized.

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors raised while configuring a parser/signer or while signing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No key material was supplied, or it was empty
    #[error("A valid key must be supplied in order to sign or verify tokens")]
    MissingKey,
    /// Key material could not be decoded or parsed for the chosen algorithm
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Algorithm name is not one of the supported schemes
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Configuration value is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Payload could not be serialized to JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The signature primitive failed
    #[error("Signing error: {0}")]
    Signing(String),
}

impl TokenError {
    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        TokenError::InvalidKey(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        TokenError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an invalid configuration error
    #[inline]
    #[must_use]
    pub fn invalid_config(msg: &str) -> Self {
        TokenError::InvalidConfig(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        TokenError::Serialization(msg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        TokenError::Signing(msg.to_string())
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(e: serde_json::Error) -> Self {
        TokenError::Serialization(e.to_string())
    }
}
