//! Token configuration
//!
//! The only external inputs are the key pair, the algorithm and the header
//! name. `TokenDataConfig` gathers them in one serde-friendly value that can
//! be embedded in an application's own configuration file. Loading keys from
//! files or the environment is left to the application.

use crate::algorithm::Algorithm;
use crate::async_parser::AsyncParser;
use crate::error::{TokenError, TokenResult};
use crate::middleware::{DEFAULT_HEADER_NAME, TokenData};
use crate::parser::Parser;
use crate::signer::Signer;
use serde::{Deserialize, Serialize};

/// Signer/verifier configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenDataConfig {
    /// Signature scheme shared by signer and verifier
    pub algorithm: Algorithm,
    /// Request header carrying the token
    pub header_name: String,
    /// PEM public key used for verification
    pub public_key: Option<String>,
    /// PEM private key used for signing
    pub private_key: Option<String>,
}

impl Default for TokenDataConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            header_name: DEFAULT_HEADER_NAME.to_string(),
            public_key: None,
            private_key: None,
        }
    }
}

impl TokenDataConfig {
    /// Empty configuration with ES256 and the `Token` header
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the algorithm
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the header name
    #[must_use]
    pub fn with_header_name(mut self, header_name: impl Into<String>) -> Self {
        self.header_name = header_name.into();
        self
    }

    /// Set the PEM public key
    #[must_use]
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    /// Set the PEM private key
    #[must_use]
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Synchronous parser for the configured public key
    ///
    /// # Errors
    /// `TokenError::MissingKey` without a public key, or any key parsing error.
    pub fn parser(&self) -> TokenResult<Parser> {
        Parser::with_algorithm(self.algorithm, self.public_key.as_deref())
    }

    /// Asynchronous parser for the configured public key
    ///
    /// # Errors
    /// Same as [`TokenDataConfig::parser`].
    pub fn async_parser(&self) -> TokenResult<AsyncParser> {
        self.parser().map(AsyncParser::from)
    }

    /// Signer for the configured private key
    ///
    /// # Errors
    /// `TokenError::MissingKey` without a private key, or any key parsing error.
    pub fn signer(&self) -> TokenResult<Signer> {
        Signer::with_algorithm(self.algorithm, self.private_key.as_deref())
    }

    /// Header adapter for the configured public key and header name
    ///
    /// # Errors
    /// Same as [`TokenDataConfig::parser`], or `TokenError::InvalidConfig`
    /// for an empty header name.
    pub fn token_data(&self) -> TokenResult<TokenData> {
        if self.header_name.trim().is_empty() {
            return Err(TokenError::invalid_config("header name must not be empty"));
        }
        Ok(TokenData::with_header_name(self.parser()?, self.header_name.trim()))
    }
}

impl std::fmt::Debug for TokenDataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDataConfig")
            .field("algorithm", &self.algorithm)
            .field("header_name", &self.header_name)
            .field("public_key", &self.public_key.is_some())
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
