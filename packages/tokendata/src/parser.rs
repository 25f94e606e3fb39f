//! Synchronous verification engine
//!
//! A [`Parser`] is bound to one public key at construction and turns tokens
//! into [`Claims`]. It never fails and never returns partially trusted data:
//! any malformed segment, bad signature or undecodable payload yields empty
//! claims.

use crate::algorithm::Algorithm;
use crate::error::TokenResult;
use crate::keys::{KeyMaterial, VerifyingKey};
use crate::trust::{Claims, Trust};
use std::sync::Arc;

/// Reusable token parser bound to one public key
///
/// `Send + Sync` and cheap to clone; clones share the parsed key.
#[derive(Clone)]
pub struct Parser {
    pub(crate) key: Arc<VerifyingKey>,
}

impl Parser {
    /// ES256 parser from an SPKI PEM public key
    ///
    /// # Errors
    /// `TokenError::MissingKey` for an absent or empty key,
    /// `TokenError::InvalidKey` when the key cannot be parsed.
    pub fn new(public_key: impl Into<KeyMaterial>) -> TokenResult<Self> {
        Self::with_algorithm(Algorithm::Es256, public_key)
    }

    /// Parser for an explicit algorithm
    ///
    /// # Errors
    /// `TokenError::MissingKey` for an absent or empty key,
    /// `TokenError::InvalidKey` when the key does not fit `algorithm`.
    pub fn with_algorithm(
        algorithm: Algorithm,
        public_key: impl Into<KeyMaterial>,
    ) -> TokenResult<Self> {
        let key = VerifyingKey::load(algorithm, public_key.into())?;
        Ok(Self { key: Arc::new(key) })
    }

    /// Algorithm tokens are verified with
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.key.algorithm()
    }

    /// Characters occupied by the signature at the front of a token
    #[must_use]
    pub fn signature_len(&self) -> usize {
        self.key.signature_len()
    }

    /// Verify `token` and return its claims, or empty claims if untrusted
    #[must_use]
    pub fn parse(&self, token: impl AsRef<str>) -> Claims {
        Trust::evaluate(&self.key, token.as_ref()).into_claims(self.algorithm())
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("algorithm", &self.algorithm())
            .field("signature_len", &self.signature_len())
            .finish_non_exhaustive()
    }
}

/// Build an ES256 token parser function
///
/// # Errors
/// Same as [`Parser::new`].
pub fn parser(
    public_key: impl Into<KeyMaterial>,
) -> TokenResult<impl Fn(&str) -> Claims + Clone + Send + Sync> {
    let parser = Parser::new(public_key)?;
    Ok(move |token: &str| parser.parse(token))
}
