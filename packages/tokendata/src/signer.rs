//! Signing engine
//!
//! Serializes a payload to JSON, base64-encodes it, signs the base64 text and
//! prepends the base64url signature. Unlike verification, signing has no
//! silent failure mode: every problem is returned to the caller.

use crate::algorithm::Algorithm;
use crate::codec;
use crate::error::TokenResult;
use crate::keys::{KeyMaterial, SigningKey};
use serde::Serialize;
use std::sync::Arc;
use tokendata_common::LoggingTransformer;

/// Reusable token signer bound to one private key
///
/// The key is parsed once at construction. Cloning is cheap and clones share
/// the parsed key.
#[derive(Clone)]
pub struct Signer {
    key: Arc<SigningKey>,
}

impl Signer {
    /// ES256 signer from a PEM private key (PKCS#8 or SEC1)
    ///
    /// # Errors
    /// `TokenError::MissingKey` for an absent or empty key,
    /// `TokenError::InvalidKey` when the key cannot be parsed.
    pub fn new(private_key: impl Into<KeyMaterial>) -> TokenResult<Self> {
        Self::with_algorithm(Algorithm::Es256, private_key)
    }

    /// Signer for an explicit algorithm
    ///
    /// # Errors
    /// `TokenError::MissingKey` for an absent or empty key,
    /// `TokenError::InvalidKey` when the key does not fit `algorithm`.
    pub fn with_algorithm(
        algorithm: Algorithm,
        private_key: impl Into<KeyMaterial>,
    ) -> TokenResult<Self> {
        let key = SigningKey::load(algorithm, private_key.into())?;
        Ok(Self { key: Arc::new(key) })
    }

    /// Algorithm tokens are signed with
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.key.algorithm()
    }

    /// Sign `data` into a token
    ///
    /// # Errors
    /// `TokenError::Serialization` when `data` cannot be represented as JSON,
    /// `TokenError::Signing` if the signature primitive fails.
    pub fn sign<T: Serialize + ?Sized>(&self, data: &T) -> TokenResult<String> {
        self.try_sign(data).inspect_err(|e| {
            LoggingTransformer::log_signing_error(self.algorithm(), e);
        })
    }

    fn try_sign<T: Serialize + ?Sized>(&self, data: &T) -> TokenResult<String> {
        let json = serde_json::to_vec(data)?;
        let payload = codec::encode_payload(&json);
        let signature = self.key.sign(payload.as_bytes())?;
        Ok(codec::join(&codec::encode_signature(&signature), &payload))
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

/// Sign `data` with an ES256 private key
///
/// Parses the key on every call; keep a [`Signer`] around when issuing many
/// tokens.
///
/// # Errors
/// Any key or serialization error from [`Signer::new`] and [`Signer::sign`].
pub fn sign<T: Serialize + ?Sized>(
    data: &T,
    private_key: impl Into<KeyMaterial>,
) -> TokenResult<String> {
    Signer::new(private_key)?.sign(data)
}
