//! Key normalization and parsing
//!
//! Keys arrive as PEM text or as raw bytes holding PEM text. They are
//! normalized to text once and parsed once per signer/parser; the parsed key
//! is then shared read-only across every token operation.

use crate::algorithm::{Algorithm, ES256_SIGNATURE_LEN};
use crate::crypto::{es256, rs256};
use crate::error::{TokenError, TokenResult};
use std::fmt;
use tokendata_common::LoggingTransformer;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Key material as supplied by the caller
///
/// Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub enum KeyMaterial {
    /// PEM text
    Text(String),
    /// Raw buffer holding PEM text
    Bytes(Vec<u8>),
}

impl KeyMaterial {
    /// Normalize to the PEM text form the crypto primitives expect
    ///
    /// Bytes are decoded as UTF-8; text is returned unchanged. The PEM
    /// structure itself is not checked here.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` when a byte buffer is not UTF-8.
    pub fn normalize(&self) -> TokenResult<Zeroizing<String>> {
        match self {
            KeyMaterial::Text(text) => Ok(Zeroizing::new(text.clone())),
            KeyMaterial::Bytes(bytes) => std::str::from_utf8(bytes)
                .map(|text| Zeroizing::new(text.to_owned()))
                .map_err(|_| TokenError::invalid_key("Key bytes are not valid UTF-8 text")),
        }
    }

    /// Whether no usable key text was supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            KeyMaterial::Text(text) => text.trim().is_empty(),
            KeyMaterial::Bytes(bytes) => bytes.iter().all(u8::is_ascii_whitespace),
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Text(_) => f.write_str("KeyMaterial::Text(<redacted>)"),
            KeyMaterial::Bytes(_) => f.write_str("KeyMaterial::Bytes(<redacted>)"),
        }
    }
}

impl From<String> for KeyMaterial {
    fn from(text: String) -> Self {
        KeyMaterial::Text(text)
    }
}

impl From<&String> for KeyMaterial {
    fn from(text: &String) -> Self {
        KeyMaterial::Text(text.clone())
    }
}

impl From<&str> for KeyMaterial {
    fn from(text: &str) -> Self {
        KeyMaterial::Text(text.to_owned())
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(bytes: Vec<u8>) -> Self {
        KeyMaterial::Bytes(bytes)
    }
}

impl From<&Vec<u8>> for KeyMaterial {
    fn from(bytes: &Vec<u8>) -> Self {
        KeyMaterial::Bytes(bytes.clone())
    }
}

impl From<&[u8]> for KeyMaterial {
    fn from(bytes: &[u8]) -> Self {
        KeyMaterial::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for KeyMaterial {
    fn from(bytes: [u8; N]) -> Self {
        KeyMaterial::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for KeyMaterial {
    fn from(bytes: &[u8; N]) -> Self {
        KeyMaterial::Bytes(bytes.to_vec())
    }
}

/// An absent key becomes empty material, rejected at construction
impl<K: Into<KeyMaterial>> From<Option<K>> for KeyMaterial {
    fn from(key: Option<K>) -> Self {
        key.map_or_else(|| KeyMaterial::Text(String::new()), Into::into)
    }
}

/// Normalize a key to PEM text
///
/// # Errors
/// Returns `TokenError::InvalidKey` when a byte buffer is not UTF-8.
pub fn normalize(key: impl Into<KeyMaterial>) -> TokenResult<Zeroizing<String>> {
    key.into().normalize()
}

/// Normalize and require non-empty key text
fn load_text(key: KeyMaterial) -> TokenResult<Zeroizing<String>> {
    if key.is_empty() {
        return Err(TokenError::MissingKey);
    }
    key.normalize()
}

/// Parsed public key bound to its algorithm
pub(crate) enum VerifyingKey {
    Es256(p256::ecdsa::VerifyingKey),
    Rs256(rs256::Rs256VerifyingKey),
}

impl VerifyingKey {
    /// Normalize, validate and parse a public key for `algorithm`
    pub(crate) fn load(algorithm: Algorithm, key: KeyMaterial) -> TokenResult<Self> {
        let pem = load_text(key)?;
        let parsed = match algorithm {
            Algorithm::Es256 => VerifyingKey::Es256(es256::verifying_key_from_pem(&pem)?),
            Algorithm::Rs256 => VerifyingKey::Rs256(rs256::verifying_key_from_pem(&pem)?),
        };
        LoggingTransformer::log_key_loaded("verify", algorithm, &pem);
        Ok(parsed)
    }

    pub(crate) fn algorithm(&self) -> Algorithm {
        match self {
            VerifyingKey::Es256(_) => Algorithm::Es256,
            VerifyingKey::Rs256(_) => Algorithm::Rs256,
        }
    }

    /// Split offset for tokens verified with this key
    pub(crate) fn signature_len(&self) -> usize {
        match self {
            VerifyingKey::Es256(_) => ES256_SIGNATURE_LEN,
            VerifyingKey::Rs256(key) => key.signature_len(),
        }
    }

    /// The verification primitive: does `signature` validate `message`
    pub(crate) fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            VerifyingKey::Es256(key) => es256::verify(key, message, signature),
            VerifyingKey::Rs256(key) => rs256::verify(key, message, signature),
        }
    }
}

/// Parsed private key bound to its algorithm
pub(crate) enum SigningKey {
    Es256(p256::ecdsa::SigningKey),
    Rs256(rsa::pkcs1v15::SigningKey<rsa::sha2::Sha256>),
}

impl SigningKey {
    /// Normalize, validate and parse a private key for `algorithm`
    pub(crate) fn load(algorithm: Algorithm, key: KeyMaterial) -> TokenResult<Self> {
        let pem = load_text(key)?;
        let parsed = match algorithm {
            Algorithm::Es256 => SigningKey::Es256(es256::signing_key_from_pem(&pem)?),
            Algorithm::Rs256 => SigningKey::Rs256(rs256::signing_key_from_pem(&pem)?),
        };
        LoggingTransformer::log_key_loaded("sign", algorithm, &pem);
        Ok(parsed)
    }

    pub(crate) fn algorithm(&self) -> Algorithm {
        match self {
            SigningKey::Es256(_) => Algorithm::Es256,
            SigningKey::Rs256(_) => Algorithm::Rs256,
        }
    }

    /// Raw signature over `message`
    pub(crate) fn sign(&self, message: &[u8]) -> TokenResult<Vec<u8>> {
        match self {
            SigningKey::Es256(key) => es256::sign(key, message),
            SigningKey::Rs256(key) => rs256::sign(key, message),
        }
    }
}
