//! Signature scheme selection
//!
//! The algorithm is fixed per key pair and passed explicitly to both signer
//! and verifier. It determines how the signature segment is encoded and
//! therefore where a token is split.

use crate::codec::encoded_len;
use crate::error::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw `r || s` size of a P-256 ECDSA signature in bytes.
pub const ES256_SIGNATURE_BYTES: usize = 64;

/// Characters occupied by an ES256 signature at the front of a token.
///
/// A 64-byte raw signature in unpadded base64url is always 86 characters.
pub const ES256_SIGNATURE_LEN: usize = encoded_len(ES256_SIGNATURE_BYTES);

const _: () = assert!(ES256_SIGNATURE_LEN == 86);

/// Supported signature schemes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// ECDSA over P-256 with SHA-256, raw `r || s` signature encoding
    #[default]
    #[serde(rename = "ES256", alias = "es256")]
    Es256,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    #[serde(rename = "RS256", alias = "rs256")]
    Rs256,
}

impl Algorithm {
    /// JOSE name of the algorithm
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Es256 => "ES256",
            Algorithm::Rs256 => "RS256",
        }
    }

    /// Signature segment length when it does not depend on the key
    ///
    /// `None` for RSA, whose signature size follows the modulus.
    #[must_use]
    pub const fn fixed_signature_len(self) -> Option<usize> {
        match self {
            Algorithm::Es256 => Some(ES256_SIGNATURE_LEN),
            Algorithm::Rs256 => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = TokenError;

    fn from_str(s: &str) -> TokenResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ES256" => Ok(Algorithm::Es256),
            "RS256" => Ok(Algorithm::Rs256),
            _ => Err(TokenError::unsupported_algorithm(s)),
        }
    }
}
