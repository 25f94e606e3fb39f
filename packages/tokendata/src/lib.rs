//! Compact signed tokens for stateless claims propagation
//!
//! An issuer serializes a JSON payload, base64-encodes it, signs the base64
//! text and prepends the signature. A verifier holding only the public key
//! splits the token at a fixed offset, checks the signature and only then
//! decodes the payload.
//!
//! ```text
//! token = base64url(signature) || base64(json(payload))
//!         \___ 86 chars ES256 ___/
//! ```
//!
//! This crate provides:
//! - A pure token codec ([`split`], [`join`])
//! - Key normalization from PEM text or bytes ([`KeyMaterial`])
//! - ES256 and RS256 signing ([`Signer`], [`sign`])
//! - Fail-closed sync and async verification ([`Parser`], [`AsyncParser`])
//! - A header adapter for HTTP frameworks ([`TokenData`])
//!
//! Verification never errors. An untrusted token, whatever the reason, yields
//! empty [`Claims`]; callers treat empty claims as "do not trust".

mod algorithm;
mod async_parser;
pub mod codec;
mod config;
pub(crate) mod crypto;
mod error;
mod keys;
mod middleware;
mod parser;
mod signer;
mod trust;

pub use algorithm::{Algorithm, ES256_SIGNATURE_BYTES, ES256_SIGNATURE_LEN};
pub use async_parser::{AsyncParser, ClaimsFuture, async_parser};
pub use codec::{TokenParts, join, split, split_at};
pub use config::TokenDataConfig;
pub use error::{TokenError, TokenResult};
pub use keys::{KeyMaterial, normalize};
pub use middleware::{DEFAULT_HEADER_NAME, HeaderSource, TokenData};
pub use parser::{Parser, parser};
pub use signer::{Signer, sign};
pub use trust::Claims;

// Logging setup lives in the common crate; re-exported for convenience
pub use tokendata_common::LoggingTransformer;
