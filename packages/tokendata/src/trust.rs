//! Trust decision shared by the sync and async verification engines
//!
//! Verification runs `PARSE -> VERIFY -> DECODE -> TRUSTED`. A failure at any
//! stage moves straight to `UNTRUSTED`; there is no partial trust and no
//! retry. Internally the outcome is tagged with the failing stage so it can
//! be logged, but callers only ever see [`Claims`], empty when untrusted.

use crate::algorithm::Algorithm;
use crate::codec::{self, TokenParts};
use crate::keys::VerifyingKey;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Deref;
use tokendata_common::LoggingTransformer;

/// Verification stage at which a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    /// Splitting the token and decoding the signature segment
    Parse,
    /// Running the signature primitive
    Verify,
    /// Decoding the base64 payload and parsing its JSON
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Parse => "parse",
            Stage::Verify => "verify",
            Stage::Decode => "decode",
        })
    }
}

/// Why a token was not trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub(crate) stage: Stage,
    pub(crate) reason: &'static str,
}

impl Rejection {
    const fn new(stage: Stage, reason: &'static str) -> Self {
        Self { stage, reason }
    }
}

/// Tagged verification outcome
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Trust {
    Trusted(Value),
    Untrusted(Rejection),
}

impl Trust {
    /// Run every stage synchronously
    pub(crate) fn evaluate(key: &VerifyingKey, token: &str) -> Self {
        let parsed = match Parsed::from_token(key, token) {
            Ok(parsed) => parsed,
            Err(rejection) => return Trust::Untrusted(rejection),
        };
        if !key.verify(parsed.payload.as_bytes(), &parsed.signature) {
            return Trust::signature_mismatch();
        }
        Trust::decode(parsed.payload)
    }

    /// Decode a payload whose signature has already been verified
    pub(crate) fn decode(payload: &str) -> Self {
        let Some(json) = codec::decode_payload(payload) else {
            return Trust::Untrusted(Rejection::new(Stage::Decode, "malformed base64 payload"));
        };
        match serde_json::from_slice(&json) {
            Ok(value) => Trust::Trusted(value),
            Err(_) => Trust::Untrusted(Rejection::new(Stage::Decode, "malformed JSON payload")),
        }
    }

    /// Verification primitive reported failure
    pub(crate) const fn signature_mismatch() -> Self {
        Trust::Untrusted(Rejection::new(Stage::Verify, "signature mismatch"))
    }

    /// Verification result never arrived
    pub(crate) const fn verifier_lost() -> Self {
        Trust::Untrusted(Rejection::new(Stage::Verify, "verification task ended without a result"))
    }

    /// Collapse to the public contract, logging the reason for rejection
    pub(crate) fn into_claims(self, algorithm: Algorithm) -> Claims {
        match self {
            Trust::Trusted(Value::Object(map)) => Claims(map),
            Trust::Trusted(_) => {
                LoggingTransformer::log_token_rejected(
                    Stage::Decode,
                    algorithm,
                    "payload is not a JSON object",
                );
                Claims::default()
            }
            Trust::Untrusted(rejection) => {
                LoggingTransformer::log_token_rejected(rejection.stage, algorithm, rejection.reason);
                Claims::default()
            }
        }
    }
}

/// A token that made it through the parse stage
pub(crate) struct Parsed<'a> {
    pub(crate) payload: &'a str,
    pub(crate) signature: Vec<u8>,
}

impl<'a> Parsed<'a> {
    pub(crate) fn from_token(key: &VerifyingKey, token: &'a str) -> Result<Self, Rejection> {
        let TokenParts { signature, payload } = codec::split_at(token, key.signature_len());
        if payload.is_empty() {
            return Err(Rejection::new(Stage::Parse, "token shorter than signature segment"));
        }
        let signature = codec::decode_signature(signature)
            .ok_or(Rejection::new(Stage::Parse, "malformed signature segment"))?;
        Ok(Self { payload, signature })
    }
}

/// Claims carried by a trusted token
///
/// Always a plain JSON object. Empty claims are the single signal that a
/// token must not be trusted; there is no separate error value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Empty, untrusted claims
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether these claims came from a verified token with content
    #[must_use]
    pub fn is_trusted(&self) -> bool {
        !self.0.is_empty()
    }

    /// Consume into the underlying JSON map
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Deserialize the claims into a caller-defined type
    ///
    /// # Errors
    /// Returns the serde error when the claims do not match `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

impl Deref for Claims {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Claims> for Value {
    fn from(claims: Claims) -> Self {
        Value::Object(claims.0)
    }
}

impl PartialEq<Value> for Claims {
    fn eq(&self, other: &Value) -> bool {
        other.as_object() == Some(&self.0)
    }
}

impl IntoIterator for Claims {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
