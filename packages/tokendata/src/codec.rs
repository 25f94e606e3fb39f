//! Token codec
//!
//! A token is `signature || payload`: the base64url signature occupies a fixed
//! number of leading characters and the base64 payload is everything after.
//! No cryptography happens here and nothing in this module rejects input;
//! trust decisions belong to the verification engines.

use crate::algorithm::ES256_SIGNATURE_LEN;
use base64::{
    Engine as _, alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig,
        general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    },
};

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// The two segments of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    /// Leading signature segment (base64url, unpadded)
    pub signature: &'a str,
    /// Remaining payload segment (base64 JSON)
    pub payload: &'a str,
}

/// Length of `bytes` bytes encoded as unpadded base64
#[must_use]
pub const fn encoded_len(bytes: usize) -> usize {
    (bytes * 4 + 2) / 3
}

/// Split a token at the ES256 signature offset
///
/// Never fails. A token shorter than the offset yields the whole input as the
/// signature and an empty payload.
#[must_use]
pub fn split(token: &str) -> TokenParts<'_> {
    split_at(token, ES256_SIGNATURE_LEN)
}

/// Split a token after `signature_len` characters
///
/// The offset counts characters rather than bytes so arbitrary text never
/// lands in the middle of a code point.
#[must_use]
pub fn split_at(token: &str, signature_len: usize) -> TokenParts<'_> {
    let boundary = token
        .char_indices()
        .nth(signature_len)
        .map_or(token.len(), |(index, _)| index);
    let (signature, payload) = token.split_at(boundary);
    TokenParts { signature, payload }
}

/// Build a token from its segments
#[must_use]
pub fn join(signature: &str, payload: &str) -> String {
    let mut token = String::with_capacity(signature.len() + payload.len());
    token.push_str(signature);
    token.push_str(payload);
    token
}

/// Encode serialized payload bytes as standard, padded base64
#[must_use]
pub fn encode_payload(json: &[u8]) -> String {
    STANDARD.encode(json)
}

/// Decode a payload segment
///
/// Accepts the standard and url-safe alphabets, with or without padding.
#[must_use]
pub fn decode_payload(payload: &str) -> Option<Vec<u8>> {
    STANDARD_LENIENT
        .decode(payload)
        .or_else(|_| URL_SAFE_LENIENT.decode(payload))
        .ok()
}

/// Encode raw signature bytes as unpadded base64url
#[must_use]
pub fn encode_signature(signature: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(signature)
}

/// Decode a signature segment, strictly unpadded base64url
#[must_use]
pub fn decode_signature(signature: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(signature).ok()
}
