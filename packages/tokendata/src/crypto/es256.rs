//! ES256 with ECDSA P-256 - production implementation
//!
//! Signatures use the fixed-width `r || s` encoding (64 bytes) rather than
//! DER, which is what keeps the token split offset constant.

use crate::error::{TokenError, TokenResult};
use p256::{
    SecretKey,
    ecdsa::{
        Signature, SigningKey, VerifyingKey,
        signature::{Signer, Verifier},
    },
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};

/// Parse an SPKI PEM public key
pub(crate) fn verifying_key_from_pem(pem: &str) -> TokenResult<VerifyingKey> {
    VerifyingKey::from_public_key_pem(pem.trim())
        .map_err(|_| TokenError::invalid_key("Invalid P-256 PEM public key"))
}

/// Parse a PKCS#8 or SEC1 PEM private key
pub(crate) fn signing_key_from_pem(pem: &str) -> TokenResult<SigningKey> {
    let pem = pem.trim();
    SigningKey::from_pkcs8_pem(pem)
        .or_else(|_| SecretKey::from_sec1_pem(pem).map(SigningKey::from))
        .map_err(|_| TokenError::invalid_key("Invalid P-256 PEM private key"))
}

/// Sign `message` and return the raw 64-byte signature
pub(crate) fn sign(key: &SigningKey, message: &[u8]) -> TokenResult<Vec<u8>> {
    let signature: Signature = key
        .try_sign(message)
        .map_err(|e| TokenError::signing(&e.to_string()))?;
    Ok(signature.to_bytes().to_vec())
}

/// Check a raw 64-byte signature over `message`
pub(crate) fn verify(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    match Signature::from_slice(signature) {
        Ok(signature) => key.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}
