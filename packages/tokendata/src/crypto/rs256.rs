//! RS256 with RSASSA-PKCS1-v1_5 and SHA-256
//!
//! The signature is as wide as the modulus, so the token split offset is
//! taken from the key when it is loaded.

use crate::codec::encoded_len;
use crate::error::{TokenError, TokenResult};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs1v15::{Signature, SigningKey, VerifyingKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    sha2::Sha256,
    signature::{SignatureEncoding, Signer, Verifier},
    traits::PublicKeyParts,
};

/// Parsed RS256 verification key with its encoded signature width
pub(crate) struct Rs256VerifyingKey {
    key: VerifyingKey<Sha256>,
    signature_len: usize,
}

impl Rs256VerifyingKey {
    /// Characters the base64url signature occupies in a token
    pub(crate) fn signature_len(&self) -> usize {
        self.signature_len
    }
}

/// Parse an SPKI or PKCS#1 PEM public key
pub(crate) fn verifying_key_from_pem(pem: &str) -> TokenResult<Rs256VerifyingKey> {
    let pem = pem.trim();
    let public_key = RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| TokenError::InvalidKey(format!("Invalid RSA public key: {e}")))?;

    let signature_len = encoded_len(public_key.size());
    Ok(Rs256VerifyingKey {
        key: VerifyingKey::<Sha256>::new(public_key),
        signature_len,
    })
}

/// Parse a PKCS#8 or PKCS#1 PEM private key
pub(crate) fn signing_key_from_pem(pem: &str) -> TokenResult<SigningKey<Sha256>> {
    let pem = pem.trim();
    let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| TokenError::InvalidKey(format!("Invalid RSA private key: {e}")))?;

    Ok(SigningKey::<Sha256>::new(private_key))
}

/// Sign `message` and return the modulus-sized signature
pub(crate) fn sign(key: &SigningKey<Sha256>, message: &[u8]) -> TokenResult<Vec<u8>> {
    let signature: Signature = key
        .try_sign(message)
        .map_err(|e| TokenError::signing(&e.to_string()))?;
    Ok(signature.to_bytes().as_ref().to_vec())
}

/// Check a PKCS#1 v1.5 signature over `message`
pub(crate) fn verify(key: &Rs256VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    match Signature::try_from(signature) {
        Ok(signature) => key.key.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}
