//! Shared key fixtures and token vectors for integration tests

#![allow(dead_code)]

/// ES256 PKCS#8 private key
pub const ES256_PRIVATE: &str = include_str!("../fixtures/es256_private.pem");
/// Same ES256 private key in SEC1 (`EC PRIVATE KEY`) form
pub const ES256_PRIVATE_SEC1: &str = include_str!("../fixtures/es256_private_sec1.pem");
/// ES256 SPKI public key matching [`ES256_PRIVATE`]
pub const ES256_PUBLIC: &str = include_str!("../fixtures/es256_public.pem");
/// Unrelated ES256 public key
pub const ES256_OTHER_PUBLIC: &str = include_str!("../fixtures/es256_other_public.pem");
/// RSA-2048 PKCS#8 private key
pub const RS256_PRIVATE: &str = include_str!("../fixtures/rs256_private.pem");
/// RSA-2048 SPKI public key matching [`RS256_PRIVATE`]
pub const RS256_PUBLIC: &str = include_str!("../fixtures/rs256_public.pem");

/// `{"userId":42,"role":"admin"}` signed with [`ES256_PRIVATE`] by Node's
/// `crypto.sign` (ieee-p1363 encoding), standard base64 payload
pub const NODE_ES256_TOKEN: &str = include_str!("../fixtures/es256_token.txt");
/// Same payload signed with [`RS256_PRIVATE`] by Node's `crypto.sign`
pub const NODE_RS256_TOKEN: &str = include_str!("../fixtures/rs256_token.txt");

/// Replace the character at `index` with a different base64 character
pub fn flip_char(token: &str, index: usize) -> String {
    token
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i != index {
                c
            } else if c == 'A' {
                'B'
            } else {
                'A'
            }
        })
        .collect()
}
