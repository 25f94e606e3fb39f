//! Signature primitives behind the signing and verification engines

pub(crate) mod es256;
pub(crate) mod rs256;
