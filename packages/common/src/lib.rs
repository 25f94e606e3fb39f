//! Common infrastructure shared by the tokendata crates
//!
//! This crate provides:
//! - Structured logging initialization on top of `tracing-subscriber`
//! - Key fingerprinting so logs can reference key material without exposing it

pub mod logging;

pub use logging::LoggingTransformer;
