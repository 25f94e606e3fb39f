//! Production-grade structured logging infrastructure
//!
//! Provides `tracing-subscriber` based logging with secure handling of key
//! material. Token contents and keys are never written to logs; keys are
//! referenced by a truncated SHA-256 fingerprint instead.

use sha2::{Digest, Sha256};
use std::fmt::Display;
use std::sync::Once;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

static INIT_LOGGER: Once = Once::new();

/// Number of hex characters kept from a key fingerprint.
const FINGERPRINT_LEN: usize = 12;

/// Production logging infrastructure using `tracing-subscriber`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs, including token rejections
    /// - `RUST_LOG=info` - Enable info and above (recommended for production)
    /// - `RUST_LOG=tokendata=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            let installed = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .try_init()
                .is_ok();

            if installed {
                info!("Structured logging initialized");
            }
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs a subscriber.
    pub fn init_test() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Log that key material was parsed and bound to a signer or parser
    pub fn log_key_loaded(role: &str, algorithm: impl Display, key: &str) {
        let fingerprint = Self::key_fingerprint(key);
        debug!(role, %algorithm, %fingerprint, "key material loaded");
    }

    /// Log a token that was not trusted
    ///
    /// Only the failing stage and a static reason are recorded, never the
    /// token itself.
    pub fn log_token_rejected(stage: impl Display, algorithm: impl Display, reason: &str) {
        debug!(%stage, %algorithm, reason, "token rejected");
    }

    /// Log a failed signing attempt
    pub fn log_signing_error(algorithm: impl Display, error: &dyn std::error::Error) {
        warn!(%algorithm, %error, "token signing failed");
    }

    /// Cryptographically secure key fingerprint for logging
    ///
    /// Returns the first 12 characters of the hex-encoded SHA-256 digest of
    /// the key text, prefixed with `#`.
    #[must_use]
    pub fn key_fingerprint(key: &str) -> String {
        let hash = Sha256::digest(key.trim().as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..FINGERPRINT_LEN])
    }
}
