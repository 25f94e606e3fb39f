//! Asynchronous verification engine
//!
//! Splitting and signature decoding happen on the caller. The signature
//! primitive is the only blocking step, so it is handed to tokio's blocking
//! pool and its verdict comes back over a oneshot channel; the returned
//! [`ClaimsFuture`] suspends on that single channel and decodes the payload
//! once the verdict arrives. The future never fails: every failure path
//! resolves to empty claims, matching the synchronous [`Parser`].

use crate::algorithm::Algorithm;
use crate::error::TokenResult;
use crate::keys::{KeyMaterial, VerifyingKey};
use crate::parser::Parser;
use crate::trust::{Claims, Parsed, Trust};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tokio::{runtime::Handle, sync::oneshot};
use tracing::trace;

/// Reusable asynchronous token parser bound to one public key
#[derive(Clone)]
pub struct AsyncParser {
    key: Arc<VerifyingKey>,
}

impl AsyncParser {
    /// ES256 parser from an SPKI PEM public key
    ///
    /// # Errors
    /// `TokenError::MissingKey` for an absent or empty key,
    /// `TokenError::InvalidKey` when the key cannot be parsed.
    pub fn new(public_key: impl Into<KeyMaterial>) -> TokenResult<Self> {
        Self::with_algorithm(Algorithm::Es256, public_key)
    }

    /// Parser for an explicit algorithm
    ///
    /// # Errors
    /// `TokenError::MissingKey` for an absent or empty key,
    /// `TokenError::InvalidKey` when the key does not fit `algorithm`.
    pub fn with_algorithm(
        algorithm: Algorithm,
        public_key: impl Into<KeyMaterial>,
    ) -> TokenResult<Self> {
        Parser::with_algorithm(algorithm, public_key).map(Self::from)
    }

    /// Algorithm tokens are verified with
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.key.algorithm()
    }

    /// Verify `token`, resolving to its claims or to empty claims
    ///
    /// Outside a tokio runtime the signature check runs inline and the
    /// returned future is already complete.
    pub fn parse(&self, token: impl AsRef<str>) -> ClaimsFuture {
        let algorithm = self.algorithm();
        let Parsed { payload, signature } = match Parsed::from_token(&self.key, token.as_ref()) {
            Ok(parsed) => parsed,
            Err(rejection) => {
                return ClaimsFuture::ready(Trust::Untrusted(rejection).into_claims(algorithm));
            }
        };

        let key = Arc::clone(&self.key);
        let payload = payload.to_owned();
        let (tx, rx) = oneshot::channel();
        let verify = move || {
            let verified = key.verify(payload.as_bytes(), &signature);
            let _ = tx.send(Verdict { verified, payload });
        };

        match Handle::try_current() {
            Ok(handle) => drop(handle.spawn_blocking(verify)),
            Err(_) => {
                trace!(%algorithm, "no tokio runtime, verifying inline");
                verify();
            }
        }

        ClaimsFuture::verifying(rx, algorithm)
    }
}

impl From<Parser> for AsyncParser {
    fn from(parser: Parser) -> Self {
        Self { key: parser.key }
    }
}

impl From<AsyncParser> for Parser {
    fn from(parser: AsyncParser) -> Self {
        Parser { key: parser.key }
    }
}

impl std::fmt::Debug for AsyncParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncParser")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

/// Outcome of the offloaded signature check
struct Verdict {
    verified: bool,
    payload: String,
}

enum State {
    Ready(Option<Claims>),
    Verifying {
        rx: oneshot::Receiver<Verdict>,
        algorithm: Algorithm,
    },
}

/// Future for asynchronous token verification
///
/// Resolves to the token's claims, or to empty claims when the token is not
/// trusted. It never resolves to an error.
pub struct ClaimsFuture {
    state: State,
}

impl ClaimsFuture {
    fn ready(claims: Claims) -> Self {
        Self {
            state: State::Ready(Some(claims)),
        }
    }

    fn verifying(rx: oneshot::Receiver<Verdict>, algorithm: Algorithm) -> Self {
        Self {
            state: State::Verifying { rx, algorithm },
        }
    }
}

impl Future for ClaimsFuture {
    type Output = Claims;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let (received, algorithm) = match &mut self.state {
            State::Ready(claims) => return Poll::Ready(claims.take().unwrap_or_default()),
            State::Verifying { rx, algorithm } => match Pin::new(rx).poll(cx) {
                Poll::Ready(received) => (received, *algorithm),
                Poll::Pending => return Poll::Pending,
            },
        };
        self.state = State::Ready(None);

        let trust = match received {
            Ok(Verdict {
                verified: true,
                payload,
            }) => Trust::decode(&payload),
            Ok(_) => Trust::signature_mismatch(),
            Err(_) => Trust::verifier_lost(),
        };
        Poll::Ready(trust.into_claims(algorithm))
    }
}

impl std::fmt::Debug for ClaimsFuture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            State::Ready(_) => "ready",
            State::Verifying { .. } => "verifying",
        };
        f.debug_struct("ClaimsFuture").field("state", &state).finish()
    }
}

/// Build an asynchronous ES256 token parser function
///
/// # Errors
/// Same as [`AsyncParser::new`].
pub fn async_parser(
    public_key: impl Into<KeyMaterial>,
) -> TokenResult<impl Fn(&str) -> ClaimsFuture + Clone + Send + Sync> {
    let parser = AsyncParser::new(public_key)?;
    Ok(move |token: &str| parser.parse(token))
}
