//! Header-facing adapter for HTTP frameworks
//!
//! The core never touches requests. [`TokenData`] is the thin boundary a
//! server framework calls per request: read one header, hand it to the
//! parser, attach the resulting claims (possibly empty) to the request.

use crate::async_parser::{AsyncParser, ClaimsFuture};
use crate::parser::Parser;
use crate::trust::Claims;
use std::collections::HashMap;

/// Header read when no other name is configured
pub const DEFAULT_HEADER_NAME: &str = "Token";

/// Anything a single header value can be read from
///
/// Lookups are case-insensitive, as HTTP header names are.
pub trait HeaderSource {
    /// Value of header `name`, if present and valid text
    fn header_value(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for http::HeaderMap {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

impl<B> HeaderSource for http::Request<B> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.headers().header_value(name)
    }
}

impl HeaderSource for HashMap<String, String> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Per-request token extraction bound to a parser and a header name
#[derive(Debug, Clone)]
pub struct TokenData {
    parser: Parser,
    header_name: String,
}

impl TokenData {
    /// Read tokens from the default `Token` header
    #[must_use]
    pub fn new(parser: Parser) -> Self {
        Self::with_header_name(parser, DEFAULT_HEADER_NAME)
    }

    /// Read tokens from a custom header
    #[must_use]
    pub fn with_header_name(parser: Parser, header_name: impl Into<String>) -> Self {
        Self {
            parser,
            header_name: header_name.into(),
        }
    }

    /// Header tokens are read from
    #[must_use]
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Parser tokens are verified with
    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Claims for one request, empty when the header is absent or untrusted
    #[must_use]
    pub fn claims<H: HeaderSource + ?Sized>(&self, headers: &H) -> Claims {
        headers
            .header_value(&self.header_name)
            .map(|token| self.parser.parse(token))
            .unwrap_or_default()
    }

    /// Asynchronous variant of [`TokenData::claims`]
    pub fn claims_async<H: HeaderSource + ?Sized>(&self, headers: &H) -> ClaimsFuture {
        let parser = AsyncParser::from(self.parser.clone());
        parser.parse(headers.header_value(&self.header_name).unwrap_or_default())
    }

    /// Store the request's claims in its extensions
    ///
    /// Afterwards `request.extensions().get::<Claims>()` is always `Some`,
    /// holding empty claims when the token is missing or untrusted.
    pub fn attach<B>(&self, request: &mut http::Request<B>) {
        let claims = self.claims(&*request);
        request.extensions_mut().insert(claims);
    }

    /// Asynchronous variant of [`TokenData::attach`]
    pub async fn attach_async<B>(&self, request: &mut http::Request<B>) {
        let claims = self.claims_async(&*request).await;
        request.extensions_mut().insert(claims);
    }
}
