//! Header extraction, request attachment and configuration wiring

mod support;

use http::{HeaderMap, HeaderValue, Request};
use serde_json::json;
use std::collections::HashMap;
use support::*;
use tokendata::{
    Algorithm, Claims, DEFAULT_HEADER_NAME, Parser, TokenData, TokenDataConfig, TokenError,
};

fn token_data() -> TokenData {
    TokenData::new(Parser::new(ES256_PUBLIC).expect("valid public key"))
}

#[test]
fn test_default_header_name() {
    assert_eq!(DEFAULT_HEADER_NAME, "Token");
    assert_eq!(token_data().header_name(), "Token");
}

#[test]
fn test_claims_from_header_map() {
    let mut headers = HeaderMap::new();
    headers.insert("token", HeaderValue::from_static(NODE_ES256_TOKEN));

    assert_eq!(
        token_data().claims(&headers),
        json!({ "userId": 42, "role": "admin" })
    );
}

#[test]
fn test_missing_header_yields_empty_claims() {
    assert!(token_data().claims(&HeaderMap::new()).is_empty());
}

#[test]
fn test_untrusted_header_yields_empty_claims() {
    let mut headers = HeaderMap::new();
    headers.insert("token", HeaderValue::from_static("garbage"));

    assert!(token_data().claims(&headers).is_empty());
}

#[test]
fn test_custom_header_name_on_hash_map() {
    let data = TokenData::with_header_name(
        Parser::new(ES256_PUBLIC).expect("valid public key"),
        "X-Identity",
    );

    let mut headers = HashMap::new();
    headers.insert("x-identity".to_string(), NODE_ES256_TOKEN.to_string());
    assert_eq!(data.claims(&headers), json!({ "userId": 42, "role": "admin" }));

    let mut wrong = HashMap::new();
    wrong.insert("Token".to_string(), NODE_ES256_TOKEN.to_string());
    assert!(data.claims(&wrong).is_empty());
}

#[test]
fn test_attach_stores_claims_in_extensions() {
    let mut request = Request::builder()
        .uri("/profile")
        .header("Token", NODE_ES256_TOKEN)
        .body(())
        .expect("valid request");

    token_data().attach(&mut request);

    let claims = request.extensions().get::<Claims>().expect("claims attached");
    assert_eq!(claims.get("userId"), Some(&json!(42)));
}

#[test]
fn test_attach_without_token_stores_empty_claims() {
    let mut request = Request::builder().body(()).expect("valid request");

    token_data().attach(&mut request);

    let claims = request.extensions().get::<Claims>().expect("claims attached");
    assert!(claims.is_empty());
}

#[tokio::test]
async fn test_async_attach_matches_sync() {
    let data = token_data();
    for token in [NODE_ES256_TOKEN, "garbage", ""] {
        let mut sync_request = Request::builder()
            .header("Token", token)
            .body(())
            .expect("valid request");
        let mut async_request = Request::builder()
            .header("Token", token)
            .body(())
            .expect("valid request");

        data.attach(&mut sync_request);
        data.attach_async(&mut async_request).await;

        assert_eq!(
            sync_request.extensions().get::<Claims>(),
            async_request.extensions().get::<Claims>()
        );
    }
}

#[test]
fn test_config_from_json() {
    let raw = json!({
        "algorithm": "RS256",
        "header_name": "X-Service-Token",
        "public_key": RS256_PUBLIC,
        "private_key": RS256_PRIVATE,
    });
    let config: TokenDataConfig = serde_json::from_value(raw).expect("valid config");

    assert_eq!(config.algorithm, Algorithm::Rs256);

    let signer = config.signer().expect("signer from config");
    let data = config.token_data().expect("token data from config");
    let token = signer.sign(&json!({ "svc": "orders" })).expect("signing should succeed");

    let mut headers = HeaderMap::new();
    headers.insert(
        "x-service-token",
        HeaderValue::from_str(&token).expect("token is a valid header value"),
    );
    assert_eq!(data.header_name(), "X-Service-Token");
    assert_eq!(data.claims(&headers), json!({ "svc": "orders" }));
}

#[test]
fn test_config_defaults() {
    let config: TokenDataConfig = serde_json::from_str("{}").expect("empty config");

    assert_eq!(config, TokenDataConfig::default());
    assert_eq!(config.algorithm, Algorithm::Es256);
    assert_eq!(config.header_name, "Token");
    assert_eq!(config.parser().err(), Some(TokenError::MissingKey));
    assert_eq!(config.signer().err(), Some(TokenError::MissingKey));
}

#[test]
fn test_config_builder_and_validation() {
    let config = TokenDataConfig::new()
        .with_public_key(ES256_PUBLIC)
        .with_private_key(ES256_PRIVATE)
        .with_header_name("  ");

    assert!(matches!(config.token_data(), Err(TokenError::InvalidConfig(_))));

    let config = config.with_header_name("Token").with_algorithm(Algorithm::Es256);
    let token = config
        .signer()
        .and_then(|signer| signer.sign(&json!({ "ok": true })))
        .expect("signing should succeed");
    let claims = futures::executor::block_on(
        config.async_parser().expect("async parser").parse(&token),
    );
    assert_eq!(claims, json!({ "ok": true }));

    let debug = format!("{config:?}");
    assert!(!debug.contains("BEGIN"));
}
