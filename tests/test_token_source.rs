mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use prixfixe_client::client::{ClientCredentialsTokenSource, TokenSource};
use prixfixe_client::models::Recipe;
use prixfixe_client::{Context, ErrorKind, PrixfixeClient};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("client-id:client-secret")
const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("scope=household_member"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fetched-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn token_source(server: &MockServer) -> ClientCredentialsTokenSource {
    ClientCredentialsTokenSource::new(
        "client-id",
        "client-secret",
        common::server_url(server).join("/oauth2/token").unwrap(),
        vec!["household_member".to_string()],
        reqwest::Client::new(),
    )
}

#[tokio::test]
async fn test_token_is_fetched_once_and_cached() {
    common::init_test_logging();
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    let source = Arc::new(token_source(&server));
    let ctx = Context::background();

    let (first, second) = tokio::join!(source.token(&ctx), source.token(&ctx));
    let first = first.unwrap();
    let second = second.unwrap();

    assert_eq!(first.access_token, "fetched-token");
    assert_eq!(first.access_token, second.access_token);
    assert!(first.expiry.is_some());

    let third = source.token(&ctx).await.unwrap();
    assert_eq!(third.access_token, "fetched-token");
}

#[tokio::test]
async fn test_short_lived_token_is_refetched() {
    common::init_test_logging();
    let server = MockServer::start().await;

    // Lifetimes inside the ten second expiry margin are stale on arrival.
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "short-lived",
            "token_type": "Bearer",
            "expires_in": 5
        })))
        .expect(2)
        .mount(&server)
        .await;

    let source = token_source(&server);
    let ctx = Context::background();

    let first = source.token(&ctx).await.unwrap();
    let second = source.token(&ctx).await.unwrap();

    assert_eq!(first.access_token, "short-lived");
    assert_eq!(second.access_token, "short-lived");
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once_for_concurrent_callers() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "short-lived",
            "token_type": "Bearer",
            "expires_in": 1
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_token_endpoint(&server, 1).await;

    let source = Arc::new(token_source(&server));
    let ctx = Context::background();

    let stale = source.token(&ctx).await.unwrap();
    assert_eq!(stale.access_token, "short-lived");

    let (a, b, c) = tokio::join!(source.token(&ctx), source.token(&ctx), source.token(&ctx));
    for token in [a.unwrap(), b.unwrap(), c.unwrap()] {
        assert_eq!(token.access_token, "fetched-token");
    }

    assert_eq!(source.token(&ctx).await.unwrap().access_token, "fetched-token");
}

#[tokio::test]
async fn test_rejected_credentials() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})))
        .mount(&server)
        .await;

    let err = token_source(&server)
        .token(&Context::background())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TokenAcquisition);
}

#[tokio::test]
async fn test_empty_access_token_is_rejected() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": ""})))
        .mount(&server)
        .await;

    let err = token_source(&server)
        .token(&Context::background())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TokenAcquisition);
}

#[tokio::test]
async fn test_client_attaches_fetched_token() {
    common::init_test_logging();
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/1"))
        .and(header("authorization", "Bearer fetched-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "pho"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = PrixfixeClient::builder(common::server_url(&server))
        .credentials("client-id", "client-secret")
        .scopes(["household_member"])
        .build()
        .unwrap();

    let ctx = Context::background();
    let recipe = client.get::<Recipe>(&ctx, [], 1).await.unwrap();
    assert_eq!(recipe.name, "pho");

    client.get::<Recipe>(&ctx, [], 1).await.unwrap();
}

#[tokio::test]
async fn test_token_failure_stops_the_request() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let client = PrixfixeClient::new(
        "client-id",
        "client-secret",
        common::server_url(&server),
        vec!["household_member".to_string()],
    )
    .unwrap();

    let err = client
        .get::<Recipe>(&Context::background(), [], 1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TokenAcquisition);
}
