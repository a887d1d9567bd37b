mod common;

use std::time::Duration;

use common::TestEnvironment;
use pretty_assertions::assert_eq;
use prixfixe_client::client::{PrixfixeClient, QueryValues};
use prixfixe_client::Context;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_build_url_with_query() {
    let client = PrixfixeClient::new_simple(Url::parse("https://prixfixe.app").unwrap()).unwrap();

    let mut query = QueryValues::new();
    query.insert("key".to_string(), vec!["value1".to_string(), "value2".to_string()]);
    query.insert("yek".to_string(), vec!["eulav".to_string()]);

    let url = client.build_url(Some(&query), ["things", "and", "stuff"]).unwrap();

    assert_eq!(
        url.as_str(),
        "https://prixfixe.app/api/v1/things/and/stuff?key=value1&key=value2&yek=eulav"
    );
}

#[test]
fn test_build_websocket_url() {
    let client = PrixfixeClient::new_simple(Url::parse("https://prixfixe.app").unwrap()).unwrap();

    let url = client.build_websocket_url(["things", "and", "stuff"]).unwrap();

    assert_eq!(url.as_str(), "ws://prixfixe.app/api/v1/things/and/stuff");
}

#[test]
fn test_client_exposes_oauth2_urls_and_scopes() {
    let client = PrixfixeClient::new(
        "id",
        "secret",
        Url::parse("https://prixfixe.app/some/path").unwrap(),
        vec!["household_member".to_string()],
    )
    .unwrap();

    assert_eq!(client.token_url().as_str(), "https://prixfixe.app/oauth2/token");
    assert_eq!(client.authorization_url().as_str(), "https://prixfixe.app/oauth2/authorize");
    assert_eq!(client.scopes(), ["household_member".to_string()]);
}

#[test]
fn test_oversized_timeout_builds_client() {
    let client = PrixfixeClient::builder(Url::parse("https://prixfixe.app").unwrap())
        .timeout(Duration::from_secs(u64::MAX / 2))
        .build();

    assert!(client.is_ok());
}

#[tokio::test]
async fn test_is_up_with_unbounded_context() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/_meta_/ready"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&env.server)
        .await;

    assert!(env.client.is_up(&Context::with_timeout(Duration::MAX)).await);
}

#[tokio::test]
async fn test_is_up_when_ready() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/_meta_/ready"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&env.server)
        .await;

    assert!(env.client.is_up(&Context::background()).await);
}

#[tokio::test]
async fn test_is_up_false_on_server_error() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/_meta_/ready"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&env.server)
        .await;

    assert!(!env.client.is_up(&Context::background()).await);
}

#[tokio::test]
async fn test_is_up_false_on_timeout() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/_meta_/ready"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&env.server)
        .await;

    let ctx = Context::with_timeout(Duration::from_millis(100));
    assert!(!env.client.is_up(&ctx).await);
}

#[tokio::test]
async fn test_is_up_false_for_invalid_base_url() {
    let client = common::invalid_client();
    assert!(!client.is_up(&Context::background()).await);
}

#[tokio::test]
async fn test_health_check_is_unauthenticated_and_sets_user_agent() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/_meta_/ready"))
        .and(header("user-agent", "prixfixe Service Client"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&env.server)
        .await;

    assert!(env.client.is_up(&Context::background()).await);

    let received = env.server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}
