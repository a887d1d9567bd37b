#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use prixfixe_client::client::{PrixfixeClient, StaticTokenSource};
use url::Url;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-access-token";

pub struct TestEnvironment {
    pub server: MockServer,
    pub client: PrixfixeClient,
}

impl TestEnvironment {
    /// A mock API server and a client that authenticates with a static bearer token.
    pub async fn new() -> Self {
        init_test_logging();

        let server = MockServer::start().await;
        let client = PrixfixeClient::builder(server_url(&server))
            .token_source(Arc::new(StaticTokenSource::new(TEST_TOKEN)))
            .timeout(Duration::from_secs(5))
            .debug(true)
            .build()
            .expect("Failed to build test client");

        Self { server, client }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", TEST_TOKEN)
    }
}

pub fn server_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).expect("Mock server URI should parse")
}

/// A client whose base URL cannot carry a path, so every request fails to build.
pub fn invalid_client() -> PrixfixeClient {
    init_test_logging();

    PrixfixeClient::builder(Url::parse("mailto:chef@prixfixe.app").expect("valid mailto URL"))
        .token_source(Arc::new(StaticTokenSource::new(TEST_TOKEN)))
        .build()
        .expect("Failed to build invalid client")
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".to_string().into()),
        )
        .with_test_writer()
        .try_init();
}
