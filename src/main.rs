use prixfixe_client::config::{BootstrapCredentials, ClientConfig};
use prixfixe_client::models::{QueryFilter, ValidInstrument};
use prixfixe_client::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    let timeout = config.timeout;
    let has_credentials = config.has_credentials();
    let scopes = config.scopes.clone();
    let base_url = config.base_url.clone();

    let client = config.into_client()?;

    tracing::info!("Checking readiness of {}...", base_url);
    if !client.is_up(&Context::with_timeout(timeout)).await {
        tracing::error!("Server at {} is not ready", base_url);
        tracing::error!("Please verify:");
        tracing::error!("  - PRIXFIXE_BASE_URL is correct: {}", base_url);
        tracing::error!("  - the server is running and accessible");
        std::process::exit(1);
    }
    tracing::info!("Server is ready");

    if let Some(bootstrap) = BootstrapCredentials::from_env() {
        tracing::info!("Registering OAuth2 client {:?}...", bootstrap.client_name);

        let ctx = Context::with_timeout(timeout);
        let cookie = client.login(&ctx, &bootstrap.login_input()).await?;
        let registered = client
            .create_oauth2_client(&ctx, Some(&cookie), &bootstrap.oauth2_client_input(&scopes))
            .await?;

        println!("PRIXFIXE_CLIENT_ID={}", registered.client_id);
        println!("PRIXFIXE_CLIENT_SECRET={}", registered.client_secret);
    }

    if has_credentials {
        tracing::info!("Testing API access with client credentials...");
        let filter = QueryFilter::default_filter();
        match client
            .list::<ValidInstrument>(&Context::with_timeout(timeout), [], Some(&filter))
            .await
        {
            Ok(instruments) => {
                tracing::info!(
                    "API access test passed ({} valid instruments)",
                    instruments.pagination.total_count
                );
            }
            Err(e) => {
                tracing::warn!("API access test failed: {}", e);
                tracing::warn!("Check that the OAuth2 client has the scopes it needs.");
            }
        }
    }

    Ok(())
}
