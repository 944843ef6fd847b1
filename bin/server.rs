// NUBAN Validator - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use nuban_validator::{api, Config, Validator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🌐 NUBAN Validator - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::from_env()?;
    let validator = Validator::from_config(&config).context("Failed to build provider client")?;

    for provider in nuban_validator::Provider::ALL {
        if config.provider(provider).secret_key.is_none() {
            tracing::warn!(%provider, var = provider.secret_key_var(), "no secret key, lookups will fail");
        }
    }

    let app = api::router(validator);

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server_addr))?;

    println!("\n🚀 Server running on http://{}", config.server_addr);
    println!("   API: http://{}/api/banks", config.server_addr);
    println!("   Default provider: {}", config.default_provider);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
