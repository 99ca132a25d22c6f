use std::sync::Arc;

use anyhow::Context;
use nitsat_backend::{config::Config, routes, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nitsat_backend=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env()?;
    if config.provider.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; chat turns will get the fallback reply");
    }
    if config.contacts_file.is_none() {
        tracing::warn!("CONTACTS_FILE is not set; contact submissions will only be logged");
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = routes::create_app(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, model = %config.provider.model, "site backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
