use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod config;
mod contact;
mod gateway;
mod mapper;
mod model;
mod pages;
mod store;

use config::Config;
use contact::MailRelay;
use gateway::{ApiConfig, CricApiClient, CricketDataSource};
use pages::AppState;
use store::Database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    if config.cricket_api_key.is_none() {
        warn!("No cricket API key configured; data endpoints will fail closed");
    }

    // Open content store
    let db = Database::open(&config.database_path)?;
    info!("Content store opened: {}", config.database_path);

    // Build the gateway client
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let client = CricApiClient::new(ApiConfig {
        base_url: config.cricket_api_url.clone(),
        api_key: config.cricket_api_key.clone(),
        player_base_url: config.player_api_url.clone(),
        player_api_key: config.player_api_key.clone(),
        timeout,
    })?;
    let source: Arc<dyn CricketDataSource> = Arc::new(client);
    info!("Cricket data source: {}", source.name());

    // Optional contact-form relay
    let mail = match (
        &config.mail_api_url,
        &config.mail_api_key,
        &config.contact_recipient,
    ) {
        (Some(url), Some(key), Some(to)) => Some(MailRelay::new(url, key, to, timeout)?),
        _ => {
            info!("Mail relay not configured; contact messages will only be stored");
            None
        }
    };

    // Start the HTTP server
    let state = AppState { source, db, mail };
    let app = pages::router(state);
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Cricdar listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
