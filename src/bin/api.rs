use anyhow::Result;
use policy_relay::{AppState, config::Config, create_router, fetcher::HttpFetcher};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.json_logs());

    let upstream = Arc::new(HttpFetcher::new()?);
    let state = AppState::new(config.clone(), upstream);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(
        addr = config.bind_addr(),
        policies_mode = ?config.policies_mode(),
        cache_policy = ?config.cache_policy(),
        "policy relay listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("policy relay stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
