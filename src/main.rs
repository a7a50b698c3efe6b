use std::net::SocketAddr;
use std::sync::Arc;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod html;
mod metrics;
mod profile;
mod routes;
mod sessions;
mod state;

use crate::{app::build_app, config::AppConfig, db::PgStore, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "dietmath=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let addr: SocketAddr = config.listen_addr().parse()?;
    let store = PgStore::connect(&config).await?;
    store.migrate().await?;
    let session_store = sessions::postgres_store(store.pool.clone()).await?;
    sessions::spawn_expiry_sweep(session_store.clone(), config.sweep_interval());
    let app = build_app(AppState::from_pg(store, Arc::new(config)), session_store);

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
