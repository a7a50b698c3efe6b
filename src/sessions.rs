use std::time::Duration;

use anyhow::Context;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;
use tracing::{debug, warn};

/// Session records live next to the app tables so they survive restarts.
pub async fn postgres_store(pool: PgPool) -> anyhow::Result<PostgresStore> {
    let store = PostgresStore::new(pool);
    store.migrate().await.context("create session table")?;
    Ok(store)
}

/// Deletes expired session records every `period`. The first sweep runs
/// immediately.
pub fn spawn_expiry_sweep<S>(store: S, period: Duration) -> JoinHandle<()>
where
    S: ExpiredDeletion,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match store.delete_expired().await {
                Ok(()) => debug!("expired sessions deleted"),
                Err(e) => warn!(error = %e, "expired session sweep failed"),
            }
        }
    })
}
