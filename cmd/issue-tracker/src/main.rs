//! # issue-tracker binary
//!
//! Assembles the application: tracing, configuration, the store picked by
//! compile-time feature, and the axum router.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use api_adapters::handlers::AppState;
use domains::IssueStore;
use services::IssueService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = configs::AppConfig::load().context("loading configuration")?;

    #[cfg(feature = "db-sqlite")]
    let store: Arc<dyn IssueStore> = Arc::new(
        storage_adapters::SqliteIssueStore::connect(&config.database.url)
            .await
            .context("opening the issue database")?,
    );

    #[cfg(not(feature = "db-sqlite"))]
    let store: Arc<dyn IssueStore> = Arc::new(storage_adapters::MemoryIssueStore::new());

    let app = api_adapters::router(AppState {
        issues: IssueService::new(store),
    });

    let addr = config.bind_addr();
    tracing::info!(%addr, "issue tracker listening");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
