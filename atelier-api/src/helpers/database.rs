use crate::config::{ApiConfig, StoreBackend};
use anyhow::Context;
use atelier_core::store::seed_fixtures;
use atelier_core::{HttpRecordClient, Latency, MemoryStore, Services, SqliteRecordClient};
use std::path::PathBuf;
use std::sync::Arc;

/// Returns the path to the local record store
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/atelier/records.db`
/// - **Linux**: `~/.local/share/atelier/records.db`
/// - **Windows**: `%LOCALAPPDATA%\atelier\records.db`
pub fn get_db_path(config: &ApiConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = &config.sqlite.path {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("atelier").join("records.db"))
}

/// Builds the entity services for the configured backend
pub async fn initialize_services(config: &ApiConfig) -> anyhow::Result<Services> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = MemoryStore::seeded(Latency::scaled(config.store.latency_scale))?;
            tracing::info!("Using in-memory store seeded with the sample project");
            Ok(Services::in_memory(&store))
        }
        StoreBackend::Remote => {
            let remote = config
                .remote
                .clone()
                .ok_or_else(|| anyhow::anyhow!("[store] backend = \"remote\" needs a [remote] section"))?;
            if remote.base_url.is_empty() {
                anyhow::bail!("[remote] base_url must not be empty");
            }
            tracing::info!("Using remote record store at {}", remote.base_url);
            Ok(Services::remote(Arc::new(HttpRecordClient::new(remote))))
        }
        StoreBackend::Sqlite => {
            let db_path = get_db_path(config)?;
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let client = SqliteRecordClient::open(&db_path)
                .with_context(|| format!("Failed to open record store at {:?}", db_path))?;
            let services = Services::remote(Arc::new(client));
            tracing::info!("Using record store at {:?}", db_path);

            if config.sqlite.seed && services.tickets.get_all().await?.is_empty() {
                let summary = seed_fixtures(&services).await?;
                tracing::info!("Seeded empty record store with {} records", summary.total());
            }
            Ok(services)
        }
    }
}
