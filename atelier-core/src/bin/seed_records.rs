use anyhow::{Context, Result};
use atelier_core::remote::SqliteRecordClient;
use atelier_core::store::{seed_fixtures, Services};
use clap::Parser;
use config::{Config, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "seed-records", about = "Seed a local record store with the sample project")]
struct Cli {
    /// Record store file; defaults to `[sqlite] path` from the API config
    #[arg(long, value_name = "PATH")]
    db_path: Option<PathBuf>,

    /// Path to the API config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed even when the store already holds tickets
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Deserialize, Default)]
struct ApiConfig {
    sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Deserialize)]
struct SqliteConfig {
    path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let db_path = match cli.db_path {
        Some(path) => path,
        None => resolve_db_path(&load_api_config(cli.config)?)?,
    };

    let client = SqliteRecordClient::open(&db_path)
        .with_context(|| format!("Failed to open record store at {:?}", db_path))?;
    let services = Services::remote(Arc::new(client));

    let existing = services.tickets.get_all().await?.len();
    if existing > 0 && !cli.force {
        anyhow::bail!(
            "{:?} already holds {} tickets; pass --force to seed anyway",
            db_path,
            existing
        );
    }

    let summary = seed_fixtures(&services).await?;
    for (entity, count) in &summary.counts {
        println!("{entity:>12}: {count}");
    }
    println!("Seeded {} records into {:?}", summary.total(), db_path);
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}

fn load_api_config(path: Option<PathBuf>) -> Result<ApiConfig> {
    let config_path = path.unwrap_or_else(get_config_path);
    if !config_path.exists() {
        return Ok(ApiConfig::default());
    }

    let config = Config::builder()
        .add_source(File::from(config_path.clone()))
        .build()
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;
    Ok(config.try_deserialize()?)
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("atelier").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn resolve_db_path(config: &ApiConfig) -> Result<PathBuf> {
    if let Some(path) = config.sqlite.as_ref().and_then(|s| s.path.as_ref()) {
        return Ok(PathBuf::from(path));
    }
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine a local data directory"))?;
    Ok(data_dir.join("atelier").join("records.db"))
}
