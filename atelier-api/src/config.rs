use atelier_core::RemoteStoreConfig;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub store: StoreConfig,
    pub remote: Option<RemoteStoreConfig>,
    #[serde(default)]
    pub sqlite: SqliteConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            store: StoreConfig::default(),
            remote: None,
            sqlite: SqliteConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which adapter backs the entity services
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Remote,
    Sqlite,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Multiplier on the in-memory adapter's delays; 0 disables them
    pub latency_scale: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            latency_scale: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SqliteConfig {
    pub path: Option<String>,
    /// Load the sample project into an empty store
    pub seed: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: None,
            seed: true,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[store]
# memory, remote or sqlite
backend = "memory"
latency_scale = 1.0

# [remote]
# base_url = "https://records.example.com"
# project_id = "your-project-id"
# public_key = "your-public-key"

[sqlite]
# path = "/path/to/records.db"
seed = true
"#;

impl ApiConfig {
    /// Loads `path`, or the per-user config file when none is given.
    /// The per-user file is created with defaults on first run.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => path,
            None => {
                let config_path = get_config_path();
                write_default_config(&config_path)?;
                config_path
            }
        };

        Self::from_file(&config_path).map(|config| (config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }

    pub fn bind_address(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("atelier").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
