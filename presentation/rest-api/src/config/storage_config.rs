use std::env;
use std::path::PathBuf;

use persistence::db::{DatabaseConfig, JsonFileDatabase};

/// Files the collection service reads from disk
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    ///
    /// Environment variables:
    /// - DATA_FILE: JSON file backing the products collection (default: "data.json")
    /// - STATIC_DIR: Directory with the front-end assets served at "/" (default: "ui")
    pub fn from_env() -> Self {
        let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "data.json".to_string());
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "ui".to_string());

        Self {
            data_file: data_file.into(),
            static_dir: static_dir.into(),
        }
    }
}

/// Open the JSON data file, creating an empty collection if it does not exist
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed
pub async fn init_database(config: &StorageConfig) -> anyhow::Result<JsonFileDatabase> {
    let db = JsonFileDatabase::open(&DatabaseConfig::new(&config.data_file)).await?;
    tracing::info!(path = %db.path().display(), "Data file opened");
    Ok(db)
}
