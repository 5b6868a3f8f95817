use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::product::entity::ProductEntity;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.io_error")]
    IoError(#[from] std::io::Error),
    #[error("database.corrupted")]
    Corrupted(#[from] serde_json::Error),
}

/// Configuration for the JSON data file
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Content of the data file: one array per resource. Resources this service
/// does not know are kept untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub products: Vec<ProductEntity>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// JSON file holding every collection, loaded once and rewritten whole after
/// each mutation. One mutex serialises all access.
pub struct JsonFileDatabase {
    path: PathBuf,
    data: Mutex<DataFile>,
}

impl JsonFileDatabase {
    /// Opens the data file, starting empty when it does not exist yet.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let data = match tokio::fs::read(&config.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => DataFile::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %config.path.display(), "Data file missing, starting empty");
                DataFile::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: config.path.clone(),
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read<R>(&self, f: impl FnOnce(&DataFile) -> R) -> R {
        let data = self.data.lock().await;
        f(&data)
    }

    /// Applies `f` to a copy of the data, persists the copy and only then
    /// makes it current, so a failed write leaves memory and disk in agreement.
    pub async fn write<R>(&self, f: impl FnOnce(&mut DataFile) -> R) -> Result<R, DatabaseError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let result = f(&mut next);

        self.persist(&next).await?;
        *data = next;
        Ok(result)
    }

    async fn persist(&self, data: &DataFile) -> Result<(), DatabaseError> {
        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "Data file written");
        Ok(())
    }
}
