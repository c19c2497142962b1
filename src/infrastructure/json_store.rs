// JSON document store - information and measurement tables in one file
use crate::application::measurement_store::{DuplicateKey, MeasurementStore};
use crate::domain::rows::{InformationRow, MeasurementRow};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JsonDocument {
    #[serde(default)]
    pub information: Vec<InformationRow>,
    #[serde(default)]
    pub measurements: Vec<MeasurementRow>,
}

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    // serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; a missing file is an empty store
    pub async fn load(&self) -> Result<JsonDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse store {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(JsonDocument::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read store {}", self.path.display())),
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Written to a sibling file, then renamed over the store
    async fn save(&self, document: &JsonDocument) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, bytes)
            .await
            .with_context(|| format!("Failed to write store {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace store {}", self.path.display()))
    }
}

#[async_trait]
impl MeasurementStore for JsonStore {
    async fn contains_key(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.information.iter().any(|row| row.key == key))
    }

    async fn insert(&self, info: InformationRow, rows: Vec<MeasurementRow>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        if document.information.iter().any(|row| row.key == info.key) {
            return Err(DuplicateKey(info.key).into());
        }

        tracing::debug!(
            "Appending {} with {} measurement rows to {}",
            info.key,
            rows.len(),
            self.path.display()
        );
        document.measurements.extend(rows);
        document.information.push(info);
        self.save(&document).await
    }
}
