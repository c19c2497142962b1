// In-memory measurement store
use crate::application::measurement_store::{DuplicateKey, MeasurementStore};
use crate::domain::rows::{InformationRow, MeasurementRow};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, (InformationRow, Vec<MeasurementRow>)>>,
}

impl MemoryStore {
    pub async fn information(&self, key: &str) -> Option<InformationRow> {
        self.records.read().await.get(key).map(|(info, _)| info.clone())
    }

    pub async fn measurements(&self, key: &str) -> Vec<MeasurementRow> {
        self.records
            .read()
            .await
            .get(key)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl MeasurementStore for MemoryStore {
    async fn contains_key(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.records.read().await.contains_key(key))
    }

    async fn insert(&self, info: InformationRow, rows: Vec<MeasurementRow>) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&info.key) {
            return Err(DuplicateKey(info.key).into());
        }
        records.insert(info.key.clone(), (info, rows));
        Ok(())
    }
}
