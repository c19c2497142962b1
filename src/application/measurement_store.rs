// Repository trait for persisting processed measurement records
use crate::domain::rows::{InformationRow, MeasurementRow};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("the key {0} already exists in the store")]
pub struct DuplicateKey(pub String);

#[async_trait]
pub trait MeasurementStore: Send + Sync {
    async fn contains_key(&self, key: &str) -> anyhow::Result<bool>;

    /// Insert one record; fails with `DuplicateKey` when its key is already stored
    async fn insert(&self, info: InformationRow, rows: Vec<MeasurementRow>) -> anyhow::Result<()>;
}
