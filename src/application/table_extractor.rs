// Table extractor trait - source documents to raw grids
use crate::domain::report::Grid;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait TableExtractor: Send + Sync {
    /// Ordered table grids of one document: header, summary, then sample blocks
    async fn extract(&self, path: &Path) -> anyhow::Result<Vec<Grid>>;
}
