// Table extractor over grids already extracted to JSON
use crate::application::table_extractor::TableExtractor;
use crate::domain::report::Grid;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads `[[["cell", ...], ...], ...]` files, one grid per page region
#[derive(Debug, Clone, Default)]
pub struct JsonTableExtractor;

#[async_trait]
impl TableExtractor for JsonTableExtractor {
    async fn extract(&self, path: &Path) -> Result<Vec<Grid>> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let grids: Vec<Grid> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse grids in {}", path.display()))?;
        Ok(grids)
    }
}

/// Files in `dir` with the given extension, sorted by name
pub async fn list_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == extension) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
