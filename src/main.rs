// Main entry point - Dependency injection and batch ingest
use std::sync::Arc;

use runway_friction::application::ingest_service::IngestService;
use runway_friction::infrastructure::config::load_friction_config;
use runway_friction::infrastructure::json_extractor::{list_documents, JsonTableExtractor};
use runway_friction::infrastructure::json_store::JsonStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_friction_config()?;

    // Create adapters (infrastructure layer)
    let extractor = Arc::new(JsonTableExtractor);
    let store = Arc::new(JsonStore::new(config.store.path.clone()));

    // Create service (application layer)
    let service = IngestService::new(extractor, store.clone());

    let paths = list_documents(&config.input.dir, &config.input.extension).await?;
    tracing::info!(
        "Processing {} reports from {} into {}",
        paths.len(),
        config.input.dir.display(),
        store.path().display()
    );

    let report = service.ingest(&paths, &config.site).await;
    for failure in &report.failures {
        tracing::error!("Error processing {}: {:#}", failure.filename, failure.error);
    }
    for key in &report.stored {
        tracing::info!("Stored {}", key);
    }

    Ok(())
}
