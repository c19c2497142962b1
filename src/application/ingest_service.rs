// Ingest service - Use case for turning report files into stored records
use crate::application::measurement_store::MeasurementStore;
use crate::application::table_extractor::TableExtractor;
use crate::domain::pairing::validate_pair;
use crate::domain::record::MeasurementRecord;
use crate::domain::rows::record_rows;
use crate::domain::runway::Direction;
use crate::infrastructure::config::SiteSettings;
use anyhow::Context;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// A file that could not be turned into a stored record
#[derive(Debug)]
pub struct RecordFailure {
    pub filename: String,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub stored: Vec<String>,
    pub failures: Vec<RecordFailure>,
}

#[derive(Clone)]
pub struct IngestService {
    extractor: Arc<dyn TableExtractor>,
    store: Arc<dyn MeasurementStore>,
}

impl IngestService {
    pub fn new(extractor: Arc<dyn TableExtractor>, store: Arc<dyn MeasurementStore>) -> Self {
        Self { extractor, store }
    }

    /// Extract and validate one record per file, all files concurrently.
    /// Records come back in input order; failures do not stop the batch.
    pub async fn load_records(&self, paths: &[PathBuf]) -> (Vec<MeasurementRecord>, Vec<RecordFailure>) {
        let results = join_all(paths.iter().map(|path| self.load_record(path))).await;

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(error) => {
                    let filename = MeasurementRecord::filename_from_path(path);
                    tracing::warn!("Skipping {}: {:#}", filename, error);
                    failures.push(RecordFailure { filename, error });
                }
            }
        }
        (records, failures)
    }

    pub async fn load_record(&self, path: &Path) -> anyhow::Result<MeasurementRecord> {
        let filename = MeasurementRecord::filename_from_path(path);
        let grids = self
            .extractor
            .extract(path)
            .await
            .with_context(|| format!("Failed to extract tables from {}", path.display()))?;
        tracing::debug!("Extracted {} tables from {}", grids.len(), filename);

        let record = MeasurementRecord::from_grids(filename, grids)?;
        record.validate()?;
        Ok(record)
    }

    /// Load a left/right pair of runs and check they describe the same runway pass
    pub async fn load_pair(
        &self,
        left: &Path,
        right: &Path,
    ) -> anyhow::Result<(MeasurementRecord, MeasurementRecord)> {
        let (left, right) = futures::join!(self.load_record(left), self.load_record(right));
        let (left, right) = (left?, right?);
        validate_pair(&left, &right)?;
        Ok((left, right))
    }

    /// Load, align and persist every file, assigning the site conditions of
    /// `site` with the starting point that matches each run's direction.
    pub async fn ingest(&self, paths: &[PathBuf], site: &SiteSettings) -> IngestReport {
        let start_time = Instant::now();
        let (records, failures) = self.load_records(paths).await;
        let mut report = IngestReport {
            stored: Vec::new(),
            failures,
        };

        for record in records {
            match self.store_record(&record, site).await {
                Ok(key) => {
                    tracing::debug!("Stored {} as {}", record, key);
                    report.stored.push(key);
                }
                Err(error) => {
                    tracing::warn!("Error processing {}: {:#}", record, error);
                    report.failures.push(RecordFailure {
                        filename: record.filename().to_string(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Ingested {} of {} files in {:?} ({} failed)",
            report.stored.len(),
            paths.len(),
            start_time.elapsed(),
            report.failures.len()
        );
        report
    }

    async fn store_record(&self, record: &MeasurementRecord, site: &SiteSettings) -> anyhow::Result<String> {
        let direction = Direction::from_numbering(record.numbering()?)?;
        record.assign(site.conditions_for(direction))?;

        let (info, rows) = record_rows(record)?;
        let key = info.key.clone();
        self.store.insert(info, rows).await?;
        Ok(key)
    }
}
