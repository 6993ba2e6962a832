use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::available_parallelism;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;
use tracing::{debug, error, info};

use crate::engine::StatementReport;
use crate::models::{AccountInfo, RawGrid};
use crate::pipeline::{process, NormalizedStatement, PipelineError};
use crate::profiles::BankProfile;
use crate::source::{extract_account_info, CsvTableSource, OcrTextSource, SidecarOcrSource, TableSource};

pub const DEFAULT_RESOLUTION_HINT: u32 = 300;

/// Drives statements for one bank through table loading, the pipeline and account lookup.
#[derive(Clone)]
pub struct StatementEngine {
    profile: Arc<BankProfile>,
    tables: Arc<dyn TableSource>,
    ocr: Arc<dyn OcrTextSource>,
    resolution_hint: u32,
    concurrency: usize
}

impl StatementEngine {
    /// Creates an engine reading CSV tables and sidecar OCR text.
    pub fn new(profile: Arc<BankProfile>) -> Self {
        Self::from_sources(profile, CsvTableSource, SidecarOcrSource)
    }

    pub fn from_sources(profile: Arc<BankProfile>, tables: impl TableSource, ocr: impl OcrTextSource) -> Self {
        Self {
            profile,
            tables: Arc::new(tables),
            ocr: Arc::new(ocr),
            resolution_hint: DEFAULT_RESOLUTION_HINT,
            concurrency: available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
        }
    }

    pub fn with_resolution_hint(mut self, dpi: u32) -> Self {
        self.resolution_hint = dpi;
        self
    }

    /// Upper bound on statements processed at once by `run_batch`. Never below one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Processes a single statement synchronously.
    ///
    /// # Errors
    /// - `PipelineError::Source` when the tables cannot be loaded.
    /// - `PipelineError::NoTableFound` and `PipelineError::HeaderNotFound` from the pipeline.
    pub fn run(&self, document: &Path) -> Result<StatementReport, PipelineError> {
        let tables = self.tables.tables(document)?;
        debug!("Loaded {} tables from [{}]", tables.len(), document.display());

        let grid = RawGrid::from_tables(tables);
        let NormalizedStatement { ledger, metrics } = process(&grid, &self.profile)?;

        let account = self.ocr.first_page_text(document, self.resolution_hint)
            .map(|text| extract_account_info(&text))
            .unwrap_or_else(AccountInfo::default);

        info!("Normalized {} transactions from [{}] as {}", ledger.len(), document.display(), self.profile.display_name);

        Ok(StatementReport {
            document: document.to_path_buf(),
            bank: self.profile.display_name.clone(),
            ledger,
            metrics,
            account
        })
    }

    /// Processes every statement on its own blocking task, at most `concurrency` at a time.
    ///
    /// Results come back in input order. A task that panics is reported as
    /// `PipelineError::Processing` for its own statement only.
    pub async fn run_batch(&self, documents: Vec<PathBuf>) -> Vec<(PathBuf, Result<StatementReport, PipelineError>)> {
        let permits = Arc::new(Semaphore::new(self.concurrency));

        let tasks = documents.into_iter().map(|document| {
            let engine = self.clone();
            let permits = permits.clone();

            async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(error) => return (document, Err(PipelineError::Processing(error.to_string())))
                };

                let path = document.clone();
                let result = spawn_blocking(move || engine.run(&path)).await
                    .unwrap_or_else(|error| {
                        error!("Statement task for [{}] did not complete: {error}", document.display());
                        Err(PipelineError::Processing(error.to_string()))
                    });

                (document, result)
            }
        });

        join_all(tasks).await
    }
}
