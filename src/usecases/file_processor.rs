//! File processor. Orchestrates one moderation batch.
//!
//! Flow:
//! 1. Validate input and output paths against the sandbox (before any I/O)
//! 2. Read records from the source
//! 3. Fan out one task per record: translate -> score -> aggregate
//! 4. Wait for every task, bounded by a single global deadline
//! 5. Snapshot the aggregates into report rows and hand them to the sink

use crate::adapters::persistence::PathSandbox;
use crate::domain::{DomainError, InputRecord, ReportRow};
use crate::ports::{RecordSourcePort, ReportSinkPort, ScorerPort, TranslatorPort};
use crate::usecases::report_builder::build_report;
use crate::usecases::stats_store::UserStatsStore;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Result of enriching and aggregating one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub rows: Vec<ReportRow>,
    pub records: usize,
    /// Records dropped because their task failed. Non-fatal.
    pub failures: usize,
}

/// Result of a full file-to-file run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub records: usize,
    pub users: usize,
    pub failures: usize,
    pub elapsed: Duration,
}

/// Moderation batch service.
///
/// The enrichment cache lives inside the translator/scorer adapters; wire a fresh
/// pair per run to keep it scoped to that run.
pub struct FileProcessorService {
    source: Arc<dyn RecordSourcePort>,
    sink: Arc<dyn ReportSinkPort>,
    translator: Arc<dyn TranslatorPort>,
    scorer: Arc<dyn ScorerPort>,
    sandbox: PathSandbox,
    deadline: Duration,
}

impl FileProcessorService {
    pub fn new(
        source: Arc<dyn RecordSourcePort>,
        sink: Arc<dyn ReportSinkPort>,
        translator: Arc<dyn TranslatorPort>,
        scorer: Arc<dyn ScorerPort>,
        sandbox: PathSandbox,
        deadline: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            translator,
            scorer,
            sandbox,
            deadline,
        }
    }

    /// Read `input`, process every record, write the report to `output`.
    ///
    /// Both paths are checked before either file is touched.
    pub async fn process_file(&self, input: &str, output: &str) -> Result<RunSummary, DomainError> {
        let started = Instant::now();
        let input_path = self.sandbox.resolve(input)?;
        let output_path = self.sandbox.resolve(output)?;

        let records = self.source.read_records(&input_path).await?;
        let outcome = self.process_records(records).await?;

        info!(
            users = outcome.rows.len(),
            "aggregation complete, generating report"
        );
        self.sink.write_report(&output_path, &outcome.rows).await?;

        Ok(RunSummary {
            input: input_path,
            output: output_path,
            records: outcome.records,
            users: outcome.rows.len(),
            failures: outcome.failures,
            elapsed: started.elapsed(),
        })
    }

    /// Enrich and aggregate `records` concurrently, one task per record.
    ///
    /// A failing record is counted and logged, never fatal. Only the deadline
    /// fails the batch; outstanding tasks are then aborted and the store sealed.
    pub async fn process_records(
        &self,
        records: Vec<InputRecord>,
    ) -> Result<BatchOutcome, DomainError> {
        let started = Instant::now();
        let total = records.len();
        let store = Arc::new(UserStatsStore::new());
        let failures = Arc::new(AtomicUsize::new(0));

        let mut tasks = JoinSet::new();
        let mut owners = HashMap::with_capacity(total);

        for record in records {
            let user_id = record.user_id.clone();
            let translator = Arc::clone(&self.translator);
            let scorer = Arc::clone(&self.scorer);
            let store = Arc::clone(&store);
            let failures = Arc::clone(&failures);

            let handle = tasks.spawn(async move {
                match enrich(&*translator, &*scorer, &record.message).await {
                    Ok(score) => {
                        store.add_scored_message(&record.user_id, score);
                    }
                    Err(e) => {
                        failures.fetch_add(1, Ordering::Relaxed);
                        error!(
                            user_id = %record.user_id,
                            message = %record.message,
                            stage = e.stage(),
                            error = %e,
                            "failed to process record"
                        );
                    }
                }
            });
            owners.insert(handle.id(), user_id);
        }

        let drained = tokio::time::timeout(self.deadline, async {
            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    failures.fetch_add(1, Ordering::Relaxed);
                    let user_id = owners
                        .get(&e.id())
                        .map(String::as_str)
                        .unwrap_or("<unknown>");
                    error!(user_id, error = %e, "record task did not complete");
                }
            }
        })
        .await;

        if drained.is_err() {
            let pending = tasks.len();
            tasks.abort_all();
            store.seal();
            let elapsed_ms = started.elapsed().as_millis();
            error!(
                elapsed_ms,
                pending,
                failures = failures.load(Ordering::Relaxed),
                deadline_secs = self.deadline.as_secs_f64(),
                "processing timed out"
            );
            return Err(DomainError::Timeout {
                elapsed_ms,
                pending,
            });
        }

        let failures = failures.load(Ordering::Relaxed);
        if failures > 0 {
            warn!(
                failures,
                "processing completed with {} errors, check logs for details", failures
            );
        }

        let rows = build_report(store.seal_and_snapshot());
        Ok(BatchOutcome {
            rows,
            records: total,
            failures,
        })
    }
}

/// Translate, then score the translated text.
async fn enrich(
    translator: &dyn TranslatorPort,
    scorer: &dyn ScorerPort,
    message: &str,
) -> Result<f64, DomainError> {
    let translated = translator.translate(message).await?;
    scorer.score(&translated).await
}
