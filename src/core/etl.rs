use crate::core::{Pipeline, TransformResult};
use crate::domain::model::{BatchSummary, FileOutcome};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Processes every discovered file in order.
    ///
    /// Per-file failures are logged and recorded in the summary; only
    /// discovery and backup failures abort the run.
    pub async fn run(&self) -> Result<BatchSummary> {
        let started_at = Utc::now();
        let directory = self.pipeline.directory().to_string();

        let files = self.pipeline.discover().await?;
        tracing::info!("Found {} JSON files in {}", files.len(), directory);
        self.monitor.log_stats("Discover");

        self.pipeline.prepare(&files).await?;

        let mut outcomes = Vec::with_capacity(files.len());
        for file in &files {
            let outcome = match self.process_file(file).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Error processing {}: {}", file, e);
                    FileOutcome::failed(file.as_str(), e.to_string())
                }
            };
            outcomes.push(outcome);
        }
        self.monitor.log_stats("Process");

        let summary = BatchSummary {
            directory,
            pattern: self.pipeline.file_pattern().to_string(),
            scale_factor: self.pipeline.scale_factor(),
            dry_run: self.pipeline.dry_run(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };

        tracing::info!(
            "Processing complete. {} processed, {} skipped, {} failed",
            summary.processed(),
            summary.skipped(),
            summary.failed()
        );
        self.monitor.log_final_stats();

        Ok(summary)
    }

    async fn process_file(&self, file: &str) -> Result<FileOutcome> {
        let record = self.pipeline.extract(file).await?;
        let result = self.pipeline.transform(record).await?;
        self.pipeline.load(&result).await?;

        Ok(match result {
            TransformResult::Rescaled {
                midpoint, samples, ..
            } => {
                tracing::info!(
                    "Successfully processed {} - scaled amplitudes and added midpoint: {:.2}",
                    file,
                    midpoint
                );
                FileOutcome::processed(file, midpoint, samples)
            }
            TransformResult::Skipped { reason, .. } => {
                tracing::info!("Skipping {} - {}", file, reason);
                FileOutcome::skipped(file, reason)
            }
        })
    }
}
