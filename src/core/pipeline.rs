use crate::core::amplitude::{rescale_value, RescaleOutcome};
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::utils::backup;
use crate::utils::error::Result;

pub struct AmplitudePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> AmplitudePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AmplitudePipeline<S, C> {
    async fn discover(&self) -> Result<Vec<String>> {
        tracing::debug!(
            "Listing '{}' in {}",
            self.config.file_pattern(),
            self.config.directory()
        );
        self.storage.list_files(self.config.file_pattern()).await
    }

    async fn prepare(&self, files: &[String]) -> Result<()> {
        let Some(backup_path) = self.config.backup_path() else {
            return Ok(());
        };
        if self.config.dry_run() {
            tracing::info!("Dry run, skipping backup to {}", backup_path);
            return Ok(());
        }

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            entries.push((file.clone(), self.storage.read_file(file).await?));
        }

        let archive = backup::build_archive(&entries)?;
        if let Some(parent) = std::path::Path::new(backup_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(backup_path, &archive).await?;

        tracing::info!(
            "Backed up {} files ({} bytes) to {}",
            entries.len(),
            archive.len(),
            backup_path
        );
        Ok(())
    }

    async fn extract(&self, path: &str) -> Result<Record> {
        let bytes = self.storage.read_file(path).await?;
        let data: serde_json::Value = serde_json::from_slice(&bytes)?;
        tracing::debug!("Read {} ({} bytes)", path, bytes.len());

        Ok(Record {
            path: path.to_string(),
            data,
        })
    }

    async fn transform(&self, record: Record) -> Result<TransformResult> {
        let mut record = record;
        let outcome = rescale_value(
            &mut record.data,
            self.config.scale_factor(),
            self.config.amplitude_field(),
            self.config.midpoint_field(),
        )?;

        Ok(match outcome {
            RescaleOutcome::Rescaled { midpoint, samples } => TransformResult::Rescaled {
                record,
                midpoint,
                samples,
            },
            RescaleOutcome::MissingAmplitudes => TransformResult::Skipped {
                path: record.path,
                reason: format!("no {} array found", self.config.amplitude_field()),
            },
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<()> {
        let TransformResult::Rescaled { record, .. } = result else {
            return Ok(());
        };

        if self.config.dry_run() {
            tracing::debug!("Dry run, not writing {}", record.path);
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&record.data)?;
        self.storage.write_file(&record.path, json.as_bytes()).await?;
        tracing::debug!("Wrote {} ({} bytes)", record.path, json.len());
        Ok(())
    }

    fn directory(&self) -> &str {
        self.config.directory()
    }

    fn file_pattern(&self) -> &str {
        self.config.file_pattern()
    }

    fn scale_factor(&self) -> f64 {
        self.config.scale_factor()
    }

    fn dry_run(&self) -> bool {
        self.config.dry_run()
    }
}
