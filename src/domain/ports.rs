use crate::domain::model::{Record, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// File access scoped to the batch directory. Paths are relative to it.
pub trait Storage: Send + Sync {
    fn list_files(&self, pattern: &str)
        -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn directory(&self) -> &str;
    fn file_pattern(&self) -> &str;
    fn scale_factor(&self) -> f64;
    fn amplitude_field(&self) -> &str;
    fn midpoint_field(&self) -> &str;
    fn dry_run(&self) -> bool;
    fn backup_path(&self) -> Option<&str>;
    fn report_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn discover(&self) -> Result<Vec<String>>;

    /// Runs once before any file is touched.
    async fn prepare(&self, _files: &[String]) -> Result<()> {
        Ok(())
    }

    async fn extract(&self, path: &str) -> Result<Record>;
    async fn transform(&self, record: Record) -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<()>;

    fn directory(&self) -> &str;
    fn file_pattern(&self) -> &str;
    fn scale_factor(&self) -> f64;
    fn dry_run(&self) -> bool;
}
