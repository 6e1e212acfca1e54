use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One parsed JSON file, addressed relative to the batch directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub path: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone)]
pub enum TransformResult {
    Rescaled {
        record: Record,
        midpoint: f64,
        samples: usize,
    },
    Skipped {
        path: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Processed,
    Skipped,
    Failed,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Processed => "processed",
            FileStatus::Skipped => "skipped",
            FileStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: String,
    pub status: FileStatus,
    pub midpoint: Option<f64>,
    pub samples: Option<usize>,
    pub message: Option<String>,
}

impl FileOutcome {
    pub fn processed(path: impl Into<String>, midpoint: f64, samples: usize) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Processed,
            midpoint: Some(midpoint),
            samples: Some(samples),
            message: None,
        }
    }

    pub fn skipped(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Skipped,
            midpoint: None,
            samples: None,
            message: Some(reason.into()),
        }
    }

    pub fn failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Failed,
            midpoint: None,
            samples: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub directory: String,
    pub pattern: String,
    pub scale_factor: f64,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    fn count(&self, status: FileStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn processed(&self) -> usize {
        self.count(FileStatus::Processed)
    }

    pub fn skipped(&self) -> usize {
        self.count(FileStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(FileStatus::Failed)
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}
