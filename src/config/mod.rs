pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::amplitude::{
    DEFAULT_AMPLITUDE_FIELD, DEFAULT_MIDPOINT_FIELD, DEFAULT_SCALE_FACTOR,
};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIRECTORY: &str = "assets/heart_beat_data";
pub const DEFAULT_PATTERN: &str = "*.json";
pub const REPORT_EXTENSIONS: &[&str] = &["json", "csv"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "amp-rescale")]
#[command(about = "Scale amplitude time-series JSON files and record their midpoint")]
pub struct CliConfig {
    /// Directory holding the JSON files
    #[arg(default_value = DEFAULT_DIRECTORY)]
    pub directory: String,

    /// File name pattern inside the directory
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Factor every amplitude is multiplied by
    #[arg(long = "factor", default_value_t = DEFAULT_SCALE_FACTOR, allow_negative_numbers = true)]
    pub scale_factor: f64,

    #[arg(long, default_value = DEFAULT_AMPLITUDE_FIELD)]
    pub amplitude_field: String,

    #[arg(long, default_value = DEFAULT_MIDPOINT_FIELD)]
    pub midpoint_field: String,

    /// Compute and log without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Zip archive receiving the original files before they are modified
    #[arg(long)]
    pub backup: Option<String>,

    /// Batch report path (.json or .csv)
    #[arg(long)]
    pub report: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn directory(&self) -> &str {
        &self.directory
    }

    fn file_pattern(&self) -> &str {
        &self.pattern
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn amplitude_field(&self) -> &str {
        &self.amplitude_field
    }

    fn midpoint_field(&self) -> &str {
        &self.midpoint_field
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn backup_path(&self) -> Option<&str> {
        self.backup.as_deref()
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("directory", &self.directory)?;
        validation::validate_file_pattern("pattern", &self.pattern)?;
        validation::validate_scale_factor("factor", self.scale_factor)?;
        validation::validate_non_empty_string("amplitude_field", &self.amplitude_field)?;
        validation::validate_non_empty_string("midpoint_field", &self.midpoint_field)?;
        if self.amplitude_field == self.midpoint_field {
            return Err(EtlError::InvalidConfigValueError {
                field: "midpoint_field".to_string(),
                value: self.midpoint_field.clone(),
                reason: "Midpoint field must differ from the amplitude field".to_string(),
            });
        }
        if let Some(backup) = &self.backup {
            validation::validate_path("backup", backup)?;
            validation::validate_file_extension("backup", backup, &["zip"])?;
        }
        if let Some(report) = &self.report {
            validation::validate_path("report", report)?;
            validation::validate_file_extension("report", report, REPORT_EXTENSIONS)?;
        }
        Ok(())
    }
}
