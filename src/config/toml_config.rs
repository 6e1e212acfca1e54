use crate::config::{DEFAULT_DIRECTORY, DEFAULT_PATTERN, REPORT_EXTENSIONS};
use crate::core::amplitude::{DEFAULT_AMPLITUDE_FIELD, DEFAULT_MIDPOINT_FIELD, DEFAULT_SCALE_FACTOR};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub batch: BatchConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsConfig {
    #[serde(default = "default_amplitude_field")]
    pub amplitudes: String,
    #[serde(default = "default_midpoint_field")]
    pub midpoint: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            amplitudes: default_amplitude_field(),
            midpoint: default_midpoint_field(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub dry_run: bool,
    pub backup_path: Option<String>,
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

fn default_directory() -> String {
    DEFAULT_DIRECTORY.to_string()
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_scale_factor() -> f64 {
    DEFAULT_SCALE_FACTOR
}

fn default_amplitude_field() -> String {
    DEFAULT_AMPLITUDE_FIELD.to_string()
}

fn default_midpoint_field() -> String {
    DEFAULT_MIDPOINT_FIELD.to_string()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"))
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration after substituting `${VAR}` placeholders.
    ///
    /// The `[batch]` table is required, even when empty.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let table: toml::Table = toml::from_str(&processed_content)?;
        if !table.contains_key("batch") {
            return Err(EtlError::MissingConfigError {
                field: "batch".to_string(),
            });
        }

        Ok(toml::from_str(&processed_content)?)
    }

    /// Applies command line overrides on top of the file values.
    pub fn apply_overrides(&mut self, dry_run: Option<bool>) {
        if let Some(dry_run) = dry_run {
            self.output.dry_run = dry_run;
            tracing::info!("🔧 Dry run overridden to: {}", dry_run);
        }
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn directory(&self) -> &str {
        &self.batch.directory
    }

    fn file_pattern(&self) -> &str {
        &self.batch.pattern
    }

    fn scale_factor(&self) -> f64 {
        self.batch.scale_factor
    }

    fn amplitude_field(&self) -> &str {
        &self.fields.amplitudes
    }

    fn midpoint_field(&self) -> &str {
        &self.fields.midpoint
    }

    fn dry_run(&self) -> bool {
        self.output.dry_run
    }

    fn backup_path(&self) -> Option<&str> {
        self.output.backup_path.as_deref()
    }

    fn report_path(&self) -> Option<&str> {
        self.output.report_path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("batch.directory", &self.batch.directory)?;
        validation::validate_file_pattern("batch.pattern", &self.batch.pattern)?;
        validation::validate_scale_factor("batch.scale_factor", self.batch.scale_factor)?;
        validation::validate_non_empty_string("fields.amplitudes", &self.fields.amplitudes)?;
        validation::validate_non_empty_string("fields.midpoint", &self.fields.midpoint)?;

        if self.fields.amplitudes == self.fields.midpoint {
            return Err(EtlError::InvalidConfigValueError {
                field: "fields.midpoint".to_string(),
                value: self.fields.midpoint.clone(),
                reason: "Midpoint field must differ from the amplitudes field".to_string(),
            });
        }

        if let Some(backup) = &self.output.backup_path {
            validation::validate_path("output.backup_path", backup)?;
            validation::validate_file_extension("output.backup_path", backup, &["zip"])?;
        }
        if let Some(report) = &self.output.report_path {
            validation::validate_path("output.report_path", report)?;
            validation::validate_file_extension("output.report_path", report, REPORT_EXTENSIONS)?;
        }

        Ok(())
    }
}
