use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid file pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Amplitude at index {index} is not a number: {value}")]
    NonNumericAmplitude { index: usize, value: String },

    #[error("Amplitude at index {index} is not finite after scaling")]
    NonFiniteAmplitude { index: usize },

    #[error("Amplitudes array is empty, midpoint is undefined")]
    EmptyAmplitudes,

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Archive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::ZipError(_) => ErrorCategory::Archive,
            EtlError::SerializationError(_)
            | EtlError::CsvError(_)
            | EtlError::NonNumericAmplitude { .. }
            | EtlError::NonFiniteAmplitude { .. }
            | EtlError::EmptyAmplitudes => ErrorCategory::Data,
            EtlError::TomlError(_)
            | EtlError::PatternError(_)
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Per-file data problems are `Medium`: the batch logs them and moves on.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Archive => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::IoError(_) => {
                "Check that the directory exists and that the files are readable and writable"
            }
            EtlError::ZipError(_) => "Check that the backup path is writable and has free space",
            EtlError::SerializationError(_) => "Fix the JSON syntax of the reported file",
            EtlError::CsvError(_) => "Check that the report path is writable",
            EtlError::NonNumericAmplitude { .. } | EtlError::NonFiniteAmplitude { .. } => {
                "Make sure every amplitude is a finite JSON number"
            }
            EtlError::EmptyAmplitudes => "Add at least one amplitude or remove the file from the batch",
            EtlError::TomlError(_) => "Check the TOML syntax of the configuration file",
            EtlError::PatternError(_) => "Use a valid glob pattern such as '*.json'",
            EtlError::InvalidConfigValueError { .. } | EtlError::MissingConfigError { .. } => {
                "Review the command line arguments or the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Archive => format!("Backup archive could not be written: {}", self),
            ErrorCategory::Data => format!("Invalid amplitude data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }

    /// Process exit code for a fatal error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_errors_are_recoverable() {
        let err = EtlError::EmptyAmplitudes;
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().starts_with("Invalid amplitude data"));
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = EtlError::MissingConfigError {
            field: "batch.directory".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Missing required configuration: batch.directory");
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = EtlError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
