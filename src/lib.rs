pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::AmplitudePipeline};
pub use domain::model::{BatchSummary, FileOutcome, FileStatus};
pub use utils::error::{EtlError, Result};
