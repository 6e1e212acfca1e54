use amp_rescale::core::ConfigProvider;
use amp_rescale::utils::{logger, report, validation::Validate};
use amp_rescale::{AmplitudePipeline, CliConfig, EtlEngine, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Processing files in: {}", config.directory);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }
    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no file will be modified");
    }

    let report_path = config.report_path().map(str::to_string);
    let monitor_enabled = config.monitor;
    let storage = LocalStorage::new(config.directory.clone());
    let pipeline = AmplitudePipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let result = match engine.run().await {
        Ok(summary) => match &report_path {
            Some(path) => report::write_report(&summary, path).await,
            None => Ok(()),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}
