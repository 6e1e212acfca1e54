use amp_rescale::core::ConfigProvider;
use amp_rescale::utils::{logger, report, validation::Validate};
use amp_rescale::{AmplitudePipeline, EtlEngine, LocalStorage, TomlConfig};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-rescale")]
#[command(about = "Amplitude rescaling driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "rescale.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override dry-run setting from config
    #[arg(long)]
    dry_run: Option<bool>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    let verbose = args.verbose || config.log_level() == Some("debug");
    if args.json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Loaded configuration from: {}", args.config);

    config.apply_overrides(args.dry_run);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let report_path = config.report_path().map(str::to_string);

    let storage = LocalStorage::new(config.directory().to_string());
    let pipeline = AmplitudePipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let summary = match engine.run().await {
        Ok(summary) => summary,
        Err(e) => {
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
    };

    if let Some(path) = report_path {
        report::write_report(&summary, &path).await?;
    }

    println!(
        "✅ {} processed, {} skipped, {} failed",
        summary.processed(),
        summary.skipped(),
        summary.failed()
    );
    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  📁 Directory: {}", config.directory());
    tracing::info!("  🔎 Pattern: {}", config.file_pattern());
    tracing::info!("  ✖️  Scale factor: {}", config.scale_factor());
    tracing::info!(
        "  🏷️  Fields: {} -> {}",
        config.amplitude_field(),
        config.midpoint_field()
    );
    if let Some(backup) = config.backup_path() {
        tracing::info!("  🗄️  Backup: {}", backup);
    }
    if config.dry_run() {
        tracing::info!("  🔍 Dry run: nothing will be written");
    }
}
