use anyhow::Context;
use build_cost_estimator::app::batch::{self, BatchEstimator};
use build_cost_estimator::config::EstimatorConfig;
use build_cost_estimator::domain::ports::Storage;
use build_cost_estimator::utils::{logger, validation::Validate};
use build_cost_estimator::{CostOrchestrator, LocalStorage};
use clap::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "batch-estimate")]
#[command(about = "Estimate a JSON array of requests with TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "estimator.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the concurrency from config
    #[arg(long)]
    concurrent_requests: Option<usize>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = EstimatorConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    logger::init_cli_logger(args.verbose || config.verbose());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(concurrent) = args.concurrent_requests {
        if let Some(batch) = config.batch.as_mut() {
            batch.concurrent_requests = Some(concurrent);
            tracing::info!("🔧 Concurrency overridden to: {}", concurrent);
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        anyhow::bail!(e.user_friendly_message());
    }
    let batch_config = config.batch()?.clone();

    // 輸入路徑相對於目前工作目錄
    let input = LocalStorage::new(String::new())
        .read_file(&batch_config.input)
        .await
        .with_context(|| format!("failed to read batch input '{}'", batch_config.input))?;
    let requests = batch::parse_requests(&input)?;

    display_config_summary(&config, requests.len());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No estimate will be computed");
        return Ok(());
    }

    let provider = config.reference_data.build_provider()?;
    let orchestrator = Arc::new(CostOrchestrator::new(provider));
    let estimator = BatchEstimator::new(orchestrator, batch_config.concurrent_requests());

    let report = estimator.run(requests).await?;

    let storage = LocalStorage::new(batch_config.output_path.clone());
    let written = batch::write_outputs(&report, &storage, &batch_config).await?;

    println!(
        "✅ {} estimates ({} succeeded, {} failed)",
        report.total, report.succeeded, report.failed
    );
    for name in written {
        println!("📁 {}/{}", batch_config.output_path, name);
    }

    Ok(())
}

fn display_config_summary(config: &EstimatorConfig, request_count: usize) {
    println!("📋 Configuration Summary:");
    println!("  Service: {} v{}", config.service.name, config.service.version);
    println!("  Reference data: {:?}", config.reference_data.source);
    if let Some(batch) = &config.batch {
        println!("  Input: {} ({} requests)", batch.input, request_count);
        println!("  Output: {}", batch.output_path);
        println!("  Formats: {}", batch.output_formats.join(", "));
        println!("  Concurrent Requests: {}", batch.concurrent_requests());
    }
    println!();
}
