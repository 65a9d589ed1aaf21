use build_cost_estimator::utils::error::ErrorSeverity;
use build_cost_estimator::utils::{logger, validation::Validate};
use build_cost_estimator::{CliConfig, CostOrchestrator, EstimateError};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting build-cost-estimator CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let provider = match config.reference_data().and_then(|r| {
        r.validate()?;
        r.build_provider()
    }) {
        Ok(provider) => provider,
        Err(e) => exit_with(&e),
    };

    let body = match config.read_request() {
        Ok(body) => body,
        Err(e) => exit_with(&e),
    };

    let orchestrator = CostOrchestrator::new(provider);
    let reply = orchestrator.handle_json(&body).await;

    let output = if config.pretty {
        serde_json::to_string_pretty(&reply.body)?
    } else {
        serde_json::to_string(&reply.body)?
    };
    println!("{}", output);

    // 依 HTTP 狀態碼決定退出碼
    match reply.status_code {
        200 => Ok(()),
        404 | 400 => std::process::exit(1),
        _ => std::process::exit(3),
    }
}

fn exit_with(e: &EstimateError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
