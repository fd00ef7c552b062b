use clap::Parser;
use comic_recap::config::cli::Command;
use comic_recap::utils::error::ErrorSeverity;
use comic_recap::utils::{logger, validation::Validate};
use comic_recap::{AppConfig, CliConfig, RecapEngine, RecapError, RecapOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置 (設定檔 + 命令列 + 環境變數)
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match &cli.command {
        #[cfg(feature = "server")]
        Command::Serve { .. } => logger::init_server_logger(cli.verbose, config.server.log_json),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting comic-recap v{}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Recap { upc, json } => run_recap(&config, upc, *json).await,
        #[cfg(feature = "server")]
        Command::Serve { .. } => comic_recap::server::run(&config).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Recap failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 輸入錯誤
            ErrorSeverity::Medium => 2,   // 上游服務錯誤
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run_recap(config: &AppConfig, upc: &str, json: bool) -> Result<(), RecapError> {
    let engine = RecapEngine::from_config(config)?;
    let outcome = engine.recap(upc).await?;

    if let RecapOutcome::ModelUnavailable { reason, .. } = &outcome {
        tracing::warn!("Model call failed: {}", reason);
    }

    if json {
        let body = serde_json::json!({ "message": outcome.message() });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Marvel Comics AI Recapper");
    println!("-------------------------");
    println!("{}", outcome.message());

    Ok(())
}
