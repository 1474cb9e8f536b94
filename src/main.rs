use asm3_client::utils::error::ErrorSeverity;
use asm3_client::utils::logger;
use asm3_client::{CliConfig, CommandRunner, ConfigProvider, HttpApi, QueryClient};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            }
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: CliConfig) -> asm3_client::Result<()> {
    let config = cli.resolve()?;
    tracing::info!(
        "Using {} backend at {}",
        config.db_type(),
        config.base_url()
    );

    let api = HttpApi::new(&config)?;
    let client = QueryClient::new(config.stale_time());
    let runner = CommandRunner::new(&api, &client, config.db_type());

    let output = runner.run(cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
