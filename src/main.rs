use clap::Parser;
use uni_finder::app::commands;
use uni_finder::utils::error::{ErrorSeverity, FinderError};
use uni_finder::utils::logger;
use uni_finder::CliConfig;

fn exit_code(e: &FinderError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,      // 查無資料，視為警告
        ErrorSeverity::Medium => 2,   // 服務暫時不可用，可重試
        ErrorSeverity::High => 1,     // 配置或資料錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn report(e: &FinderError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_format);
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    match commands::execute(&cli.command, &config).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            report(&e);
            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
            Ok(())
        }
    }
}
