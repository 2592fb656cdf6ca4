use clap::Parser;
use flight_scrape::core::export::{render, write_report};
use flight_scrape::utils::error::{ErrorSeverity, FlightError};
use flight_scrape::utils::{logger, validation::Validate};
use flight_scrape::{CliConfig, FlightSearch, LocalStorage, SearchResult, TomlConfig};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入設定 (TOML + 命令列覆蓋)
    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    // 初始化日誌
    if settings.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting flight-scrape");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| settings.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }

    match run(&cli, &settings).await {
        Ok(result) => {
            tracing::info!(
                "✅ Search completed: {} flights ({} best), price level {}",
                result.flights.len(),
                result.best_flights().count(),
                result.current_price
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Search failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            exit_with(&e);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig, settings: &TomlConfig) -> flight_scrape::Result<SearchResult> {
    let search = FlightSearch::from_config(settings)?
        .with_extract_options(settings.extract_options())?;

    let query = settings.query(&cli.tfs);
    let result = search
        .get_flights_from_query(&query, settings.fetch_mode(), None)
        .await?;

    let format = settings.export_format();
    match &settings.output.path {
        Some(path) => {
            let path = if Path::new(path).extension().is_none() {
                format!("{}.{}", path, format.extension())
            } else {
                path.clone()
            };
            let storage = LocalStorage::new(".");
            write_report(&storage, &path, &result, format).await?;
            tracing::info!("📁 Output saved to: {}", path);
        }
        None => println!("{}", render(&result, format)?),
    }

    Ok(result)
}

fn exit_with(e: &FlightError) -> ! {
    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,      // 警告
        ErrorSeverity::Medium => 2,   // 可重試的抓取錯誤
        ErrorSeverity::High => 1,     // 解析、輸入或設定錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    };
    std::process::exit(exit_code);
}
