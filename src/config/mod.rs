pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use crate::core::export::ExportFormat;
    use crate::domain::model::FetchMode;
    use crate::utils::error::{FlightError, Result};
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "flight-scrape")]
    #[command(about = "Fetch Google Flights results for an encoded search filter")]
    pub struct CliConfig {
        /// Encoded search filter (the `tfs` query parameter)
        #[arg(long)]
        pub tfs: String,

        /// TOML configuration file; flags below override it
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, value_enum)]
        pub mode: Option<FetchMode>,

        #[arg(long)]
        pub proxy: Option<String>,

        #[arg(long)]
        pub currency: Option<String>,

        #[arg(long)]
        pub language: Option<String>,

        /// DevTools endpoint of a remote browser
        #[arg(long)]
        pub remote_browser: Option<String>,

        /// Path to a local Chromium binary
        #[arg(long)]
        pub chrome: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        pub timeout: Option<u64>,

        #[arg(long, value_enum)]
        pub format: Option<ExportFormat>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        /// Keep the trailing item of secondary flight groups
        #[arg(long)]
        pub include_last_item: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub json_logs: bool,
    }

    impl CliConfig {
        /// 載入設定檔 (若有) 並套用命令列覆蓋
        pub fn load_settings(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };
            self.apply_to(&mut config);
            Ok(config)
        }

        pub fn apply_to(&self, config: &mut TomlConfig) {
            if let Some(mode) = self.mode {
                config.search.mode = Some(mode);
            }
            if let Some(proxy) = &self.proxy {
                config.provider.proxy = Some(proxy.clone());
            }
            if let Some(currency) = &self.currency {
                config.search.currency = Some(currency.clone());
            }
            if let Some(language) = &self.language {
                config.search.language = Some(language.clone());
            }
            if let Some(endpoint) = &self.remote_browser {
                config.browser.remote_endpoint = Some(endpoint.clone());
            }
            if let Some(chrome) = &self.chrome {
                config.browser.chrome_executable = Some(chrome.clone());
            }
            if let Some(timeout) = self.timeout {
                config.provider.timeout_seconds = Some(timeout);
            }
            if let Some(format) = self.format {
                config.output.format = Some(format);
            }
            if let Some(output) = &self.output {
                config.output.path = Some(output.clone());
            }
            if self.include_last_item {
                config.search.include_last_item = Some(true);
            }
            if self.json_logs {
                config.logging.json = Some(true);
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if self.tfs.trim().is_empty() {
                return Err(FlightError::MissingConfigError {
                    field: "tfs".to_string(),
                });
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_flags_override_config() {
            let cli = CliConfig::try_parse_from([
                "flight-scrape",
                "--tfs",
                "CBwQAhoe",
                "--mode",
                "force-fallback",
                "--currency",
                "JPY",
                "--format",
                "tsv",
                "--include-last-item",
            ])
            .unwrap();

            let mut config = TomlConfig::from_toml_str("[search]\nmode = \"direct\"\ncurrency = \"EUR\"\n")
                .unwrap();
            cli.apply_to(&mut config);

            assert_eq!(config.fetch_mode(), FetchMode::ForceFallback);
            assert_eq!(config.query(&cli.tfs).currency, "JPY");
            assert_eq!(config.export_format(), ExportFormat::Tsv);
            assert!(config.extract_options().include_last_item);
        }

        #[test]
        fn test_missing_flags_keep_config_values() {
            let cli = CliConfig::try_parse_from(["flight-scrape", "--tfs", "abc"]).unwrap();
            let mut config =
                TomlConfig::from_toml_str("[search]\nmode = \"local-browser\"\n").unwrap();
            cli.apply_to(&mut config);

            assert_eq!(config.fetch_mode(), FetchMode::LocalBrowser);
            assert!(!config.extract_options().include_last_item);
            assert!(cli.validate().is_ok());
        }

        #[test]
        fn test_blank_filter_is_invalid() {
            let cli = CliConfig::try_parse_from(["flight-scrape", "--tfs", "  "]).unwrap();
            assert!(matches!(
                cli.validate(),
                Err(FlightError::MissingConfigError { .. })
            ));
        }
    }
}
