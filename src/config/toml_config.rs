use crate::adapters::http::{CHROME_USER_AGENT, DEFAULT_PROVIDER_URL};
use crate::core::export::ExportFormat;
use crate::core::extract::ExtractOptions;
use crate::core::ConfigProvider;
use crate::domain::model::FetchMode;
use crate::domain::query::{Query, DEFAULT_LANGUAGE};
use crate::utils::error::{FlightError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, validate_url_scheme,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BROWSER_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub provider: ProviderConfig,
    pub search: SearchConfig,
    pub browser: BrowserSettings,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub url: String,
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PROVIDER_URL.to_string(),
            user_agent: None,
            proxy: None,
            timeout_seconds: None,
            accept_invalid_certs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: Option<FetchMode>,
    pub currency: Option<String>,
    pub language: Option<String>,
    pub include_last_item: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// DevTools endpoint of a remote browser (`ws://…` or `http://host:port`).
    pub remote_endpoint: Option<String>,
    pub chrome_executable: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<ExportFormat>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FlightError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlightError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROXY_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlightError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("provider.url", &self.provider.url)?;

        if let Some(proxy) = &self.provider.proxy {
            validate_url_scheme("provider.proxy", proxy, &["http", "https", "socks5", "socks5h"])?;
        }

        if let Some(user_agent) = &self.provider.user_agent {
            validate_non_empty_string("provider.user_agent", user_agent)?;
        }

        if let Some(timeout) = self.provider.timeout_seconds {
            validate_positive_number("provider.timeout_seconds", timeout, 1)?;
        }

        if let Some(endpoint) = &self.browser.remote_endpoint {
            validate_url_scheme(
                "browser.remote_endpoint",
                endpoint,
                &["ws", "wss", "http", "https"],
            )?;
        }

        if self.fetch_mode() == FetchMode::ForceFallback && self.browser.remote_endpoint.is_none() {
            return Err(FlightError::MissingConfigError {
                field: "browser.remote_endpoint".to_string(),
            });
        }

        if let Some(timeout) = self.browser.timeout_seconds {
            validate_positive_number("browser.timeout_seconds", timeout, 1)?;
        }

        if let Some(currency) = &self.search.currency {
            if !currency.is_empty()
                && !(currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()))
            {
                return Err(FlightError::InvalidConfigValueError {
                    field: "search.currency".to_string(),
                    value: currency.clone(),
                    reason: "Currency must be a 3-letter ISO code such as USD".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.search.mode.unwrap_or_default()
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_last_item: self.search.include_last_item.unwrap_or(false),
        }
    }

    pub fn export_format(&self) -> ExportFormat {
        self.output.format.unwrap_or_default()
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }

    /// Wraps an encoded filter with the configured currency and language.
    pub fn query(&self, filter: &str) -> Query {
        Query::new(filter)
            .with_currency(self.search.currency.clone().unwrap_or_default())
            .with_language(
                self.search
                    .language
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            )
    }
}

impl ConfigProvider for TomlConfig {
    fn provider_url(&self) -> &str {
        &self.provider.url
    }

    fn user_agent(&self) -> &str {
        self.provider.user_agent.as_deref().unwrap_or(CHROME_USER_AGENT)
    }

    fn proxy(&self) -> Option<&str> {
        self.provider.proxy.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.provider
                .timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    fn accept_invalid_certs(&self) -> bool {
        self.provider.accept_invalid_certs.unwrap_or(false)
    }

    fn remote_browser_endpoint(&self) -> Option<&str> {
        self.browser.remote_endpoint.as_deref()
    }

    fn chrome_executable(&self) -> Option<&str> {
        self.browser.chrome_executable.as_deref()
    }

    fn browser_timeout(&self) -> Duration {
        Duration::from_secs(
            self.browser
                .timeout_seconds
                .unwrap_or(DEFAULT_BROWSER_TIMEOUT_SECS),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
