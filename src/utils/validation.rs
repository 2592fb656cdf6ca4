use crate::utils::error::{FlightError, Result};
use chrono::NaiveDate;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_url_scheme(field_name, url_str, &["http", "https"])
}

/// Like [`validate_url`] but with an explicit list of accepted schemes
/// (proxies take `socks5`, DevTools endpoints take `ws`/`wss`).
pub fn validate_url_scheme(field_name: &str, url_str: &str, schemes: &[&str]) -> Result<()> {
    if url_str.is_empty() {
        return Err(FlightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => {
            if schemes.contains(&url.scheme()) {
                Ok(())
            } else {
                Err(FlightError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: url_str.to_string(),
                    reason: format!(
                        "Unsupported URL scheme: {}. Allowed: {}",
                        url.scheme(),
                        schemes.join(", ")
                    ),
                })
            }
        }
        Err(e) => Err(FlightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(FlightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FlightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FlightError::ValidationError {
            message: format!("{} must be between {} and {}, got {}", field_name, min, max, value),
        });
    }
    Ok(())
}

/// Departure dates are `YYYY-MM-DD`.
pub fn validate_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| FlightError::ValidationError {
        message: format!("{} must be a YYYY-MM-DD date, got '{}': {}", field_name, value, e),
    })
}

/// Three-letter IATA airport code, uppercase.
pub fn validate_airport_code(field_name: &str, value: &str) -> Result<()> {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(FlightError::ValidationError {
            message: format!("{} must be a 3-letter IATA code, got '{}'", field_name, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("provider_url", "https://example.com").is_ok());
        assert!(validate_url("provider_url", "http://example.com").is_ok());
        assert!(validate_url("provider_url", "").is_err());
        assert!(validate_url("provider_url", "invalid-url").is_err());
        assert!(validate_url("provider_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_url_scheme() {
        assert!(validate_url_scheme("proxy", "socks5://127.0.0.1:1080", &["http", "socks5"]).is_ok());
        assert!(validate_url_scheme("endpoint", "ws://127.0.0.1:9222/devtools", &["ws", "wss"]).is_ok());
        assert!(validate_url_scheme("endpoint", "http://127.0.0.1:9222", &["ws", "wss"]).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("date", "2026-11-20").is_ok());
        assert!(validate_date("date", "2026-02-30").is_err());
        assert!(validate_date("date", "20/11/2026").is_err());
    }

    #[test]
    fn test_validate_airport_code() {
        assert!(validate_airport_code("from_airport", "JFK").is_ok());
        assert!(validate_airport_code("from_airport", "jfk").is_err());
        assert!(validate_airport_code("from_airport", "JFKX").is_err());
    }
}
