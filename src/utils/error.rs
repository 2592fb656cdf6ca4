use crate::domain::model::StrategyKind;
use std::fmt;
use thiserror::Error;

/// Which structural invariant of the results page was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// The `qJTHM` container every results page carries (even an empty one) is missing.
    MissingResultsContainer,
    /// An item's travel-impact-model URL is absent or lacks `-<CODE>-<NUMBER>-`.
    MalformedFlightIdentifier,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::MissingResultsContainer => f.write_str("required results container missing"),
            ParseFailure::MalformedFlightIdentifier => {
                f.write_str("cannot decode airline code or flight number")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum FlightError {
    #[error("{strategy} fetch returned HTTP {status}: {excerpt}")]
    FetchStatus {
        strategy: StrategyKind,
        status: u16,
        excerpt: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{strategy} fetch failed: {message}")]
    Browser {
        strategy: StrategyKind,
        message: String,
    },

    #[error("Requested flight date is too far in the future")]
    DateTooFar,

    #[error("Parsing error: {0}")]
    Parsing(ParseFailure),

    #[error("Invalid selector {selector}: {message}")]
    Selector { selector: String, message: String },

    #[error("No fetch strategy registered for {0}")]
    StrategyUnavailable(StrategyKind),

    #[error("Query encoding failed: {message}")]
    QueryEncoding { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Provider,
    Markup,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FlightError {
    pub fn parsing(failure: ParseFailure) -> Self {
        FlightError::Parsing(failure)
    }

    /// Failures that a deeper fetch strategy may recover from.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            FlightError::FetchStatus { .. } | FlightError::Http(_) | FlightError::Browser { .. }
        )
    }

    /// Markup did not have the expected shape. Never true for [`FlightError::DateTooFar`].
    pub fn is_parsing_failure(&self) -> bool {
        matches!(self, FlightError::Parsing(_))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FlightError::FetchStatus { .. } | FlightError::Http(_) | FlightError::Browser { .. } => {
                ErrorCategory::Network
            }
            FlightError::DateTooFar => ErrorCategory::Provider,
            FlightError::Parsing(_) | FlightError::Selector { .. } => ErrorCategory::Markup,
            FlightError::StrategyUnavailable(_)
            | FlightError::ConfigValidationError { .. }
            | FlightError::InvalidConfigValueError { .. }
            | FlightError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FlightError::QueryEncoding { .. } | FlightError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            FlightError::IoError(_)
            | FlightError::SerializationError(_)
            | FlightError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Provider | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Markup | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FlightError::FetchStatus { .. } | FlightError::Http(_) => {
                "Retry with --mode direct-with-fallback or route through a proxy"
            }
            FlightError::Browser { .. } => {
                "Check the remote browser endpoint or the local Chromium installation"
            }
            FlightError::DateTooFar => "Pick a departure date closer to today",
            FlightError::Parsing(_) | FlightError::Selector { .. } => {
                "The provider page layout may have changed; try --mode local-browser"
            }
            FlightError::StrategyUnavailable(_) => {
                "Configure the missing strategy or choose another fetch mode"
            }
            FlightError::QueryEncoding { .. } | FlightError::ValidationError { .. } => {
                "Check the search parameters"
            }
            FlightError::ConfigValidationError { .. }
            | FlightError::InvalidConfigValueError { .. }
            | FlightError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
            FlightError::IoError(_) => "Check file paths and permissions",
            FlightError::SerializationError(_) | FlightError::CsvError(_) => {
                "Report this as a bug with the failing query"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FlightError::DateTooFar => "The requested date is outside the range the provider supports".to_string(),
            FlightError::Parsing(failure) => format!("Could not read the results page ({})", failure),
            FlightError::FetchStatus { status, .. } => {
                format!("The provider refused the request (HTTP {})", status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlightError>;
