use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How hard the search should try to get a results page out of the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    #[default]
    #[serde(alias = "common")]
    #[cfg_attr(feature = "cli", value(alias = "common"))]
    Direct,
    #[serde(alias = "fallback")]
    #[cfg_attr(feature = "cli", value(alias = "fallback"))]
    DirectWithFallback,
    ForceFallback,
    #[serde(alias = "local")]
    #[cfg_attr(feature = "cli", value(alias = "local"))]
    LocalBrowser,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchMode::Direct => "direct",
            FetchMode::DirectWithFallback => "direct-with-fallback",
            FetchMode::ForceFallback => "force-fallback",
            FetchMode::LocalBrowser => "local-browser",
        })
    }
}

impl FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" | "common" => Ok(FetchMode::Direct),
            "direct-with-fallback" | "fallback" => Ok(FetchMode::DirectWithFallback),
            "force-fallback" => Ok(FetchMode::ForceFallback),
            "local-browser" | "local" => Ok(FetchMode::LocalBrowser),
            other => Err(format!("unknown fetch mode '{}'", other)),
        }
    }
}

/// One concrete way of retrieving the provider page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Direct,
    RemoteBrowser,
    LocalBrowser,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::Direct => "direct",
            StrategyKind::RemoteBrowser => "remote-browser",
            StrategyKind::LocalBrowser => "local-browser",
        })
    }
}

/// Fetched HTML plus the status it came with.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub status: u16,
    pub body: String,
    pub strategy: StrategyKind,
}

impl RawDocument {
    pub fn new(strategy: StrategyKind, status: u16, body: String) -> Self {
        Self {
            status,
            body,
            strategy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stops {
    Count(u32),
    Unknown,
}

impl fmt::Display for Stops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stops::Count(n) => write!(f, "{}", n),
            Stops::Unknown => f.write_str("Unknown"),
        }
    }
}

// A number, or the literal string "Unknown".
impl Serialize for Stops {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stops::Count(n) => serializer.serialize_u32(*n),
            Stops::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightEntry {
    pub is_best: bool,
    pub name: String,
    pub departure: String,
    pub arrival: String,
    pub arrival_time_ahead: String,
    pub duration: String,
    pub stops: Stops,
    pub delay: Option<String>,
    pub price: String,
    pub airline_code: String,
    pub flight_number: String,
}

/// Parsed results page. `flights` keeps document order, best group first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub current_price: String,
    pub flights: Vec<FlightEntry>,
}

impl SearchResult {
    pub fn best_flights(&self) -> impl Iterator<Item = &FlightEntry> {
        self.flights.iter().filter(|f| f.is_best)
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
