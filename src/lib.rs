pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::export::ExportFormat;
pub use core::extract::ExtractOptions;
pub use core::search::FlightSearch;
pub use domain::model::{FetchMode, FlightEntry, RawDocument, SearchResult, Stops, StrategyKind};
pub use domain::query::{Query, SearchRequest};
pub use utils::error::{FlightError, Result};
