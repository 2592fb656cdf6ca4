use crate::domain::model::SearchResult;
use crate::domain::ports::Storage;
use crate::utils::error::{FlightError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
}

pub fn render(result: &SearchResult, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ExportFormat::Csv => render_delimited(result, b','),
        ExportFormat::Tsv => render_delimited(result, b'\t'),
    }
}

/// One row per flight; the header comes from the entry's field names.
fn render_delimited(result: &SearchResult, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for flight in &result.flights {
        writer.serialize(flight)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FlightError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        FlightError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub async fn write_report<S: Storage>(
    storage: &S,
    path: &str,
    result: &SearchResult,
    format: ExportFormat,
) -> Result<()> {
    let rendered = render(result, format)?;
    tracing::debug!(path, bytes = rendered.len(), "writing report");
    storage.write_file(path, rendered.as_bytes()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FlightEntry, Stops};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn sample() -> SearchResult {
        SearchResult {
            current_price: "low".to_string(),
            flights: vec![
                FlightEntry {
                    is_best: true,
                    name: "United".to_string(),
                    departure: "8:00 AM on Fri, Nov 20".to_string(),
                    arrival: "11:30 AM".to_string(),
                    arrival_time_ahead: String::new(),
                    duration: "5 hr 30 min".to_string(),
                    stops: Stops::Count(0),
                    delay: None,
                    price: "$1234".to_string(),
                    airline_code: "UA".to_string(),
                    flight_number: "1234".to_string(),
                },
                FlightEntry {
                    is_best: false,
                    name: "Delta".to_string(),
                    departure: "9:00 AM".to_string(),
                    arrival: "6:05 PM".to_string(),
                    arrival_time_ahead: "+1".to_string(),
                    duration: "9 hr 5 min".to_string(),
                    stops: Stops::Unknown,
                    delay: Some("Often delayed by 30+ min".to_string()),
                    price: "$980".to_string(),
                    airline_code: "DL".to_string(),
                    flight_number: "55".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["current_price"], "low");
        assert_eq!(value["flights"][0]["stops"], 0);
        assert_eq!(value["flights"][1]["stops"], "Unknown");
        assert!(value["flights"][0]["delay"].is_null());
    }

    #[test]
    fn test_render_csv() {
        let csv = render(&sample(), ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "is_best,name,departure,arrival,arrival_time_ahead,duration,stops,delay,price,airline_code,flight_number"
        );
        assert_eq!(lines[1], "true,United,\"8:00 AM on Fri, Nov 20\",11:30 AM,,5 hr 30 min,0,,$1234,UA,1234");
        assert!(lines[2].contains(",Unknown,Often delayed by 30+ min,"));
    }

    #[test]
    fn test_render_tsv() {
        let tsv = render(&sample(), ExportFormat::Tsv).unwrap();
        let first_row: Vec<&str> = tsv.lines().nth(1).unwrap().split('\t').collect();
        assert_eq!(first_row[2], "8:00 AM on Fri, Nov 20");
        assert_eq!(first_row.len(), 11);
    }

    #[tokio::test]
    async fn test_write_report_through_storage() {
        let storage = MockStorage::default();
        write_report(&storage, "flights.json", &sample(), ExportFormat::Json)
            .await
            .unwrap();

        let files = storage.files.lock().await;
        let written = files.get("flights.json").unwrap();
        assert!(String::from_utf8_lossy(written).contains("\"airline_code\": \"UA\""));
    }
}
