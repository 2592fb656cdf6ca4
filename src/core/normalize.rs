//! Pure text-to-value transforms applied to scraped fields.

use crate::domain::model::Stops;
use regex::Regex;

/// `-<CODE>-<NUMBER>-` inside the travel-impact-model URL of an item.
pub const FLIGHT_IDENTIFIER_PATTERN: &str = r"-([A-Z0-9]{2,3})-(\d{2,4})-";

/// Collapses every whitespace run into one space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"Nonstop"` is zero, otherwise the leading token must be a count.
pub fn parse_stops(text: &str) -> Stops {
    let text = text.trim();
    if text == "Nonstop" {
        return Stops::Count(0);
    }

    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .map(Stops::Count)
        .unwrap_or(Stops::Unknown)
}

/// Drops thousands separators. Currency symbols are kept as-is.
pub fn normalize_price(text: &str) -> String {
    let text = if text.is_empty() { "0" } else { text };
    text.replace(',', "")
}

pub fn normalize_delay(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Returns `(airline_code, flight_number)` from the first match, if any.
pub fn decode_flight_identifier(pattern: &Regex, value: &str) -> Option<(String, String)> {
    let caps = pattern.captures(value)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}
