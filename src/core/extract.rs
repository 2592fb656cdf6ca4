use crate::core::node::{compile_selector, OptionalNode};
use crate::core::normalize::{
    collapse_whitespace, decode_flight_identifier, normalize_delay, normalize_price, parse_stops,
    FLIGHT_IDENTIFIER_PATTERN,
};
use crate::domain::model::{FlightEntry, SearchResult};
use crate::utils::error::{FlightError, ParseFailure, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const IMPACT_URL_ATTR: &str = "data-travelimpactmodelwebsiteurl";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Keep the trailing item of secondary groups. It is a rendering
    /// artifact of the page, so it is dropped unless asked for.
    pub include_last_item: bool,
}

/// Walks flight groups of a classified results page and builds entries.
pub struct FlightExtractor {
    groups: Selector,
    items: Selector,
    name: Selector,
    times: Selector,
    time_ahead: Selector,
    duration: Selector,
    stops: Selector,
    delay: Selector,
    price: Selector,
    impact_model: Selector,
    current_price: Selector,
    identifier_pattern: Regex,
    options: ExtractOptions,
}

impl FlightExtractor {
    pub fn new(options: ExtractOptions) -> Result<Self> {
        let identifier_pattern =
            Regex::new(FLIGHT_IDENTIFIER_PATTERN).map_err(|e| FlightError::Selector {
                selector: FLIGHT_IDENTIFIER_PATTERN.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            groups: compile_selector(r#"div[jsname="IWWDBc"], div[jsname="YdtKid"]"#)?,
            items: compile_selector("ul.Rk10dc li")?,
            name: compile_selector("div.sSHqwe.tPgKwe.ogfYpf span")?,
            times: compile_selector("span.mv1WYe div")?,
            time_ahead: compile_selector("span.bOzv6")?,
            duration: compile_selector("li div.Ak5kof div")?,
            stops: compile_selector(".BbR8Ec .ogfYpf")?,
            delay: compile_selector(".GsCCve")?,
            price: compile_selector(".YMlIz.FpEdX")?,
            impact_model: compile_selector(".NZRfve")?,
            current_price: compile_selector("span.gOatQ")?,
            identifier_pattern,
            options,
        })
    }

    pub fn extract(&self, document: &Html) -> Result<SearchResult> {
        let mut flights = Vec::new();

        for (index, group) in document.select(&self.groups).enumerate() {
            let is_best = index == 0;
            let items: Vec<ElementRef<'_>> = group.select(&self.items).collect();
            let keep = if is_best || self.options.include_last_item {
                items.len()
            } else {
                items.len().saturating_sub(1)
            };

            tracing::debug!(group = index, items = items.len(), keep, "extracting flight group");

            for item in &items[..keep] {
                flights.push(self.extract_item(*item, is_best)?);
            }
        }

        let current_price = OptionalNode::first(document.root_element(), &self.current_price).text();

        Ok(SearchResult {
            current_price,
            flights,
        })
    }

    fn extract_item(&self, item: ElementRef<'_>, is_best: bool) -> Result<FlightEntry> {
        let impact_url = OptionalNode::first(item, &self.impact_model).attr(IMPACT_URL_ATTR);
        let (airline_code, flight_number) = impact_url
            .and_then(|url| decode_flight_identifier(&self.identifier_pattern, url))
            .ok_or_else(|| {
                tracing::debug!(value = ?impact_url, "no airline code / flight number in item");
                FlightError::parsing(ParseFailure::MalformedFlightIdentifier)
            })?;

        // Both times or neither.
        let times: Vec<ElementRef<'_>> = item.select(&self.times).take(2).collect();
        let (departure, arrival) = match times.as_slice() {
            [departure, arrival] => (
                OptionalNode::from_element(Some(*departure)).stripped_text(),
                OptionalNode::from_element(Some(*arrival)).stripped_text(),
            ),
            _ => (String::new(), String::new()),
        };

        Ok(FlightEntry {
            is_best,
            name: OptionalNode::first(item, &self.name).stripped_text(),
            departure: collapse_whitespace(&departure),
            arrival: collapse_whitespace(&arrival),
            arrival_time_ahead: OptionalNode::first(item, &self.time_ahead).text(),
            duration: OptionalNode::first(item, &self.duration).text(),
            stops: parse_stops(&OptionalNode::first(item, &self.stops).text()),
            delay: normalize_delay(OptionalNode::first(item, &self.delay).text()),
            price: normalize_price(&OptionalNode::first(item, &self.price).text()),
            airline_code,
            flight_number,
        })
    }
}
