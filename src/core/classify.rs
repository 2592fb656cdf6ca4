use crate::core::node::compile_selector;
use crate::utils::error::{FlightError, ParseFailure, Result};
use scraper::{Html, Selector};

/// Banner the provider shows when the requested date is out of range.
const DATE_TOO_FAR_SELECTOR: &str = r#"div[jsname="qJTHM"][class="FXkZv fXx9Lc"]"#;
/// Present on every well-formed results page, even one with no flights.
const RESULTS_CONTAINER_SELECTOR: &str = r#"div[jsname="qJTHM"]"#;

/// Rejects provider error pages before extraction runs.
pub struct ResponseClassifier {
    date_too_far: Selector,
    results_container: Selector,
}

impl ResponseClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            date_too_far: compile_selector(DATE_TOO_FAR_SELECTOR)?,
            results_container: compile_selector(RESULTS_CONTAINER_SELECTOR)?,
        })
    }

    pub fn classify(&self, body: &str) -> Result<Html> {
        let document = Html::parse_document(body);
        self.inspect(&document)?;
        Ok(document)
    }

    pub fn inspect(&self, document: &Html) -> Result<()> {
        if document.select(&self.date_too_far).next().is_some() {
            return Err(FlightError::DateTooFar);
        }

        if document.select(&self.results_container).next().is_none() {
            return Err(FlightError::parsing(ParseFailure::MissingResultsContainer));
        }

        Ok(())
    }
}
