use crate::utils::error::{FlightError, Result};
use scraper::{ElementRef, Selector};

pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| FlightError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// A selector match that may not exist. Every accessor is total: an absent
/// node reads as empty text.
#[derive(Debug, Clone, Copy)]
pub struct OptionalNode<'a>(Option<ElementRef<'a>>);

impl<'a> OptionalNode<'a> {
    pub fn first(scope: ElementRef<'a>, selector: &Selector) -> Self {
        Self(scope.select(selector).next())
    }

    pub fn from_element(element: Option<ElementRef<'a>>) -> Self {
        Self(element)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// All descendant text, concatenated verbatim.
    pub fn text(&self) -> String {
        self.0.map(|el| el.text().collect()).unwrap_or_default()
    }

    /// Descendant text with each text node trimmed before joining.
    pub fn stripped_text(&self) -> String {
        self.0.map(|el| el.text().map(str::trim).collect()).unwrap_or_default()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.and_then(|el| el.value().attr(name))
    }
}
