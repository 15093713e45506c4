//! Small helpers over `scraper` DOM types shared by the extractors.

use scraper::{ElementRef, Selector};

use crate::error::ScrapeError;

/// Compiles a CSS selector, surfacing a bad selector as a typed error
/// instead of a panic.
pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|_| ScrapeError::Selector {
        selector: selector.to_owned(),
    })
}

/// Concatenated text content of an element, whitespace-trimmed at both ends.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}
