use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector '{}': {:?}", selector, e))
}

/// All result rows of the listing, in document order.
pub fn extract_rows<'a>(document: &'a Html, row_selector: &Selector) -> Vec<ElementRef<'a>> {
    document.select(row_selector).collect()
}

/// Trimmed text content of the first element under `row` matching `selector`.
pub fn extract_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|element| element.text().collect::<Vec<_>>().join("").trim().to_string())
}
