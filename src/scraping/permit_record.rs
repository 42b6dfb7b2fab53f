use chrono::NaiveDate;

pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const DATE_NOT_FOUND: &str = "Date not found";

/// One permit as mined from a single result row. Built fresh for every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitRecord {
    pub council_reference: String,
    /// Raw title text every other field is derived from.
    pub title_reference: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub date_received: Option<NaiveDate>,
    /// Stored in place of `date_received` when it is absent.
    pub date_received_fallback: &'static str,
    pub on_notice_to: Option<String>,
    /// Download URL of the permit document.
    pub document_description: Option<String>,
}

impl PermitRecord {
    pub fn new(council_reference: String, title_reference: String) -> Self {
        Self {
            council_reference,
            title_reference,
            description: None,
            address: None,
            date_received: None,
            date_received_fallback: DATE_NOT_FOUND,
            on_notice_to: None,
            document_description: None,
        }
    }
}

/// Outcome of running an extractor over one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(PermitRecord),
    Skipped(String),
}
