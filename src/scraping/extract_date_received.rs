use chrono::NaiveDate;

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parses the "file modified" text of a result row. A trailing time
/// (`2024-02-20 10:15`) is ignored.
pub fn parse_modified_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    parse_with_formats(text).or_else(|| {
        text.split_whitespace()
            .next()
            .filter(|first| *first != text)
            .and_then(parse_with_formats)
    })
}

fn parse_with_formats(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
