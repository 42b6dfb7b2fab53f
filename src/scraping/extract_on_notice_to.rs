use chrono::{Days, NaiveDate};
use regex::Regex;

/// First `D Month YYYY` date in the title, as written.
pub fn extract_notice_date(title: &str) -> Option<String> {
    let regex = Regex::new(r"(\d{1,2} [A-Za-z]+ \d{4})").unwrap();

    regex
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|match_| match_.as_str().to_string())
}

/// Last day of public notice, counted in calendar days from receipt.
pub fn notice_period_end(date_received: NaiveDate, notice_period_days: u32) -> Option<NaiveDate> {
    date_received.checked_add_days(Days::new(u64::from(notice_period_days)))
}
