use regex::Regex;

const EXPIRY_MARKER: &str = "Notification expiry date";

/// Text between the dash following the address and the expiry marker.
pub fn extract_description_before_expiry(title: &str) -> Option<String> {
    let regex = Regex::new(&format!(r"-\s([^-\d]+)-\s{}", EXPIRY_MARKER)).unwrap();

    regex
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|match_| match_.as_str().trim().to_string())
        .filter(|description| !description.is_empty())
}

/// Text after the last `" - "` of the title.
pub fn extract_description_after_last_delimiter(title: &str) -> Option<String> {
    title
        .rsplit_once(" - ")
        .map(|(_, description)| description.trim().to_string())
        .filter(|description| !description.is_empty())
}
