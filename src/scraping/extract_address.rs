use regex::Regex;

/// First `<number><letters> <words, commas>` run anywhere in the title.
pub fn extract_address_by_pattern(title: &str) -> Option<String> {
    let regex = Regex::new(r"(\d+[A-Za-z]*\s[\w\s,]+)").unwrap();

    regex
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|match_| match_.as_str().trim().to_string())
        .filter(|address| !address.is_empty())
}

/// Text between `DA<number> - ` at the start of the title and the next `" - "`.
pub fn extract_address_after_reference(title: &str) -> Option<String> {
    let regex = Regex::new(r"^DA[\d/]+ - (.+?) - ").unwrap();

    regex
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|match_| match_.as_str().trim().to_string())
        .filter(|address| !address.is_empty())
}
