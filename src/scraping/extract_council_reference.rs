/// Everything before the first `" - "` of the title, trimmed.
pub fn extract_council_reference(title: &str) -> Option<String> {
    let reference = title.split(" - ").next().unwrap_or_default().trim();

    if reference.is_empty() {
        None
    } else {
        Some(reference.to_string())
    }
}
