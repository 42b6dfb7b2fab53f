use anyhow::{Context, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;

/// Single GET of the listing page. Transport errors and non-success statuses
/// are returned as errors; there is no retry.
pub async fn fetch_page(url: &str, user_agent: Option<&str>) -> Result<String> {
    let client = Client::new();

    let mut request = client.get(url);
    if let Some(user_agent) = user_agent {
        request = request.header(USER_AGENT, user_agent);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {}", url))?
        .error_for_status()
        .with_context(|| format!("Request to {} was not successful", url))?;

    let body = response.text().await.context("Failed to read response body")?;

    Ok(body)
}
