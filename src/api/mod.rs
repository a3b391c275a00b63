use anyhow::{Context, Result};
use reqwest::Url;

pub mod models;

pub const HEALTH_PATH: &str = "/health";

/// Health endpoint living next to the configured search endpoint.
pub fn health_url(search_endpoint: &str) -> Result<Url> {
    let base = Url::parse(search_endpoint)
        .with_context(|| format!("Invalid search endpoint: {search_endpoint}"))?;
    base.join(HEALTH_PATH)
        .context("Failed to derive health endpoint")
}

#[test]
fn test_health_url() {
    let url = health_url("http://localhost:5000/search").unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/health");

    let url = health_url("https://search.internal:8443/api/search").unwrap();
    assert_eq!(url.as_str(), "https://search.internal:8443/health");

    assert!(health_url("not a url").is_err());
}
