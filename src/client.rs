use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Instant;

use crate::api;
use crate::api::models::{HealthStatus, SearchRequest};
use crate::error::SearchError;
use crate::normalizer;
use crate::session::SearchOutcome;

/// Talks to the search backend. No timeout is set on requests and nothing
/// is retried; a failed search is reported once and left to the user.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(endpoint: impl Into<String>) -> SearchClient {
        Self::with_http_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_http_client(http: reqwest::Client, endpoint: impl Into<String>) -> SearchClient {
        SearchClient {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one search. Every failure is folded into the outcome so callers
    /// always get something to leave the loading state with.
    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let start = Instant::now();
        let outcome = match self.send(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("search request to {} failed: {:#}", self.endpoint, e);
                SearchOutcome::Failed(SearchError::from_transport(&e))
            }
        };
        log::info!(
            "search for {:?} on {} finished in {}ms",
            request.query,
            request.url,
            start.elapsed().as_millis()
        );
        outcome
    }

    async fn send(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let res = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .context("Failed to send search request")?;

        let status = res.status();
        let body: Value = res
            .json()
            .await
            .with_context(|| format!("Failed to decode search response (HTTP {status})"))?;

        if status.is_success() {
            let normalized = normalizer::normalize(&body);
            log::debug!("received {} fragments", normalized.fragments.len());
            Ok(SearchOutcome::Found(normalized))
        } else {
            log::warn!("search backend answered HTTP {status}");
            Ok(SearchOutcome::Failed(SearchError::from_http_failure(&body)))
        }
    }

    /// Ask the backend whether it and its vector store are up. An unhealthy
    /// backend answers 500 with a status body, which is still returned here.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = api::health_url(&self.endpoint)?;
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        let status = res.status();
        res.json::<HealthStatus>()
            .await
            .with_context(|| format!("Unexpected health response (HTTP {status})"))
    }
}
