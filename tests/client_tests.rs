use anyhow::Result;
use serde_json::{Value, json};

use sitesearch::api::models::SearchRequest;
use sitesearch::error::{EMPTY_RESULT_MESSAGE, HTTP_FALLBACK_MESSAGE, TRANSPORT_MESSAGE};
use sitesearch::{SearchClient, SearchError, SearchOutcome, SearchPhase, SessionState};

mod test_helpers {
    use super::*;
    use axum::http::StatusCode;
    use axum::http::header::CONTENT_TYPE;
    use axum::routing::post;
    use axum::{Json, Router};

    /// Serve `router` on an ephemeral port and return its search endpoint.
    pub async fn spawn_backend(router: Router) -> Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Ok(format!("http://{addr}/search"))
    }

    /// Backend whose /search always answers `status` with JSON `body`.
    pub fn answering(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/search",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    /// Backend whose /search answers with a non-JSON body.
    pub fn answering_raw(status: StatusCode, body: &'static str) -> Router {
        Router::new().route(
            "/search",
            post(move || async move { (status, [(CONTENT_TYPE, "text/html")], body) }),
        )
    }

    /// An endpoint nothing listens on.
    pub async fn dead_endpoint() -> Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);
        Ok(format!("http://{addr}/search"))
    }

    /// Run one full submission through a fresh session.
    pub async fn run_search(endpoint: &str, url: &str, query: &str) -> SessionState {
        let client = SearchClient::new(endpoint);
        let mut session = SessionState::with_fields(url, query);
        let submission = session.submit().expect("fields are filled");
        assert!(session.is_loading());
        let outcome = client.search(&submission.request).await;
        assert!(session.complete(submission.ticket, outcome));
        session
    }
}

use axum::http::StatusCode;
use test_helpers::*;

#[tokio::test]
async fn test_pricing_scenario() -> Result<()> {
    let endpoint = spawn_backend(answering(
        StatusCode::OK,
        json!({"results": ["Our pricing starts at $10/mo..."], "chunks_processed": 3}),
    ))
    .await?;

    let session = run_search(&endpoint, "https://example.com", "pricing").await;

    let results = session.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "Our pricing starts at $10/mo...");
    assert_eq!(results[0].match_score, 95);
    assert!(!results[0].expanded);
    assert_eq!(session.error_message(), None);
    assert_eq!(session.chunks_processed(), Some(3));
    assert!(!session.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_bare_array_response() -> Result<()> {
    let fragments: Vec<String> = (0..10).map(|i| format!("chunk {i}")).collect();
    let endpoint = spawn_backend(answering(StatusCode::OK, json!(fragments))).await?;

    let session = run_search(&endpoint, "https://example.com", "chunk").await;

    let results = session.results();
    assert_eq!(
        results.iter().map(|r| r.text.clone()).collect::<Vec<_>>(),
        fragments
    );
    let scores: Vec<u32> = results.iter().map(|r| r.match_score).collect();
    assert_eq!(scores, vec![95, 88, 81, 74, 67, 60, 53, 50, 50, 50]);
    Ok(())
}

#[tokio::test]
async fn test_http_error_with_message() -> Result<()> {
    let endpoint = spawn_backend(answering(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "crawl failed"}),
    ))
    .await?;

    let session = run_search(&endpoint, "https://example.com", "pricing").await;

    assert_eq!(session.error_message().as_deref(), Some("crawl failed"));
    assert!(session.results().is_empty());
    assert!(!session.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_http_error_without_message() -> Result<()> {
    let endpoint = spawn_backend(answering(StatusCode::BAD_REQUEST, json!({}))).await?;

    let session = run_search(&endpoint, "https://example.com", "pricing").await;

    assert_eq!(session.error_message().as_deref(), Some(HTTP_FALLBACK_MESSAGE));
    assert!(!session.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_server_down() -> Result<()> {
    let endpoint = dead_endpoint().await?;

    let session = run_search(&endpoint, "https://example.com", "pricing").await;

    assert_eq!(session.error_message().as_deref(), Some(TRANSPORT_MESSAGE));
    assert!(session.results().is_empty());
    assert!(!session.is_loading());
    match session.phase() {
        SearchPhase::Failure(err) => assert!(err.is_transport()),
        other => panic!("unexpected phase: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_results() -> Result<()> {
    let endpoint = spawn_backend(answering(StatusCode::OK, json!({"results": []}))).await?;

    let session = run_search(&endpoint, "https://example.com", "pricing").await;

    assert_eq!(session.phase(), &SearchPhase::Empty);
    assert_eq!(session.error_message().as_deref(), Some(EMPTY_RESULT_MESSAGE));
    assert!(session.results().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unexpected_success_shape_is_empty() -> Result<()> {
    let endpoint = spawn_backend(answering(StatusCode::OK, json!({"error": "odd"}))).await?;

    let session = run_search(&endpoint, "https://example.com", "pricing").await;

    assert_eq!(session.phase(), &SearchPhase::Empty);
    Ok(())
}

#[tokio::test]
async fn test_unparseable_body_is_transport_failure() -> Result<()> {
    for status in [StatusCode::OK, StatusCode::BAD_GATEWAY] {
        let endpoint = spawn_backend(answering_raw(status, "<html>bad gateway</html>")).await?;

        let session = run_search(&endpoint, "https://example.com", "pricing").await;

        assert_eq!(
            session.error_message().as_deref(),
            Some(TRANSPORT_MESSAGE),
            "status {status}"
        );
        assert!(!session.is_loading());
    }
    Ok(())
}

#[tokio::test]
async fn test_request_is_json_post() -> Result<()> {
    use axum::http::HeaderMap;
    use axum::http::header::CONTENT_TYPE;
    use axum::routing::post;
    use axum::{Json, Router};

    async fn echo(headers: HeaderMap, Json(req): Json<SearchRequest>) -> Json<Value> {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Json(json!([content_type, req.url, req.query]))
    }

    let endpoint = spawn_backend(Router::new().route("/search", post(echo))).await?;
    let client = SearchClient::new(&endpoint);
    let request = SearchRequest {
        url: "https://example.com/docs".into(),
        query: "rate limits".into(),
    };

    match client.search(&request).await {
        SearchOutcome::Found(normalized) => assert_eq!(
            normalized.fragments,
            vec!["application/json", "https://example.com/docs", "rate limits"]
        ),
        SearchOutcome::Failed(err) => panic!("search failed: {err}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_resubmit_after_failure() -> Result<()> {
    let dead = dead_endpoint().await?;
    let live = spawn_backend(answering(StatusCode::OK, json!(["back online"]))).await?;

    let mut session = SessionState::with_fields("https://example.com", "pricing");

    let sub = session.submit().unwrap();
    let outcome = SearchClient::new(&dead).search(&sub.request).await;
    assert!(matches!(
        outcome,
        SearchOutcome::Failed(SearchError::Transport { .. })
    ));
    session.complete(sub.ticket, outcome);
    assert!(session.can_submit());

    let sub = session.submit().unwrap();
    assert_eq!(session.error_message(), None);
    let outcome = SearchClient::new(&live).search(&sub.request).await;
    session.complete(sub.ticket, outcome);

    assert_eq!(session.fragments(), ["back online".to_string()]);
    assert_eq!(session.error_message(), None);
    Ok(())
}
