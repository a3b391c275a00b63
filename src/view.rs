use std::fmt::Write;

use crate::api::models::HealthStatus;
use crate::session::{SearchPhase, SessionState};

pub const SUBMIT_LABEL: &str = "Search";
pub const SUBMIT_LABEL_LOADING: &str = "Searching...";

/// Text rendering of the whole page: form, banner, result list.
pub fn render(session: &SessionState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "url:   {}", session.url());
    let _ = writeln!(out, "query: {}", session.query());
    if session.is_loading() {
        let _ = writeln!(out, "[{SUBMIT_LABEL_LOADING}] (disabled)");
    } else if session.can_submit() {
        let _ = writeln!(out, "[{SUBMIT_LABEL}]");
    } else {
        let _ = writeln!(out, "[{SUBMIT_LABEL}] (fill in url and query)");
    }

    match session.phase() {
        SearchPhase::Failure(_) => {
            if let Some(msg) = session.error_message() {
                let _ = writeln!(out, "error: {msg}");
            }
        }
        SearchPhase::Empty => {
            if let Some(msg) = session.error_message() {
                let _ = writeln!(out, "info: {msg}");
            }
        }
        _ => {}
    }

    let results = session.results();
    if !results.is_empty() {
        let _ = write!(out, "\nTop {} Matches:", results.len());
        match session.chunks_processed() {
            Some(chunks) => {
                let _ = writeln!(out, " ({chunks} chunks searched)");
            }
            None => out.push('\n'),
        }
        for (i, item) in results.iter().enumerate() {
            let marker = if item.expanded { "-" } else { "+" };
            let _ = writeln!(
                out,
                "{marker} #{} [{}%] {}",
                i + 1,
                item.match_score,
                item.preview_text
            );
            if item.expanded {
                for line in item.text.lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
        }
    }

    out
}

/// Report for the `health` command.
pub fn render_health(health: &HealthStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "status: {}", health.status);
    if let Some(store) = &health.weaviate {
        let _ = writeln!(out, "vector store: {store}");
    }
    if let Some(err) = &health.error {
        let _ = writeln!(out, "error: {err}");
    }
    out
}
