use crate::api::models::SearchRequest;
use crate::error::{EMPTY_RESULT_MESSAGE, SearchError};
use crate::normalizer::Normalized;
use crate::presenter::{self, ResultItem};
use crate::request;

/// Where the current search stands. Exactly one of these holds at a time,
/// so a populated list never coexists with an error or with loading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Success {
        fragments: Vec<String>,
        chunks_processed: Option<u64>,
    },
    Failure(SearchError),
    Empty,
}

/// What a finished search request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Normalized),
    Failed(SearchError),
}

/// Identifies one submission. Tickets increase monotonically per session.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: SearchRequest,
}

/// Everything the client shows. Lives only as long as the process.
#[derive(Debug, Default)]
pub struct SessionState {
    url: String,
    query: String,
    phase: SearchPhase,
    expanded_index: Option<usize>,
    latest_ticket: Ticket,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded_index
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching)
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && request::is_filled(&self.url) && request::is_filled(&self.query)
    }

    /// Start a search: clears previous results, message and expansion, then
    /// hands back the request to send. `None` when submitting is disabled.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.is_loading() {
            return None;
        }
        let request = request::build_request(&self.url, &self.query)?;

        self.latest_ticket += 1;
        self.phase = SearchPhase::Searching;
        self.expanded_index = None;

        Some(Submission {
            ticket: self.latest_ticket,
            request,
        })
    }

    /// Apply a finished request. Always leaves the loading state when the
    /// ticket is current; completions for older tickets are dropped.
    /// Returns whether the outcome was applied.
    pub fn complete(&mut self, ticket: Ticket, outcome: SearchOutcome) -> bool {
        if ticket != self.latest_ticket || !self.is_loading() {
            log::debug!(
                "discarding stale search completion #{ticket} (latest #{})",
                self.latest_ticket
            );
            return false;
        }

        self.phase = match outcome {
            SearchOutcome::Found(normalized) if normalized.fragments.is_empty() => {
                SearchPhase::Empty
            }
            SearchOutcome::Found(normalized) => SearchPhase::Success {
                fragments: normalized.fragments,
                chunks_processed: normalized.chunks_processed,
            },
            SearchOutcome::Failed(err) => SearchPhase::Failure(err),
        };
        true
    }

    /// Expand/collapse the result at `index`. Returns false when there is no
    /// such result.
    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        if index >= self.fragments().len() {
            return false;
        }
        self.expanded_index = presenter::toggle(self.expanded_index, index);
        true
    }

    pub fn fragments(&self) -> &[String] {
        match &self.phase {
            SearchPhase::Success { fragments, .. } => fragments,
            _ => &[],
        }
    }

    pub fn results(&self) -> Vec<ResultItem> {
        presenter::present(self.fragments(), self.expanded_index)
    }

    pub fn chunks_processed(&self) -> Option<u64> {
        match &self.phase {
            SearchPhase::Success {
                chunks_processed, ..
            } => *chunks_processed,
            _ => None,
        }
    }

    /// Banner text: the failure message, or the informational notice for a
    /// search that found nothing.
    pub fn error_message(&self) -> Option<String> {
        match &self.phase {
            SearchPhase::Failure(err) => Some(err.to_string()),
            SearchPhase::Empty => Some(EMPTY_RESULT_MESSAGE.to_string()),
            _ => None,
        }
    }
}
