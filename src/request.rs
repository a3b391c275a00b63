use crate::api::models::SearchRequest;

/// A form field counts as filled once it holds something other than
/// whitespace.
pub fn is_filled(field: &str) -> bool {
    !field.trim().is_empty()
}

/// Builds the payload for a submission. `None` means the submit action is
/// disabled; fields are sent as typed.
pub fn build_request(url: &str, query: &str) -> Option<SearchRequest> {
    if !is_filled(url) || !is_filled(query) {
        return None;
    }
    Some(SearchRequest {
        url: url.to_string(),
        query: query.to_string(),
    })
}
