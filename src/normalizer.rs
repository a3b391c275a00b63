use serde_json::Value;

/// Fragments pulled out of a successful search response, in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub fragments: Vec<String>,
    /// Number of chunks the backend indexed for this page, when reported.
    pub chunks_processed: Option<u64>,
}

/// Reconciles the accepted success shapes into one ordered list:
///
/// ```text
///     ["a", "b"]                          -> [a, b]
///     {"results": ["a", "b"], ...}        -> [a, b]
///     anything else                       -> []
/// ```
///
/// The order of the source array is kept; index 0 is the top match.
pub fn normalize(body: &Value) -> Normalized {
    match body {
        Value::Array(items) => Normalized {
            fragments: collect_fragments(items),
            chunks_processed: None,
        },
        Value::Object(map) => {
            let fragments = match map.get("results") {
                Some(Value::Array(items)) => collect_fragments(items),
                _ => Vec::new(),
            };
            Normalized {
                fragments,
                chunks_processed: map.get("chunks_processed").and_then(Value::as_u64),
            }
        }
        _ => Normalized::default(),
    }
}

fn collect_fragments(items: &[Value]) -> Vec<String> {
    items.iter().map(fragment_text).collect()
}

// Fragments are opaque. Retrieval records ({content, url}) contribute their
// content; anything else is kept as its JSON text rather than dropped.
fn fragment_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("content") {
            Some(Value::String(content)) => content.clone(),
            _ => item.to_string(),
        },
        other => other.to_string(),
    }
}
