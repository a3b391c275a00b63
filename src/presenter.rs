/// Characters of a fragment shown before it is cut.
pub const PREVIEW_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";

const TOP_SCORE: u32 = 95;
const SCORE_STEP: u32 = 7;
const SCORE_FLOOR: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub text: String,
    pub preview_text: String,
    pub match_score: u32,
    pub expanded: bool,
}

/// Cut a fragment for the collapsed card. Length is counted in chars, so a
/// multi-byte fragment is never split inside a code point.
pub fn preview_text(fragment: &str) -> String {
    match fragment.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &fragment[..cut], ELLIPSIS),
        None => fragment.to_string(),
    }
}

/// Rank-derived score shown next to each card: 95, 88, 81, ... held at 50.
///
/// Cosmetic only. The backend sends no relevance values, so this says
/// nothing about how well a fragment matched.
pub fn match_score(rank: usize) -> u32 {
    let drop = u32::try_from(rank)
        .unwrap_or(u32::MAX)
        .saturating_mul(SCORE_STEP);
    TOP_SCORE.saturating_sub(drop).max(SCORE_FLOOR)
}

pub fn present(fragments: &[String], expanded_index: Option<usize>) -> Vec<ResultItem> {
    fragments
        .iter()
        .enumerate()
        .map(|(i, text)| ResultItem {
            text: text.clone(),
            preview_text: preview_text(text),
            match_score: match_score(i),
            expanded: expanded_index == Some(i),
        })
        .collect()
}

/// Exclusive toggle: selecting the open item closes it, selecting any other
/// item opens that one instead.
pub fn toggle(expanded_index: Option<usize>, index: usize) -> Option<usize> {
    if expanded_index == Some(index) {
        None
    } else {
        Some(index)
    }
}

#[test]
fn test_match_score() {
    assert_eq!(match_score(0), 95);
    assert_eq!(match_score(1), 88);
    assert_eq!(match_score(5), 60);
    assert_eq!(match_score(6), 53);
    assert_eq!(match_score(7), 50);
    assert_eq!(match_score(10), 50);
    assert_eq!(match_score(usize::MAX), 50);

    for i in 0..200 {
        let expected = (95i64 - 7 * i as i64).max(50) as u32;
        assert_eq!(match_score(i), expected, "rank {i}");
    }
}

#[test]
fn test_preview_text() {
    {
        let short = "Our pricing starts at $10/mo...";
        assert_eq!(preview_text(short), short);
        assert_eq!(preview_text(""), "");
    }

    {
        let exact = "a".repeat(150);
        assert_eq!(preview_text(&exact), exact);
    }

    {
        let long = format!("{}{}", "b".repeat(150), "tail that is cut");
        let preview = preview_text(&long);
        assert_eq!(preview, format!("{}...", "b".repeat(150)));
        assert_eq!(preview.chars().count(), 153);
    }

    // multi-byte text is cut on char boundaries
    {
        let long = "é".repeat(151);
        let preview = preview_text(&long);
        assert_eq!(preview, format!("{}...", "é".repeat(150)));
    }
}

#[test]
fn test_toggle() {
    assert_eq!(toggle(None, 3), Some(3));
    assert_eq!(toggle(Some(3), 3), None);
    assert_eq!(toggle(Some(3), 1), Some(1));
    assert_eq!(toggle(toggle(None, 2), 2), None);
}

#[test]
fn test_present_keeps_full_text() {
    let long = "x".repeat(400);
    let fragments = vec!["short".to_string(), long.clone()];
    let items = present(&fragments, Some(1));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].match_score, 95);
    assert!(!items[0].expanded);
    assert_eq!(items[0].preview_text, "short");

    assert_eq!(items[1].match_score, 88);
    assert!(items[1].expanded);
    assert_eq!(items[1].text, long);
    assert_eq!(items[1].preview_text.len(), 153);
}
