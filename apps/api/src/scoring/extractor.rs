//! Score extraction from a free-text model answer.
//!
//! Two patterns, both case-insensitive:
//! - labelled: `ATS Score` followed, on the same line, by a 1–3 digit number;
//! - bare: a 1–3 digit number bounded by whitespace or the string edges.
//!
//! A labelled match anywhere in the text wins over a bare one, even when the
//! bare number comes first. This deliberately departs from a single
//! leftmost-match alternation, which would read `"Reviewed 3 sections.\nATS
//! Score: 64"` as 3. Values are not clamped: `"999"` yields 999.

use std::sync::LazyLock;

use regex::Regex;

static LABELLED_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ATS\s*Score.*?(\d{1,3})").expect("labelled score pattern is valid")
});

static BARE_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(\d{1,3})(?:\s|$)").expect("bare score pattern is valid")
});

/// Returns the score found in `response`, or `None` when nothing matches.
pub fn parse_score(response: &str) -> Option<u32> {
    LABELLED_SCORE
        .captures(response)
        .or_else(|| BARE_SCORE.captures(response))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Like [`parse_score`], falling back to `0` when nothing matches.
#[allow(dead_code)]
pub fn extract_score(response: &str) -> u32 {
    parse_score(response).unwrap_or(0)
}
