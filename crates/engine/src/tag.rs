use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;

/// Sentinel tag meaning "do not filter by tag".
pub const AUTO_TAG: &str = "auto";

/// One turn of the conversation, as the caller keeps it: chronological,
/// most-recent-last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub speaker: String,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Marker grammar for an in-chat tag switch: `Tag:token` or `Tag=token`,
/// token = alphanumerics, underscore, hyphen.
static TAG_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Tag[:=]\s*([A-Za-z0-9_-]+)").expect("tag marker regex"));

/// Determine the effective tag scope for a query.
///
/// An explicit tag wins outright unless it is empty or the sentinel.
/// Otherwise the recent turns are scanned newest-to-oldest for a marker;
/// the first hit wins. No marker means the sentinel.
#[must_use]
pub fn resolve_tag(explicit: Option<&str>, recent_turns: &[ConversationTurn]) -> String {
    if let Some(tag) = explicit {
        if !tag.is_empty() && normalize(tag) != AUTO_TAG {
            return tag.to_string();
        }
    }

    for turn in recent_turns.iter().rev() {
        if let Some(captures) = TAG_MARKER.captures(&turn.text) {
            return captures[1].to_string();
        }
    }

    AUTO_TAG.to_string()
}

/// Whether a tag value means "unscoped".
#[must_use]
pub fn is_auto(tag: &str) -> bool {
    tag.is_empty() || normalize(tag) == AUTO_TAG
}
