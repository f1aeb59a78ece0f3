//! Player and club tag normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonicalize a player/club tag.
///
/// Strips a leading URL-encoded `%23` and then a leading `#`, and uppercases
/// the rest. Empty in, empty out.
pub fn normalize_tag(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix("%23").unwrap_or(s);
    let s = s.strip_prefix('#').unwrap_or(s);
    s.to_uppercase()
}

/// A normalized tag, used as the join key between user input, links and
/// upstream API paths.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PlayerTag(String);

impl PlayerTag {
    /// Normalize and wrap a raw tag.
    pub fn new(raw: &str) -> Self {
        Self(normalize_tag(raw))
    }

    /// Get the tag as a string slice (no `#`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path segment for the upstream API (`%23` + tag).
    pub fn api_path_segment(&self) -> String {
        format!("%23{}", self.0)
    }

    /// Whether a raw, un-normalized tag refers to this player.
    pub fn matches(&self, raw: &str) -> bool {
        normalize_tag(raw) == self.0
    }
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerTag(#{})", self.0)
    }
}

impl From<String> for PlayerTag {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for PlayerTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PlayerTag> for String {
    fn from(tag: PlayerTag) -> Self {
        tag.0
    }
}
