//! Identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticker identifier.
///
/// Treated as opaque: two rows refer to the same ticker if and only if their
/// identifiers are equal. Resolution from CUSIP/ISIN/symbol happens upstream.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerId(pub String);

impl TickerId {
    /// Create a new ticker ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TickerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TickerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_as_str() {
        let id = TickerId::new("MSFT");
        assert_eq!(id.as_str(), "MSFT");
        assert_eq!(id.to_string(), "MSFT");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut ids = vec![TickerId::from("B"), TickerId::from("A"), TickerId::from("C")];
        ids.sort();
        assert_eq!(ids, vec![TickerId::from("A"), TickerId::from("B"), TickerId::from("C")]);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = TickerId::new("42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"42\"");

        let parsed: TickerId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
