//! Hierarchy levels.
//!
//! Serialized as `snake_case` strings, matching the other enums in this crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One level of the administrative hierarchy.
///
/// ```text
/// province → city → county
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Province,
    City,
    County,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::City => "city",
            Self::County => "county",
        }
    }

    /// The level above this one, or `None` at the root.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Province => None,
            Self::City => Some(Self::Province),
            Self::County => Some(Self::City),
        }
    }

    /// The level below this one, or `None` at the leaf.
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Province => Some(Self::City),
            Self::City => Some(Self::County),
            Self::County => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_and_child_are_inverse() {
        for level in [Level::Province, Level::City, Level::County] {
            if let Some(child) = level.child() {
                assert_eq!(child.parent(), Some(level));
            }
        }
        assert_eq!(Level::Province.parent(), None);
        assert_eq!(Level::County.child(), None);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Level::County).unwrap();
        assert_eq!(json, "\"county\"");
        let back: Level = serde_json::from_str("\"city\"").unwrap();
        assert_eq!(back, Level::City);
        assert_eq!(Level::Province.to_string(), "province");
    }
}
