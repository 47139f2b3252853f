use std::fmt;

use crate::matcher::SearchMatch;

/// Outcome of a search operation, meant to be shown to the user.
///
/// None of these are faults. Every variant leaves the session in a consistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Found(usize),
    NotFound,
    EmptyQuery,
    NoCurrentMatch,
    InvalidPattern(String),
    /// Navigation landed on a match; one-based position out of `total`.
    Current { position: usize, total: usize },
    Replaced { remaining: usize },
    ReplacedAll(usize),
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}es")
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(count) => write!(f, "Found {}", plural(*count, "match")),
            Self::NotFound => f.write_str("No matches"),
            Self::EmptyQuery => f.write_str("Nothing to search"),
            Self::NoCurrentMatch => f.write_str("No current match, search first"),
            Self::InvalidPattern(error) => write!(f, "Invalid pattern: {error}"),
            Self::Current { position, total } => write!(f, "{position} of {total}"),
            Self::Replaced { remaining } => {
                write!(f, "Replaced, {} left", plural(*remaining, "match"))
            }
            Self::ReplacedAll(count) => write!(f, "Replaced {count} occurrence(s)"),
        }
    }
}

/// Result of a single stepped replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub status: SearchStatus,
    /// Matches still pending after the operation.
    pub remaining: usize,
    /// The match to highlight next, already shifted to post-replace offsets.
    pub current: Option<SearchMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(SearchStatus::Found(1).to_string(), "Found 1 match");
        assert_eq!(SearchStatus::Found(3).to_string(), "Found 3 matches");
        assert_eq!(
            SearchStatus::Current {
                position: 2,
                total: 5
            }
            .to_string(),
            "2 of 5"
        );
        assert_eq!(
            SearchStatus::Replaced { remaining: 0 }.to_string(),
            "Replaced, 0 matches left"
        );
        assert_eq!(SearchStatus::EmptyQuery.to_string(), "Nothing to search");
    }
}
