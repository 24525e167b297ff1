//! Tree selection paths. A path is the `|`-joined chain of identifiers from
//! a top-level record down to the selected node, e.g. `doc1|OrgA|node-1`.
//! Segment values never contain `|` themselves; the validators reject it.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionPath {
    segments: Vec<String>,
}

impl SelectionPath {
    pub fn root(id: impl Into<String>) -> SelectionPath {
        SelectionPath {
            segments: vec![id.into()],
        }
    }

    /// Parses an encoded path. Empty input and blank segments yield `None`;
    /// there is no such thing as an empty selection segment.
    pub fn parse(raw: &str) -> Option<SelectionPath> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let segments: Vec<String> = raw.split('|').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(SelectionPath { segments })
    }

    /// Extends the path by one child segment.
    pub fn child(&self, segment: impl Into<String>) -> SelectionPath {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        SelectionPath { segments }
    }

    pub fn encode(&self) -> String {
        self.segments.join("|")
    }

    /// The id of the top-level record this path lives under.
    pub fn top_level(&self) -> &str {
        &self.segments[0]
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn parent(&self) -> Option<SelectionPath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(SelectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Same path re-rooted under a different top-level id.
    pub fn with_top_level(&self, id: impl Into<String>) -> SelectionPath {
        let mut segments = self.segments.clone();
        segments[0] = id.into();
        SelectionPath { segments }
    }
}

impl fmt::Display for SelectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// True when moving from `prev` to `next` leaves the current top-level
/// record. Moves within the same record (deeper, shallower, sideways) are
/// not a top-level change.
pub fn changed_top_level(prev: Option<&SelectionPath>, next: Option<&SelectionPath>) -> bool {
    match (prev, next) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(a), Some(b)) => a.top_level() != b.top_level(),
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
