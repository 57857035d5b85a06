//! Header line → column index mapping.

use std::collections::HashMap;

/// Column positions of a report, keyed by header name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    indices: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build the mapping from the first line of a report
    ///
    /// Headers are split on every `,` with no quote handling. When a name
    /// repeats, the last occurrence wins.
    pub fn parse(line: &str) -> Self {
        let indices = line
            .trim_end_matches('\r')
            .split(',')
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();

        Self { indices }
    }

    /// Zero-based position of `name`, if the report has that column
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Number of distinct column names
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
