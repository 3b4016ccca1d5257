/// A search term ready for matching: trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// True when the query filters nothing (empty or whitespace only).
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub(crate) fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}
