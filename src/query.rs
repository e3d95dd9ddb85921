use serde::{Deserialize, Serialize};

use crate::{
    codec::Frontmatter,
    config::{RelevantConfig, DEFAULT_CHAR_LIMIT, DEFAULT_MAX_HOPS},
    note::Note,
    VaultError,
};

/// A note reached from a starting note by following links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantNote {
    pub slug: String,
    /// Leading `char_limit` characters of the note body.
    pub content_summary: String,
    /// Fewest link hops from the starting note.
    pub distance: usize,
}

impl RelevantNote {
    pub fn new(note: &Note, distance: usize, char_limit: usize) -> Self {
        RelevantNote {
            slug: note.slug().to_string(),
            content_summary: note.summary(char_limit),
            distance,
        }
    }
}

/// Traversal bounds for [`crate::Vault::find_relevant_notes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceParams {
    pub max_hops: usize,
    pub char_limit: usize,
}

impl Default for RelevanceParams {
    fn default() -> Self {
        RelevanceParams {
            max_hops: DEFAULT_MAX_HOPS,
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }
}

impl From<RelevantConfig> for RelevanceParams {
    fn from(config: RelevantConfig) -> Self {
        RelevanceParams {
            max_hops: config.max_hops,
            char_limit: config.char_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    /// Exact token lookup when set, approximate term matching otherwise.
    pub exact: bool,
}

impl SearchQuery {
    /// Validate a user supplied query. More than `max_words` whitespace separated words is
    /// rejected.
    pub fn parse<S: Into<String>>(
        query: S,
        exact: bool,
        max_words: usize,
    ) -> Result<SearchQuery, VaultError> {
        let query = query.into();
        let words = query.split_whitespace().count();
        if words > max_words {
            return Err(VaultError::Command(format!(
                "Search query should not exceed {max_words} words, got {words}"
            )));
        }
        Ok(SearchQuery { query, exact })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub slug: String,
    pub frontmatter: Frontmatter,
}

impl From<&Note> for SearchHit {
    fn from(note: &Note) -> Self {
        SearchHit {
            slug: note.slug().to_string(),
            frontmatter: note.frontmatter().clone(),
        }
    }
}
