//! Inverted index from normalized word to the notes containing it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is a valid regex"));

/// Case-fold a term the same way indexed words are folded.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Maximal runs of word characters in `text`, case-folded.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text).map(|m| m.as_str().to_lowercase())
}

/// The single index key `query` stands for, or `None` when it tokenizes to zero or several
/// words.
pub fn query_term(query: &str) -> Option<String> {
    let mut tokens = tokenize(query);
    match (tokens.next(), tokens.next()) {
        (Some(term), None) => Some(term),
        _ => None,
    }
}

/// Posting lists keep the order in which documents were added. No weighting is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermIndex {
    postings: BTreeMap<String, Vec<String>>,
}

impl TermIndex {
    pub fn build<'a, I>(documents: I) -> TermIndex
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut index = TermIndex::default();
        for (slug, body) in documents {
            index.insert_document(slug, body);
        }
        index
    }

    /// Add `slug` to the posting list of every distinct word in `body`.
    pub fn insert_document(&mut self, slug: &str, body: &str) {
        let words: BTreeSet<String> = tokenize(body).collect();
        for word in words {
            self.postings.entry(word).or_default().push(slug.to_string());
        }
    }

    /// Slugs of documents containing exactly `term`, which is expected to be normalized already.
    pub fn lookup(&self, term: &str) -> &[String] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_folds_case_and_drops_punctuation() {
        let tokens: Vec<String> = tokenize("This is the First note. It links to [[note2]]!").collect();
        assert_eq!(
            tokens,
            vec!["this", "is", "the", "first", "note", "it", "links", "to", "note2"]
        );
    }

    #[test]
    fn tokenize_is_unicode_aware() {
        let tokens: Vec<String> = tokenize("Über-Straße snake_case").collect();
        assert_eq!(tokens, vec!["über", "straße", "snake_case"]);
    }

    #[test]
    fn postings_follow_insertion_order_without_duplicates() {
        let index = TermIndex::build([
            ("note1", "This is the first note content."),
            ("note2", "This is the second note with different content. Different!"),
            ("note3", "Another note that talks about different things."),
        ]);
        assert_eq!(index.lookup("different"), ["note2", "note3"]);
        assert_eq!(index.lookup("note"), ["note1", "note2", "note3"]);
        assert_eq!(index.lookup("first"), ["note1"]);
        assert!(index.lookup("First").is_empty());
        assert!(index.lookup("nonexistent").is_empty());
        assert!(index.contains_term("things"));
    }

    #[test]
    fn empty_index() {
        let index = TermIndex::build(std::iter::empty());
        assert!(index.is_empty());
        assert_eq!(index.terms().count(), 0);
    }

    #[test]
    fn normalize_matches_tokenizer_folding() {
        assert_eq!(normalize_term("  FiRsT "), "first");
        assert_eq!(normalize_term("Über"), tokenize("Über").next().unwrap());
    }

    #[test]
    fn query_term_needs_exactly_one_word() {
        assert_eq!(query_term(" First. ").as_deref(), Some("first"));
        assert_eq!(query_term("[[Note2]]").as_deref(), Some("note2"));
        assert_eq!(query_term("first note"), None);
        assert_eq!(query_term("..."), None);
        assert_eq!(query_term(""), None);
    }
}
