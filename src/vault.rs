//! The in-memory note repository.
//!
//! A [`Vault`] is built once, by a full scan of a directory or from a set of notes, and is
//! read-only afterwards. Every query takes `&self`, so a loaded vault can be shared across threads
//! behind an `Arc` without locking.

use std::{
    collections::{btree_map::Entry, BTreeMap, HashSet, VecDeque},
    fs::read_to_string,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::{FuzzyConfig, VaultConfig},
    fuzzy::close_matches,
    index::{normalize_term, query_term, TermIndex},
    note::{slug_for_path, Note},
    query::{RelevanceParams, RelevantNote, SearchHit, SearchQuery},
    VaultError,
};

#[derive(Debug, Clone, Default)]
pub struct Vault {
    root: Option<PathBuf>,
    notes: BTreeMap<String, Note>,
    index: TermIndex,
    fuzzy: FuzzyConfig,
}

impl Vault {
    /// Load every `.md` file below `root` with default settings.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Vault, VaultError> {
        Vault::load_with(&VaultConfig::with_root(root))
    }

    /// Load every file below `config.root` carrying `config.extension`.
    ///
    /// Hidden files and directories are skipped. Any read failure or two files sharing a slug
    /// fails the whole load; a partially populated vault is never returned.
    #[tracing::instrument(skip_all, fields(root = %config.root.display()))]
    pub fn load_with(config: &VaultConfig) -> Result<Vault, VaultError> {
        let root = &config.root;
        let mut notes = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !has_extension(entry.path(), &config.extension) {
                continue;
            }
            let path = entry.path();
            let Some(slug) = slug_for_path(path) else {
                return Err(VaultError::Io(format!(
                    "{}: file name is not valid UTF-8",
                    path.display()
                )));
            };
            let raw = read_to_string(path)?;
            let rel_path = path.strip_prefix(root).unwrap_or(path);
            tracing::debug!("Read {:?} as '{}'", rel_path, slug);
            notes.push(Note::new(slug, rel_path, raw));
        }

        let mut vault = Vault::from_notes(notes)?;
        vault.root = Some(root.clone());
        vault.fuzzy = config.fuzzy;
        tracing::info!(
            "Loaded {} notes ({} indexed terms) from {}",
            vault.len(),
            vault.index.len(),
            root.display()
        );
        Ok(vault)
    }

    /// Build a vault from notes already in memory, indexing them in iteration order.
    pub fn from_notes<I>(notes: I) -> Result<Vault, VaultError>
    where
        I: IntoIterator<Item = Note>,
    {
        let mut by_slug = BTreeMap::new();
        let mut load_order = Vec::new();
        for note in notes {
            match by_slug.entry(note.slug().to_string()) {
                Entry::Occupied(existing) => {
                    let existing: &Note = existing.get();
                    tracing::warn!(
                        "Duplicate slug '{}' for {:?} and {:?}",
                        note.slug(),
                        existing.path(),
                        note.path()
                    );
                    return Err(VaultError::DuplicateSlug {
                        slug: note.slug().to_string(),
                        first: existing.path().to_path_buf(),
                        second: note.path().to_path_buf(),
                    });
                }
                Entry::Vacant(slot) => {
                    load_order.push(slot.key().clone());
                    slot.insert(note);
                }
            }
        }

        let index = TermIndex::build(
            load_order
                .iter()
                .filter_map(|slug| by_slug.get(slug))
                .map(|note: &Note| (note.slug(), note.body())),
        );

        Ok(Vault {
            root: None,
            notes: by_slug,
            index,
            fuzzy: FuzzyConfig::default(),
        })
    }

    /// Replace the fuzzy matching constants used by [`Vault::fuzzy_search`].
    pub fn with_fuzzy_config(mut self, fuzzy: FuzzyConfig) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Directory the vault was loaded from, if it was loaded from disk.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn term_index(&self) -> &TermIndex {
        &self.index
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// All slugs, sorted.
    pub fn list_slugs(&self) -> Vec<String> {
        self.notes.keys().cloned().collect()
    }

    pub fn get(&self, slug: &str) -> Result<&Note, VaultError> {
        self.notes
            .get(slug)
            .ok_or_else(|| VaultError::NotFound(slug.to_string()))
    }

    /// Fetch several notes at once. Fails on the first missing slug.
    pub fn get_many<S: AsRef<str>>(&self, slugs: &[S]) -> Result<Vec<&Note>, VaultError> {
        slugs.iter().map(|slug| self.get(slug.as_ref())).collect()
    }

    /// Link targets of a note, unresolved.
    pub fn links(&self, slug: &str) -> Result<Vec<String>, VaultError> {
        Ok(self.get(slug)?.extract_links())
    }

    /// Slugs of notes containing `query` as a whole word.
    ///
    /// `query` is tokenized like note bodies are. The index holds single words only, so a query
    /// with no word or more than one word matches nothing.
    pub fn search(&self, query: &str) -> Vec<String> {
        match query_term(query) {
            Some(term) => self.index.lookup(&term).to_vec(),
            None => Vec::new(),
        }
    }

    /// Slugs of notes containing an indexed word similar to `query`, using the vault's
    /// [`FuzzyConfig`].
    pub fn fuzzy_search(&self, query: &str) -> Vec<String> {
        self.fuzzy_search_with(query, &self.fuzzy)
    }

    pub fn fuzzy_search_with(&self, query: &str, fuzzy: &FuzzyConfig) -> Vec<String> {
        let term = normalize_term(query);
        let matches = close_matches(&term, self.index.terms(), fuzzy.max_matches, fuzzy.cutoff);
        tracing::debug!("Fuzzy query {:?} matched terms {:?}", term, matches);

        let mut seen: HashSet<&String> = HashSet::new();
        matches
            .iter()
            .flat_map(|(matched, _)| self.index.lookup(matched))
            .filter(|slug| seen.insert(*slug))
            .cloned()
            .collect()
    }

    /// Run a validated search, returning each hit with its frontmatter.
    pub fn run_search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        let slugs = if query.exact {
            self.search(&query.query)
        } else {
            self.fuzzy_search(&query.query)
        };
        slugs
            .iter()
            .filter_map(|slug| self.notes.get(slug))
            .map(SearchHit::from)
            .collect()
    }

    /// Breadth-first walk of the link graph from `start`.
    ///
    /// Returns every note within `max_hops` links of `start`, excluding `start` itself, at its
    /// shortest hop distance. Results are ordered by distance, then by discovery order. Links
    /// naming unknown slugs are ignored.
    #[tracing::instrument(skip(self))]
    pub fn find_relevant_notes(
        &self,
        start: &str,
        max_hops: usize,
        char_limit: usize,
    ) -> Result<Vec<RelevantNote>, VaultError> {
        let start = self.get(start)?;

        let mut results = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&Note, usize)> = VecDeque::from([(start, 0)]);
        while let Some((note, hop)) = queue.pop_front() {
            if !visited.insert(note.slug()) || hop > max_hops {
                continue;
            }
            if hop > 0 {
                results.push(RelevantNote::new(note, hop, char_limit));
            }
            if hop == max_hops {
                continue;
            }
            for link in note.extract_links() {
                if let Some(linked) = self.notes.get(&link) {
                    queue.push_back((linked, hop + 1));
                }
            }
        }
        tracing::debug!("{} relevant notes within {} hops", results.len(), max_hops);
        Ok(results)
    }

    pub fn find_relevant_notes_with(
        &self,
        start: &str,
        params: RelevanceParams,
    ) -> Result<Vec<RelevantNote>, VaultError> {
        self.find_relevant_notes(start, params.max_hops, params.char_limit)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')))
        .unwrap_or(false)
}
