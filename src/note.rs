use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::codec::{extract_links, parse_document, Frontmatter};

/// A single document of the vault.
///
/// `content` in serialized form is the body: the note text with its frontmatter block removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    slug: String,
    filename: String,
    #[serde(skip)]
    path: PathBuf,
    #[serde(skip)]
    raw: String,
    #[serde(rename = "content")]
    body: String,
    frontmatter: Frontmatter,
}

impl Note {
    /// Build a note from its slug, its source path (absolute or vault-relative) and raw text.
    pub fn new<S, P>(slug: S, path: P, raw: String) -> Note
    where
        S: Into<String>,
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let (frontmatter, body) = parse_document(&raw);
        let body = body.to_string();
        Note {
            slug: slug.into(),
            filename,
            path,
            raw,
            body,
            frontmatter,
        }
    }

    /// Build a note whose slug is the file stem of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P, raw: String) -> Option<Note> {
        let slug = slug_for_path(path.as_ref())?;
        Some(Note::new(slug, path, raw))
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Base file name, directories stripped.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The unmodified text as read from storage.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    /// Wiki-link targets in the body, in order, duplicates kept.
    pub fn extract_links(&self) -> Vec<String> {
        extract_links(&self.body)
    }

    /// The first `char_limit` characters of the body.
    pub fn summary(&self, char_limit: usize) -> String {
        self.body.chars().take(char_limit).collect()
    }
}

/// File name with its extension stripped.
pub fn slug_for_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MetadataValue;

    const ABOUT_ME: &str = "---
title: About Me
tags: [personal, introduction]
---

This is a note about myself. You can find more in [[projects]] and [[hobbies]].
";

    #[test]
    fn note_initialization() {
        let note = Note::from_path("test_data/about_me.md", ABOUT_ME.to_string()).unwrap();
        assert_eq!(note.slug(), "about_me");
        assert_eq!(note.filename(), "about_me.md");
        assert_eq!(note.path(), Path::new("test_data/about_me.md"));
        assert_eq!(note.raw_text(), ABOUT_ME);
        assert_eq!(
            note.body(),
            "\nThis is a note about myself. You can find more in [[projects]] and [[hobbies]].\n"
        );
        assert_eq!(
            note.frontmatter().get("tags"),
            Some(&MetadataValue::List(vec![
                "personal".to_string(),
                "introduction".to_string()
            ]))
        );
    }

    #[test]
    fn links_come_from_body() {
        let note = Note::new("about_me", "about_me.md", ABOUT_ME.to_string());
        assert_eq!(note.extract_links(), vec!["projects", "hobbies"]);

        let linked_meta = Note::new("m", "m.md", "---\nsee: [[hidden]]\n---\n[[shown]]".to_string());
        assert_eq!(linked_meta.extract_links(), vec!["shown"]);
    }

    #[test]
    fn summary_is_a_hard_character_cut() {
        let note = Note::new("n", "n.md", "Grüße aus Köln".to_string());
        assert_eq!(note.summary(5), "Grüße");
        assert_eq!(note.summary(0), "");
        assert_eq!(note.summary(100), "Grüße aus Köln");
    }

    #[test]
    fn serializes_body_as_content() {
        let note = Note::new("index", "index.md", "This is an index file\n".to_string());
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "slug": "index",
                "filename": "index.md",
                "content": "This is an index file\n",
                "frontmatter": {},
            })
        );
    }

    #[test]
    fn slug_strips_only_the_last_extension() {
        assert_eq!(slug_for_path(Path::new("a/b/2024.01.02.md")).as_deref(), Some("2024.01.02"));
        assert_eq!(slug_for_path(Path::new("plain")).as_deref(), Some("plain"));
        assert_eq!(slug_for_path(Path::new("")), None);
    }
}
