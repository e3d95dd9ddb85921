//! Splitting note text into its frontmatter block and body, and scanning bodies for links.
//!
//! The on-disk format is consumed, not produced: an optional leading metadata block fenced by two
//! `---` lines, followed by free-form body text containing zero or more `[[slug]]` wiki links.

pub mod frontmatter;
pub mod links;

pub use frontmatter::{Frontmatter, MetadataValue};
pub use links::extract_links;

/// Marker line (after trimming) that opens and closes a frontmatter block.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Split raw note text into its parsed frontmatter and its body.
///
/// When the text carries no well-formed frontmatter block the frontmatter is empty and the body is
/// the full text. The body never contains the delimiter lines of the block.
pub fn parse_document(text: &str) -> (Frontmatter, &str) {
    match split_frontmatter(text) {
        Some((lines, body)) => (Frontmatter::from_lines(lines), body),
        None => (Frontmatter::default(), text),
    }
}

/// Locate the frontmatter block.
///
/// The opening delimiter must be the first non-blank line, so that a `---` rule further down in
/// prose is never mistaken for metadata. Returns the lines strictly between the two delimiters and
/// the remainder of the text after the closing delimiter line.
pub fn split_frontmatter(text: &str) -> Option<(Vec<&str>, &str)> {
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');
    let mut opened = false;
    for line in lines.by_ref() {
        offset += line.len();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        opened = trimmed == FRONTMATTER_DELIMITER;
        break;
    }
    if !opened {
        return None;
    }

    let mut block = Vec::new();
    for line in lines {
        offset += line.len();
        if line.trim() == FRONTMATTER_DELIMITER {
            return Some((block, &text[offset..]));
        }
        block.push(line.trim_end_matches(['\n', '\r']));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_block_from_body() {
        let text = "---\ntitle: Note 1\ntags: [sample, test]\n---\n\nThis is a sample note.\n";
        let (frontmatter, body) = parse_document(text);
        assert_eq!(body, "\nThis is a sample note.\n");
        assert_eq!(
            frontmatter.get("title"),
            Some(&MetadataValue::Scalar("Note 1".to_string()))
        );
        assert_eq!(
            frontmatter.get("tags"),
            Some(&MetadataValue::List(vec![
                "sample".to_string(),
                "test".to_string()
            ]))
        );
    }

    #[test]
    fn text_without_block_is_all_body() {
        let text = "This is an index file\n";
        let (frontmatter, body) = parse_document(text);
        assert!(frontmatter.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn unclosed_block_is_not_metadata() {
        let text = "---\ntitle: Dangling\n\nNo closing fence here.";
        let (frontmatter, body) = parse_document(text);
        assert!(frontmatter.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn rule_inside_prose_is_not_metadata() {
        let text = "Intro line: with a colon\n---\nkey: value\n---\nmore prose";
        let (frontmatter, body) = parse_document(text);
        assert!(frontmatter.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn indented_delimiters_and_leading_blank_lines() {
        let text = "\n   ---\n    title: About Me\n    ---\n\n    Body with [[projects]].\n";
        let (frontmatter, body) = parse_document(text);
        assert_eq!(
            frontmatter.get("title"),
            Some(&MetadataValue::Scalar("About Me".to_string()))
        );
        assert_eq!(body, "\n    Body with [[projects]].\n");
        assert!(!body.contains(FRONTMATTER_DELIMITER));
    }

    #[test]
    fn crlf_line_endings() {
        let text = "---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (frontmatter, body) = parse_document(text);
        assert_eq!(
            frontmatter.get("title"),
            Some(&MetadataValue::Scalar("Windows".to_string()))
        );
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn empty_block() {
        let (frontmatter, body) = parse_document("---\n---\nbody");
        assert!(frontmatter.is_empty());
        assert_eq!(body, "body");
    }
}
