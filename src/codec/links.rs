use once_cell::sync::Lazy;
use regex::Regex;

/// `[[target]]`, non-greedy and confined to a single line.
static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("wikilink pattern is a valid regex"));

/// Return the text enclosed by each `[[...]]` marker, in order of appearance.
///
/// Duplicates are kept and targets are not checked against any vault; resolving them is up to the
/// caller.
pub fn extract_links(body: &str) -> Vec<String> {
    WIKILINK
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_duplicates() {
        assert_eq!(
            extract_links("[[a]] text [[b]] [[a]]"),
            vec!["a".to_string(), "b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn no_links() {
        assert!(extract_links("This is the fourth note. No links.").is_empty());
        assert!(extract_links("[single] [[unclosed").is_empty());
    }

    #[test]
    fn links_do_not_span_lines() {
        assert_eq!(
            extract_links("[[broken\nlink]] then [[kept]]"),
            vec!["kept".to_string()]
        );
    }

    #[test]
    fn inner_text_is_taken_verbatim() {
        assert_eq!(
            extract_links("See [[projects]] and [[hobbies|my hobbies]] or [[]]."),
            vec![
                "projects".to_string(),
                "hobbies|my hobbies".to_string(),
                String::new()
            ]
        );
    }
}
