use serde::{Deserialize, Serialize};
use std::{
    collections::{btree_map, BTreeMap},
    fmt,
};

/// A frontmatter value: either a plain string or a list of strings.
///
/// Serializes untagged, so JSON output is a bare string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Scalar(String),
    List(Vec<String>),
}

impl MetadataValue {
    /// Parse a trimmed value. `[a, b, c]` becomes a list of trimmed items, anything else is kept
    /// as a scalar.
    pub fn parse(value: &str) -> MetadataValue {
        let value = value.trim();
        match value
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
        {
            Some(inner) => MetadataValue::List(
                inner
                    .split(',')
                    .map(|item| item.trim().to_string())
                    .collect(),
            ),
            None => MetadataValue::Scalar(value.to_string()),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            MetadataValue::Scalar(s) => Some(s),
            MetadataValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetadataValue::Scalar(_) => None,
            MetadataValue::List(items) => Some(items),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Scalar(s) => write!(f, "{s}"),
            MetadataValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Key/value metadata parsed from the head of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter(BTreeMap<String, MetadataValue>);

impl Frontmatter {
    /// Parse the lines found between the frontmatter delimiters.
    ///
    /// Each line is split on its first `:`. Lines of the form `- item` extend the list of the most
    /// recent key, which accepts the block-list style:
    ///
    /// ```text
    /// aliases:
    ///   - first
    ///   - second
    /// ```
    ///
    /// Lines that are neither are skipped; they never abort the parse.
    pub fn from_lines<'a, I>(lines: I) -> Frontmatter
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut pairs = BTreeMap::new();
        let mut last_key: Option<String> = None;
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(item) = list_item(line) {
                match last_key.as_ref().and_then(|key| pairs.get_mut(key)) {
                    Some(MetadataValue::List(items)) => items.push(item.to_string()),
                    Some(value) if value.as_scalar() == Some("") => {
                        *value = MetadataValue::List(vec![item.to_string()]);
                    }
                    _ => tracing::debug!("Skipping orphan frontmatter list item: {:?}", line),
                }
                continue;
            }

            match line.split_once(':') {
                Some((key, value)) => {
                    let key = key.trim().to_string();
                    pairs.insert(key.clone(), MetadataValue::parse(value));
                    last_key = Some(key);
                }
                None => tracing::debug!("Skipping malformed frontmatter line: {:?}", line),
            }
        }
        Frontmatter(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn insert<K: Into<String>>(&mut self, key: K, value: MetadataValue) -> Option<MetadataValue> {
        self.0.insert(key.into(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, MetadataValue> {
        self.0.iter()
    }

    /// Render the metadata back into `key: value` lines, without the delimiters.
    pub fn to_block(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{key}: {value}\n"))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Frontmatter {
    type Item = (&'a String, &'a MetadataValue);
    type IntoIter = btree_map::Iter<'a, String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, MetadataValue)> for Frontmatter {
    fn from_iter<T: IntoIterator<Item = (String, MetadataValue)>>(iter: T) -> Self {
        Frontmatter(iter.into_iter().collect())
    }
}

fn list_item(line: &str) -> Option<&str> {
    if line == "-" {
        return Some("");
    }
    line.strip_prefix("- ").map(str::trim)
}
