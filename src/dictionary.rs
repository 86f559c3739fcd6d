//! Idiom dictionary loaded from a JSON file.
//!
//! The file is a single JSON object keyed by idiom. Metadata values are
//! opaque, except that an object whose values are four 4-element string
//! arrays is taken as a precomputed decomposition and used verbatim.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::decompose::{decompose, DecomposeError, Decomposition};
use crate::{DIMENSIONS, WORD_LEN};

/// Read-only idiom table. Iteration follows the order of the JSON file.
#[derive(Debug)]
pub struct Dictionary {
    entries: Vec<(String, Decomposition)>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary file")]
    Io(#[from] std::io::Error),
    #[error("dictionary is not a JSON object keyed by idiom")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Decompose(#[from] DecomposeError),
}

impl Dictionary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Keys that are not exactly 4 characters long are dropped, everything
    /// else must decompose.
    pub fn from_json_str(json: &str) -> Result<Self, DictionaryError> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        for (word, metadata) in root {
            if word.chars().count() != WORD_LEN {
                continue;
            }
            let decomp = match precomputed(&metadata) {
                Some(decomp) => decomp,
                None => decompose(&word)?,
            };
            index.insert(word.clone(), entries.len());
            entries.push((word, decomp));
        }
        Ok(Self { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// A miss is not an error; callers fall back to deriving the
    /// decomposition themselves.
    pub fn decomposition(&self, word: &str) -> Option<&Decomposition> {
        self.index.get(word).map(|&at| &self.entries[at].1)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Decomposition)> {
        self.entries.iter().map(|(word, decomp)| (word.as_str(), decomp))
    }
}

/// Accept metadata shaped like the decomposition itself: an object whose
/// values, in order, are the four dimension rows.
fn precomputed(metadata: &Value) -> Option<Decomposition> {
    let object = metadata.as_object()?;
    if object.len() != DIMENSIONS {
        return None;
    }
    let mut rows: [[String; WORD_LEN]; DIMENSIONS] = Default::default();
    for (row, value) in rows.iter_mut().zip(object.values()) {
        let items = value.as_array()?;
        if items.len() != WORD_LEN {
            return None;
        }
        for (slot, item) in row.iter_mut().zip(items) {
            *slot = item.as_str()?.to_string();
        }
    }
    Some(Decomposition::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    #[test]
    fn keeps_only_four_character_entries() {
        let dict = Dictionary::from_json_str(
            r#"{"一马当先": null, "马到": null, "马到成功了": null, "万马奔腾": 7}"#,
        )
        .unwrap();
        assert_eq!(
            dict.words().collect::<Vec<_>>(),
            ["一马当先", "万马奔腾"],
        );
        assert!(dict.contains("一马当先"));
        assert!(!dict.contains("马到"));
    }

    #[test]
    fn metadata_rows_are_used_verbatim() {
        // Marker strings prove the engine was bypassed.
        let dict = Dictionary::from_json_str(
            r#"{"一马当先": {
                "initials": ["i0", "i1", "i2", "i3"],
                "finals": ["f0", "f1", "f2", "f3"],
                "tones": ["1", "2", "3", "4"],
                "chars": ["一", "马", "当", "先"]
            }}"#,
        )
        .unwrap();
        let decomp = dict.decomposition("一马当先").unwrap();
        assert_eq!(decomp.row(Dimension::Initial)[0], "i0");
        assert_eq!(decomp.row(Dimension::Final)[3], "f3");
    }

    #[test]
    fn opaque_metadata_falls_back_to_the_engine() {
        let dict =
            Dictionary::from_json_str(r#"{"一马当先": {"freq": 12}}"#).unwrap();
        assert_eq!(
            dict.decomposition("一马当先"),
            Some(&decompose("一马当先").unwrap()),
        );
    }

    #[test]
    fn iteration_preserves_file_order() {
        let dict = Dictionary::from_json_str(
            r#"{"万马奔腾": null, "一马当先": null, "爱不释手": null}"#,
        )
        .unwrap();
        assert_eq!(
            dict.words().collect::<Vec<_>>(),
            ["万马奔腾", "一马当先", "爱不释手"],
        );
    }

    #[test]
    fn undecomposable_entry_fails_the_load() {
        assert!(Dictionary::from_json_str(r#"{"abcd": null}"#).is_err());
    }

    #[test]
    fn root_must_be_an_object() {
        assert!(Dictionary::from_json_str("[1, 2, 3]").is_err());
    }
}
