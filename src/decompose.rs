//! Pinyin decomposition of idioms into the four feedback dimensions.
//!
//! The transliteration itself is the `pinyin` crate's job; this module only
//! splits each syllable into initial, final and tone, and memoizes results.

use std::cmp::Reverse;
use std::collections::HashMap;

use once_cell::sync::OnceCell;
use pinyin::ToPinyin;
use thiserror::Error;

use crate::{Dimension, DIMENSIONS, WORD_LEN};

static INITIALS: OnceCell<Vec<&'static str>> = OnceCell::new();

/// Initials recognised when splitting a syllable, longest first so "zh"
/// wins over "z". Lenient: "y" and "w" count as initials, so whole
/// syllables like "yi" and "wan" split the way players expect.
fn initials() -> &'static [&'static str] {
    INITIALS.get_or_init(|| {
        let mut table = vec![
            "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "zh", "ch",
            "sh", "r", "z", "c", "s", "y", "w",
        ];
        table.sort_unstable_by_key(|initial| Reverse(initial.len()));
        table
    })
}

/// The four positional rows describing one idiom: initials, finals, tones
/// and the characters themselves. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    rows: [[String; WORD_LEN]; DIMENSIONS],
}

impl Decomposition {
    pub fn from_rows(rows: [[String; WORD_LEN]; DIMENSIONS]) -> Self {
        Self { rows }
    }

    pub fn row(&self, dim: Dimension) -> &[String; WORD_LEN] {
        &self.rows[dim as usize]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecomposeError {
    #[error("expected a {WORD_LEN}-character idiom, got {0} characters")]
    WrongLength(usize),
    #[error("no pinyin reading for '{0}'")]
    NoReading(char),
}

/// Break an idiom into its four dimension rows. A character the engine has
/// no reading for is an error, propagated as is.
pub fn decompose(idiom: &str) -> Result<Decomposition, DecomposeError> {
    let chars: Vec<char> = idiom.chars().collect();
    if chars.len() != WORD_LEN {
        return Err(DecomposeError::WrongLength(chars.len()));
    }
    let mut rows: [[String; WORD_LEN]; DIMENSIONS] = Default::default();
    for (pos, &ch) in chars.iter().enumerate() {
        let syllable = ch.to_pinyin().ok_or(DecomposeError::NoReading(ch))?;
        let (initial, rest) = split_initial(syllable.with_tone_num_end());
        let (final_, tone) = split_tone(rest);
        rows[Dimension::Initial as usize][pos] = initial.to_string();
        rows[Dimension::Final as usize][pos] = final_.to_string();
        rows[Dimension::Tone as usize][pos] = tone.to_string();
        rows[Dimension::Character as usize][pos] = ch.to_string();
    }
    Ok(Decomposition { rows })
}

fn split_initial(syllable: &str) -> (&str, &str) {
    for &initial in initials() {
        if let Some(rest) = syllable.strip_prefix(initial) {
            return (initial, rest);
        }
    }
    ("", syllable)
}

/// Peel the trailing tone digit off a final; neutral-tone syllables carry
/// no digit and yield an empty tone.
fn split_tone(rest: &str) -> (&str, &str) {
    match rest.chars().last() {
        Some(digit) if digit.is_ascii_digit() => rest.split_at(rest.len() - digit.len_utf8()),
        _ => (rest, ""),
    }
}

/// Memo table for [`decompose`], keyed by the idiom string. Entries are
/// filled on first use and kept for the life of the process.
#[derive(Debug, Default)]
pub struct DecompCache {
    entries: HashMap<String, Decomposition>,
}

impl DecompCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decomposition(&mut self, idiom: &str) -> Result<&Decomposition, DecomposeError> {
        if !self.entries.contains_key(idiom) {
            let decomp = decompose(idiom)?;
            self.entries.insert(idiom.to_string(), decomp);
        }
        Ok(&self.entries[idiom])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
