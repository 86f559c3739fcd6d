use thiserror::Error;

pub mod algorithms;
pub mod decompose;
pub mod dictionary;

pub use decompose::{DecompCache, Decomposition};
pub use dictionary::Dictionary;

/// Characters per idiom, and columns in every feedback row.
pub const WORD_LEN: usize = 4;
/// Feedback dimensions per position: initial, final, tone, character.
pub const DIMENSIONS: usize = 4;

/// One axis of feedback. Rows of a [`FeedbackMatrix`] are indexed in this
/// order, which is also the order the game asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Initial,
    Final,
    Tone,
    Character,
}

impl Dimension {
    pub const ALL: [Self; DIMENSIONS] = [
        Self::Initial,
        Self::Final,
        Self::Tone,
        Self::Character,
    ];

    /// Label used by the interactive prompts.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Initial => "声母",
            Dimension::Final => "韵母",
            Dimension::Tone => "声调",
            Dimension::Character => "汉字",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Correctness {
    /// C: in the answer, right position
    Correct,
    /// B: in the answer, wrong position
    Misplaced,
    /// A: not in the answer at all
    Wrong,
}

impl Correctness {
    /// Classify one guess symbol against the answer's whole row for that
    /// dimension. Plain containment: a symbol the guess repeats reports
    /// `Misplaced` at every non-matching position even when the answer
    /// holds a single copy.
    fn classify(symbol: &str, pos: usize, answer_row: &[String; WORD_LEN]) -> Self {
        if answer_row[pos] == symbol {
            Correctness::Correct
        } else if answer_row.iter().any(|a| a == symbol) {
            Correctness::Misplaced
        } else {
            Correctness::Wrong
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, ValidationError> {
        match symbol {
            'A' => Ok(Correctness::Wrong),
            'B' => Ok(Correctness::Misplaced),
            'C' => Ok(Correctness::Correct),
            other => Err(ValidationError::BadSymbol(other)),
        }
    }

    /// Parse one feedback row as typed by the player, e.g. `"ACBA"`.
    pub fn parse_row(line: &str) -> Result<[Self; WORD_LEN], ValidationError> {
        let got = line.chars().count();
        if got != WORD_LEN {
            return Err(ValidationError::BadLength {
                expected: WORD_LEN,
                got,
            });
        }
        let mut row = [Correctness::Wrong; WORD_LEN];
        for (slot, symbol) in row.iter_mut().zip(line.chars()) {
            *slot = Correctness::from_symbol(symbol)?;
        }
        Ok(row)
    }
}

/// 4 dimensions x 4 positions of feedback comparing a guess to an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackMatrix {
    cells: [[Correctness; WORD_LEN]; DIMENSIONS],
}

impl FeedbackMatrix {
    /// Compute the feedback a guess would receive against a known answer.
    /// Every dimension and position is classified independently.
    pub fn of_pair(guess: &Decomposition, answer: &Decomposition) -> Self {
        let mut cells = [[Correctness::Wrong; WORD_LEN]; DIMENSIONS];
        for dim in Dimension::ALL {
            let guess_row = guess.row(dim);
            let answer_row = answer.row(dim);
            for (pos, cell) in cells[dim as usize].iter_mut().enumerate() {
                *cell = Correctness::classify(&guess_row[pos], pos, answer_row);
            }
        }
        Self { cells }
    }

    /// Wrap an observed grid, e.g. one typed in by the player.
    pub fn from_cells(cells: [[Correctness; WORD_LEN]; DIMENSIONS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[Correctness; WORD_LEN]; DIMENSIONS] {
        &self.cells
    }
}

/// A played guess together with the feedback it received.
pub struct Guess {
    pub word: String,
    pub mask: FeedbackMatrix,
}

impl Guess {
    /// If guess G received mask M against the hidden answer, a candidate
    /// stays viable iff computing G against the candidate reproduces M.
    pub fn matches(&self, guess: &Decomposition, candidate: &Decomposition) -> bool {
        FeedbackMatrix::of_pair(guess, candidate) == self.mask
    }
}

/// Require a 4-character guess, counting chars rather than bytes.
pub fn validate_idiom(word: &str) -> Result<(), ValidationError> {
    let got = word.chars().count();
    if got != WORD_LEN {
        return Err(ValidationError::BadLength {
            expected: WORD_LEN,
            got,
        });
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected exactly {expected} characters, got {got}")]
    BadLength { expected: usize, got: usize },
    #[error("feedback symbol '{0}' is not one of A, B, C")]
    BadSymbol(char),
}

/// maps A,B,C tokens into an array of Correctness variants
#[cfg(test)]
macro_rules! mask {
    (A) => { $crate::Correctness::Wrong };
    (B) => { $crate::Correctness::Misplaced };
    (C) => { $crate::Correctness::Correct };
    ($($c:tt)+) => {[
        $(mask!($c)),+
    ]}
}
