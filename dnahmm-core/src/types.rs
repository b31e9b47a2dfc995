use std::fmt;

use thiserror::Error;

/// Category assigned to a region of the analyzed sequence.
///
/// Every hidden state of a model falls into exactly one category. A state is
/// coding only when it is listed in the analyzer's coding states; every other
/// state is non-coding.
///
/// # Examples
///
/// ```rust
/// use dnahmm_core::types::RegionKind;
///
/// assert_eq!(RegionKind::Coding.to_string(), "coding");
/// assert_eq!(RegionKind::NonCoding.to_string(), "non-coding");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Run of positions decoded into a coding state
    Coding,
    /// Run of positions decoded into any other state
    NonCoding,
}

impl RegionKind {
    #[must_use]
    pub const fn from_coding(is_coding: bool) -> Self {
        if is_coding {
            Self::Coding
        } else {
            Self::NonCoding
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coding => write!(f, "coding"),
            Self::NonCoding => write!(f, "non-coding"),
        }
    }
}

/// A maximal run of consecutive positions sharing one [`RegionKind`].
///
/// Coordinates are 0-based and both `start` and `end` are inclusive, so a
/// region covering a single base has `start == end` and `length == 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// First position of the region (0-based, inclusive)
    pub start: usize,
    /// Last position of the region (0-based, inclusive)
    pub end: usize,
    /// Coding or non-coding
    pub kind: RegionKind,
    /// Symbols covered by the region
    pub subsequence: String,
    /// Number of positions, always `end - start + 1`
    pub length: usize,
}

impl Region {
    /// Builds the region covering `sequence[start..=end]`.
    ///
    /// `sequence` must contain ASCII symbols only, which holds for any
    /// sequence that passed model validation.
    #[must_use]
    pub fn new(sequence: &[u8], start: usize, end: usize, kind: RegionKind) -> Self {
        Self {
            start,
            end,
            kind,
            subsequence: String::from_utf8_lossy(&sequence[start..=end]).into_owned(),
            length: end - start + 1,
        }
    }

    #[must_use]
    pub fn is_coding(&self) -> bool {
        self.kind == RegionKind::Coding
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} (length {}): {}",
            self.kind, self.start, self.end, self.length, self.subsequence
        )
    }
}

/// Decoded hidden-state path by state index, as produced by the Viterbi pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePath {
    /// Index of the chosen state at each position
    pub states: Vec<usize>,
    /// Locally normalized score of the chosen state at each position, in [0, 1]
    pub confidences: Vec<f64>,
    /// Natural log of the probability of the whole path (0.0 for an empty path)
    pub log_probability: f64,
}

impl StatePath {
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Result of recognizing a sequence: one state label and one confidence per
/// position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    /// State identifier decoded at each position
    pub states: Vec<String>,
    /// Confidence of the decoded state at each position
    pub confidences: Vec<f64>,
}

/// Error types that can occur while building a model or running inference
#[derive(Error, Debug)]
pub enum DnaHmmError {
    /// Probability tables or identifiers rejected at model construction
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    /// Input sequence contains symbols outside the model alphabet
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),
    /// A dynamic-programming pass produced a non-finite value
    #[error("Numeric instability: {0}")]
    NumericInstability(String),
    /// Analyzer configuration does not fit the model
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DnaHmmError>;
