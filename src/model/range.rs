/*!
 * Word ranges and character shifts.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use super::interval::{intervals_overlap, is_interval_within};
use crate::errors::ModelError;

/// Inclusive range of indices into a commentary's flat word list.
///
/// Persisted as `[start, end]`. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[usize; 2]", into = "[usize; 2]")]
pub struct WordRange {
    start: usize,
    end: usize,
}

impl WordRange {
    pub fn new(start: usize, end: usize) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvalidWordRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single word.
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of words covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A word range always covers at least one word.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_tuple(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Whether `self` lies inside `container`, equal ranges included.
    pub fn is_within(&self, container: &WordRange) -> bool {
        is_interval_within(self.as_tuple(), container.as_tuple())
    }

    pub fn overlaps(&self, other: &WordRange) -> bool {
        intervals_overlap(self.as_tuple(), other.as_tuple())
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

impl TryFrom<[usize; 2]> for WordRange {
    type Error = ModelError;

    fn try_from(pair: [usize; 2]) -> Result<Self, Self::Error> {
        Self::new(pair[0], pair[1])
    }
}

impl From<WordRange> for [usize; 2] {
    fn from(range: WordRange) -> Self {
        [range.start, range.end]
    }
}

impl fmt::Display for WordRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Character offsets refining an annotation below word granularity.
///
/// Applied to the space-joined text of the annotation's words with slice
/// semantics: negative offsets count from the end of the text and offsets
/// past either end are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Shifts {
    pub start: i64,
    pub end: i64,
}

impl Shifts {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Slice `text` by these shifts, counting in characters.
    pub fn apply(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len() as i64;
        let resolve = |offset: i64| {
            let absolute = if offset < 0 { len + offset } else { offset };
            absolute.clamp(0, len) as usize
        };

        let (start, end) = (resolve(self.start), resolve(self.end));
        if start >= end {
            return String::new();
        }
        chars[start..end].iter().collect()
    }
}

impl From<[i64; 2]> for Shifts {
    fn from(pair: [i64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Shifts> for [i64; 2] {
    fn from(shifts: Shifts) -> Self {
        [shifts.start, shifts.end]
    }
}
