use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::format::format_grouped;

/// Number of digits in a valid code.
pub const CODE_LEN: usize = 6;

// ─── Candidate ────────────────────────────────────────────────────

/// A normalized reading: exactly [`CODE_LEN`] ASCII digits.
///
/// Only constructible through [`Candidate::new`] or [`Candidate::normalize`],
/// so every value that reaches a [`Tally`](crate::Tally) is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Candidate(String);

impl Candidate {
    /// Wrap an already-clean digit string.
    pub fn new(digits: impl Into<String>) -> Result<Self, CandidateError> {
        let digits = digits.into();
        if digits.len() != CODE_LEN {
            return Err(CandidateError::WrongLength {
                expected: CODE_LEN,
                actual: digits.chars().count(),
            });
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(CandidateError::NonDigit(c));
        }
        Ok(Self(digits))
    }

    /// Normalize raw recognizer output.
    ///
    /// Every character outside `0`-`9` is dropped; the remainder becomes a
    /// candidate only if exactly [`CODE_LEN`] digits are left. `None` means
    /// "no candidate this frame".
    pub fn normalize(raw: &str) -> Option<Self> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        (digits.len() == CODE_LEN).then_some(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form with digits grouped by three (`"123 456"`).
    pub fn grouped(&self) -> String {
        format_grouped(&self.0)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Candidate {
    type Err = CandidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Candidate {
    type Error = CandidateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Candidate> for String {
    fn from(value: Candidate) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateError {
    #[error("expected {expected} digits, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("non-digit character {0:?}")]
    NonDigit(char),
}

// ─── Decision ─────────────────────────────────────────────────────

/// Outcome of one consensus check.
///
/// Rejection is not terminal: an ambiguous tally is simply `Undecided` and
/// sampling continues with the same counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "code", rename_all = "snake_case")]
pub enum Decision {
    Undecided,
    Accepted(Candidate),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn accepted(&self) -> Option<&Candidate> {
        match self {
            Self::Accepted(c) => Some(c),
            Self::Undecided => None,
        }
    }
}
