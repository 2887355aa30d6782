// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the music theory engine.

use thiserror::Error;

use crate::music::interval::IntervalQuality;

/// Errors produced by value construction, arithmetic and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MusicError {
    /// A value left its legal range. Constructors never clamp.
    #[error("{what} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    /// Malformed textual notation.
    #[error("invalid {what} '{input}': {reason}")]
    Format {
        what: &'static str,
        input: String,
        reason: String,
    },
    /// Empty input where a value was required.
    #[error("missing {what}: input is empty")]
    Empty { what: &'static str },
    /// A number/quality pair with no entry in the interval table.
    #[error("invalid interval: {quality} {number}")]
    InvalidInterval { number: u8, quality: IntervalQuality },
    /// A formula whose intervals break the builder invariants.
    #[error("invalid formula: {0}")]
    InvalidFormula(String),
}

impl MusicError {
    pub(crate) fn out_of_range(what: &'static str, value: i32, min: i32, max: i32) -> Self {
        MusicError::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }

    pub(crate) fn format(what: &'static str, input: &str, reason: impl Into<String>) -> Self {
        MusicError::Format {
            what,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Check whether this error came from malformed notation
    pub fn is_format(&self) -> bool {
        matches!(self, MusicError::Format { .. } | MusicError::Empty { .. })
    }

    /// Check whether this error came from a range violation
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            MusicError::OutOfRange { .. } | MusicError::InvalidInterval { .. }
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MusicError>;
