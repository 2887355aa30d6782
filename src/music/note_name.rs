// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The seven diatonic note letters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MusicError, Result};

/// Number of letters on the diatonic wheel
pub const LETTER_COUNT: i32 = 7;

/// Semitones from each letter to the next one up (C->D .. B->C)
const STEPS_TO_NEXT: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Note letters in cyclic order starting at C
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// All letters in wheel order
    pub const ALL: [NoteName; 7] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    /// Position on the wheel (C = 0 .. B = 6)
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Get the letter at a wheel position, wrapping modulo 7
    pub fn from_index(index: i32) -> Self {
        NoteName::ALL[index.rem_euclid(LETTER_COUNT) as usize]
    }

    /// Semitone class of the natural note (C = 0 .. B = 11)
    pub fn natural_semitone(self) -> i32 {
        STEPS_TO_NEXT[..self as usize].iter().sum()
    }

    /// Move `steps` letters up the wheel
    pub fn add(self, steps: i32) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// Move `steps` letters down the wheel
    pub fn subtract(self, steps: i32) -> Self {
        Self::from_index(self.index() - steps)
    }

    /// The next letter, B wraps to C
    pub fn next(self) -> Self {
        self.add(1)
    }

    /// The previous letter, C wraps to B
    pub fn previous(self) -> Self {
        self.subtract(1)
    }

    /// Ascending semitones from `from` to `to` along the natural notes
    pub fn interval_between(from: NoteName, to: NoteName) -> i32 {
        let letters = Self::letter_distance(from, to);
        (0..letters)
            .map(|i| STEPS_TO_NEXT[from.add(i) as usize])
            .sum()
    }

    /// Ascending letter steps from `from` to `to` (0..=6)
    pub fn letter_distance(from: NoteName, to: NoteName) -> i32 {
        (to.index() - from.index()).rem_euclid(LETTER_COUNT)
    }

    /// Parse a single letter, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }
}

impl FromStr for NoteName {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(MusicError::Empty { what: "note name" }),
            (Some(c), None) => Self::from_char(c)
                .ok_or_else(|| MusicError::format("note name", s, "expected a letter A-G")),
            _ => Err(MusicError::format("note name", s, "expected a single letter")),
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            NoteName::C => "C",
            NoteName::D => "D",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::G => "G",
            NoteName::A => "A",
            NoteName::B => "B",
        };
        f.write_str(letter)
    }
}
