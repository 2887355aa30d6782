// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Accidentals: bounded semitone offsets applied to a note letter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MusicError, Result};

/// Semitone offset of a note letter, from double flat to double sharp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum Accidental {
    DoubleFlat = -2,
    Flat = -1,
    #[default]
    Natural = 0,
    Sharp = 1,
    DoubleSharp = 2,
}

impl Accidental {
    /// All accidentals from lowest to highest
    pub const ALL: [Accidental; 5] = [
        Accidental::DoubleFlat,
        Accidental::Flat,
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::DoubleSharp,
    ];

    pub const MIN: Accidental = Accidental::DoubleFlat;
    pub const MAX: Accidental = Accidental::DoubleSharp;

    /// Get the semitone offset
    pub fn offset(self) -> i32 {
        self as i8 as i32
    }

    /// Build an accidental from a semitone offset
    pub fn from_offset(offset: i32) -> Result<Self> {
        match offset {
            -2 => Ok(Accidental::DoubleFlat),
            -1 => Ok(Accidental::Flat),
            0 => Ok(Accidental::Natural),
            1 => Ok(Accidental::Sharp),
            2 => Ok(Accidental::DoubleSharp),
            other => Err(MusicError::out_of_range(
                "accidental",
                other,
                Self::MIN.offset(),
                Self::MAX.offset(),
            )),
        }
    }

    /// Shift by `steps` semitones, failing past double flat/sharp
    pub fn add(self, steps: i32) -> Result<Self> {
        Self::from_offset(self.offset() + steps)
    }

    /// Shift down by `steps` semitones
    pub fn subtract(self, steps: i32) -> Result<Self> {
        Self::from_offset(self.offset() - steps)
    }

    /// Raise by one semitone
    pub fn increment(self) -> Result<Self> {
        self.add(1)
    }

    /// Lower by one semitone
    pub fn decrement(self) -> Result<Self> {
        self.subtract(1)
    }

    /// Notation symbol ("bb", "b", "", "#", "##")
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }

    /// Parse without an error, `None` for invalid input
    pub fn try_parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl TryFrom<i32> for Accidental {
    type Error = MusicError;

    fn try_from(offset: i32) -> Result<Self> {
        Self::from_offset(offset)
    }
}

impl FromStr for Accidental {
    type Err = MusicError;

    /// A run of up to two `b`/`B` or up to two `#`; empty input is natural.
    fn from_str(s: &str) -> Result<Self> {
        let mut offset = 0i32;
        for c in s.chars() {
            let step = match c {
                'b' | 'B' => -1,
                '#' => 1,
                _ => {
                    return Err(MusicError::format(
                        "accidental",
                        s,
                        format!("unexpected character '{}'", c),
                    ))
                }
            };
            if offset != 0 && offset.signum() != step {
                return Err(MusicError::format("accidental", s, "mixed flats and sharps"));
            }
            offset += step;
        }

        Self::from_offset(offset)
            .map_err(|_| MusicError::format("accidental", s, "more than two symbols"))
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
