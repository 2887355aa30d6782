// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and enharmonic spelling.
//!
//! A pitch class is a letter plus an accidental. Two pitch classes are equal
//! when they sound the same (`C#` == `Db`), while the spelling is kept for
//! display. Operations that have to invent a spelling take a
//! [`SpellingPolicy`] instead of reading shared state.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::accidental::Accidental;
use super::interval::Interval;
use super::note_name::NoteName;
use crate::error::{MusicError, Result};

/// Semitones per octave
pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Which spelling to prefer when a pitch has no natural name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingPolicy {
    /// C#, D#, F#, G#, A#
    #[default]
    FavorSharps,
    /// Db, Eb, Gb, Ab, Bb
    FavorFlats,
}

impl SpellingPolicy {
    /// Parse a policy name ("sharps", "favor_flats", "b", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "sharps" | "sharp" | "favorsharps" | "#" => Some(SpellingPolicy::FavorSharps),
            "flats" | "flat" | "favorflats" | "b" => Some(SpellingPolicy::FavorFlats),
            _ => None,
        }
    }
}

/// A letter plus accidental, identified by its semitone class (0-11)
#[derive(Debug, Clone, Copy)]
pub struct PitchClass {
    name: NoteName,
    accidental: Accidental,
}

impl PitchClass {
    pub const C: PitchClass = PitchClass::new(NoteName::C, Accidental::Natural);
    pub const D: PitchClass = PitchClass::new(NoteName::D, Accidental::Natural);
    pub const E: PitchClass = PitchClass::new(NoteName::E, Accidental::Natural);
    pub const F: PitchClass = PitchClass::new(NoteName::F, Accidental::Natural);
    pub const G: PitchClass = PitchClass::new(NoteName::G, Accidental::Natural);
    pub const A: PitchClass = PitchClass::new(NoteName::A, Accidental::Natural);
    pub const B: PitchClass = PitchClass::new(NoteName::B, Accidental::Natural);

    /// Create a pitch class from a letter and accidental
    pub const fn new(name: NoteName, accidental: Accidental) -> Self {
        Self { name, accidental }
    }

    /// Create a pitch class from a letter and a raw semitone offset
    pub fn create(name: NoteName, offset: i32) -> Result<Self> {
        Ok(Self::new(name, Accidental::from_offset(offset)?))
    }

    /// Spell a semitone class (taken modulo 12) according to `policy`
    pub fn from_semitone(semitone: i32, policy: SpellingPolicy) -> Self {
        let semitone = semitone.rem_euclid(SEMITONES_PER_OCTAVE);
        let natural = |s: i32| NoteName::ALL.into_iter().find(|n| n.natural_semitone() == s);

        if let Some(name) = natural(semitone) {
            return Self::new(name, Accidental::Natural);
        }

        // Every black key sits between two naturals a semitone away
        match policy {
            SpellingPolicy::FavorSharps => {
                let below = (semitone - 1).rem_euclid(SEMITONES_PER_OCTAVE);
                Self::new(natural(below).unwrap_or(NoteName::C), Accidental::Sharp)
            }
            SpellingPolicy::FavorFlats => {
                let above = (semitone + 1).rem_euclid(SEMITONES_PER_OCTAVE);
                Self::new(natural(above).unwrap_or(NoteName::C), Accidental::Flat)
            }
        }
    }

    /// Get the letter
    pub fn name(self) -> NoteName {
        self.name
    }

    /// Get the accidental
    pub fn accidental(self) -> Accidental {
        self.accidental
    }

    /// Semitone offset from the letter's octave C, before reduction (-2..=13)
    pub fn unreduced_semitone(self) -> i32 {
        self.name.natural_semitone() + self.accidental.offset()
    }

    /// Semitone class (C = 0 .. B = 11)
    pub fn semitone(self) -> i32 {
        self.unreduced_semitone().rem_euclid(SEMITONES_PER_OCTAVE)
    }

    /// Move up `semitones`, spelling the result per `policy`
    pub fn add(self, semitones: i32, policy: SpellingPolicy) -> Self {
        Self::from_semitone(self.semitone() + semitones.rem_euclid(SEMITONES_PER_OCTAVE), policy)
    }

    /// Move down `semitones`, spelling the result per `policy`
    pub fn subtract(self, semitones: i32, policy: SpellingPolicy) -> Self {
        Self::from_semitone(self.semitone() - semitones.rem_euclid(SEMITONES_PER_OCTAVE), policy)
    }

    /// The pitch class a semitone up
    pub fn next(self, policy: SpellingPolicy) -> Self {
        self.add(1, policy)
    }

    /// The pitch class a semitone down
    pub fn previous(self, policy: SpellingPolicy) -> Self {
        self.subtract(1, policy)
    }

    /// Move up by an interval's letter distance and size
    pub fn add_interval(self, interval: Interval) -> Result<Self> {
        let name = self.name.add(interval.number() as i32 - 1);
        self.spell_with(name, self.semitone() + interval.semitones())
    }

    /// Move down by an interval's letter distance and size
    pub fn subtract_interval(self, interval: Interval) -> Result<Self> {
        let name = self.name.subtract(interval.number() as i32 - 1);
        self.spell_with(name, self.semitone() - interval.semitones())
    }

    fn spell_with(self, name: NoteName, semitone: i32) -> Result<Self> {
        let diff = semitone - name.natural_semitone();
        let offset = (diff + 6).rem_euclid(SEMITONES_PER_OCTAVE) - 6;
        Self::create(name, offset)
    }

    /// Respell with another letter, if an accidental in range reaches it
    pub fn enharmonic(self, name: NoteName) -> Option<Self> {
        self.spell_with(name, self.semitone()).ok()
    }

    /// Every valid spelling of this pitch class, in letter order
    pub fn enharmonics(self) -> Vec<Self> {
        NoteName::ALL
            .into_iter()
            .filter_map(|name| self.enharmonic(name))
            .collect()
    }

    /// Check whether two pitch classes are spelled identically
    pub fn same_spelling(self, other: PitchClass) -> bool {
        self.name == other.name && self.accidental == other.accidental
    }

    /// Display ordering: alphabetical letter (A first), then accidental
    pub fn cmp_spelling(&self, other: &PitchClass) -> Ordering {
        let alphabetical = |n: NoteName| (n.index() + 2).rem_euclid(7);
        alphabetical(self.name)
            .cmp(&alphabetical(other.name))
            .then(self.accidental.cmp(&other.accidental))
    }

    /// Parse without an error, `None` for invalid input
    pub fn try_parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl PartialEq for PitchClass {
    fn eq(&self, other: &Self) -> bool {
        self.semitone() == other.semitone()
    }
}

impl Eq for PitchClass {}

impl Hash for PitchClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semitone().hash(state);
    }
}

impl PartialOrd for PitchClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PitchClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitone().cmp(&other.semitone())
    }
}

impl FromStr for PitchClass {
    type Err = MusicError;

    /// Letter plus accidental ("C##", "bb"), or a MIDI number ("61")
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let first = chars.next().ok_or(MusicError::Empty { what: "pitch class" })?;

        if first.is_ascii_digit() {
            let midi: i32 = trimmed
                .parse()
                .map_err(|_| MusicError::format("pitch class", s, "invalid MIDI number"))?;
            if midi > 127 {
                return Err(MusicError::out_of_range("MIDI number", midi, 0, 127));
            }
            return Ok(Self::from_semitone(midi, SpellingPolicy::default()));
        }

        let name = NoteName::from_char(first)
            .ok_or_else(|| MusicError::format("pitch class", s, "expected a letter A-G"))?;
        let accidental: Accidental = chars
            .as_str()
            .parse()
            .map_err(|_| MusicError::format("pitch class", s, "invalid accidental"))?;
        Ok(Self::new(name, accidental))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}{}", self.name, self.accidental))
    }
}
