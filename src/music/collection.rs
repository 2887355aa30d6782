// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Comma-separated lists of pitches and pitch classes.

use std::fmt;
use std::str::FromStr;

use super::pitch::Pitch;
use super::pitch_class::PitchClass;
use crate::error::{MusicError, Result};

/// Octave assumed for pitches written without one
pub const DEFAULT_OCTAVE: i32 = 4;

/// Split a comma list, rejecting empty input and empty tokens
fn split_list<'a>(s: &'a str, what: &'static str) -> Result<Vec<&'a str>> {
    if s.trim().is_empty() {
        return Err(MusicError::Empty { what });
    }
    s.split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() {
                Err(MusicError::format(what, s, "empty list entry"))
            } else {
                Ok(token)
            }
        })
        .collect()
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Ordered list of pitches
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PitchCollection {
    pitches: Vec<Pitch>,
}

impl PitchCollection {
    pub fn new(pitches: Vec<Pitch>) -> Self {
        Self { pitches }
    }

    /// Parse a list where entries without an octave use `default_octave`
    pub fn parse_with_default_octave(s: &str, default_octave: i32) -> Result<Self> {
        let pitches = split_list(s, "pitch collection")?
            .into_iter()
            .map(|token| Pitch::parse_with_default_octave(token, default_octave))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(pitches))
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pitch> {
        self.pitches.iter()
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Check for a pitch by sounding height (enharmonics match)
    pub fn contains(&self, pitch: Pitch) -> bool {
        self.pitches.contains(&pitch)
    }

    /// Lowest pitch
    pub fn lowest(&self) -> Option<Pitch> {
        self.pitches.iter().min().copied()
    }

    /// Highest pitch
    pub fn highest(&self) -> Option<Pitch> {
        self.pitches.iter().max().copied()
    }

    /// Pitch classes in list order
    pub fn pitch_classes(&self) -> PitchClassCollection {
        self.pitches.iter().map(|p| p.pitch_class()).collect()
    }
}

impl FromStr for PitchCollection {
    type Err = MusicError;

    /// "C4,E4,G" (the last entry takes the default octave)
    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with_default_octave(s, DEFAULT_OCTAVE)
    }
}

impl fmt::Display for PitchCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&join(&self.pitches))
    }
}

impl FromIterator<Pitch> for PitchCollection {
    fn from_iter<I: IntoIterator<Item = Pitch>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PitchCollection {
    type Item = Pitch;
    type IntoIter = std::vec::IntoIter<Pitch>;

    fn into_iter(self) -> Self::IntoIter {
        self.pitches.into_iter()
    }
}

impl<'a> IntoIterator for &'a PitchCollection {
    type Item = &'a Pitch;
    type IntoIter = std::slice::Iter<'a, Pitch>;

    fn into_iter(self) -> Self::IntoIter {
        self.pitches.iter()
    }
}

/// Ordered list of pitch classes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PitchClassCollection {
    pitch_classes: Vec<PitchClass>,
}

impl PitchClassCollection {
    pub fn new(pitch_classes: Vec<PitchClass>) -> Self {
        Self { pitch_classes }
    }

    pub fn pitch_classes(&self) -> &[PitchClass] {
        &self.pitch_classes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PitchClass> {
        self.pitch_classes.iter()
    }

    pub fn len(&self) -> usize {
        self.pitch_classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitch_classes.is_empty()
    }

    /// Check for a pitch class by semitone (enharmonics match)
    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.pitch_classes.contains(&pitch_class)
    }

    /// Sorted by letter then accidental, the way pitch classes are listed
    pub fn sorted_by_spelling(&self) -> Self {
        let mut pitch_classes = self.pitch_classes.clone();
        pitch_classes.sort_by(PitchClass::cmp_spelling);
        Self::new(pitch_classes)
    }

    /// Pitches in `octave`, one per pitch class
    pub fn in_octave(&self, octave: i32) -> Result<PitchCollection> {
        self.pitch_classes
            .iter()
            .map(|&pc| Pitch::new(pc, octave))
            .collect::<Result<Vec<_>>>()
            .map(PitchCollection::new)
    }
}

impl FromStr for PitchClassCollection {
    type Err = MusicError;

    /// "C,Eb,G"
    fn from_str(s: &str) -> Result<Self> {
        let pitch_classes = split_list(s, "pitch class collection")?
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<PitchClass>>>()?;
        Ok(Self::new(pitch_classes))
    }
}

impl fmt::Display for PitchClassCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&join(&self.pitch_classes))
    }
}

impl FromIterator<PitchClass> for PitchClassCollection {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PitchClassCollection {
    type Item = PitchClass;
    type IntoIter = std::vec::IntoIter<PitchClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.pitch_classes.into_iter()
    }
}

impl<'a> IntoIterator for &'a PitchClassCollection {
    type Item = &'a PitchClass;
    type IntoIter = std::slice::Iter<'a, PitchClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.pitch_classes.iter()
    }
}
