// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scales and modes.
//!
//! A scale binds a root pitch class to an interval formula. Built-in scale
//! formulas are listed in [`ScaleType`]; modes rotate a parent scale so
//! that it starts on another degree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::formula::{Formula, FormulaIter};
use super::interval::Interval;
use super::pitch::Pitch;
use super::pitch_class::{PitchClass, SpellingPolicy};
use crate::error::{MusicError, Result};

/// Scale types supported by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    // Major scale and modes
    Major,        // Ionian
    Dorian,       // Minor with raised 6th
    Phrygian,     // Minor with lowered 2nd
    Lydian,       // Major with raised 4th
    Mixolydian,   // Major with lowered 7th
    NaturalMinor, // Aeolian
    Locrian,      // Diminished

    // Other minor scales
    HarmonicMinor,
    MelodicMinor, // Ascending form

    // Pentatonic scales
    MajorPentatonic,
    MinorPentatonic,

    // Blues
    Blues,
    MajorBlues,

    // Other common scales
    WholeTone,
    Diminished,   // Half-whole
    DiminishedWH, // Whole-half
    Chromatic,
}

impl ScaleType {
    pub const ALL: [ScaleType; 17] = [
        ScaleType::Major,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::NaturalMinor,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
        ScaleType::MajorBlues,
        ScaleType::WholeTone,
        ScaleType::Diminished,
        ScaleType::DiminishedWH,
        ScaleType::Chromatic,
    ];

    /// Formula notation for this scale type
    pub fn notation(self) -> &'static str {
        match self {
            // Major and modes
            ScaleType::Major => "R,M2,M3,4,5,M6,M7",
            ScaleType::Dorian => "R,M2,m3,4,5,M6,m7",
            ScaleType::Phrygian => "R,m2,m3,4,5,m6,m7",
            ScaleType::Lydian => "R,M2,M3,A4,5,M6,M7",
            ScaleType::Mixolydian => "R,M2,M3,4,5,M6,m7",
            ScaleType::NaturalMinor => "R,M2,m3,4,5,m6,m7",
            ScaleType::Locrian => "R,m2,m3,4,d5,m6,m7",

            // Other minor scales
            ScaleType::HarmonicMinor => "R,M2,m3,4,5,m6,M7",
            ScaleType::MelodicMinor => "R,M2,m3,4,5,M6,M7",

            // Pentatonic
            ScaleType::MajorPentatonic => "R,M2,M3,5,M6",
            ScaleType::MinorPentatonic => "R,m3,4,5,m7",

            // Blues
            ScaleType::Blues => "R,m3,4,d5,5,m7",
            ScaleType::MajorBlues => "R,M2,m3,M3,5,M6",

            // Symmetric scales
            ScaleType::WholeTone => "R,M2,M3,A4,A5,A6",
            ScaleType::Diminished => "R,m2,m3,M3,A4,5,M6,m7",
            ScaleType::DiminishedWH => "R,M2,m3,4,d5,m6,M6,M7",
            ScaleType::Chromatic => "R,A1,M2,A2,M3,4,A4,5,A5,M6,A6,M7",
        }
    }

    /// Named formula for this scale type
    pub fn formula(self) -> Result<Formula> {
        Ok(self.notation().parse::<Formula>()?.named(self.id(), self.name()))
    }

    /// Stable identifier
    pub fn id(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::NaturalMinor => "natural_minor",
            ScaleType::Locrian => "locrian",
            ScaleType::HarmonicMinor => "harmonic_minor",
            ScaleType::MelodicMinor => "melodic_minor",
            ScaleType::MajorPentatonic => "major_pentatonic",
            ScaleType::MinorPentatonic => "minor_pentatonic",
            ScaleType::Blues => "blues",
            ScaleType::MajorBlues => "major_blues",
            ScaleType::WholeTone => "whole_tone",
            ScaleType::Diminished => "diminished",
            ScaleType::DiminishedWH => "diminished_wh",
            ScaleType::Chromatic => "chromatic",
        }
    }

    /// Parse scale type from string
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" => Some(ScaleType::Major),
            "dorian" => Some(ScaleType::Dorian),
            "phrygian" => Some(ScaleType::Phrygian),
            "lydian" => Some(ScaleType::Lydian),
            "mixolydian" => Some(ScaleType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" => Some(ScaleType::NaturalMinor),
            "locrian" => Some(ScaleType::Locrian),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            "majorpentatonic" | "pentatonicmajor" => Some(ScaleType::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Some(ScaleType::MinorPentatonic),
            "blues" | "minorblues" => Some(ScaleType::Blues),
            "majorblues" => Some(ScaleType::MajorBlues),
            "wholetone" => Some(ScaleType::WholeTone),
            "diminished" | "octatonic" | "halfwhole" => Some(ScaleType::Diminished),
            "diminishedwh" | "wholehalf" => Some(ScaleType::DiminishedWH),
            "chromatic" => Some(ScaleType::Chromatic),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::MinorPentatonic => "Minor Pentatonic",
            ScaleType::Blues => "Blues",
            ScaleType::MajorBlues => "Major Blues",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::Diminished => "Diminished",
            ScaleType::DiminishedWH => "Diminished (W-H)",
            ScaleType::Chromatic => "Chromatic",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scale: root pitch class plus formula
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: PitchClass,
    formula: Formula,
}

impl Scale {
    /// Create a scale from a root and formula
    pub fn new(root: PitchClass, formula: Formula) -> Self {
        Self { root, formula }
    }

    /// Create a built-in scale
    pub fn of_type(root: PitchClass, scale_type: ScaleType) -> Result<Self> {
        Ok(Self::new(root, scale_type.formula()?))
    }

    /// Parse a scale from strings (e.g., "C", "major" or "C", "R,M2,m3")
    pub fn parse(root_str: &str, scale_str: &str) -> Result<Self> {
        let root: PitchClass = root_str.parse()?;
        match ScaleType::from_str(scale_str) {
            Some(scale_type) => Self::of_type(root, scale_type),
            None => Ok(Self::new(root, scale_str.parse()?)),
        }
    }

    /// Get the root
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Get the formula
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Get the number of notes in this scale
    pub fn len(&self) -> usize {
        self.formula.len()
    }

    /// Check if this scale is empty (never, formulas are non-empty)
    pub fn is_empty(&self) -> bool {
        self.formula.is_empty()
    }

    /// One cycle of the scale spelled from the root.
    /// Degrees that would need a triple accidental are spelled per `policy`.
    pub fn pitch_classes(&self, policy: SpellingPolicy) -> Vec<PitchClass> {
        self.formula
            .intervals()
            .iter()
            .map(|&interval| {
                self.root
                    .add_interval(interval)
                    .unwrap_or_else(|_| self.root.add(interval.semitones(), policy))
            })
            .collect()
    }

    /// Check if a pitch class is in this scale (any spelling)
    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.pitch_classes(SpellingPolicy::default())
            .contains(&pitch_class)
    }

    /// Get the scale degree (1-based) for a pitch class, if it's in the scale
    pub fn degree_of(&self, pitch_class: PitchClass) -> Option<usize> {
        self.pitch_classes(SpellingPolicy::default())
            .iter()
            .position(|&p| p == pitch_class)
            .map(|i| i + 1)
    }

    /// Get the pitch class at a given scale degree (1-based)
    pub fn pitch_class_at_degree(&self, degree: usize, policy: SpellingPolicy) -> Option<PitchClass> {
        if degree == 0 || degree > self.len() {
            return None;
        }
        Some(self.pitch_classes(policy)[degree - 1])
    }

    /// Ascending scale pitches from the root in `octave`
    pub fn generate(&self, octave: i32, policy: SpellingPolicy) -> Result<FormulaIter> {
        let root = Pitch::new(self.root, octave)?;
        Ok(self.formula.generate(root, policy))
    }

    /// The mode starting on `degree` (1-based)
    pub fn mode(&self, degree: usize) -> Result<Mode> {
        Mode::new(self.clone(), degree)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formula.name() {
            Some(name) => write!(f, "{} {}", self.root, name),
            None => write!(f, "{} ({})", self.root, self.formula),
        }
    }
}

/// The seven modes of the major scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeType {
    Ionian = 1,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl ModeType {
    pub const ALL: [ModeType; 7] = [
        ModeType::Ionian,
        ModeType::Dorian,
        ModeType::Phrygian,
        ModeType::Lydian,
        ModeType::Mixolydian,
        ModeType::Aeolian,
        ModeType::Locrian,
    ];

    /// Degree of the major scale this mode starts on
    pub fn degree(self) -> usize {
        self as usize
    }

    /// Get a human-readable name
    pub fn name(self) -> &'static str {
        match self {
            ModeType::Ionian => "Ionian",
            ModeType::Dorian => "Dorian",
            ModeType::Phrygian => "Phrygian",
            ModeType::Lydian => "Lydian",
            ModeType::Mixolydian => "Mixolydian",
            ModeType::Aeolian => "Aeolian",
            ModeType::Locrian => "Locrian",
        }
    }
}

impl fmt::Display for ModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A parent scale read from one of its degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    parent: Scale,
    degree: usize,
}

impl Mode {
    /// Create the mode of `parent` starting on `degree` (1-based)
    pub fn new(parent: Scale, degree: usize) -> Result<Self> {
        if degree == 0 || degree > parent.len() {
            return Err(MusicError::out_of_range(
                "mode degree",
                degree as i32,
                1,
                parent.len() as i32,
            ));
        }
        Ok(Self { parent, degree })
    }

    /// The major-scale mode whose parent major scale has root `parent_root`
    pub fn of_type(parent_root: PitchClass, mode_type: ModeType) -> Result<Self> {
        Self::new(Scale::of_type(parent_root, ScaleType::Major)?, mode_type.degree())
    }

    /// Get the parent scale
    pub fn parent(&self) -> &Scale {
        &self.parent
    }

    /// Get the starting degree
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The pitch class the mode starts on
    pub fn root(&self, policy: SpellingPolicy) -> PitchClass {
        self.parent.pitch_classes(policy)[self.degree - 1]
    }

    /// The parent formula rotated to start on this mode's degree
    pub fn formula(&self) -> Result<Formula> {
        let intervals = self.parent.formula().intervals();
        let start = self.degree - 1;
        let base = intervals[start];

        let rotated = (0..intervals.len())
            .map(|offset| {
                let index = start + offset;
                let interval = if index < intervals.len() {
                    intervals[index]
                } else {
                    intervals[index - intervals.len()].plus_octave()?
                };
                Interval::difference(base, interval)
            })
            .collect::<Result<Vec<_>>>()?;

        Formula::new(rotated)
    }

    /// This mode as a standalone scale
    pub fn to_scale(&self, policy: SpellingPolicy) -> Result<Scale> {
        Ok(Scale::new(self.root(policy), self.formula()?))
    }
}
