// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords built from interval formulas.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::formula::{Formula, FormulaIter};
use super::interval::Interval;
use super::pitch::{Pitch, MIDI_OFFSET};
use super::pitch_class::{PitchClass, SpellingPolicy, SEMITONES_PER_OCTAVE};
use crate::error::{MusicError, Result};

/// Chord qualities with built-in formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordType {
    // Triads
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Power,

    // Sixths and sevenths
    Major6,
    Minor6,
    Dominant7,
    Major7,
    Minor7,
    HalfDiminished7,
    Diminished7,
    MinorMajor7,

    // Extended
    Add9,
    Dominant9,
}

impl ChordType {
    pub const ALL: [ChordType; 17] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Sus2,
        ChordType::Sus4,
        ChordType::Power,
        ChordType::Major6,
        ChordType::Minor6,
        ChordType::Dominant7,
        ChordType::Major7,
        ChordType::Minor7,
        ChordType::HalfDiminished7,
        ChordType::Diminished7,
        ChordType::MinorMajor7,
        ChordType::Add9,
        ChordType::Dominant9,
    ];

    /// Formula notation for this chord type
    pub fn notation(self) -> &'static str {
        match self {
            ChordType::Major => "R,M3,5",
            ChordType::Minor => "R,m3,5",
            ChordType::Diminished => "R,m3,d5",
            ChordType::Augmented => "R,M3,A5",
            ChordType::Sus2 => "R,M2,5",
            ChordType::Sus4 => "R,4,5",
            ChordType::Power => "R,5",
            ChordType::Major6 => "R,M3,5,M6",
            ChordType::Minor6 => "R,m3,5,M6",
            ChordType::Dominant7 => "R,M3,5,m7",
            ChordType::Major7 => "R,M3,5,M7",
            ChordType::Minor7 => "R,m3,5,m7",
            ChordType::HalfDiminished7 => "R,m3,d5,m7",
            ChordType::Diminished7 => "R,m3,d5,d7",
            ChordType::MinorMajor7 => "R,m3,5,M7",
            ChordType::Add9 => "R,M3,5,M9",
            ChordType::Dominant9 => "R,M3,5,m7,M9",
        }
    }

    /// Named formula for this chord type
    pub fn formula(self) -> Result<Formula> {
        Ok(self.notation().parse::<Formula>()?.named(self.id(), self.name()))
    }

    /// Stable identifier
    pub fn id(self) -> &'static str {
        match self {
            ChordType::Major => "major_triad",
            ChordType::Minor => "minor_triad",
            ChordType::Diminished => "diminished_triad",
            ChordType::Augmented => "augmented_triad",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
            ChordType::Power => "power",
            ChordType::Major6 => "major6",
            ChordType::Minor6 => "minor6",
            ChordType::Dominant7 => "dominant7",
            ChordType::Major7 => "major7",
            ChordType::Minor7 => "minor7",
            ChordType::HalfDiminished7 => "half_diminished7",
            ChordType::Diminished7 => "diminished7",
            ChordType::MinorMajor7 => "minor_major7",
            ChordType::Add9 => "add9",
            ChordType::Dominant9 => "dominant9",
        }
    }

    /// Look up a chord type by its identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Get a human-readable name
    pub fn name(self) -> &'static str {
        match self {
            ChordType::Major => "Major",
            ChordType::Minor => "Minor",
            ChordType::Diminished => "Diminished",
            ChordType::Augmented => "Augmented",
            ChordType::Sus2 => "Suspended 2nd",
            ChordType::Sus4 => "Suspended 4th",
            ChordType::Power => "Power",
            ChordType::Major6 => "Major 6th",
            ChordType::Minor6 => "Minor 6th",
            ChordType::Dominant7 => "Dominant 7th",
            ChordType::Major7 => "Major 7th",
            ChordType::Minor7 => "Minor 7th",
            ChordType::HalfDiminished7 => "Half-Diminished 7th",
            ChordType::Diminished7 => "Diminished 7th",
            ChordType::MinorMajor7 => "Minor-Major 7th",
            ChordType::Add9 => "Added 9th",
            ChordType::Dominant9 => "Dominant 9th",
        }
    }

    /// Chord symbol suffix ("", "m", "maj7", ...)
    pub fn symbol(self) -> &'static str {
        match self {
            ChordType::Major => "",
            ChordType::Minor => "m",
            ChordType::Diminished => "dim",
            ChordType::Augmented => "aug",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
            ChordType::Power => "5",
            ChordType::Major6 => "6",
            ChordType::Minor6 => "m6",
            ChordType::Dominant7 => "7",
            ChordType::Major7 => "maj7",
            ChordType::Minor7 => "m7",
            ChordType::HalfDiminished7 => "m7b5",
            ChordType::Diminished7 => "dim7",
            ChordType::MinorMajor7 => "mMaj7",
            ChordType::Add9 => "add9",
            ChordType::Dominant9 => "9",
        }
    }

    /// Parse a chord symbol suffix. Case matters ("M7" is not "m7").
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "" | "maj" | "M" => Some(ChordType::Major),
            "m" | "min" | "-" => Some(ChordType::Minor),
            "dim" | "°" | "o" => Some(ChordType::Diminished),
            "aug" | "+" => Some(ChordType::Augmented),
            "sus2" => Some(ChordType::Sus2),
            "sus4" | "sus" => Some(ChordType::Sus4),
            "5" => Some(ChordType::Power),
            "6" => Some(ChordType::Major6),
            "m6" | "min6" => Some(ChordType::Minor6),
            "7" | "dom7" => Some(ChordType::Dominant7),
            "maj7" | "M7" | "Δ7" => Some(ChordType::Major7),
            "m7" | "min7" | "-7" => Some(ChordType::Minor7),
            "m7b5" | "ø" | "ø7" => Some(ChordType::HalfDiminished7),
            "dim7" | "°7" | "o7" => Some(ChordType::Diminished7),
            "mMaj7" | "mM7" | "minmaj7" => Some(ChordType::MinorMajor7),
            "add9" => Some(ChordType::Add9),
            "9" => Some(ChordType::Dominant9),
            _ => None,
        }
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chord: root pitch class plus formula
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    root: PitchClass,
    formula: Formula,
}

impl Chord {
    /// Create a chord from a root and formula
    pub fn new(root: PitchClass, formula: Formula) -> Self {
        Self { root, formula }
    }

    /// Create a built-in chord
    pub fn of_type(root: PitchClass, chord_type: ChordType) -> Result<Self> {
        Ok(Self::new(root, chord_type.formula()?))
    }

    /// Parse a chord symbol such as "C", "F#m7" or "Bbmaj7"
    pub fn parse(symbol: &str) -> Result<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MusicError::Empty { what: "chord" });
        }
        if !symbol.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(MusicError::format("chord", symbol, "expected a root letter"));
        }

        // Letter, then any run of '#' or lowercase 'b'
        let split = symbol
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c != '#' && c != 'b')
            .map_or(symbol.len(), |(i, _)| i);
        let (root, suffix) = symbol.split_at(split);

        let root: PitchClass = root.parse()?;
        let chord_type = ChordType::from_str(suffix)
            .ok_or_else(|| MusicError::format("chord", symbol, format!("unknown chord type '{}'", suffix)))?;
        Self::of_type(root, chord_type)
    }

    /// Get the root
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Get the formula
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The built-in chord type, if the formula is one
    pub fn chord_type(&self) -> Option<ChordType> {
        self.formula.id().and_then(ChordType::from_id)
    }

    /// Number of chord tones
    pub fn len(&self) -> usize {
        self.formula.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formula.is_empty()
    }

    /// Chord tones spelled from the root
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

    /// Check if a pitch class is a chord tone
    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.pitch_classes(SpellingPolicy::default())
            .contains(&pitch_class)
    }

    /// Ascending chord tones repeating upward from the root in `octave`
    pub fn generate(&self, octave: i32, policy: SpellingPolicy) -> Result<FormulaIter> {
        let root = Pitch::new(self.root, octave)?;
        Ok(self.formula.generate(root, policy))
    }

    /// Root-position voicing with the root in `octave`
    pub fn pitches(&self, octave: i32, policy: SpellingPolicy) -> Result<Vec<Pitch>> {
        let pitches: Vec<Pitch> = self.generate(octave, policy)?.take(self.len()).collect();
        if pitches.len() < self.len() {
            let root = Pitch::new(self.root, octave)?;
            let top = self.formula.intervals().last().map_or(0, |i| i.semitones());
            return Err(MusicError::out_of_range(
                "chord top note",
                root.absolute() + top + MIDI_OFFSET,
                Pitch::MIN.midi() as i32,
                Pitch::MAX.midi() as i32,
            ));
        }
        Ok(pitches)
    }

    /// Voicing with the lowest `inversion` tones raised an octave
    pub fn inversion(&self, inversion: usize, octave: i32, policy: SpellingPolicy) -> Result<Vec<Pitch>> {
        if inversion >= self.len() {
            return Err(MusicError::out_of_range(
                "inversion",
                inversion as i32,
                0,
                self.len() as i32 - 1,
            ));
        }

        let mut pitches = self.pitches(octave, policy)?;
        let raised = pitches
            .drain(..inversion)
            .map(|p| {
                p.add_interval(Interval::PERFECT_OCTAVE)
                    .or_else(|_| p.transpose(SEMITONES_PER_OCTAVE, policy))
            })
            .collect::<Result<Vec<_>>>()?;
        pitches.extend(raised);
        Ok(pitches)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.chord_type(), self.formula.name()) {
            (Some(chord_type), _) => write!(f, "{}{}", self.root, chord_type.symbol()),
            (None, Some(name)) => write!(f, "{} {}", self.root, name),
            (None, None) => write!(f, "{} ({})", self.root, self.formula),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spelled<T: ToString>(items: &[T]) -> Vec<String> {
        items.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_builtin_chord_formulas() {
        for chord_type in ChordType::ALL {
            let formula = chord_type.formula().unwrap();
            assert_eq!(formula.id(), Some(chord_type.id()));
            assert_eq!(ChordType::from_id(chord_type.id()), Some(chord_type));
            assert_eq!(ChordType::from_str(chord_type.symbol()), Some(chord_type));
        }
    }

    #[test]
    fn test_chord_spelling() {
        let policy = SpellingPolicy::FavorSharps;

        let c = Chord::of_type(PitchClass::C, ChordType::Major).unwrap();
        assert_eq!(spelled(&c.pitch_classes(policy)), vec!["C", "E", "G"]);

        let dim7 = Chord::of_type(PitchClass::C, ChordType::Diminished7).unwrap();
        assert_eq!(spelled(&dim7.pitch_classes(policy)), vec!["C", "Eb", "Gb", "Bbb"]);

        let f_sharp_m7 = Chord::parse("F#m7").unwrap();
        assert_eq!(spelled(&f_sharp_m7.pitch_classes(policy)), vec!["F#", "A", "C#", "E"]);

        let b_flat_maj7 = Chord::parse("Bbmaj7").unwrap();
        assert_eq!(spelled(&b_flat_maj7.pitch_classes(policy)), vec!["Bb", "D", "F", "A"]);
    }

    #[test]
    fn test_chord_parse() {
        assert_eq!(Chord::parse("Ebm7b5").unwrap().chord_type(), Some(ChordType::HalfDiminished7));
        assert_eq!(Chord::parse("Bb").unwrap().chord_type(), Some(ChordType::Major));
        assert_eq!(Chord::parse("Abm").unwrap().to_string(), "Abm");
        assert_eq!(Chord::parse(" G7 ").unwrap().to_string(), "G7");

        assert!(Chord::parse("Hm").unwrap_err().is_format());
        assert!(Chord::parse("Cxyz").unwrap_err().is_format());
        assert_eq!(Chord::parse(""), Err(MusicError::Empty { what: "chord" }));
    }

    #[test]
    fn test_chord_contains() {
        let g7 = Chord::parse("G7").unwrap();
        assert!(g7.contains(PitchClass::F));
        assert!(g7.contains("E#".parse().unwrap()));
        assert!(!g7.contains(PitchClass::C));
    }

    #[test]
    fn test_chord_pitches() {
        let c = Chord::of_type(PitchClass::C, ChordType::Major).unwrap();
        let policy = SpellingPolicy::FavorSharps;
        assert_eq!(spelled(&c.pitches(4, policy).unwrap()), vec!["C4", "E4", "G4"]);

        let add9 = Chord::of_type(PitchClass::C, ChordType::Add9).unwrap();
        assert_eq!(spelled(&add9.pitches(4, policy).unwrap()), vec!["C4", "E4", "G4", "D5"]);

        let g9 = Chord::of_type(PitchClass::G, ChordType::Major).unwrap();
        assert!(g9.pitches(9, policy).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_chord_inversions() {
        let c = Chord::of_type(PitchClass::C, ChordType::Major).unwrap();
        let policy = SpellingPolicy::FavorSharps;

        assert_eq!(spelled(&c.inversion(0, 4, policy).unwrap()), vec!["C4", "E4", "G4"]);
        assert_eq!(spelled(&c.inversion(1, 4, policy).unwrap()), vec!["E4", "G4", "C5"]);
        assert_eq!(spelled(&c.inversion(2, 4, policy).unwrap()), vec!["G4", "C5", "E5"]);
        assert!(c.inversion(3, 4, policy).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_custom_chord_display() {
        let formula: Formula = "R,4,m7".parse().unwrap();
        let chord = Chord::new(PitchClass::D, formula.clone());
        assert_eq!(chord.to_string(), "D (R,4,m7)");

        let named = Chord::new(PitchClass::D, formula.named("quartal", "Quartal"));
        assert_eq!(named.to_string(), "D Quartal");
        assert_eq!(named.chord_type(), None);
    }
}
