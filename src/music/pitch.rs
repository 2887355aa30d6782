// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Octave-qualified pitches, MIDI numbers and frequencies.
//!
//! The octave belongs to the letter, so `B#3` sounds as `C4` and `Cb4` as
//! `B3`. Pitches compare by sounding position; spelling is display-only.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Sub;
use std::str::FromStr;

use super::accidental::Accidental;
use super::interval::Interval;
use super::note_name::{NoteName, LETTER_COUNT};
use super::pitch_class::{PitchClass, SpellingPolicy, SEMITONES_PER_OCTAVE};
use crate::error::{MusicError, Result};

/// MIDI number type (12-127 for representable pitches)
pub type MidiNote = u8;

/// MIDI number of C0, the lowest pitch
pub const MIDI_OFFSET: i32 = 12;

/// Highest MIDI number
pub const MAX_MIDI: i32 = 127;

/// Reference pitch A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// MIDI number of A4
pub const A4_MIDI: i32 = 69;

/// A pitch class in a specific octave
#[derive(Debug, Clone, Copy)]
pub struct Pitch {
    pitch_class: PitchClass,
    octave: i8,
}

impl Pitch {
    pub const MIN_OCTAVE: i32 = 0;
    pub const MAX_OCTAVE: i32 = 9;

    /// C0 (MIDI 12)
    pub const MIN: Pitch = Pitch {
        pitch_class: PitchClass::C,
        octave: 0,
    };

    /// G9 (MIDI 127)
    pub const MAX: Pitch = Pitch {
        pitch_class: PitchClass::G,
        octave: 9,
    };

    /// Create a pitch, failing if it falls outside C0..=G9
    pub fn new(pitch_class: PitchClass, octave: i32) -> Result<Self> {
        if !(Self::MIN_OCTAVE..=Self::MAX_OCTAVE).contains(&octave) {
            return Err(MusicError::out_of_range(
                "octave",
                octave,
                Self::MIN_OCTAVE,
                Self::MAX_OCTAVE,
            ));
        }

        let midi = octave * SEMITONES_PER_OCTAVE + pitch_class.unreduced_semitone() + MIDI_OFFSET;
        if !(MIDI_OFFSET..=MAX_MIDI).contains(&midi) {
            return Err(MusicError::out_of_range("pitch", midi, MIDI_OFFSET, MAX_MIDI));
        }

        Ok(Self {
            pitch_class,
            octave: octave as i8,
        })
    }

    /// Create a pitch from its parts
    pub fn create(name: NoteName, accidental: Accidental, octave: i32) -> Result<Self> {
        Self::new(PitchClass::new(name, accidental), octave)
    }

    /// Create a pitch from a MIDI number, spelled per `policy`
    pub fn from_midi(midi: i32, policy: SpellingPolicy) -> Result<Self> {
        if !(MIDI_OFFSET..=MAX_MIDI).contains(&midi) {
            return Err(MusicError::out_of_range("MIDI number", midi, MIDI_OFFSET, MAX_MIDI));
        }
        let absolute = midi - MIDI_OFFSET;
        // Spellings from `from_semitone` never cross the octave line
        Self::new(
            PitchClass::from_semitone(absolute, policy),
            absolute.div_euclid(SEMITONES_PER_OCTAVE),
        )
    }

    /// Get the pitch class
    pub fn pitch_class(self) -> PitchClass {
        self.pitch_class
    }

    /// Get the letter
    pub fn name(self) -> NoteName {
        self.pitch_class.name()
    }

    /// Get the accidental
    pub fn accidental(self) -> Accidental {
        self.pitch_class.accidental()
    }

    /// Get the octave of the letter
    pub fn octave(self) -> i32 {
        self.octave as i32
    }

    /// Semitones above C0
    pub fn absolute(self) -> i32 {
        self.octave() * SEMITONES_PER_OCTAVE + self.pitch_class.unreduced_semitone()
    }

    /// MIDI note number (C4 = 60)
    pub fn midi(self) -> MidiNote {
        (self.absolute() + MIDI_OFFSET) as MidiNote
    }

    /// Equal-tempered frequency in Hz relative to A4 = 440 Hz
    pub fn frequency(self) -> f64 {
        A4_FREQUENCY * 2f64.powf((self.midi() as i32 - A4_MIDI) as f64 / 12.0)
    }

    /// Letters above C0; the letter counterpart of `absolute`
    pub fn diatonic_index(self) -> i32 {
        self.octave() * LETTER_COUNT + self.name().index()
    }

    /// Move by `semitones`, spelling the result per `policy`
    pub fn transpose(self, semitones: i32, policy: SpellingPolicy) -> Result<Self> {
        let midi = self.midi() as i32;
        let target = midi.checked_add(semitones).ok_or_else(|| {
            MusicError::out_of_range("transposition", semitones, MIDI_OFFSET - midi, MAX_MIDI - midi)
        })?;
        Self::from_midi(target, policy)
    }

    /// Move up by an interval, keeping its letter distance and size
    pub fn add_interval(self, interval: Interval) -> Result<Self> {
        let letters = interval.number() as i32 - 1;
        self.spell_at(
            self.diatonic_index() + letters,
            self.absolute() + interval.semitones(),
        )
    }

    /// Move down by an interval, keeping its letter distance and size
    pub fn subtract_interval(self, interval: Interval) -> Result<Self> {
        let letters = interval.number() as i32 - 1;
        self.spell_at(
            self.diatonic_index() - letters,
            self.absolute() - interval.semitones(),
        )
    }

    /// Spell `absolute` with the letter at `diatonic_index`
    pub(crate) fn spell_at(self, diatonic_index: i32, absolute: i32) -> Result<Self> {
        let name = NoteName::from_index(diatonic_index);
        let octave = diatonic_index.div_euclid(LETTER_COUNT);
        let natural = octave * SEMITONES_PER_OCTAVE + name.natural_semitone();
        let accidental = Accidental::from_offset(absolute - natural)?;
        Self::new(PitchClass::new(name, accidental), octave)
    }

    /// Check whether two pitches are spelled identically
    pub fn same_spelling(self, other: Pitch) -> bool {
        self.octave == other.octave && self.pitch_class.same_spelling(other.pitch_class)
    }

    /// Parse a pitch whose octave may be omitted
    pub fn parse_with_default_octave(s: &str, default_octave: i32) -> Result<Self> {
        match split_notation(s)? {
            Notation::Midi(midi) => Self::from_midi(midi, SpellingPolicy::default()),
            Notation::Spelled(pitch_class, octave) => {
                Self::new(pitch_class, octave.unwrap_or(default_octave))
            }
        }
    }

    /// Parse without an error, `None` for invalid input
    pub fn try_parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.absolute() == other.absolute()
    }
}

impl Eq for Pitch {}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute().hash(state);
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute().cmp(&other.absolute())
    }
}

impl Sub for Pitch {
    type Output = i32;

    /// Signed semitone distance
    fn sub(self, rhs: Pitch) -> i32 {
        self.absolute() - rhs.absolute()
    }
}

enum Notation {
    Midi(i32),
    Spelled(PitchClass, Option<i32>),
}

fn split_notation(s: &str) -> Result<Notation> {
    let trimmed = s.trim();
    let first = trimmed
        .chars()
        .next()
        .ok_or(MusicError::Empty { what: "pitch" })?;

    if first.is_ascii_digit() {
        return trimmed
            .parse()
            .map(Notation::Midi)
            .map_err(|_| MusicError::format("pitch", s, "invalid MIDI number"));
    }

    let name = NoteName::from_char(first)
        .ok_or_else(|| MusicError::format("pitch", s, "expected a letter A-G"))?;
    let rest = &trimmed[first.len_utf8()..];
    let split = rest
        .find(|c: char| !matches!(c, 'b' | 'B' | '#'))
        .unwrap_or(rest.len());
    let (symbols, digits) = rest.split_at(split);

    let accidental: Accidental = symbols
        .parse()
        .map_err(|_| MusicError::format("pitch", s, "invalid accidental"))?;

    let octave = if digits.is_empty() {
        None
    } else if digits.chars().all(|c| c.is_ascii_digit()) {
        Some(
            digits
                .parse()
                .map_err(|_| MusicError::format("pitch", s, "invalid octave"))?,
        )
    } else {
        return Err(MusicError::format("pitch", s, "unexpected characters after accidental"));
    };

    Ok(Notation::Spelled(PitchClass::new(name, accidental), octave))
}

impl FromStr for Pitch {
    type Err = MusicError;

    /// Letter, accidental and octave ("C##4", "Bb3"), or a MIDI number ("60")
    fn from_str(s: &str) -> Result<Self> {
        match split_notation(s)? {
            Notation::Midi(midi) => Self::from_midi(midi, SpellingPolicy::default()),
            Notation::Spelled(pitch_class, Some(octave)) => Self::new(pitch_class, octave),
            Notation::Spelled(_, None) => Err(MusicError::format("pitch", s, "missing octave")),
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}{}", self.pitch_class, self.octave))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(p("C4").midi(), 60);
        assert_eq!(p("A4").midi(), 69);
        assert_eq!(p("C0").midi(), 12);
        assert_eq!(p("G9").midi(), 127);
        assert_eq!(p("B#3").midi(), 60);
        assert_eq!(p("Cb4").midi(), 59);
    }

    #[test]
    fn test_frequency() {
        let rounded = |s: &str| (p(s).frequency() * 100.0).round() / 100.0;
        assert_eq!(rounded("A4"), 440.00);
        assert_eq!(rounded("C5"), 523.25);
        assert_eq!(rounded("F4"), 349.23);
        assert_eq!(rounded("A5"), 880.00);
    }

    #[test]
    fn test_range_boundaries() {
        assert!(Pitch::create(NoteName::B, Accidental::Sharp, 9).is_err());
        assert!(Pitch::create(NoteName::A, Accidental::Natural, 9).is_err());
        assert!(Pitch::create(NoteName::G, Accidental::Sharp, 9).is_err());
        assert!(Pitch::create(NoteName::C, Accidental::Flat, 0).unwrap_err().is_out_of_range());
        assert!(Pitch::create(NoteName::C, Accidental::DoubleFlat, 0).is_err());
        assert!(Pitch::create(NoteName::C, Accidental::Natural, 10).is_err());
        assert!(Pitch::create(NoteName::B, Accidental::Sharp, 8).is_ok());
        assert_eq!(Pitch::MIN.midi(), 12);
        assert_eq!(Pitch::MAX.midi(), 127);
    }

    #[test]
    fn test_from_midi() {
        assert!(Pitch::from_midi(11, SpellingPolicy::FavorSharps)
            .unwrap_err()
            .is_out_of_range());
        assert_eq!(
            Pitch::from_midi(12, SpellingPolicy::FavorSharps).unwrap().to_string(),
            "C0"
        );
        assert_eq!(
            Pitch::from_midi(61, SpellingPolicy::FavorFlats).unwrap().to_string(),
            "Db4"
        );
        assert!(Pitch::from_midi(128, SpellingPolicy::FavorSharps).is_err());
    }

    #[test]
    fn test_octave_monotonicity() {
        for midi in 12..=115 {
            let pitch = Pitch::from_midi(midi, SpellingPolicy::FavorFlats).unwrap();
            let up = pitch.transpose(12, SpellingPolicy::FavorFlats).unwrap();
            assert_eq!(up.midi(), pitch.midi() + 12);
        }
    }

    #[test]
    fn test_semitone_arithmetic() {
        assert_eq!(p("E4") - p("C4"), 4);
        assert_eq!(p("C4") - p("G4"), -7);
        assert_eq!(
            p("C4").transpose(1, SpellingPolicy::FavorFlats).unwrap().to_string(),
            "Db4"
        );
        assert_eq!(
            p("C4").transpose(-1, SpellingPolicy::FavorSharps).unwrap().to_string(),
            "B3"
        );
        assert!(Pitch::MAX.transpose(1, SpellingPolicy::FavorSharps).is_err());
    }

    #[test]
    fn test_transpose_extreme_offsets() {
        let sharps = SpellingPolicy::FavorSharps;
        assert!(p("C4").transpose(i32::MAX, sharps).unwrap_err().is_out_of_range());
        assert!(p("C4").transpose(i32::MIN, sharps).unwrap_err().is_out_of_range());
        assert!(Pitch::MAX.transpose(i32::MAX, sharps).unwrap_err().is_out_of_range());
        assert!(Pitch::MIN.transpose(i32::MIN, sharps).unwrap_err().is_out_of_range());
        assert_eq!(Pitch::MAX.transpose(-115, sharps).unwrap(), Pitch::MIN);
    }

    #[test]
    fn test_interval_arithmetic() {
        let c4 = p("C4");
        assert_eq!(c4.add_interval(Interval::MAJOR_THIRD).unwrap().to_string(), "E4");
        assert_eq!(c4.add_interval(Interval::PERFECT_OCTAVE).unwrap().to_string(), "C5");
        assert_eq!(p("D4").subtract_interval(Interval::MINOR_THIRD).unwrap().to_string(), "B3");
        assert_eq!(p("B3").add_interval(Interval::MINOR_SECOND).unwrap().to_string(), "C4");
        assert_eq!(p("E4").add_interval(Interval::MINOR_SECOND).unwrap().to_string(), "F4");
        assert_eq!(p("F4").add_interval(Interval::AUGMENTED_FOURTH).unwrap().to_string(), "B4");
    }

    #[test]
    fn test_enharmonic_intervals_spell_differently() {
        let c4 = p("C4");
        let e_sharp = c4.add_interval(Interval::AUGMENTED_THIRD).unwrap();
        let f_flat = c4.add_interval(Interval::DIMINISHED_FOURTH).unwrap();
        assert_eq!(e_sharp.to_string(), "E#4");
        assert_eq!(f_flat.to_string(), "Fb4");
        assert_eq!(e_sharp, f_flat);
        assert!(!e_sharp.same_spelling(f_flat));
    }

    #[test]
    fn test_interval_needs_triple_accidental() {
        let c_double_sharp = p("C##4");
        assert!(c_double_sharp.add_interval(Interval::AUGMENTED_THIRD).is_err());
        assert!(Pitch::MAX.add_interval(Interval::MAJOR_SECOND).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(p("c##4").to_string(), "C##4");
        assert_eq!(p("bb3").to_string(), "Bb3");
        assert_eq!(p("60").to_string(), "C4");
        assert_eq!(p(" F#2 ").to_string(), "F#2");
        assert!("C".parse::<Pitch>().unwrap_err().is_format());
        assert!("C#x4".parse::<Pitch>().is_err());
        assert!("C#b4".parse::<Pitch>().is_err());
        assert!("H4".parse::<Pitch>().is_err());
        assert!("11".parse::<Pitch>().unwrap_err().is_out_of_range());
        assert!("C10".parse::<Pitch>().is_err());
        assert_eq!("".parse::<Pitch>(), Err(MusicError::Empty { what: "pitch" }));
        assert_eq!(Pitch::try_parse("Z1"), None);
    }

    #[test]
    fn test_default_octave() {
        assert_eq!(Pitch::parse_with_default_octave("Eb", 4).unwrap().to_string(), "Eb4");
        assert_eq!(Pitch::parse_with_default_octave("Eb2", 4).unwrap().to_string(), "Eb2");
    }

    #[test]
    fn test_round_trip() {
        for octave in Pitch::MIN_OCTAVE..=Pitch::MAX_OCTAVE {
            for name in NoteName::ALL {
                for accidental in Accidental::ALL {
                    if let Ok(pitch) = Pitch::create(name, accidental, octave) {
                        let parsed = p(&pitch.to_string());
                        assert!(parsed.same_spelling(pitch));
                    }
                }
            }
        }
    }

    #[test]
    fn test_ordering() {
        assert!(p("C4") < p("C#4"));
        assert!(p("B3") < p("C4"));
        assert_eq!(p("B#3"), p("C4"));
        assert_eq!(p("C#4").cmp(&p("Db4")), Ordering::Equal);
        assert!(Pitch::MIN < Pitch::MAX);
    }
}
