// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic intervals.
//!
//! An interval is a number (letter distance, 1-based) and a quality. Only
//! the combinations listed in the step table exist; everything else is
//! rejected at construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::pitch::Pitch;
use crate::error::{MusicError, Result};

/// Interval qualities in rank order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntervalQuality {
    Diminished,
    Minor,
    Perfect,
    Major,
    Augmented,
}

impl IntervalQuality {
    pub const ALL: [IntervalQuality; 5] = [
        IntervalQuality::Diminished,
        IntervalQuality::Minor,
        IntervalQuality::Perfect,
        IntervalQuality::Major,
        IntervalQuality::Augmented,
    ];

    /// One-letter notation symbol
    pub fn symbol(self) -> char {
        match self {
            IntervalQuality::Diminished => 'd',
            IntervalQuality::Minor => 'm',
            IntervalQuality::Perfect => 'P',
            IntervalQuality::Major => 'M',
            IntervalQuality::Augmented => 'A',
        }
    }

    /// Parse a quality symbol; case matters for `m`/`M`
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'd' | '°' => Some(IntervalQuality::Diminished),
            'm' => Some(IntervalQuality::Minor),
            'P' | 'p' => Some(IntervalQuality::Perfect),
            'M' => Some(IntervalQuality::Major),
            'A' | 'a' | '+' => Some(IntervalQuality::Augmented),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntervalQuality::Diminished => "Diminished",
            IntervalQuality::Minor => "Minor",
            IntervalQuality::Perfect => "Perfect",
            IntervalQuality::Major => "Major",
            IntervalQuality::Augmented => "Augmented",
        };
        f.write_str(name)
    }
}

/// Semitones for (number, quality) over simple intervals 1..=8.
/// Columns follow `IntervalQuality` rank order; `None` marks an illegal pair.
const STEP_TABLE: [[Option<i32>; 5]; 8] = [
    [None, None, Some(0), None, Some(1)],                // unison
    [Some(0), Some(1), None, Some(2), Some(3)],          // second
    [Some(2), Some(3), None, Some(4), Some(5)],          // third
    [Some(4), None, Some(5), None, Some(6)],             // fourth
    [Some(6), None, Some(7), None, Some(8)],             // fifth
    [Some(7), Some(8), None, Some(9), Some(10)],         // sixth
    [Some(9), Some(10), None, Some(11), Some(12)],       // seventh
    [Some(11), None, Some(12), None, Some(13)],          // octave
];

/// A diatonic interval: letter distance plus quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    number: u8,
    quality: IntervalQuality,
}

impl Interval {
    /// Smallest interval number (unison)
    pub const MIN_NUMBER: u8 = 1;
    /// Largest simple interval number (octave)
    pub const MAX_SIMPLE_NUMBER: u8 = 8;
    /// Largest compound interval number (double octave)
    pub const MAX_NUMBER: u8 = 15;

    pub const PERFECT_UNISON: Interval = Interval::known(1, IntervalQuality::Perfect);
    pub const MINOR_SECOND: Interval = Interval::known(2, IntervalQuality::Minor);
    pub const MAJOR_SECOND: Interval = Interval::known(2, IntervalQuality::Major);
    pub const MINOR_THIRD: Interval = Interval::known(3, IntervalQuality::Minor);
    pub const MAJOR_THIRD: Interval = Interval::known(3, IntervalQuality::Major);
    pub const AUGMENTED_THIRD: Interval = Interval::known(3, IntervalQuality::Augmented);
    pub const DIMINISHED_FOURTH: Interval = Interval::known(4, IntervalQuality::Diminished);
    pub const PERFECT_FOURTH: Interval = Interval::known(4, IntervalQuality::Perfect);
    pub const AUGMENTED_FOURTH: Interval = Interval::known(4, IntervalQuality::Augmented);
    pub const DIMINISHED_FIFTH: Interval = Interval::known(5, IntervalQuality::Diminished);
    pub const PERFECT_FIFTH: Interval = Interval::known(5, IntervalQuality::Perfect);
    pub const MINOR_SIXTH: Interval = Interval::known(6, IntervalQuality::Minor);
    pub const MAJOR_SIXTH: Interval = Interval::known(6, IntervalQuality::Major);
    pub const MINOR_SEVENTH: Interval = Interval::known(7, IntervalQuality::Minor);
    pub const MAJOR_SEVENTH: Interval = Interval::known(7, IntervalQuality::Major);
    pub const PERFECT_OCTAVE: Interval = Interval::known(8, IntervalQuality::Perfect);

    const fn known(number: u8, quality: IntervalQuality) -> Self {
        Self { number, quality }
    }

    /// Create an interval, rejecting combinations missing from the table
    pub fn new(number: u8, quality: IntervalQuality) -> Result<Self> {
        Self::steps(number, quality)?;
        Ok(Self { number, quality })
    }

    /// Semitones for a number/quality pair
    pub fn steps(number: u8, quality: IntervalQuality) -> Result<i32> {
        if !(Self::MIN_NUMBER..=Self::MAX_NUMBER).contains(&number) {
            return Err(MusicError::out_of_range(
                "interval number",
                number as i32,
                Self::MIN_NUMBER as i32,
                Self::MAX_NUMBER as i32,
            ));
        }
        let (simple, octaves) = Self::reduce(number);
        STEP_TABLE[simple as usize - 1][quality as usize]
            .map(|steps| steps + 12 * octaves)
            .ok_or(MusicError::InvalidInterval { number, quality })
    }

    /// Check a number/quality pair against the table
    pub fn is_valid(number: i32, quality: IntervalQuality) -> bool {
        u8::try_from(number)
            .map(|n| Self::steps(n, quality).is_ok())
            .unwrap_or(false)
    }

    /// Find the quality that gives `number` exactly `steps` semitones
    pub fn from_number_and_steps(number: i32, steps: i32) -> Result<Self> {
        let number = u8::try_from(number)
            .ok()
            .filter(|n| (Self::MIN_NUMBER..=Self::MAX_NUMBER).contains(n))
            .ok_or_else(|| {
                MusicError::out_of_range(
                    "interval number",
                    number,
                    Self::MIN_NUMBER as i32,
                    Self::MAX_NUMBER as i32,
                )
            })?;

        let candidates: Vec<(IntervalQuality, i32)> = IntervalQuality::ALL
            .into_iter()
            .filter_map(|q| Self::steps(number, q).ok().map(|s| (q, s)))
            .collect();

        match candidates.iter().find(|(_, s)| *s == steps) {
            Some(&(quality, _)) => Ok(Self { number, quality }),
            None => {
                let min = candidates.iter().map(|(_, s)| *s).min().unwrap_or(0);
                let max = candidates.iter().map(|(_, s)| *s).max().unwrap_or(0);
                Err(MusicError::out_of_range("interval steps", steps, min, max))
            }
        }
    }

    /// The interval spelled from `lower` up to `upper`
    pub fn between(lower: Pitch, upper: Pitch) -> Result<Self> {
        let letters = upper.diatonic_index() - lower.diatonic_index();
        Self::from_number_and_steps(letters + 1, upper - lower)
    }

    /// The interval from `lower` up to `upper`, both measured from a common root
    pub fn difference(lower: Interval, upper: Interval) -> Result<Self> {
        Self::from_number_and_steps(
            upper.number as i32 - lower.number as i32 + 1,
            upper.semitones() - lower.semitones(),
        )
    }

    /// This interval raised by an octave
    pub fn plus_octave(self) -> Result<Self> {
        Self::from_number_and_steps(self.number as i32 + 7, self.semitones() + 12)
    }

    /// Get the interval number
    pub fn number(self) -> u8 {
        self.number
    }

    /// Get the quality
    pub fn quality(self) -> IntervalQuality {
        self.quality
    }

    /// Size in semitones
    pub fn semitones(self) -> i32 {
        let (simple, octaves) = Self::reduce(self.number);
        STEP_TABLE[simple as usize - 1][self.quality as usize].unwrap_or(0) + 12 * octaves
    }

    /// Check whether this spans more than an octave
    pub fn is_compound(self) -> bool {
        self.number > Self::MAX_SIMPLE_NUMBER
    }

    /// Check whether a number takes perfect quality (unison, 4th, 5th, octave)
    pub fn is_perfect_number(number: u8) -> bool {
        matches!(Self::reduce(number).0, 1 | 4 | 5 | 8)
    }

    /// Quality assumed when notation omits it
    pub fn default_quality(number: u8) -> IntervalQuality {
        if Self::is_perfect_number(number) {
            IntervalQuality::Perfect
        } else {
            IntervalQuality::Major
        }
    }

    /// Parse without an error, `None` for invalid input
    pub fn try_parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Split compound numbers 9..=15 onto 2..=8 plus one octave
    fn reduce(number: u8) -> (u8, i32) {
        if number > Self::MAX_SIMPLE_NUMBER {
            (number - 7, 1)
        } else {
            (number, 0)
        }
    }
}

impl FromStr for Interval {
    type Err = MusicError;

    /// Optional quality symbol then a number ("P5", "m3", "9"); "R" is the root
    fn from_str(s: &str) -> Result<Self> {
        let body = s.trim();
        if body.is_empty() {
            return Err(MusicError::Empty { what: "interval" });
        }
        if body == "R" || body == "r" {
            return Ok(Self::PERFECT_UNISON);
        }

        let mut chars = body.chars();
        let (quality, digits) = match chars.next() {
            Some(c) if c.is_ascii_digit() => (None, body),
            Some(c) => match IntervalQuality::from_symbol(c) {
                Some(quality) => (Some(quality), chars.as_str()),
                None => {
                    return Err(MusicError::format(
                        "interval",
                        s,
                        format!("unknown quality '{}'", c),
                    ))
                }
            },
            None => return Err(MusicError::Empty { what: "interval" }),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MusicError::format("interval", s, "expected an interval number"));
        }
        let number: u8 = digits
            .parse()
            .map_err(|_| MusicError::format("interval", s, "interval number too large"))?;
        if !(Self::MIN_NUMBER..=Self::MAX_NUMBER).contains(&number) {
            return Err(MusicError::format(
                "interval",
                s,
                format!("number must be {}..={}", Self::MIN_NUMBER, Self::MAX_NUMBER),
            ));
        }

        Self::new(number, quality.unwrap_or_else(|| Self::default_quality(number)))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}{}", self.quality.symbol(), self.number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IntervalQuality::*;

    #[test]
    fn test_step_table() {
        assert_eq!(Interval::steps(1, Perfect), Ok(0));
        assert_eq!(Interval::steps(1, Augmented), Ok(1));
        assert_eq!(Interval::steps(2, Diminished), Ok(0));
        assert_eq!(Interval::steps(3, Major), Ok(4));
        assert_eq!(Interval::steps(4, Augmented), Ok(6));
        assert_eq!(Interval::steps(5, Diminished), Ok(6));
        assert_eq!(Interval::steps(7, Minor), Ok(10));
        assert_eq!(Interval::steps(8, Perfect), Ok(12));
        assert_eq!(Interval::steps(9, Major), Ok(14));
        assert_eq!(Interval::steps(15, Perfect), Ok(24));
    }

    #[test]
    fn test_invalid_combinations() {
        assert_eq!(
            Interval::steps(2, Perfect),
            Err(MusicError::InvalidInterval {
                number: 2,
                quality: Perfect
            })
        );
        assert!(Interval::steps(1, Diminished).is_err());
        assert!(Interval::steps(1, Major).is_err());
        assert!(Interval::steps(5, Minor).is_err());
        assert!(Interval::steps(0, Perfect).unwrap_err().is_out_of_range());
        assert!(Interval::steps(16, Perfect).is_err());
    }

    #[test]
    fn test_validity_totality() {
        let invalid = [
            (1, Diminished),
            (1, Minor),
            (1, Major),
            (2, Perfect),
            (3, Perfect),
            (4, Minor),
            (4, Major),
            (5, Minor),
            (5, Major),
            (6, Perfect),
            (7, Perfect),
            (8, Minor),
            (8, Major),
        ];
        for number in 1..=8 {
            for quality in IntervalQuality::ALL {
                let expected = !invalid.contains(&(number, quality));
                assert_eq!(
                    Interval::is_valid(number, quality),
                    expected,
                    "{} {}",
                    quality,
                    number
                );
            }
        }
        assert!(!Interval::is_valid(0, Perfect));
        assert!(!Interval::is_valid(-3, Major));
        assert!(!Interval::is_valid(300, Major));
    }

    #[test]
    fn test_ordering() {
        let mut intervals = vec![
            Interval::PERFECT_FIFTH,
            Interval::MAJOR_THIRD,
            Interval::MINOR_THIRD,
            Interval::AUGMENTED_FOURTH,
            Interval::DIMINISHED_FIFTH,
            Interval::PERFECT_UNISON,
        ];
        intervals.sort();
        let names: Vec<String> = intervals.iter().map(|i| i.to_string()).collect();
        assert_eq!(names, vec!["P1", "m3", "M3", "A4", "d5", "P5"]);
        assert!(Interval::DIMINISHED_FOURTH < Interval::PERFECT_FOURTH);
    }

    #[test]
    fn test_parse() {
        assert_eq!("P5".parse(), Ok(Interval::PERFECT_FIFTH));
        assert_eq!("  m3".parse(), Ok(Interval::MINOR_THIRD));
        assert_eq!("M3".parse(), Ok(Interval::MAJOR_THIRD));
        assert_eq!("A4".parse(), Ok(Interval::AUGMENTED_FOURTH));
        assert_eq!("d5".parse(), Ok(Interval::DIMINISHED_FIFTH));
        assert_eq!("R".parse(), Ok(Interval::PERFECT_UNISON));
        assert_eq!("+5".parse::<Interval>().unwrap().quality(), Augmented);
    }

    #[test]
    fn test_parse_default_quality() {
        assert_eq!("4".parse(), Ok(Interval::PERFECT_FOURTH));
        assert_eq!("8".parse(), Ok(Interval::PERFECT_OCTAVE));
        assert_eq!("6".parse(), Ok(Interval::MAJOR_SIXTH));
        assert_eq!("11".parse::<Interval>().unwrap().quality(), Perfect);
        assert_eq!("9".parse::<Interval>().unwrap().semitones(), 14);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("X3".parse::<Interval>().unwrap_err().is_format());
        assert!("M".parse::<Interval>().unwrap_err().is_format());
        assert!("M3x".parse::<Interval>().is_err());
        assert!("P0".parse::<Interval>().is_err());
        assert!("P16".parse::<Interval>().is_err());
        assert!("P999".parse::<Interval>().is_err());
        assert_eq!(
            "P3".parse::<Interval>(),
            Err(MusicError::InvalidInterval {
                number: 3,
                quality: Perfect
            })
        );
        assert_eq!("".parse::<Interval>(), Err(MusicError::Empty { what: "interval" }));
        assert_eq!(Interval::try_parse("m5"), None);
    }

    #[test]
    fn test_round_trip() {
        for number in Interval::MIN_NUMBER..=Interval::MAX_NUMBER {
            for quality in IntervalQuality::ALL {
                if let Ok(interval) = Interval::new(number, quality) {
                    assert_eq!(interval.to_string().parse(), Ok(interval));
                }
            }
        }
    }

    #[test]
    fn test_from_number_and_steps() {
        assert_eq!(Interval::from_number_and_steps(3, 4), Ok(Interval::MAJOR_THIRD));
        assert_eq!(Interval::from_number_and_steps(3, 5), Ok(Interval::AUGMENTED_THIRD));
        assert_eq!(
            Interval::from_number_and_steps(4, 4),
            Ok(Interval::DIMINISHED_FOURTH)
        );
        assert!(Interval::from_number_and_steps(3, 7).unwrap_err().is_out_of_range());
        assert!(Interval::from_number_and_steps(0, 0).is_err());
    }

    #[test]
    fn test_between_pitches() {
        let c4: Pitch = "C4".parse().unwrap();
        let e4: Pitch = "E4".parse().unwrap();
        let f4: Pitch = "Fb4".parse().unwrap();
        let e5: Pitch = "E5".parse().unwrap();
        assert_eq!(Interval::between(c4, e4), Ok(Interval::MAJOR_THIRD));
        assert_eq!(Interval::between(c4, f4), Ok(Interval::DIMINISHED_FOURTH));
        assert_eq!(Interval::between(c4, e5).unwrap().to_string(), "M10");
        assert!(Interval::between(e4, c4).is_err());
    }

    #[test]
    fn test_difference_and_octave() {
        assert_eq!(
            Interval::difference(Interval::MAJOR_THIRD, Interval::PERFECT_FIFTH),
            Ok(Interval::MINOR_THIRD)
        );
        assert_eq!(
            Interval::difference(Interval::MAJOR_SECOND, Interval::PERFECT_OCTAVE),
            Ok(Interval::MINOR_SEVENTH)
        );
        assert_eq!(Interval::MAJOR_THIRD.plus_octave().unwrap().to_string(), "M10");
        assert!(Interval::PERFECT_OCTAVE.plus_octave().is_ok());
        assert!("M9".parse::<Interval>().unwrap().plus_octave().is_err());
    }
}
