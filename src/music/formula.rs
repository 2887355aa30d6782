// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Interval formulas and pitch generation.
//!
//! A formula is an ordered list of intervals above a root, written as
//! `"R,M2,M3,4,5,M6,M7"`. Applying it to a root pitch yields a lazy sequence
//! that repeats the formula one octave higher on each cycle and ends at the
//! edge of the representable pitch range.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use tracing::{debug, trace};

use super::interval::{Interval, IntervalQuality};
use super::note_name::LETTER_COUNT;
use super::pitch::{Pitch, MIDI_OFFSET};
use super::pitch_class::{SpellingPolicy, SEMITONES_PER_OCTAVE};
use crate::error::{MusicError, Result};

/// An ordered, strictly increasing, non-empty list of intervals
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula {
    id: Option<String>,
    name: Option<String>,
    intervals: Vec<Interval>,
}

impl Formula {
    /// Start building a formula
    pub fn builder() -> FormulaBuilder {
        FormulaBuilder::new()
    }

    /// Create an anonymous formula from intervals
    pub fn new(intervals: Vec<Interval>) -> Result<Self> {
        FormulaBuilder::new().intervals(intervals).build()
    }

    /// Get the identifier, if this is a named formula
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Get the display name, if this is a named formula
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the intervals
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Get the number of intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always false; construction rejects empty formulas
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Semitones of each interval above the root
    pub fn semitones(&self) -> Vec<i32> {
        self.intervals.iter().map(|i| i.semitones()).collect()
    }

    /// Check whether the formula contains an interval
    pub fn contains(&self, interval: Interval) -> bool {
        self.intervals.contains(&interval)
    }

    /// Copy of this formula carrying an id and display name
    pub fn named(&self, id: &str, name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            intervals: self.intervals.clone(),
        }
    }

    /// Ascending pitches from `root` until the top of the range
    pub fn generate(&self, root: Pitch, policy: SpellingPolicy) -> FormulaIter {
        FormulaIter::new(self.intervals.clone(), root, policy, Direction::Ascending)
    }

    /// Descending pitches below `root` until the bottom of the range
    pub fn generate_descending(&self, root: Pitch, policy: SpellingPolicy) -> FormulaIter {
        FormulaIter::new(self.intervals.clone(), root, policy, Direction::Descending)
    }

    /// Notation token for one interval: "R", bare perfect numbers, else symbol + number
    fn token(interval: Interval) -> String {
        match interval.quality() {
            IntervalQuality::Perfect if interval.number() == 1 => "R".to_string(),
            IntervalQuality::Perfect => interval.number().to_string(),
            _ => interval.to_string(),
        }
    }
}

impl FromStr for Formula {
    type Err = MusicError;

    /// Comma-separated interval tokens, e.g. "R,M3,5"
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(MusicError::Empty { what: "formula" });
        }

        let intervals = s
            .split(',')
            .map(|token| {
                if token.trim().is_empty() {
                    Err(MusicError::format("formula", s, "empty interval token"))
                } else {
                    token.parse::<Interval>()
                }
            })
            .collect::<Result<Vec<_>>>()?;

        FormulaBuilder::new().intervals(intervals).build()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.intervals.iter().map(|i| Self::token(*i)).collect();
        f.pad(&tokens.join(","))
    }
}

/// Builds a [`Formula`], checking its invariants at `build()`
#[derive(Debug, Clone, Default)]
pub struct FormulaBuilder {
    id: Option<String>,
    name: Option<String>,
    intervals: Vec<Interval>,
}

impl FormulaBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set the display name
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Append one interval
    pub fn interval(mut self, interval: Interval) -> Self {
        self.intervals.push(interval);
        self
    }

    /// Append several intervals
    pub fn intervals(mut self, intervals: impl IntoIterator<Item = Interval>) -> Self {
        self.intervals.extend(intervals);
        self
    }

    /// Validate and produce the formula
    pub fn build(self) -> Result<Formula> {
        if self.intervals.is_empty() {
            return Err(MusicError::InvalidFormula("no intervals".to_string()));
        }

        if let Some(pair) = self.intervals.windows(2).find(|pair| pair[0] >= pair[1]) {
            let reason = if pair[0] == pair[1] {
                format!("duplicate interval {}", pair[1])
            } else {
                format!("interval {} follows {}", pair[1], pair[0])
            };
            return Err(MusicError::InvalidFormula(reason));
        }

        let formula = Formula {
            id: self.id,
            name: self.name,
            intervals: self.intervals,
        };
        debug!(formula = %formula, id = ?formula.id, "built formula");
        Ok(formula)
    }
}

/// Direction of generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Lazy pitch sequence produced by [`Formula::generate`]
#[derive(Debug, Clone)]
pub struct FormulaIter {
    intervals: Vec<Interval>,
    root: Pitch,
    policy: SpellingPolicy,
    direction: Direction,
    index: usize,
    cycle: i32,
    /// Octaves spanned by one pass over the intervals
    cycle_octaves: i32,
    done: bool,
}

impl FormulaIter {
    fn new(
        intervals: Vec<Interval>,
        root: Pitch,
        policy: SpellingPolicy,
        direction: Direction,
    ) -> Self {
        // Octave and compound intervals push the next repetition further out
        let widest = intervals.iter().map(|i| i.semitones()).max().unwrap_or(0);
        Self {
            done: intervals.is_empty(),
            intervals,
            root,
            policy,
            direction,
            index: 0,
            cycle: 0,
            cycle_octaves: widest / SEMITONES_PER_OCTAVE + 1,
        }
    }

    /// Get the generation direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Spell the candidate with the interval's letter, falling back to the
    /// policy when that would need more than a double accidental
    fn spell(&self, interval: Interval, absolute: i32) -> Result<Pitch> {
        let sign = match self.direction {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        };
        let letters = interval.number() as i32 - 1 + LETTER_COUNT * self.cycle_octaves * self.cycle;
        self.root
            .spell_at(self.root.diatonic_index() + sign * letters, absolute)
            .or_else(|_| Pitch::from_midi(absolute + MIDI_OFFSET, self.policy))
    }
}

impl Iterator for FormulaIter {
    type Item = Pitch;

    fn next(&mut self) -> Option<Pitch> {
        if self.done {
            return None;
        }

        let interval = self.intervals[self.index];
        let distance = interval.semitones() + SEMITONES_PER_OCTAVE * self.cycle_octaves * self.cycle;
        let absolute = match self.direction {
            Direction::Ascending => self.root.absolute() + distance,
            Direction::Descending => self.root.absolute() - distance,
        };

        if absolute > Pitch::MAX.absolute() || absolute < Pitch::MIN.absolute() {
            trace!(root = %self.root, cycle = self.cycle, "formula generation reached range limit");
            self.done = true;
            return None;
        }

        self.index += 1;
        if self.index == self.intervals.len() {
            self.index = 0;
            self.cycle += 1;
        }

        match self.spell(interval, absolute) {
            Ok(pitch) => Some(pitch),
            Err(_) => {
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for FormulaIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(s: &str) -> Formula {
        s.parse().unwrap()
    }

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    fn names(pitches: impl Iterator<Item = Pitch>) -> Vec<String> {
        pitches.map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_parse_formula() {
        let major = f("R,M2,M3,4,5,M6,M7");
        assert_eq!(major.len(), 7);
        assert_eq!(major.semitones(), vec![0, 2, 4, 5, 7, 9, 11]);
        assert!(major.contains(Interval::PERFECT_FIFTH));
        assert!(!major.contains(Interval::MINOR_THIRD));
        assert_eq!(major.id(), None);
    }

    #[test]
    fn test_display_round_trip() {
        for notation in ["R,M2,M3,4,5,M6,M7", "R,m3,d5,d7", "R,M3,5,m7,M9", "R,A4,8"] {
            assert_eq!(f(notation).to_string(), notation);
            assert_eq!(f(&f(notation).to_string()), f(notation));
        }
        assert_eq!(f("P1, m3 ,P5").to_string(), "R,m3,5");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Formula>(), Err(MusicError::Empty { what: "formula" }));
        assert!("R,,M3".parse::<Formula>().unwrap_err().is_format());
        assert!("R,X3".parse::<Formula>().unwrap_err().is_format());
        assert!(matches!(
            "R,P3".parse::<Formula>(),
            Err(MusicError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_builder_invariants() {
        let unordered = Formula::builder()
            .interval(Interval::PERFECT_UNISON)
            .interval(Interval::PERFECT_FIFTH)
            .interval(Interval::MAJOR_THIRD)
            .build();
        assert!(matches!(unordered, Err(MusicError::InvalidFormula(_))));

        let duplicate = Formula::new(vec![Interval::MAJOR_THIRD, Interval::MAJOR_THIRD]);
        assert!(matches!(duplicate, Err(MusicError::InvalidFormula(_))));

        assert!(matches!(
            Formula::builder().build(),
            Err(MusicError::InvalidFormula(_))
        ));

        // Parse-time ordering violations are formula errors, not format errors
        let err = "R,5,M3".parse::<Formula>().unwrap_err();
        assert!(!err.is_format());
    }

    #[test]
    fn test_named_equality() {
        let named = Formula::builder()
            .id("major")
            .name("Major")
            .intervals(f("R,M3,5").intervals().to_vec())
            .build()
            .unwrap();
        assert_eq!(named.id(), Some("major"));
        assert_eq!(named.name(), Some("Major"));
        assert_ne!(named, f("R,M3,5"));
        assert_eq!(named, f("R,M3,5").named("major", "Major"));
    }

    #[test]
    fn test_generate_from_c4() {
        let formula = f("R,M2,M3");
        let generated = names(formula.generate(p("C4"), SpellingPolicy::FavorSharps).take(6));
        assert_eq!(generated, vec!["C4", "D4", "E4", "C5", "D5", "E5"]);

        let all: Vec<Pitch> = formula.generate(p("C4"), SpellingPolicy::FavorSharps).collect();
        assert_eq!(all.len(), 18);
        assert_eq!(all.last().unwrap().to_string(), "E9");
    }

    #[test]
    fn test_generate_full_range() {
        let formula = f("R,M2,M3");
        let count = formula
            .generate(Pitch::MIN, SpellingPolicy::FavorSharps)
            .take_while(|p| *p <= Pitch::MAX)
            .count();
        assert_eq!(count, 30);
    }

    #[test]
    fn test_generate_is_strictly_increasing_and_restartable() {
        let formula = f("R,m3,5,m7");
        let first: Vec<Pitch> = formula.generate(p("A2"), SpellingPolicy::FavorFlats).collect();
        assert!(first.windows(2).all(|w| w[0] < w[1]));

        let second: Vec<Pitch> = formula.generate(p("A2"), SpellingPolicy::FavorFlats).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_spelling_follows_intervals() {
        let minor = f("R,M2,m3,4,5,m6,m7");
        let generated = names(minor.generate(p("C4"), SpellingPolicy::FavorSharps).take(8));
        assert_eq!(
            generated,
            vec!["C4", "D4", "Eb4", "F4", "G4", "Ab4", "Bb4", "C5"]
        );

        let augmented = f("R,M3,A5");
        let generated = names(augmented.generate(p("E4"), SpellingPolicy::FavorFlats).take(3));
        assert_eq!(generated, vec!["E4", "G#4", "B#4"]);
    }

    #[test]
    fn test_generate_falls_back_to_policy() {
        // A##'s augmented fifth would need E###
        let formula = f("R,A5");
        let generated = names(formula.generate(p("A##3"), SpellingPolicy::FavorSharps).take(2));
        assert_eq!(generated, vec!["A##3", "G4"]);
    }

    #[test]
    fn test_generate_descending() {
        let formula = f("R,M2,M3");
        let generated: Vec<Pitch> = formula
            .generate_descending(p("C4"), SpellingPolicy::FavorFlats)
            .collect();
        assert_eq!(
            names(generated.iter().copied().take(4)),
            vec!["C4", "Bb3", "Ab3", "C3"]
        );
        assert!(generated.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(generated.len(), 13);
        assert_eq!(generated.last().unwrap().to_string(), "C0");
    }

    #[test]
    fn test_generate_octave_and_compound_intervals() {
        let sharps = SpellingPolicy::FavorSharps;
        let flats = SpellingPolicy::FavorFlats;

        let power = f("R,5,8");
        let up: Vec<Pitch> = power.generate(Pitch::MIN, sharps).collect();
        assert!(up.windows(2).all(|w| w[0] < w[1]));
        let down: Vec<Pitch> = power.generate_descending(Pitch::MAX, sharps).collect();
        assert!(down.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(
            names(power.generate(p("C4"), sharps).take(6)),
            vec!["C4", "G4", "C5", "C6", "G6", "C7"]
        );
        assert_eq!(
            names(power.generate_descending(p("C6"), sharps).take(6)),
            vec!["C6", "F5", "C5", "C4", "F3", "C3"]
        );

        let ninth = f("R,M3,5,m7,M9");
        let up: Vec<Pitch> = ninth.generate(Pitch::MIN, flats).collect();
        assert!(up.windows(2).all(|w| w[0] < w[1]));
        let down: Vec<Pitch> = ninth.generate_descending(Pitch::MAX, flats).collect();
        assert!(down.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(
            names(ninth.generate(p("C4"), flats).take(7)),
            vec!["C4", "E4", "G4", "Bb4", "D5", "C6", "E6"]
        );
        assert_eq!(
            names(ninth.generate_descending(p("C6"), flats).take(7)),
            vec!["C6", "Ab5", "F5", "D5", "Bb4", "C4", "Ab3"]
        );
    }

    #[test]
    fn test_generate_at_top_of_range() {
        let formula = f("R,5");
        let generated = names(formula.generate(Pitch::MAX, SpellingPolicy::FavorSharps));
        assert_eq!(generated, vec!["G9"]);
    }
}
