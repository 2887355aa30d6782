// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale-degree formulas in the older `"1,2,3b,4,5,6b,7b"` notation.
//!
//! Each step is a degree of the major scale with an optional accidental.
//! Flats may lead (`b3`) or trail (`3b`); sharps only trail (`4#`). Steps
//! are separated by `,` or `-`.

use std::fmt;
use std::str::FromStr;

use super::accidental::Accidental;
use super::formula::{Formula, FormulaIter};
use super::interval::Interval;
use super::pitch::Pitch;
use super::pitch_class::SpellingPolicy;
use crate::error::{MusicError, Result};

/// One scale degree relative to the major scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormulaStep {
    degree: u8,
    accidental: Accidental,
}

impl FormulaStep {
    /// Create a step; degrees start at 1
    pub fn new(degree: u8, accidental: Accidental) -> Result<Self> {
        if degree == 0 {
            return Err(MusicError::out_of_range(
                "degree",
                0,
                1,
                Interval::MAX_NUMBER as i32,
            ));
        }
        Ok(Self { degree, accidental })
    }

    /// Get the scale degree
    pub fn degree(self) -> u8 {
        self.degree
    }

    /// Get the accidental
    pub fn accidental(self) -> Accidental {
        self.accidental
    }

    /// The interval this step names, measured against the major scale
    pub fn to_interval(self) -> Result<Interval> {
        let major = Interval::steps(self.degree, Interval::default_quality(self.degree))?;
        Interval::from_number_and_steps(self.degree as i32, major + self.accidental.offset())
    }
}

impl fmt::Display for FormulaStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.degree, self.accidental)
    }
}

/// A list of scale-degree steps
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeFormula {
    steps: Vec<FormulaStep>,
}

impl RelativeFormula {
    /// Get the steps
    pub fn steps(&self) -> &[FormulaStep] {
        &self.steps
    }

    /// Convert to an interval formula
    pub fn to_formula(&self) -> Result<Formula> {
        let intervals = self
            .steps
            .iter()
            .map(|step| step.to_interval())
            .collect::<Result<Vec<_>>>()?;
        Formula::new(intervals)
    }

    /// Ascending pitches from `root`, through the equivalent interval formula
    pub fn generate(&self, root: Pitch, policy: SpellingPolicy) -> Result<FormulaIter> {
        Ok(self.to_formula()?.generate(root, policy))
    }
}

/// Scanner state within one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Nothing read yet
    Start,
    /// Leading flats read
    Flat,
    /// Reading degree digits
    Degree,
    /// Trailing sharps read
    Sharp,
    /// Trailing flats read
    TrailingFlat,
    /// Whitespace after a complete step
    Closed,
}

/// Accumulates one step while scanning
struct StepScanner<'a> {
    input: &'a str,
    state: ScanState,
    degree: u32,
    offset: i32,
    steps: Vec<FormulaStep>,
}

impl<'a> StepScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            state: ScanState::Start,
            degree: 0,
            offset: 0,
            steps: Vec::new(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> MusicError {
        MusicError::format("relative formula", self.input, reason)
    }

    fn shift(&mut self, step: i32) -> Result<()> {
        self.offset += step;
        if self.offset.abs() > Accidental::MAX.offset() {
            return Err(self.error("more than two accidentals"));
        }
        Ok(())
    }

    fn feed(&mut self, c: char) -> Result<()> {
        use ScanState::*;

        self.state = match (self.state, c) {
            (Start, c) if c.is_whitespace() => Start,
            (Degree | Sharp | TrailingFlat | Closed, c) if c.is_whitespace() => Closed,
            (_, ',' | '-') => {
                self.emit()?;
                Start
            }
            (Start | Flat, 'b' | 'B') => {
                self.shift(-1)?;
                Flat
            }
            (Start | Flat | Degree, d) if d.is_ascii_digit() => {
                self.degree = self.degree * 10 + d.to_digit(10).unwrap_or(0);
                if self.degree > Interval::MAX_NUMBER as u32 {
                    return Err(self.error("degree too large"));
                }
                Degree
            }
            (Degree | Sharp, '#') if self.offset >= 0 => {
                self.shift(1)?;
                Sharp
            }
            (Degree | TrailingFlat, 'b' | 'B') if self.state == TrailingFlat || self.offset == 0 => {
                self.shift(-1)?;
                TrailingFlat
            }
            (Sharp | TrailingFlat | Closed, d) if d.is_ascii_digit() => {
                return Err(self.error("digits after accidental"));
            }
            (Start, '#') => return Err(self.error("sharps must follow the degree")),
            (_, '#' | 'b' | 'B') => return Err(self.error("accidental already set")),
            (_, c) => return Err(self.error(format!("unexpected character '{}'", c))),
        };
        Ok(())
    }

    fn emit(&mut self) -> Result<()> {
        match self.state {
            ScanState::Degree | ScanState::Sharp | ScanState::TrailingFlat | ScanState::Closed => {
                let accidental = Accidental::from_offset(self.offset)?;
                let step = FormulaStep::new(self.degree as u8, accidental)
                    .map_err(|_| self.error("degree must be at least 1"))?;
                self.steps.push(step);
                self.degree = 0;
                self.offset = 0;
                Ok(())
            }
            _ => Err(self.error("missing degree")),
        }
    }

    fn finish(mut self) -> Result<Vec<FormulaStep>> {
        self.emit()?;
        Ok(self.steps)
    }
}

impl FromStr for RelativeFormula {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(MusicError::Empty {
                what: "relative formula",
            });
        }

        let mut scanner = StepScanner::new(s);
        for c in s.chars() {
            scanner.feed(c)?;
        }
        Ok(Self {
            steps: scanner.finish()?,
        })
    }
}

impl fmt::Display for RelativeFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.steps.iter().map(|s| s.to_string()).collect();
        f.pad(&tokens.join(","))
    }
}
