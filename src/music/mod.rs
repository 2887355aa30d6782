// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core for Bach.
//!
//! Spelled pitch classes, pitches and intervals under twelve-tone equal
//! temperament, plus interval formulas and the scales, chords and modes
//! built on them.

pub mod accidental;
pub mod chord;
pub mod collection;
pub mod formula;
pub mod interval;
pub mod note_name;
pub mod pitch;
pub mod pitch_class;
pub mod registry;
pub mod relative_formula;
pub mod scale;

pub use accidental::Accidental;
pub use chord::{Chord, ChordType};
pub use collection::{PitchClassCollection, PitchCollection, DEFAULT_OCTAVE};
pub use formula::{Direction, Formula, FormulaBuilder, FormulaIter};
pub use interval::{Interval, IntervalQuality};
pub use note_name::NoteName;
pub use pitch::{MidiNote, Pitch};
pub use pitch_class::{PitchClass, SpellingPolicy};
pub use registry::{CustomFormulaDefinition, FormulaKind, FormulaRegistry};
pub use relative_formula::{FormulaStep, RelativeFormula};
pub use scale::{Mode, ModeType, Scale, ScaleType};
