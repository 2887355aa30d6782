// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Bach - music theory primitives.
//!
//! Accidentals, note names, pitch classes, pitches and intervals with
//! diatonic spelling preserved, and interval formulas that generate the
//! pitches of scales and chords.

pub mod config;
pub mod error;
pub mod music;

pub use config::TheoryConfig;
pub use error::{MusicError, Result};
