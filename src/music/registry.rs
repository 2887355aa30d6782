// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named formula registry.
//!
//! Holds the built-in scale and chord formulas plus any custom formulas
//! registered at runtime or loaded from a [`TheoryConfig`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chord::{Chord, ChordType};
use super::formula::Formula;
use super::pitch_class::PitchClass;
use super::scale::{Scale, ScaleType};
use crate::config::TheoryConfig;
use crate::error::{MusicError, Result};

/// Which table a formula lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaKind {
    Scale,
    Chord,
}

impl fmt::Display for FormulaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaKind::Scale => write!(f, "scale"),
            FormulaKind::Chord => write!(f, "chord"),
        }
    }
}

/// User-defined formula (e.g., from a config file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFormulaDefinition {
    /// Identifier used for lookup
    pub id: String,
    /// Display name
    pub name: String,
    /// Formula in interval notation ("R,m2,M3")
    pub formula: String,
}

impl CustomFormulaDefinition {
    /// Parse the notation into a named formula
    pub fn to_formula(&self) -> Result<Formula> {
        Formula::builder()
            .id(&self.id)
            .name(&self.name)
            .intervals(self.formula.parse::<Formula>()?.intervals().iter().copied())
            .build()
    }
}

/// Registry of named scale and chord formulas
#[derive(Debug, Clone, Default)]
pub struct FormulaRegistry {
    scales: HashMap<String, Formula>,
    chords: HashMap<String, Formula>,
}

impl FormulaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in scale and chord
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for scale_type in ScaleType::ALL {
            registry.register(FormulaKind::Scale, scale_type.formula()?)?;
        }
        for chord_type in ChordType::ALL {
            registry.register(FormulaKind::Chord, chord_type.formula()?)?;
        }
        Ok(registry)
    }

    /// Built-ins plus the custom scales and chords of a config
    pub fn from_config(config: &TheoryConfig) -> Result<Self> {
        let mut registry = Self::with_builtins()?;
        for def in &config.scales {
            registry.register_definition(FormulaKind::Scale, def)?;
        }
        for def in &config.chords {
            registry.register_definition(FormulaKind::Chord, def)?;
        }
        Ok(registry)
    }

    /// Register a formula under its id, replacing any previous entry
    pub fn register(&mut self, kind: FormulaKind, formula: Formula) -> Result<()> {
        let id = formula
            .id()
            .map(normalize)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| MusicError::InvalidFormula(format!("{} formula {} has no id", kind, formula)))?;

        // Names must stay unambiguous so lookups by name have one answer
        if let Some(name) = formula.name().map(normalize) {
            let clash = self.table(kind).iter().find(|(other_id, other)| {
                **other_id != id && other.name().map(normalize).as_deref() == Some(name.as_str())
            });
            if let Some((other_id, _)) = clash {
                return Err(MusicError::InvalidFormula(format!(
                    "{} name '{}' is already used by '{}'",
                    kind,
                    formula.name().unwrap_or_default(),
                    other_id
                )));
            }
        }

        let replaced = self.table_mut(kind).insert(id, formula.clone()).is_some();
        debug!(%kind, id = ?formula.id(), name = ?formula.name(), replaced, "registered formula");
        Ok(())
    }

    /// Register a custom definition
    pub fn register_definition(&mut self, kind: FormulaKind, def: &CustomFormulaDefinition) -> Result<()> {
        self.register(kind, def.to_formula()?)
    }

    /// Look up a formula by id or display name, ignoring case and separators
    pub fn get(&self, kind: FormulaKind, key: &str) -> Option<&Formula> {
        let table = self.table(kind);
        let key = normalize(key);

        table.get(&key).or_else(|| {
            table
                .values()
                .find(|formula| formula.name().map(normalize).as_deref() == Some(key.as_str()))
        })
    }

    /// Look up a scale formula; built-in aliases ("minor", "aeolian") also match
    pub fn scale(&self, key: &str) -> Option<&Formula> {
        self.get(FormulaKind::Scale, key).or_else(|| {
            ScaleType::from_str(key).and_then(|t| self.get(FormulaKind::Scale, t.id()))
        })
    }

    /// Look up a chord formula; chord symbols ("m7", "dim") also match
    pub fn chord(&self, key: &str) -> Option<&Formula> {
        self.get(FormulaKind::Chord, key).or_else(|| {
            ChordType::from_str(key).and_then(|t| self.get(FormulaKind::Chord, t.id()))
        })
    }

    /// Get a scale by name rooted on `root`
    pub fn get_scale(&self, root: PitchClass, key: &str) -> Option<Scale> {
        self.scale(key).map(|formula| Scale::new(root, formula.clone()))
    }

    /// Get a chord by name rooted on `root`
    pub fn get_chord(&self, root: PitchClass, key: &str) -> Option<Chord> {
        self.chord(key).map(|formula| Chord::new(root, formula.clone()))
    }

    /// Sorted ids of every registered formula of `kind`
    pub fn available(&self, kind: FormulaKind) -> Vec<String> {
        let mut ids: Vec<String> = self
            .table(kind)
            .values()
            .filter_map(|formula| formula.id().map(str::to_string))
            .collect();
        ids.sort();
        ids
    }

    /// Number of registered formulas of `kind`
    pub fn len(&self, kind: FormulaKind) -> usize {
        self.table(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty() && self.chords.is_empty()
    }

    fn table(&self, kind: FormulaKind) -> &HashMap<String, Formula> {
        match kind {
            FormulaKind::Scale => &self.scales,
            FormulaKind::Chord => &self.chords,
        }
    }

    fn table_mut(&mut self, kind: FormulaKind) -> &mut HashMap<String, Formula> {
        match kind {
            FormulaKind::Scale => &mut self.scales,
            FormulaKind::Chord => &mut self.chords,
        }
    }
}

/// Lowercase with spaces, dashes and underscores removed
fn normalize(key: &str) -> String {
    key.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
