// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for Bach.
//!
//! A theory configuration picks the spelling policy, the octave assumed for
//! pitches written without one, and any custom scale and chord formulas.
//! Files may be YAML or TOML; the format follows the file extension.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::music::{CustomFormulaDefinition, FormulaRegistry, Pitch, SpellingPolicy};

/// Root theory configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TheoryConfig {
    /// Spelling used when a pitch has no letter of its own
    #[serde(default)]
    pub spelling: SpellingPolicy,
    /// Octave for pitches written without one
    #[serde(default = "default_octave")]
    pub default_octave: i8,
    /// Custom scale formulas
    #[serde(default)]
    pub scales: Vec<CustomFormulaDefinition>,
    /// Custom chord formulas
    #[serde(default)]
    pub chords: Vec<CustomFormulaDefinition>,
}

fn default_octave() -> i8 {
    4
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            spelling: SpellingPolicy::default(),
            default_octave: default_octave(),
            scales: Vec::new(),
            chords: Vec::new(),
        }
    }
}

impl TheoryConfig {
    /// Load a configuration file; `.toml` is read as TOML, anything else as YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            _ => Self::from_yaml(&contents)?,
        };

        info!(
            path = %path.display(),
            spelling = ?config.spelling,
            scales = config.scales.len(),
            chords = config.chords.len(),
            "loaded theory config"
        );
        Ok(config)
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save configuration, choosing the format from the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml()?,
            _ => self.to_yaml()?,
        };
        fs::write(path, text).with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Check the octave range and that every custom formula parses
    pub fn validate(&self) -> Result<()> {
        let octave = self.default_octave as i32;
        if !(Pitch::MIN_OCTAVE..=Pitch::MAX_OCTAVE).contains(&octave) {
            bail!(
                "default_octave {} out of range {}..={}",
                octave,
                Pitch::MIN_OCTAVE,
                Pitch::MAX_OCTAVE
            );
        }

        for (kind, defs) in [("scale", &self.scales), ("chord", &self.chords)] {
            for def in defs {
                def.to_formula()
                    .with_context(|| format!("Invalid custom {} '{}'", kind, def.id))?;
            }
        }
        Ok(())
    }

    /// Registry of the built-in formulas plus this config's custom ones
    pub fn registry(&self) -> Result<FormulaRegistry> {
        FormulaRegistry::from_config(self).context("Failed to build formula registry")
    }
}
