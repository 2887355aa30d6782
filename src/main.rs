// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Context, Result};
use bach::music::{
    Chord, Formula, FormulaKind, FormulaRegistry, Interval, Pitch, PitchClass, RelativeFormula,
    SpellingPolicy,
};
use bach::TheoryConfig;
use std::env;
use tracing::Level;

fn print_usage() {
    println!("Bach - Music theory calculator");
    println!();
    println!("Usage: bach [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --scale <ROOT> <NAME>            Spell a scale (e.g. --scale D dorian)");
    println!("  --chord <SYMBOL> [OCTAVE]        Spell and voice a chord (e.g. --chord F#m7)");
    println!("  --pitch <PITCH>                  Show MIDI number and frequency");
    println!("  --interval <LOWER> <UPPER>       Name the interval between two pitches");
    println!("  --generate <ROOT> <FORMULA> [N]  Generate N pitches from a formula");
    println!("  --list-scales                    List available scales");
    println!("  --list-chords                    List available chords");
    println!("  --help                           Show this help message");
    println!();
    println!("Options:");
    println!("  --config <PATH>                  Load a YAML or TOML theory config");
    println!("  --spelling <POLICY>              Black-key spelling: sharps or flats");
    println!("  --flats                          Same as --spelling flats");
    println!("  --verbose                        Log debug output to stderr");
}

/// Settings shared by every command
struct Session {
    config: TheoryConfig,
    registry: FormulaRegistry,
}

impl Session {
    fn policy(&self) -> SpellingPolicy {
        self.config.spelling
    }

    fn default_octave(&self) -> i32 {
        self.config.default_octave as i32
    }
}

fn show_scale(session: &Session, root: &str, name: &str) -> Result<()> {
    let root: PitchClass = root.parse().with_context(|| format!("Invalid root: {}", root))?;
    let scale = session
        .registry
        .get_scale(root, name)
        .ok_or_else(|| anyhow!("Unknown scale: {} (use --list-scales)", name))?;

    let notes: Vec<String> = scale
        .pitch_classes(session.policy())
        .iter()
        .map(|pc| pc.to_string())
        .collect();
    println!("{}: {}", scale, notes.join(" "));
    println!("Formula: {}", scale.formula());
    Ok(())
}

fn show_chord(session: &Session, symbol: &str, octave: Option<&String>) -> Result<()> {
    let octave = match octave {
        Some(o) => o.parse().map_err(|_| anyhow!("Invalid octave: {}", o))?,
        None => session.default_octave(),
    };

    // Custom chords from the config are looked up by id, built-ins by symbol
    let chord = match Chord::parse(symbol) {
        Ok(chord) => chord,
        Err(err) => {
            let (root, name) = symbol.split_once(' ').ok_or(err)?;
            let root: PitchClass = root.parse().with_context(|| format!("Invalid root: {}", root))?;
            session.registry
                .get_chord(root, name)
                .ok_or_else(|| anyhow!("Unknown chord: {}", symbol))?
        }
    };

    let tones: Vec<String> = chord
        .pitch_classes(session.policy())
        .iter()
        .map(|pc| pc.to_string())
        .collect();
    let voicing: Vec<String> = chord
        .pitches(octave, session.policy())?
        .iter()
        .map(|p| p.to_string())
        .collect();
    println!("{}: {}", chord, tones.join(" "));
    println!("Voicing: {}", voicing.join(" "));
    Ok(())
}

fn show_pitch(session: &Session, text: &str) -> Result<()> {
    let pitch = Pitch::parse_with_default_octave(text, session.default_octave())
        .with_context(|| format!("Invalid pitch: {}", text))?;
    println!("{}: MIDI {}, {:.2} Hz", pitch, pitch.midi(), pitch.frequency());
    Ok(())
}

fn show_interval(session: &Session, lower: &str, upper: &str) -> Result<()> {
    let lower = Pitch::parse_with_default_octave(lower, session.default_octave())?;
    let upper = Pitch::parse_with_default_octave(upper, session.default_octave())?;
    let interval = Interval::between(lower, upper)?;
    println!(
        "{} -> {}: {} ({}, {} semitones)",
        lower,
        upper,
        interval,
        interval.quality(),
        interval.semitones()
    );
    Ok(())
}

fn generate(session: &Session, root: &str, notation: &str, count: Option<&String>) -> Result<()> {
    let root = Pitch::parse_with_default_octave(root, session.default_octave())?;
    let count: usize = match count {
        Some(n) => n.parse().map_err(|_| anyhow!("Invalid count: {}", n))?,
        None => 16,
    };

    // Interval notation first, then the older degree notation
    let formula = match notation.parse::<Formula>() {
        Ok(formula) => formula,
        Err(err) => notation
            .parse::<RelativeFormula>()
            .and_then(|relative| relative.to_formula())
            .map_err(|_| err)
            .with_context(|| format!("Invalid formula: {}", notation))?,
    };

    let pitches: Vec<String> = formula
        .generate(root, session.policy())
        .take(count)
        .map(|p| p.to_string())
        .collect();
    println!("{}", pitches.join(" "));
    Ok(())
}

fn list(session: &Session, kind: FormulaKind) {
    for id in session.registry.available(kind) {
        if let Some(formula) = session.registry.get(kind, &id) {
            println!("{:<20} {:<24} {}", id, formula.name().unwrap_or(""), formula);
        }
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let verbose = take_flag(&mut args, "--verbose");
    let flats = take_flag(&mut args, "--flats");
    let config_path = take_option(&mut args, "--config")?;
    let spelling = take_option(&mut args, "--spelling")?
        .map(|value| {
            SpellingPolicy::from_str(&value)
                .ok_or_else(|| anyhow!("Unknown spelling policy: {} (use sharps or flats)", value))
        })
        .transpose()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let mut config = match config_path {
        Some(path) => TheoryConfig::load(&path)?,
        None => TheoryConfig::default(),
    };
    if let Some(policy) = spelling {
        config.spelling = policy;
    } else if flats {
        config.spelling = SpellingPolicy::FavorFlats;
    }
    let registry = config.registry()?;
    let session = Session { config, registry };

    if args.is_empty() {
        println!("Bach - Music theory calculator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match (args[0].as_str(), &args[1..]) {
        ("--scale", [root, name, ..]) => show_scale(&session, root, name)?,
        ("--chord", [symbol, rest @ ..]) => show_chord(&session, symbol, rest.first())?,
        ("--pitch", [pitch, ..]) => show_pitch(&session, pitch)?,
        ("--interval", [lower, upper, ..]) => show_interval(&session, lower, upper)?,
        ("--generate", [root, formula, rest @ ..]) => generate(&session, root, formula, rest.first())?,
        ("--list-scales", _) => list(&session, FormulaKind::Scale),
        ("--list-chords", _) => list(&session, FormulaKind::Chord),
        ("--help" | "-h", _) => print_usage(),
        (command, _) => {
            eprintln!("Unknown option or missing arguments: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Remove `flag` from `args`, returning whether it was present
fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|arg| arg != flag);
    args.len() != before
}

/// Remove `option` and its value from `args`
fn take_option(args: &mut Vec<String>, option: &str) -> Result<Option<String>> {
    let Some(index) = args.iter().position(|arg| arg == option) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        return Err(anyhow!("{} requires a value", option));
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}
