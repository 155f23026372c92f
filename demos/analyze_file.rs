//! Example: Analyze a single feature file
//!
//! Usage:
//!   cargo run --example analyze_file -- <features.json> [--config config.json]
//!
//! Prints the key and chord timeline, or the full result as JSON with `--json`.

use chordline::{analyze_file, AnalysisConfig, JsonFeatureReader};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut json = false;
    let mut config_path: Option<PathBuf> = None;
    let mut input: Option<PathBuf> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--config" => {
                let v = args.first().ok_or("--config requires a path")?.clone();
                args.remove(0);
                config_path = Some(PathBuf::from(v));
            }
            _ => input = Some(PathBuf::from(a)),
        }
    }

    let input = input.ok_or("Usage: analyze_file <features.json> [--config config.json] [--json]")?;

    // Configure analysis
    let config: AnalysisConfig = match config_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => AnalysisConfig::default(),
    };

    // Analyze
    let result = analyze_file(&JsonFeatureReader, &input, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Analysis Results:");
    println!("  Tempo: {:.2} BPM", result.tempo);
    println!("  Key: {} {}", result.key, result.scale.as_str());
    println!("  Chords:");
    for c in &result.chords {
        println!(
            "    {:8.2} - {:8.2}  {:<8} (confidence: {:.2})",
            c.start, c.end, c.chord, c.confidence
        );
    }

    Ok(())
}
