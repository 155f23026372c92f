//! Example: Analyze multiple feature files in parallel
//!
//! Usage:
//!   cargo run --release --example analyze_batch -- [--jobs N] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each file analysis is single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use chordline::{analyze_batch, AnalysisConfig, FeatureExtractor, FeatureSet, JsonFeatureReader};
use std::env;
use std::path::Path;
use std::time::Instant;

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_batch [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one feature file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = AnalysisConfig::default();
    let t0 = Instant::now();

    // Unreadable files are reported and skipped
    let reader = JsonFeatureReader;
    let mut loaded: Vec<(&str, FeatureSet)> = Vec::with_capacity(paths.len());
    for path in &paths {
        match reader.extract(Path::new(path)) {
            Ok(features) => loaded.push((path.as_str(), features)),
            Err(e) => {
                if json {
                    println!(
                        "{}",
                        serde_json::json!({"file": path, "error": e.to_string()})
                    );
                } else {
                    println!("{}: ERROR: {}", path, e);
                }
            }
        }
    }

    let tracks: Vec<FeatureSet> = loaded.iter().map(|(_, f)| f.clone()).collect();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let results = pool.install(|| analyze_batch(&tracks, &config));

    let mut ok = 0usize;
    for (idx, ((path, _), result)) in loaded.iter().zip(&results).enumerate() {
        match result {
            Ok(res) => {
                ok += 1;
                if json {
                    println!("{}", serde_json::json!({"file": path, "result": res}));
                } else {
                    let progression: Vec<&str> =
                        res.chords.iter().map(|c| c.chord.as_str()).collect();
                    println!(
                        "[{}/{}] {}: Key={} {} Tempo={:.2} Chords={}",
                        idx + 1,
                        loaded.len(),
                        path,
                        res.key,
                        res.scale.as_str(),
                        res.tempo,
                        progression.join(" ")
                    );
                }
            }
            Err(e) => {
                if json {
                    println!(
                        "{}",
                        serde_json::json!({"file": path, "error": format!("analysis failed: {e}")})
                    );
                } else {
                    println!("[{}/{}] {}: ERROR: {}", idx + 1, loaded.len(), path, e);
                }
            }
        }
    }

    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        paths.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
