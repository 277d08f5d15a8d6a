// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use serde::Serialize;
use session_alloc_model::prelude::{GridView, Roster, RosterBuilder, RosterLoader};
use session_alloc_solver::prelude::{ScorePreset, Solver};
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const DEFAULT_ITERATIONS: usize = 2000;
const DEFAULT_RESTARTS: usize = 20;

const USAGE: &str = "Usage: session-alloc-cli [ROSTER.json] \
[--iterations N] [--restarts N] [--seed N] [--preset rich|simple]";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    roster_path: Option<PathBuf>,
    iterations: usize,
    restarts: usize,
    seed: Option<u64>,
    preset: ScorePreset,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            roster_path: None,
            iterations: DEFAULT_ITERATIONS,
            restarts: DEFAULT_RESTARTS,
            seed: None,
            preset: ScorePreset::default(),
        }
    }
}

fn next_value<T>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = args
        .next()
        .ok_or_else(|| format!("Missing value for {}", flag))?;
    raw.parse()
        .map_err(|e| format!("Invalid value for {}: {}", flag, e))
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--iterations" => parsed.iterations = next_value(&mut args, "--iterations")?,
            "--restarts" => parsed.restarts = next_value(&mut args, "--restarts")?,
            "--seed" => parsed.seed = Some(next_value(&mut args, "--seed")?),
            "--preset" => parsed.preset = next_value(&mut args, "--preset")?,
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            other => parsed.roster_path = Some(PathBuf::from(other)),
        }
    }
    Ok(parsed)
}

/// Roster used when no file is given, a plausible mid-sized week.
fn sample_roster() -> Roster {
    let mut builder = RosterBuilder::default();
    for (name, sessions) in [
        ("Math", 3),
        ("Physics", 2),
        ("Chemistry", 2),
        ("Biology", 1),
        ("English", 2),
        ("History", 1),
    ] {
        let _ = builder
            .add_subject(name, sessions)
            .expect("sample subject should be accepted");
    }
    builder.build()
}

#[derive(Serialize)]
struct RunRecord {
    roster: String,
    subjects: usize,
    sessions: u32,
    iterations: usize,
    restarts: usize,
    preset: String,
    seed: Option<u64>,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    score: Option<f64>,
    restarts_completed: Option<usize>,
}

fn main() {
    enable_tracing();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return;
    }

    let args = match parse_args(raw.into_iter()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let (roster, roster_label) = match &args.roster_path {
        Some(path) => match RosterLoader::new().from_path(path) {
            Ok(roster) => (roster, path.display().to_string()),
            Err(e) => {
                tracing::error!("Failed to load roster from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => (sample_roster(), String::from("builtin sample")),
    };

    tracing::info!(
        "Scheduling {} subject(s) with {} session(s), {} iterations x {} restarts, preset {}",
        roster.len(),
        roster.total_sessions(),
        args.iterations,
        args.restarts,
        args.preset
    );

    let start_ts = Utc::now();
    let t0 = Instant::now();

    let mut builder = Solver::builder()
        .with_iterations(args.iterations)
        .with_restarts(args.restarts)
        .with_preset(args.preset);
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let outcome = builder.build().solve(&roster);

    let runtime = t0.elapsed();
    let end_ts = Utc::now();

    let (score, restarts_completed) = match &outcome {
        Ok(outcome) => {
            println!("{}", GridView::new(&outcome.schedule, &roster));
            println!("Score: {}", outcome.score);
            tracing::info!(
                "Finished {}: score={}, runtime={:?}",
                roster_label,
                outcome.score,
                runtime
            );
            (
                Some(outcome.score.value()),
                Some(outcome.restarts_completed),
            )
        }
        Err(e) => {
            tracing::error!("Failed {}: {} (runtime={:?})", roster_label, e, runtime);
            (None, None)
        }
    };

    let record = RunRecord {
        roster: roster_label,
        subjects: roster.len(),
        sessions: roster.total_sessions(),
        iterations: args.iterations,
        restarts: args.restarts,
        preset: args.preset.to_string(),
        seed: args.seed,
        start_ts,
        end_ts,
        runtime_ms: runtime.as_millis(),
        score,
        restarts_completed,
    };

    let out_path = PathBuf::from("run_results.json");
    match File::create(&out_path).and_then(|mut f| {
        let json = serde_json::to_string_pretty(&record).expect("serialize run record");
        f.write_all(json.as_bytes())
    }) {
        Ok(()) => {
            tracing::info!("Wrote run record to {}", out_path.display());
        }
        Err(e) => {
            tracing::error!("Failed to write run record to {}: {}", out_path.display(), e);
        }
    }

    if outcome.is_err() {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = parse_args(args(&[])).expect("empty args parse");
        assert_eq!(parsed, CliArgs::default());
        assert_eq!(parsed.iterations, 2000);
        assert_eq!(parsed.restarts, 20);
    }

    #[test]
    fn test_parse_full_invocation() {
        let parsed = parse_args(args(&[
            "roster.json",
            "--iterations",
            "500",
            "--restarts",
            "8",
            "--seed",
            "99",
            "--preset",
            "simple",
        ]))
        .expect("args parse");
        assert_eq!(parsed.roster_path, Some(PathBuf::from("roster.json")));
        assert_eq!(parsed.iterations, 500);
        assert_eq!(parsed.restarts, 8);
        assert_eq!(parsed.seed, Some(99));
        assert_eq!(parsed.preset, ScorePreset::Simple);
    }

    #[test]
    fn test_parse_rejects_unknown_option_and_bad_values() {
        assert!(parse_args(args(&["--turbo"])).is_err());
        assert!(parse_args(args(&["--iterations"])).is_err());
        assert!(parse_args(args(&["--iterations", "many"])).is_err());
        assert!(parse_args(args(&["--preset", "fancy"])).is_err());
    }
}
