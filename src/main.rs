// src/main.rs

use chrono::{TimeZone, Utc};
use clap::Parser;
use std::collections::HashSet;
use std::process::ExitCode;
use std::time::Instant;
use szz_miner::cli::Args;
use szz_miner::stats::WeekdayHistogram;
use szz_miner::tracer::{self, TraceSettings};
use szz_miner::{dispatch, export, issues, linker, miner, Config, GitRepository, SzzError};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn format_time(ts: i64) -> String {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map_or_else(|| ts.to_string(), |t| t.to_rfc2822())
}

fn run(args: &Args) -> Result<(), SzzError> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(extension) = &args.extension {
        config.source_extension = extension.clone();
    }
    let workers = dispatch::worker_count(args.workers.or(config.workers));
    tracing::info!(repo = %args.repo.display(), project = %args.project_key, workers, "running SZZ");

    // 1. Bugs and commits
    let bugs = issues::load_issues(&args.issues)?;
    let repo = GitRepository::open(&args.repo)?;
    let mut commits = miner::mine_commits(&repo, workers)?;
    println!("Found {} issues and {} commits.", bugs.len(), commits.len());
    if let (Some(newest), Some(oldest)) = (commits.first(), commits.last()) {
        println!(
            "Repository history spans from {} to {}.",
            format_time(oldest.timestamp),
            format_time(newest.timestamp)
        );
    }

    // 2. Bug fixing commits
    let mut links =
        linker::select_fix_commits(&bugs, &mut commits, &args.project_key, config.outlier_multiplier);
    println!("Total bug fixing commits: {}", links.len());

    // 3. Bug introducing commits
    let settings = TraceSettings::from(config);
    tracer::trace_suspects(&mut links, &repo, &settings, workers)?;
    let inducing: HashSet<(&str, i64)> = links
        .iter()
        .flat_map(|l| l.suspects().values())
        .map(|s| (s.hash.as_str(), s.date))
        .collect();
    println!("Total fix inducing commits: {}", inducing.len());

    let fixing_days = WeekdayHistogram::from_timestamps(links.iter().map(|l| l.commit().timestamp));
    tracing::debug!(total = fixing_days.total(), "fixing commits by weekday: {}", fixing_days);
    let inducing_days = WeekdayHistogram::from_timestamps(inducing.iter().map(|&(_, date)| date));
    tracing::debug!(total = inducing_days.total(), "inducing commits by weekday: {}", inducing_days);

    let (fixes, suspects) = export::export_all(&args.output, &args.project_key, &links)?;
    println!("Wrote {} and {}.", fixes.display(), suspects.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    let start_time = Instant::now();

    let result = run(&args);
    println!("Total time: {:.2?}", start_time.elapsed());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error running SZZ: {}", e);
            ExitCode::FAILURE
        }
    }
}
