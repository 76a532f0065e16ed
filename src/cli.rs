// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the local git repository to mine
    #[arg(short, long)]
    pub repo: PathBuf,

    /// Semicolon separated issue export from the bug tracker
    #[arg(short, long)]
    pub issues: PathBuf,

    /// Issue key prefix used in commit messages, e.g. PROJ
    #[arg(short = 'k', long)]
    pub project_key: String,

    /// Directory to write the result files into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Optional TOML file with tracing thresholds
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of workers, capped by the available cores
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Only trace files whose path contains this marker
    #[arg(long)]
    pub extension: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_and_optional_flags() {
        let args = Args::try_parse_from([
            "szz-miner", "--repo", "r", "--issues", "i.csv", "-k", "PROJ", "-w", "2", "--extension",
            ".kt",
        ])
        .unwrap();
        assert_eq!(args.project_key, "PROJ");
        assert_eq!(args.workers, Some(2));
        assert_eq!(args.extension.as_deref(), Some(".kt"));
        assert_eq!(args.output, PathBuf::from("."));
        assert!(!args.verbose);
    }

    #[test]
    fn project_key_is_required() {
        assert!(Args::try_parse_from(["szz-miner", "--repo", "r", "--issues", "i"]).is_err());
    }
}
