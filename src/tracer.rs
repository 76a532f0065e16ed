// src/tracer.rs

use crate::config::Config;
use crate::diff;
use crate::dispatch;
use crate::error::SzzError;
use crate::model::{BlameLine, Link, Suspect, SuspectMap};
use crate::vcs::Vcs;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COMMENT_LINE: Regex = Regex::new(r"^\s*(//|/\*|\*)").expect("comment pattern is valid");
}

/// Knobs for tracing a fix back to its suspects.
#[derive(Debug, Clone)]
pub struct TraceSettings {
    /// Only paths containing this marker are traced
    pub source_extension: String,
    /// Suspects older than this many seconds before the fix are dropped
    pub max_fix_gap_secs: i64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Config::default().into()
    }
}

impl From<Config> for TraceSettings {
    fn from(config: Config) -> Self {
        Self {
            source_extension: config.source_extension,
            max_fix_gap_secs: config.max_fix_gap_secs,
        }
    }
}

/// Facts about the fix that every blamed line is checked against.
#[derive(Debug, Clone, Copy)]
pub struct FixContext {
    pub fix_time: i64,
    pub bug_created: i64,
    pub max_fix_gap_secs: i64,
}

/// Adds the blamed lines of `file` to `suspects` until the first line that
/// fails a check; everything after that line is ignored.
///
/// Checks, in order: already a suspect, newer than the bug report, too far
/// before the fix, a comment line, a blank line.
pub fn filter_blamed(lines: &[BlameLine], file: &str, ctx: FixContext, suspects: &mut SuspectMap) {
    for line in lines {
        if suspects.contains_key(&line.hash) {
            break;
        }
        if line.date > ctx.bug_created {
            break;
        }
        if ctx.fix_time - line.date > ctx.max_fix_gap_secs {
            break;
        }
        if COMMENT_LINE.is_match(&line.content) {
            break;
        }
        if line.content.trim().is_empty() {
            break;
        }
        suspects.insert(
            line.hash.clone(),
            Suspect {
                hash: line.hash.clone(),
                author: line.author.clone(),
                date: line.date,
                file: file.to_string(),
            },
        );
    }
}

/// Fills the link's suspect map. Runs at most once per link.
///
/// An empty diff or a file without removed lines ends tracing of the whole
/// link, not just that file.
pub fn trace_link<V: Vcs + ?Sized>(link: &mut Link, vcs: &V, settings: &TraceSettings) {
    if link.traced {
        return;
    }
    link.traced = true;

    let Link {
        bug,
        commit,
        suspects,
        ..
    } = link;
    let ctx = FixContext {
        fix_time: commit.timestamp,
        bug_created: bug.created,
        max_fix_gap_secs: settings.max_fix_gap_secs,
    };

    for file in commit.files() {
        if !file.path.contains(&settings.source_extension) {
            continue;
        }

        let diff_text = vcs.diff(&commit.hash, &file.path).unwrap_or_else(|e| {
            tracing::warn!(commit = %commit.hash, file = %file.path, "diff failed: {}", e);
            String::new()
        });
        if diff_text.is_empty() {
            break;
        }

        let removed = diff::removed_lines(&diff_text);
        if removed.is_empty() {
            break;
        }

        let blamed = vcs.blame(&commit.hash, &file.path, &removed).unwrap_or_else(|e| {
            tracing::warn!(commit = %commit.hash, file = %file.path, "blame failed: {}", e);
            Vec::new()
        });
        filter_blamed(&blamed, &file.path, ctx, suspects);
    }

    tracing::debug!(
        commit = %commit.hash,
        issue = %bug.issue_key,
        suspects = suspects.len(),
        "traced link"
    );
}

/// Traces every link in parallel, one worker per contiguous slice of links.
pub fn trace_suspects<V: Vcs + ?Sized>(
    links: &mut [Link],
    vcs: &V,
    settings: &TraceSettings,
    workers: usize,
) -> Result<(), SzzError> {
    tracing::info!(links = links.len(), "calculating bug introducing commits");
    dispatch::dispatch(links, workers, "tracing suspects", |link| {
        trace_link(link, vcs, settings)
    })
}
