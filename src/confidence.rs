// src/confidence.rs

use crate::model::{BugRecord, CommitRecord};
use lazy_static::lazy_static;
use regex::Regex;

/// A shared substring longer than this counts as the title being quoted
pub const TITLE_MATCH_THRESHOLD: usize = 15;

lazy_static! {
    static ref FIX_KEYWORDS: Regex =
        Regex::new(r"(?i)defects?|patch|bugs?|fix(e[ds])?").expect("keyword pattern is valid");
}

/// Scores 0..=2: issue key present, fix keyword in the commit message.
pub fn syntactic_confidence(bug: &BugRecord, commit: &CommitRecord) -> u8 {
    let mut confidence = 0;
    if !bug.issue_key.is_empty() {
        confidence += 1;
    }
    if FIX_KEYWORDS.is_match(&commit.message) {
        confidence += 1;
    }
    confidence
}

/// Scores 0..=4: resolution is "fixed", assignee authored the commit,
/// the bug title is quoted in the message, an attachment was committed.
pub fn semantic_confidence(bug: &BugRecord, commit: &CommitRecord) -> u8 {
    let mut confidence = 0;
    if bug.resolution.to_lowercase() == "fixed" {
        confidence += 1;
    }
    if bug.assignee.to_lowercase() == commit.author.to_lowercase() {
        confidence += 1;
    }
    if longest_common_substring(&bug.title, &commit.message) > TITLE_MATCH_THRESHOLD {
        confidence += 1;
    }
    if attachment_committed(bug, commit) {
        confidence += 1;
    }
    confidence
}

/// Length in chars of the longest common substring, case-sensitive.
///
/// Classic dynamic programme keeping only two rows of the table.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            if a[i - 1] == b[j - 1] {
                curr[j] = prev[j - 1] + 1;
                best = best.max(curr[j]);
            } else {
                curr[j] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

fn attachment_committed(bug: &BugRecord, commit: &CommitRecord) -> bool {
    bug.attachments
        .iter()
        .any(|name| commit.files().iter().any(|file| &file.path == name))
}
