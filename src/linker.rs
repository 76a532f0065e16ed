// src/linker.rs

use crate::model::{BugRecord, CommitRecord, Link};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// `multiplier` times the median affected-file count.
///
/// The median is the element at index `len / 2` of the sorted counts; no
/// averaging.
pub fn outlier_boundary(counts: &[usize], multiplier: usize) -> usize {
    if counts.is_empty() {
        return 0;
    }
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2] * multiplier
}

/// Finds `KEY-123` style references in commit messages.
pub struct IssueMatcher {
    pattern: Regex,
}

impl IssueMatcher {
    pub fn new(project_key: &str) -> Self {
        let pattern = format!(r"{}\s*-\s*[0-9]+", regex::escape(&project_key.to_lowercase()));
        Self {
            // escaped key plus fixed syntax always compiles
            pattern: Regex::new(&pattern).expect("issue pattern is valid"),
        }
    }

    /// First reference in `message`, lower-cased.
    pub fn find(&self, message: &str) -> Option<String> {
        let lowered = message.to_lowercase();
        self.pattern.find(&lowered).map(|m| m.as_str().to_string())
    }

    /// Records the reference on the commit and reports whether one was found.
    pub fn tag(&self, commit: &mut CommitRecord) -> bool {
        match self.find(&commit.message) {
            Some(issue_ref) => {
                commit.set_issue_ref(issue_ref);
                true
            }
            None => false,
        }
    }
}

/// Links commits to the bugs they reference and keeps the plausible pairs.
///
/// Tags every referencing commit with its issue key as a side effect.
pub fn select_fix_commits(
    bugs: &HashMap<String, BugRecord>,
    commits: &mut [CommitRecord],
    project_key: &str,
    outlier_multiplier: usize,
) -> Vec<Link> {
    tracing::info!("selecting bug fixing commits");

    // 1. Outlier boundary over every commit, fixing or not
    let counts: Vec<usize> = commits.iter().map(|c| c.files().len()).collect();
    let outlier = outlier_boundary(&counts, outlier_multiplier);
    tracing::debug!(outlier, "outlier boundary");

    // 2. Keep referencing commits of reasonable size
    let matcher = IssueMatcher::new(project_key);
    let referencing: Vec<bool> = commits.iter_mut().map(|c| matcher.tag(c)).collect();

    // 3. Pair with known bugs and apply the acceptance rule
    let links: Vec<Link> = commits
        .iter()
        .zip(referencing)
        .filter(|(commit, referencing)| *referencing && commit.files().len() <= outlier)
        .filter_map(|(commit, _)| {
            let bug = bugs.get(commit.issue_ref()?)?;
            Some(Link::new(bug.clone(), commit.clone()))
        })
        .filter(Link::is_accepted)
        .collect();

    let unique: HashSet<&str> = links.iter().map(|l| l.bug().issue_key.as_str()).collect();
    tracing::info!(links = links.len(), unique_bugs = unique.len(), "bug fixing commits selected");
    links
}
