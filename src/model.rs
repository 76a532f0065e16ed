// src/model.rs

use crate::confidence;
use std::collections::BTreeMap;

/// Commit hash as a hex string
pub type CommitHash = String;

/// Suspects of one link, keyed by the suspect commit's hash
pub type SuspectMap = BTreeMap<CommitHash, Suspect>;

/// A resolved, fixed defect from the bug tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugRecord {
    /// Lower-cased, project prefixed key, e.g. `proj-42`
    pub issue_key: String,
    pub title: String,
    pub resolution: String,
    pub status: String,
    pub assignee: String,
    pub created: i64,
    pub resolved: i64,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
}

/// A path touched by a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedFile {
    pub status: FileStatus,
    pub path: String,
}

impl AffectedFile {
    pub fn new(status: FileStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }
}

/// A commit from the mined history
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub hash: CommitHash,
    /// Seconds since the epoch
    pub timestamp: i64,
    pub author: String,
    /// Summary line of the commit message
    pub message: String,
    files: Vec<AffectedFile>,
    issue_ref: Option<String>,
}

impl CommitRecord {
    pub fn new(
        hash: impl Into<String>,
        timestamp: i64,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            timestamp,
            author: author.into(),
            message: message.into(),
            files: Vec::new(),
            issue_ref: None,
        }
    }

    pub fn with_files(mut self, files: Vec<AffectedFile>) -> Self {
        self.files = files;
        self
    }

    pub fn files(&self) -> &[AffectedFile] {
        &self.files
    }

    pub fn set_files(&mut self, files: Vec<AffectedFile>) {
        self.files = files;
    }

    pub fn issue_ref(&self) -> Option<&str> {
        self.issue_ref.as_deref()
    }

    /// Stores the first detected issue reference; later calls are ignored.
    pub fn set_issue_ref(&mut self, issue_ref: impl Into<String>) {
        if self.issue_ref.is_none() {
            self.issue_ref = Some(issue_ref.into());
        }
    }
}

/// One line of a blame result, as attributed to its source commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameLine {
    pub hash: CommitHash,
    /// Commit time of the source commit
    pub date: i64,
    /// 1-based line number in the blamed revision
    pub line: usize,
    pub content: String,
    pub author: String,
}

/// A commit suspected of introducing the bug a link fixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspect {
    pub hash: CommitHash,
    pub author: String,
    pub date: i64,
    pub file: String,
}

/// A scored pairing of a bug with the commit that references it
#[derive(Debug, Clone)]
pub struct Link {
    pub(crate) bug: BugRecord,
    pub(crate) commit: CommitRecord,
    syntactic: u8,
    semantic: u8,
    pub(crate) suspects: SuspectMap,
    pub(crate) traced: bool,
}

impl Link {
    pub fn new(bug: BugRecord, commit: CommitRecord) -> Self {
        let syntactic = confidence::syntactic_confidence(&bug, &commit);
        let semantic = confidence::semantic_confidence(&bug, &commit);
        Self {
            bug,
            commit,
            syntactic,
            semantic,
            suspects: SuspectMap::new(),
            traced: false,
        }
    }

    pub fn bug(&self) -> &BugRecord {
        &self.bug
    }

    pub fn commit(&self) -> &CommitRecord {
        &self.commit
    }

    pub fn syntactic_confidence(&self) -> u8 {
        self.syntactic
    }

    pub fn semantic_confidence(&self) -> u8 {
        self.semantic
    }

    /// sem > 1, or sem == 1 backed by some syntactic evidence
    pub fn is_accepted(&self) -> bool {
        self.semantic > 1 || (self.semantic == 1 && self.syntactic > 0)
    }

    pub fn suspects(&self) -> &SuspectMap {
        &self.suspects
    }

    pub fn is_traced(&self) -> bool {
        self.traced
    }
}
