// src/vcs.rs

use crate::error::SzzError;
use crate::model::{AffectedFile, BlameLine, CommitRecord, FileStatus};
use git2::{BlameOptions, DiffFormat, DiffOptions, Oid, Repository, Sort};
use std::path::{Path, PathBuf};

/// Read-only access to one repository's history.
///
/// Shared by every worker of a dispatch, hence `Sync`.
pub trait Vcs: Sync {
    /// Newest first, root commit excluded. Affected files are left empty.
    fn list_commits(&self) -> Result<Vec<CommitRecord>, SzzError>;

    fn affected_files(&self, hash: &str) -> Result<Vec<AffectedFile>, SzzError>;

    fn root_commit(&self) -> Result<Option<String>, SzzError>;

    /// Zero-context unified diff of `path` between the commit's parent and
    /// the commit. Empty when nothing changed.
    fn diff(&self, hash: &str, path: &str) -> Result<String, SzzError>;

    fn parent(&self, hash: &str) -> Result<Option<String>, SzzError>;

    /// Blames `path` at the parent of `hash`, ignoring whitespace. Lines whose
    /// source commit cannot be resolved are left out.
    fn blame(&self, hash: &str, path: &str, lines: &[usize]) -> Result<Vec<BlameLine>, SzzError>;
}

/// A local git repository, opened afresh for every operation.
#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
}

impl GitRepository {
    /// Fails early if `path` is not a repository.
    pub fn open(path: &Path) -> Result<Self, SzzError> {
        Repository::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn repo(&self) -> Result<Repository, SzzError> {
        Ok(Repository::open(&self.path)?)
    }
}

impl Vcs for GitRepository {
    fn list_commits(&self) -> Result<Vec<CommitRecord>, SzzError> {
        let repo = self.repo()?;
        let root = self.root_commit()?;

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TIME)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let hash = oid.to_string();
            if root.as_deref() == Some(hash.as_str()) {
                continue;
            }
            let commit = repo.find_commit(oid)?;
            commits.push(CommitRecord::new(
                hash,
                commit.time().seconds(),
                commit.author().name().unwrap_or("Unknown"),
                commit.summary().unwrap_or(""),
            ));
        }
        tracing::info!(commits = commits.len(), "listed commits");
        Ok(commits)
    }

    fn affected_files(&self, hash: &str) -> Result<Vec<AffectedFile>, SzzError> {
        let repo = self.repo()?;
        let commit = repo.find_commit(Oid::from_str(hash)?)?;
        // merges and the root have no single parent to diff against
        if commit.parent_count() != 1 {
            return Ok(Vec::new());
        }
        let parent_tree = commit.parent(0)?.tree()?;
        let tree = commit.tree()?;

        let mut opts = DiffOptions::new();
        opts.ignore_submodules(true);
        let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut opts))?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            let status = match delta.status() {
                git2::Delta::Added => FileStatus::Added,
                git2::Delta::Deleted => FileStatus::Deleted,
                git2::Delta::Modified | git2::Delta::Typechange => FileStatus::Modified,
                _ => continue,
            };
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .and_then(|p| p.to_str());
            if let Some(path) = path {
                files.push(AffectedFile::new(status, path));
            }
        }
        Ok(files)
    }

    fn root_commit(&self) -> Result<Option<String>, SzzError> {
        let repo = self.repo()?;
        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        match revwalk.next() {
            Some(oid) => Ok(Some(oid?.to_string())),
            None => Ok(None),
        }
    }

    fn diff(&self, hash: &str, path: &str) -> Result<String, SzzError> {
        let repo = self.repo()?;
        let commit = repo.find_commit(Oid::from_str(hash)?)?;
        let parent_tree = commit.parent(0)?.tree()?;
        let tree = commit.tree()?;

        let mut opts = DiffOptions::new();
        opts.context_lines(0).pathspec(path).disable_pathspec_match(true);
        let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut opts))?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_, _, line| {
            let origin = line.origin();
            if matches!(origin, '+' | '-' | ' ') {
                text.push(origin);
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            if !text.ends_with('\n') {
                text.push('\n');
            }
            true
        })?;
        Ok(text)
    }

    fn parent(&self, hash: &str) -> Result<Option<String>, SzzError> {
        let repo = self.repo()?;
        let commit = repo.find_commit(Oid::from_str(hash)?)?;
        Ok(commit.parent_ids().next().map(|oid| oid.to_string()))
    }

    fn blame(&self, hash: &str, path: &str, lines: &[usize]) -> Result<Vec<BlameLine>, SzzError> {
        let Some(parent) = self.parent(hash)? else {
            return Ok(Vec::new());
        };
        let repo = self.repo()?;
        let parent_oid = Oid::from_str(&parent)?;

        let mut opts = BlameOptions::new();
        opts.newest_commit(parent_oid).ignore_whitespace(true);
        let blame = repo.blame_file(Path::new(path), Some(&mut opts))?;

        // blame gives attribution only; content comes from the blamed blob
        let blob = repo
            .find_commit(parent_oid)?
            .tree()?
            .get_path(Path::new(path))?
            .to_object(&repo)?
            .peel_to_blob()?;
        let content = String::from_utf8_lossy(blob.content());
        let file_lines: Vec<&str> = content.lines().collect();

        let mut blamed = Vec::with_capacity(lines.len());
        for &line in lines {
            let Some(hunk) = blame.get_line(line) else {
                continue;
            };
            let Ok(source) = repo.find_commit(hunk.final_commit_id()) else {
                continue;
            };
            blamed.push(BlameLine {
                hash: source.id().to_string(),
                date: source.time().seconds(),
                line,
                content: file_lines.get(line.wrapping_sub(1)).copied().unwrap_or("").to_string(),
                author: source.author().name().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(blamed)
    }
}
