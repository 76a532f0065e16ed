// src/miner.rs

use crate::dispatch;
use crate::error::SzzError;
use crate::model::CommitRecord;
use crate::vcs::Vcs;

/// Lists the history and fills in every commit's affected files in parallel.
pub fn mine_commits<V: Vcs + ?Sized>(vcs: &V, workers: usize) -> Result<Vec<CommitRecord>, SzzError> {
    let mut commits = vcs.list_commits()?;

    dispatch::dispatch(&mut commits, workers, "acquiring affected files", |commit| {
        match vcs.affected_files(&commit.hash) {
            Ok(files) => commit.set_files(files),
            Err(e) => tracing::warn!(commit = %commit.hash, "listing files failed: {}", e),
        }
    })?;

    Ok(commits)
}
