// src/export.rs

use crate::error::SzzError;
use crate::model::Link;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const FIX_COMMITS_HEADER: &str =
    "CommitHash;CommitTime;CommitComment;IssueKey;IssueOpenDate;IssueResolvedDate;IssueTitle;";
pub const SUSPECTS_HEADER: &str = "BFCHash;BFCTime;File;BICHash;BICTime;IssueKey;";

fn strip_delimiter(text: &str) -> String {
    text.replace(';', "")
}

/// One row per accepted link.
pub fn write_fix_commits<W: Write>(mut out: W, links: &[Link]) -> Result<(), SzzError> {
    writeln!(out, "{FIX_COMMITS_HEADER}")?;
    for link in links {
        let (commit, bug) = (link.commit(), link.bug());
        writeln!(
            out,
            "{};{};{};{};{};{};{};",
            commit.hash,
            commit.timestamp,
            strip_delimiter(&commit.message),
            bug.issue_key,
            bug.created,
            bug.resolved,
            strip_delimiter(&bug.title),
        )?;
    }
    out.flush()?;
    Ok(())
}

/// One row per (link, suspect) pair.
pub fn write_suspects<W: Write>(mut out: W, links: &[Link]) -> Result<(), SzzError> {
    writeln!(out, "{SUSPECTS_HEADER}")?;
    for link in links {
        for suspect in link.suspects().values() {
            writeln!(
                out,
                "{};{};{};{};{};{};",
                link.commit().hash,
                link.commit().timestamp,
                suspect.file,
                suspect.hash,
                suspect.date,
                link.bug().issue_key,
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Writes `<KEY>-BugFixCommits.csv` and `<KEY>-BugIntroducingCommits.csv`
/// into `dir` and returns their paths.
pub fn export_all(dir: &Path, project_key: &str, links: &[Link]) -> Result<(PathBuf, PathBuf), SzzError> {
    std::fs::create_dir_all(dir)?;
    let key = project_key.to_uppercase();

    let fixes = dir.join(format!("{key}-BugFixCommits.csv"));
    write_fix_commits(BufWriter::new(File::create(&fixes)?), links)?;

    let suspects = dir.join(format!("{key}-BugIntroducingCommits.csv"));
    write_suspects(BufWriter::new(File::create(&suspects)?), links)?;

    tracing::info!(fixes = %fixes.display(), suspects = %suspects.display(), "exported results");
    Ok((fixes, suspects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BugRecord, CommitRecord, Suspect};

    fn link() -> Link {
        let bug = BugRecord {
            issue_key: "p-1".to_string(),
            title: "Crash; then hang".to_string(),
            resolution: "Fixed".to_string(),
            status: "Closed".to_string(),
            assignee: "alice".to_string(),
            created: 100,
            resolved: 200,
            attachments: Vec::new(),
        };
        let commit = CommitRecord::new("fffe", 150, "alice", "P-1; stop hang");
        let mut link = Link::new(bug, commit);
        for (hash, date) in [("bbb", 50), ("aaa", 40)] {
            link.suspects.insert(
                hash.to_string(),
                Suspect {
                    hash: hash.to_string(),
                    author: "bob".to_string(),
                    date,
                    file: "src/A.java".to_string(),
                },
            );
        }
        link
    }

    #[test]
    fn fix_commit_rows_strip_delimiters() {
        let mut out = Vec::new();
        write_fix_commits(&mut out, &[link()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], FIX_COMMITS_HEADER);
        assert_eq!(lines[1], "fffe;150;P-1 stop hang;p-1;100;200;Crash then hang;");
    }

    #[test]
    fn suspect_rows_are_sorted_by_hash() {
        let mut out = Vec::new();
        write_suspects(&mut out, &[link()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!(
                "{SUSPECTS_HEADER}\n\
                 fffe;150;src/A.java;aaa;40;p-1;\n\
                 fffe;150;src/A.java;bbb;50;p-1;\n"
            )
        );
    }

    #[test]
    fn export_all_names_files_by_project() {
        let dir = tempfile::tempdir().unwrap();
        let (fixes, suspects) = export_all(dir.path(), "p", &[link()]).unwrap();
        assert!(fixes.ends_with("P-BugFixCommits.csv"));
        assert!(suspects.ends_with("P-BugIntroducingCommits.csv"));
        assert_eq!(std::fs::read_to_string(suspects).unwrap().lines().count(), 3);
    }
}
