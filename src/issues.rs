// src/issues.rs

use crate::error::SzzError;
use crate::model::BugRecord;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

pub const ISSUES_HEADER: &str =
    "IssueKey;Title;Resolution;Status;Assignee;CreatedDate;ResolvedDate;Attachments;";

/// Bugs keyed by lower-cased issue key
pub type BugMap = HashMap<String, BugRecord>;

pub fn load_issues(path: &Path) -> Result<BugMap, SzzError> {
    let file = std::fs::File::open(path)?;
    read_issues(std::io::BufReader::new(file))
}

/// Reads a `;` separated issue export. The first line is the header.
pub fn read_issues<R: BufRead>(reader: R) -> Result<BugMap, SzzError> {
    let mut bugs = BugMap::new();
    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let bug = parse_issue(&line, index + 1)?;
        bugs.insert(bug.issue_key.clone(), bug);
    }
    tracing::info!(issues = bugs.len(), "loaded issues");
    Ok(bugs)
}

fn parse_issue(line: &str, line_no: usize) -> Result<BugRecord, SzzError> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < 8 {
        return Err(SzzError::parse(
            line_no,
            format!("expected 8 fields, found {}", fields.len()),
        ));
    }
    let timestamp = |field: &str, name: &str| -> Result<i64, SzzError> {
        field
            .trim()
            .parse()
            .map_err(|_| SzzError::parse(line_no, format!("bad {name} timestamp {field:?}")))
    };

    Ok(BugRecord {
        issue_key: fields[0].trim().to_lowercase(),
        title: fields[1].to_string(),
        resolution: fields[2].to_string(),
        status: fields[3].to_string(),
        assignee: fields[4].to_string(),
        created: timestamp(fields[5], "created")?,
        resolved: timestamp(fields[6], "resolved")?,
        attachments: parse_attachments(fields[7]),
    })
}

/// `[a.java, b.txt]` to its names; `[]` or blank to none.
fn parse_attachments(field: &str) -> Vec<String> {
    field
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(", ")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
