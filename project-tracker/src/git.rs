use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::{error::Error, types::GitCommit};

/// Field separator for `git log` output. Commit subjects cannot contain it.
const FIELD_SEPARATOR: char = '\u{1f}';

/// Read the commit log of the repository at `repo_path`, newest first.
pub async fn git_log(repo_path: &Path) -> Result<Vec<GitCommit>, Error> {
    let format = format!(
        "--pretty=format:%H{sep}%an{sep}%s{sep}%ci",
        sep = FIELD_SEPARATOR
    );

    let output = Command::new("git")
        .arg("log")
        .arg(&format)
        .current_dir(repo_path)
        .output()
        .await
        .map_err(|e| Error::Git(format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        return Err(Error::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let commits = parse_log(&String::from_utf8_lossy(&output.stdout));
    debug!("Read {} commits from {}", commits.len(), repo_path.display());
    Ok(commits)
}

/// Parse `git log` lines of four separator-delimited fields. Lines with any
/// other shape are skipped.
fn parse_log(stdout: &str) -> Vec<GitCommit> {
    stdout
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            match parts.as_slice() {
                [hash, author, message, timestamp] => Some(GitCommit {
                    commit_hash: hash.to_string(),
                    author: author.to_string(),
                    message: message.to_string(),
                    timestamp: timestamp.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}
