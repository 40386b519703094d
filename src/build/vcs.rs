//! Version control metadata for build reports.

use std::path::PathBuf;
use std::process::Command;

/// Placeholder for any value that could not be queried.
pub const UNKNOWN: &str = "unknown";

/// A source of version control answers.
pub trait VersionControl {
    /// Run one query (e.g. `["rev-parse", "--short", "HEAD"]`) and return
    /// its trimmed output, or `None` if it failed or printed nothing.
    fn query(&self, args: &[&str]) -> Option<String>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone, Default)]
pub struct Git {
    workdir: Option<PathBuf>,
}

impl Git {
    /// Query the repository at `workdir` instead of the current directory.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }
}

impl VersionControl for Git {
    fn query(&self, args: &[&str]) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Branch and commit the build was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    /// Current branch.
    pub branch: String,
    /// Short commit hash.
    pub commit: String,
    /// Date of the last commit, ISO format.
    pub commit_date: String,
}

impl GitInfo {
    /// Ask `vcs` for each field. Each one falls back to [`UNKNOWN`] on its own.
    pub fn collect<V: VersionControl + ?Sized>(vcs: &V) -> Self {
        let ask = |args: &[&str]| vcs.query(args).unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            branch: ask(&["rev-parse", "--abbrev-ref", "HEAD"]),
            commit: ask(&["rev-parse", "--short", "HEAD"]),
            commit_date: ask(&["log", "-1", "--format=%cd", "--date=iso"]),
        }
    }
}
