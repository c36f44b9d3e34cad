use std::{
    collections::HashMap,
    fmt::Display,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::DateTime;

use super::StdResult;

/// The full name of a repository, in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFullName(pub String);

impl RepositoryFullName {
    /// Creates a new `RepositoryFullName` instance.
    pub fn new(full_name: &str) -> Self {
        Self(full_name.to_string())
    }

    /// Splits the full name into its owner and repository parts.
    pub fn parts(&self) -> Option<(&str, &str)> {
        self.0.split_once('/')
    }

    /// The destination directory name, with path separators replaced by
    /// underscores.
    pub fn directory_name(&self) -> String {
        self.0.replace('/', "_")
    }
}

impl Deref for RepositoryFullName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RepositoryFullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A snapshot of a host's rate limit quota, recomputed on every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitState {
    /// The maximum number of requests permitted in the current window.
    pub limit: i64,

    /// The remaining number of requests in the current window.
    pub remaining: i64,

    /// The epoch at which the current window resets.
    pub reset_epoch: i64,

    /// The server clock epoch, parsed from the response date.
    pub server_epoch: i64,
}

impl RateLimitState {
    /// Parses the quota from response headers. The server date is used
    /// instead of the local clock to avoid clock skew; quota headers missing
    /// from the response default to zero.
    pub fn from_headers(headers: &HashMap<String, String>) -> StdResult<Self> {
        let read_number = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.parse::<i64>().ok())
                .unwrap_or(0)
        };
        let server_date = headers
            .get("date")
            .context("Response headers are missing a date")?;
        let server_epoch = DateTime::parse_from_rfc2822(server_date)
            .with_context(|| format!("Failed to parse server date: {server_date}"))?
            .timestamp();

        Ok(Self {
            limit: read_number("x-ratelimit-limit"),
            remaining: read_number("x-ratelimit-remaining"),
            reset_epoch: read_number("x-ratelimit-reset"),
            server_epoch,
        })
    }

    /// Seconds until the window resets, according to the server clock.
    pub fn reset_in_secs(&self) -> u64 {
        (self.reset_epoch - self.server_epoch).max(0) as u64
    }
}

/// A single clone unit of work.
#[derive(Debug)]
pub struct CloneTask {
    /// The full name of the repository to clone.
    pub(crate) full_name: RepositoryFullName,

    /// The destination path of the working copy.
    pub(crate) destination: PathBuf,

    /// The number of clone attempts made so far.
    pub(crate) attempts: u32,
}

impl CloneTask {
    /// Creates a new `CloneTask` rooted at the given base directory.
    pub fn new(full_name: RepositoryFullName, basedir: &Path) -> Self {
        let destination = basedir.join(full_name.directory_name());

        Self {
            full_name,
            destination,
            attempts: 0,
        }
    }

    /// Retrieves the full name of the repository.
    pub fn full_name(&self) -> &RepositoryFullName {
        &self.full_name
    }

    /// Retrieves the destination path.
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// The terminal state of a processed clone task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneStatus {
    /// The repository was cloned by one of the attempts.
    Cloned,

    /// The destination already existed and no attempt was made.
    AlreadyPresent,

    /// Every attempt failed and the repository was never cloned.
    RetriesExhausted,
}

/// The outcome of one processed clone task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOutcome {
    /// The full name of the processed repository.
    full_name: RepositoryFullName,

    /// The terminal state of the task.
    status: CloneStatus,
}

impl CloneOutcome {
    /// Creates a new `CloneOutcome` instance.
    pub fn new(full_name: RepositoryFullName, status: CloneStatus) -> Self {
        Self { full_name, status }
    }

    /// Retrieves the full name of the processed repository.
    pub fn full_name(&self) -> &RepositoryFullName {
        &self.full_name
    }

    /// Retrieves the terminal state of the task.
    pub fn status(&self) -> CloneStatus {
        self.status
    }
}
