use std::path::Path;

use crate::{CloneOutcome, FetchResult, RepositoryFullName, StdResult};

/// A trait for querying and bulk-cloning repositories hosted by a Git
/// provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GitProvider: Sync + Send {
    /// Searches repositories matching the given query.
    async fn search_repositories(&self, query: &str) -> StdResult<FetchResult>;

    /// Retrieves the issues of a repository, across all states.
    async fn get_issues(&self, owner: &str, repo: &str) -> StdResult<FetchResult>;

    /// Clones the given repositories under the base directory, returning one
    /// outcome per repository in input order.
    async fn clone_repositories(
        &self,
        basedir: &Path,
        repos: &[RepositoryFullName],
    ) -> StdResult<Vec<CloneOutcome>>;
}
