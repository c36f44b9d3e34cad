use std::path::Path;

use crate::StdResult;

/// A trait for the clone primitive driven by the cloner orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryCloner: Sync + Send {
    /// Clones the repository at the remote URL into the destination path.
    async fn clone_repository(&self, remote_url: &str, destination: &Path) -> StdResult<()>;
}
