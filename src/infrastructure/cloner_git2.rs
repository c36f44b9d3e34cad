use std::path::Path;

use anyhow::Context;

use crate::{RepositoryCloner, StdResult};

/// A clone primitive backed by libgit2, run on the blocking pool.
pub struct Git2Cloner;

#[async_trait::async_trait]
impl RepositoryCloner for Git2Cloner {
    async fn clone_repository(&self, remote_url: &str, destination: &Path) -> StdResult<()> {
        let remote_url = remote_url.to_string();
        let destination = destination.to_path_buf();

        tokio::task::spawn_blocking(move || -> StdResult<()> {
            git2::Repository::clone(&remote_url, &destination)
                .with_context(|| format!("Failed to clone repo: {remote_url}"))?;

            Ok(())
        })
        .await?
    }
}
