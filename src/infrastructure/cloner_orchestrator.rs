use std::{path::Path, sync::Arc, time::Duration};

use log::{error, info};

use crate::{
    CloneOutcome, CloneStatus, CloneTask, RepositoryCloner, RepositoryFullName, Sleeper, StdResult,
};

/// The maximum number of clone attempts for a repository.
pub const MAX_CLONE_ATTEMPTS: u32 = 5;

/// This struct sequences clone attempts over a list of repositories with
/// skip-if-present and bounded-retry semantics.
pub struct ClonerOrchestrator {
    /// The clone primitive.
    cloner: Arc<dyn RepositoryCloner>,

    /// The sleeper performing retry and inter-task pauses.
    sleeper: Arc<dyn Sleeper>,

    /// The base URL remote repositories are cloned from.
    base_url_clone: String,

    /// The fixed pause between attempts and between tasks.
    wait_clone: Duration,
}

impl ClonerOrchestrator {
    /// Creates a new `ClonerOrchestrator` instance.
    pub fn new(
        cloner: Arc<dyn RepositoryCloner>,
        sleeper: Arc<dyn Sleeper>,
        base_url_clone: &str,
        wait_clone: Duration,
    ) -> Self {
        Self {
            cloner,
            sleeper,
            base_url_clone: base_url_clone.to_string(),
            wait_clone,
        }
    }

    /// Clones the given repositories under the base directory, strictly in
    /// input order.
    ///
    /// A repository whose destination already exists is skipped without any
    /// attempt. Individual clone failures are retried up to 5 times with a
    /// pause after each failure and never surfaced as errors: the outcome
    /// records whether the retries were exhausted. An unconditional pause
    /// separates consecutive clone tasks to avoid host-side abuse detection.
    pub async fn clone_repositories(
        &self,
        basedir: &Path,
        repos: &[RepositoryFullName],
    ) -> StdResult<Vec<CloneOutcome>> {
        let mut outcomes = Vec::with_capacity(repos.len());
        let total_repos = repos.len();

        for (index, full_name) in repos.iter().enumerate() {
            let mut task = CloneTask::new(full_name.clone(), basedir);
            if task.destination().exists() {
                info!("({}/{total_repos}) Repo already exists: {full_name}", index + 1);
                outcomes.push(CloneOutcome::new(full_name.clone(), CloneStatus::AlreadyPresent));
                continue;
            }

            info!("({}/{total_repos}) Cloning repo: {full_name}", index + 1);
            let remote_url = format!("{}/{full_name}.git", self.base_url_clone);
            let mut status = CloneStatus::RetriesExhausted;
            while task.attempts < MAX_CLONE_ATTEMPTS {
                task.attempts += 1;
                match self
                    .cloner
                    .clone_repository(&remote_url, task.destination())
                    .await
                {
                    Ok(()) => {
                        status = CloneStatus::Cloned;
                        break;
                    }
                    Err(e) => {
                        error!("Failed to clone repo - {full_name} : {e}");
                        info!(
                            "Retrying after {:?}... ({}/{MAX_CLONE_ATTEMPTS})",
                            self.wait_clone, task.attempts
                        );
                        self.sleeper.sleep(self.wait_clone).await;
                    }
                }
            }

            self.sleeper.sleep(self.wait_clone).await;

            outcomes.push(CloneOutcome::new(full_name.clone(), status));
        }

        Ok(outcomes)
    }
}
