use std::{path::Path, sync::Arc};

use log::{debug, info};

use crate::{
    ApiTransport, CloneOutcome, ClonerOrchestrator, FetchResult, Git2Cloner, GitProvider,
    PAGE_SIZE, Paginator, ProviderConfig, RateLimiter, RepositoryCloner, RepositoryFullName,
    ReqwestTransport, Sleeper, StdResult, TokioSleeper,
};

/// A provider client for GitHub, exposing repository search, issue retrieval
/// and bulk cloning over the REST API.
pub struct GithubProvider {
    /// The client configuration.
    config: ProviderConfig,

    /// The paginator driving search and issue traversals.
    paginator: Paginator,

    /// The orchestrator sequencing clone tasks.
    orchestrator: ClonerOrchestrator,
}

impl GithubProvider {
    /// Creates a new `GithubProvider` instance from the given configuration,
    /// wiring the default transport, sleeper and clone primitive.
    pub fn try_new(config: ProviderConfig) -> StdResult<Self> {
        debug!(
            "GithubProvider initializing...: base_url_api: {}",
            config.base_url_api()
        );
        let transport: Arc<dyn ApiTransport> =
            Arc::new(ReqwestTransport::try_new(config.api_token())?);
        let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
        let cloner: Arc<dyn RepositoryCloner> = Arc::new(Git2Cloner);

        Ok(Self::new_with_dependencies(config, transport, sleeper, cloner))
    }

    /// Creates a new `GithubProvider` instance with injected capabilities.
    pub fn new_with_dependencies(
        config: ProviderConfig,
        transport: Arc<dyn ApiTransport>,
        sleeper: Arc<dyn Sleeper>,
        cloner: Arc<dyn RepositoryCloner>,
    ) -> Self {
        let rate_limiter = RateLimiter::new(
            transport.clone(),
            sleeper.clone(),
            &format!("{}/rate_limit", config.base_url_api()),
            config.wait_api(),
        );
        let paginator = Paginator::new(transport, rate_limiter);
        let orchestrator = ClonerOrchestrator::new(
            cloner,
            sleeper,
            config.base_url_clone(),
            config.wait_clone(),
        );

        Self {
            config,
            paginator,
            orchestrator,
        }
    }
}

#[async_trait::async_trait]
impl GitProvider for GithubProvider {
    async fn search_repositories(&self, query: &str) -> StdResult<FetchResult> {
        info!("Searching GitHub repositories with query: {query}");
        let base_url_api = self.config.base_url_api();
        let pages = self
            .paginator
            .fetch_by_count(|page| {
                format!(
                    "{base_url_api}/search/repositories?q={query}&per_page={PAGE_SIZE}&page={page}"
                )
            })
            .await?;

        Ok(FetchResult::new(self.config.provider(), pages))
    }

    async fn get_issues(&self, owner: &str, repo: &str) -> StdResult<FetchResult> {
        info!("Retrieving issues of {owner}/{repo}");
        let first_page_url = format!(
            "{}/repos/{owner}/{repo}/issues?state=all&per_page={PAGE_SIZE}&page=1",
            self.config.base_url_api()
        );
        let pages = self.paginator.fetch_by_cursor(&first_page_url).await?;

        Ok(FetchResult::new(self.config.provider(), pages))
    }

    async fn clone_repositories(
        &self,
        basedir: &Path,
        repos: &[RepositoryFullName],
    ) -> StdResult<Vec<CloneOutcome>> {
        self.orchestrator.clone_repositories(basedir, repos).await
    }
}
