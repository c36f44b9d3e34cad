use std::sync::Arc;

use log::debug;

use crate::{GitProvider, GithubProvider, ProviderConfig, ProviderKind, StdResult};

/// This struct resolves a provider identifier to a concrete client
/// implementation, chosen from the statically enumerable set of supported
/// providers.
pub struct GitProviderFactory;

impl GitProviderFactory {
    /// Builds the client for the named provider, validating the token.
    pub fn try_build(provider: &str, api_token: &str) -> StdResult<Arc<dyn GitProvider>> {
        let config = ProviderConfig::try_new(provider, api_token)?;

        Self::try_build_with_config(config)
    }

    /// Builds the client for a prebuilt configuration.
    pub fn try_build_with_config(config: ProviderConfig) -> StdResult<Arc<dyn GitProvider>> {
        debug!("Building provider client: {}", config.provider());
        match config.provider() {
            ProviderKind::Github => Ok(Arc::new(GithubProvider::try_new(config)?)),
        }
    }
}
