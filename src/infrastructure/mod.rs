mod cloner_git2;
mod cloner_orchestrator;
mod paginator;
mod provider_factory;
mod provider_github;
mod rate_limiter;
mod sleeper_tokio;
mod transport_reqwest;

pub use cloner_git2::*;
pub use cloner_orchestrator::*;
pub use paginator::*;
pub use provider_factory::*;
pub use provider_github::*;
pub use rate_limiter::*;
pub use sleeper_tokio::*;
pub use transport_reqwest::*;
