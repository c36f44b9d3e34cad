use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use repo_harvester::{CloneStatus, GitProviderFactory, RepositoryFullName, StdResult};

/// Command line arguments for the repository harvester
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Git hosting provider to query
    #[arg(short, long, default_value = "github")]
    provider: String,

    /// API token used for authenticated requests
    #[arg(short, long, env = "GIT_PROVIDER_TOKEN", hide_env_values = true)]
    token: String,

    /// Search query used to select repositories
    #[arg(short, long)]
    query: String,

    /// Retrieve the issue history of every matched repository
    #[arg(short, long, default_value_t = false)]
    issues: bool,

    /// Clone matched repositories under this directory
    #[arg(short, long)]
    clone_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    info!("Starting repository harvest");
    let args = Args::parse();

    let provider = GitProviderFactory::try_build(&args.provider, &args.token)?;
    let search = provider.search_repositories(&args.query).await?;
    info!("Found {} repositories", search.total_count());
    let full_names = search
        .items()
        .iter()
        .filter_map(|item| item.get("full_name").and_then(|name| name.as_str()))
        .map(RepositoryFullName::new)
        .collect::<Vec<_>>();

    if args.issues {
        for full_name in &full_names {
            if let Some((owner, repo)) = full_name.parts() {
                let issues = provider.get_issues(owner, repo).await?;
                info!("{full_name}: {} issues", issues.total_count());
            }
        }
    }

    if let Some(basedir) = &args.clone_dir {
        let outcomes = provider.clone_repositories(basedir, &full_names).await?;
        for outcome in &outcomes {
            match outcome.status() {
                CloneStatus::RetriesExhausted => warn!("Never cloned: {}", outcome.full_name()),
                _ => info!("Processed: {}", outcome.full_name()),
            }
        }
    }
    info!("Harvest completed");

    Ok(())
}
