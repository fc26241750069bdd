use anyhow::Context;
use odp_config::OdpConfig;
use odp_papers::{PaperCollector, SemanticScholarClient};
use odp_pipeline::RunStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CollectArgs;
use crate::output::output;

/// Handle `t2o collect`.
pub async fn handle(
    args: &CollectArgs,
    config: &OdpConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(config.search.default_limit);
    let dir = args.output_dir.as_deref().unwrap_or(&config.run.output_dir);

    let client = SemanticScholarClient::from_config(&config.search)
        .context("failed to set up the paper search client")?;
    let papers = client
        .search(&args.query, limit)
        .await
        .with_context(|| format!("paper search for '{}' failed", args.query))?;

    let store = RunStore::create(dir)?;
    let path = store.write_dataset(&papers)?;
    tracing::info!(collected = papers.len(), path = %path.display(), "dataset written");

    output(&papers, flags.format)
}
