use std::path::Path;

use odp_config::OdpConfig;
use odp_eval::summarize_runs;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SummarizeArgs;
use crate::output::output;

/// Handle `t2o summarize`.
pub fn handle(args: &SummarizeArgs, config: &OdpConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = args
        .results_root
        .as_deref()
        .unwrap_or(&config.run.output_dir);

    let summary = summarize_runs(Path::new(root))?;
    if summary.is_empty() {
        tracing::warn!(root, "no run_*/evaluation.csv with rows found");
    }
    output(&summary, flags.format)
}
