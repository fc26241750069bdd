use odp_config::OdpConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &OdpConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::run::handle(&args, config, flags).await,
        Commands::Collect(args) => commands::collect::handle(&args, config, flags).await,
        Commands::Summarize(args) => commands::summarize::handle(&args, config, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
