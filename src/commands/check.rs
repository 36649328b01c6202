use clap::Args;
use stagehand::config::AppConfig;
use stagehand::deploy;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct CheckArgs {
    /// Override the configured production build target
    #[arg(long)]
    pub command: Option<String>,
}

pub fn run(args: CheckArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<deploy::CheckOutput> {
    let config = AppConfig::from_env_with_command(crate::commands::command_override(args.command)?)?;

    let output = deploy::check(&config)?;

    Ok((output, 0))
}
