use clap::Args;
use stagehand::config::AppConfig;
use stagehand::deploy;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct DeployArgs {
    /// Override the configured production build target
    #[arg(long)]
    pub command: Option<String>,
}

pub fn run(args: DeployArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<deploy::DeployOutput> {
    let config = AppConfig::from_env_with_command(crate::commands::command_override(args.command)?)?;

    let output = deploy::run(&config)?;
    let exit_code = output.exit_code;

    Ok((output, exit_code))
}
