use clap::Args;
use serde::Serialize;
use stagehand::config::AppConfig;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {}

/// Resolved configuration view. Secret values are never included here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    pub mode: String,
    pub project_root: String,
    pub api_project_root: String,
    pub config_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy_command: Option<String>,
}

pub fn run(_args: ConfigArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    let config = AppConfig::from_env()?;
    let env = config.to_env()?;

    Ok((
        ConfigOutput {
            mode: env.mode().as_str().to_string(),
            project_root: env.project_root().display().to_string(),
            api_project_root: env.api_project_root().display().to_string(),
            config_dir: env.api_config_dir().display().to_string(),
            deploy_command: config.deploy_command,
        },
        0,
    ))
}
