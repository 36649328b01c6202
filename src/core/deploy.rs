//! The deployment pipeline: config → environment → secrets → command → run.
//!
//! Each stage produces a value consumed by the next; a failure at any stage
//! means the external build tool is never invoked.

use serde::Serialize;

use crate::command::{CommandSpec, BUILD_TOOL};
use crate::config::{AppConfig, SecretsConfig};
use crate::env::Env;
use crate::error::Result;
use crate::executor;
use crate::secrets::{DbSecrets, SecretResolver};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployOutput {
    pub mode: String,
    pub working_dir: String,
    pub command: Vec<String>,
    pub exit_code: i32,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    pub mode: String,
    pub config_dir: String,
    pub secret_files: Vec<String>,
    pub command: Vec<String>,
}

/// Run the full pipeline and invoke the build tool.
pub fn run(config: &AppConfig) -> Result<DeployOutput> {
    let (env, _, spec) = prepare(config)?;

    log_status!("deploy", "[3/3] Launching build via '{}'...", BUILD_TOOL);
    let exit_code = executor::run_build(&spec)?;

    if exit_code == 0 {
        log_status!("deploy", "Deployment initiated successfully");
    } else {
        log_status!("deploy", "Build command failed with exit code {}", exit_code);
    }

    Ok(DeployOutput {
        mode: env.mode().as_str().to_string(),
        working_dir: working_dir(&env),
        command: spec.into_args(),
        exit_code,
        success: exit_code == 0,
    })
}

/// Pre-flight only: verify configuration and secret files, assemble the
/// command, execute nothing.
pub fn check(config: &AppConfig) -> Result<CheckOutput> {
    let (env, secrets, spec) = prepare(config)?;

    log_status!("deploy", "Pre-flight passed; nothing was executed");

    Ok(CheckOutput {
        mode: env.mode().as_str().to_string(),
        config_dir: env.api_config_dir().display().to_string(),
        // Taken from the resolved secrets, not re-parsed out of the
        // argument vector: secret values are opaque and may contain
        // anything, including `KEY=`-shaped text.
        secret_files: vec![
            secrets.db_name_file,
            secrets.user_name_file,
            secrets.password_file,
        ],
        command: spec.into_args(),
    })
}

/// Stages 1–2 of every run: resolve the environment and the secrets, then
/// assemble the command spec. Shared by `run` and `check`.
fn prepare(config: &AppConfig) -> Result<(Env, DbSecrets, CommandSpec)> {
    let env = config.to_env()?;

    log_status!("deploy", "[1/3] Verifying secret files...");
    let secrets_config = SecretsConfig::load(&env.api_config_dir())?;
    let secrets = SecretResolver::new(&env, &secrets_config).resolve_all()?;
    log_status!("deploy", "[2/3] Secret files verified and loaded");

    let spec = CommandSpec::build(&env, &secrets, config.deploy_command.as_deref());

    Ok((env, secrets, spec))
}

fn working_dir(env: &Env) -> String {
    if env.is_production() {
        env.api_project_root().display().to_string()
    } else {
        env.project_root().display().to_string()
    }
}
