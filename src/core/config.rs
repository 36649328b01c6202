//! Process configuration: environment variables plus the YAML secrets config.
//!
//! Configuration is read once at startup into explicit values that are passed
//! by parameter into the pipeline. Nothing here is global or mutable.

use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::{DeployMode, Env};
use crate::error::{Error, Result};

pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_PROJECT_ROOT: &str = "PROJECT_ROOT";
pub const ENV_API_PROJECT_ROOT: &str = "API_PROJECT_ROOT";
pub const ENV_API_CONFIG_FILE_PATH: &str = "API_CONFIG_FILE_PATH";
pub const ENV_DEPLOY_COMMAND: &str = "DEPLOY_COMMAND";

/// Name of the per-API secrets config file inside the config directory.
pub const SECRETS_CONFIG_FILE: &str = "api.yml";

/// Startup configuration, assembled from process environment variables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub app_env: String,
    pub project_root: String,
    pub api_project_root: String,
    pub api_config_file_path: String,
    /// Production build target. Required when the mode is production;
    /// ignored otherwise (development always uses the test-build fallback).
    pub deploy_command: Option<String>,
}

impl AppConfig {
    /// Read and validate configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_command(None)
    }

    /// Like [`from_env`](Self::from_env), with a CLI override for the
    /// production build target taking precedence over `DEPLOY_COMMAND`.
    pub fn from_env_with_command(command_override: Option<String>) -> Result<Self> {
        Self::from_parts(
            required_var(ENV_APP_ENV)?,
            required_var(ENV_PROJECT_ROOT)?,
            required_var(ENV_API_PROJECT_ROOT)?,
            required_var(ENV_API_CONFIG_FILE_PATH)?,
            command_override.or_else(|| optional_var(ENV_DEPLOY_COMMAND)),
        )
    }

    /// Assemble configuration from already-read values.
    ///
    /// Path values get tilde expansion so operators can configure
    /// `~/sites/app` style roots.
    pub fn from_parts(
        app_env: String,
        project_root: String,
        api_project_root: String,
        api_config_file_path: String,
        deploy_command: Option<String>,
    ) -> Result<Self> {
        let config = Self {
            app_env: app_env.trim().to_string(),
            project_root: expand(&project_root),
            api_project_root: expand(&api_project_root),
            api_config_file_path: expand(&api_config_file_path),
            deploy_command: deploy_command
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        };

        if DeployMode::parse(&config.app_env).is_production() && config.deploy_command.is_none() {
            return Err(Error::config_missing_key(ENV_DEPLOY_COMMAND, None)
                .with_hint("Set DEPLOY_COMMAND to the production build target"));
        }

        Ok(config)
    }

    /// Build the validated deployment environment from this configuration.
    pub fn to_env(&self) -> Result<Env> {
        Env::new(
            &self.app_env,
            &self.project_root,
            &self.api_project_root,
            &self.api_config_file_path,
        )
    }
}

fn required_var(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config_missing_key(key, None)),
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn expand(path: &str) -> String {
    shellexpand::tilde(path.trim()).to_string()
}

/// Parsed YAML secrets config document.
///
/// Holds the mapping from logical secret keys (dotted paths such as
/// `database.secrets.pg_dbname`) to their configured path values.
#[derive(Debug, Clone)]
pub struct SecretsConfig {
    doc: serde_yml::Value,
    path: PathBuf,
}

impl SecretsConfig {
    /// Load `api.yml` from the given config directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SECRETS_CONFIG_FILE);

        let raw = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_missing_key(
                    SECRETS_CONFIG_FILE,
                    Some(path.display().to_string()),
                )
            } else {
                Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
            }
        })?;

        Self::parse(&raw, path)
    }

    pub fn parse(raw: &str, path: PathBuf) -> Result<Self> {
        let doc: serde_yml::Value = serde_yml::from_str(raw)
            .map_err(|e| Error::config_invalid_yaml(path.display().to_string(), e.to_string()))?;

        Ok(Self { doc, path })
    }

    /// Look up a dotted key path (e.g. `database.secrets.pg_dbname`) and
    /// return its string value.
    pub fn lookup(&self, dotted_key: &str) -> Result<&str> {
        let mut node = &self.doc;

        for segment in dotted_key.split('.') {
            node = node.get(segment).ok_or_else(|| self.missing(dotted_key))?;
        }

        node.as_str().ok_or_else(|| {
            Error::config_invalid_value(
                dotted_key,
                None,
                format!("must be a string in {}", self.path.display()),
            )
        })
    }

    fn missing(&self, key: &str) -> Error {
        Error::config_missing_key(key, Some(self.path.display().to_string()))
    }
}
