use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::validation;

/// Minimum length for the project root and config path fields.
const MIN_PATH_LEN: usize = 5;
/// The API project root may be a short relative segment.
const MIN_API_ROOT_LEN: usize = 3;

/// Deployment mode, parsed once from the mode string.
///
/// Only the exact literal `"production"` selects production behavior.
/// Any other value (including `"Production"` or `"prod"`) falls back to
/// development, so a misspelled mode can never trigger a production build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    Development,
    Production,
}

impl DeployMode {
    pub fn parse(mode: &str) -> Self {
        if mode == "production" {
            DeployMode::Production
        } else {
            DeployMode::Development
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, DeployMode::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeployMode::Development => "development",
            DeployMode::Production => "production",
        }
    }
}

/// Resolved deployment environment: mode plus the filesystem roots the rest
/// of the pipeline must use. Built once at startup and never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Env {
    mode: DeployMode,
    project_root: PathBuf,
    api_project_root: PathBuf,
    api_config_path: PathBuf,
}

impl Env {
    /// Validate the configured fields and build the environment value.
    ///
    /// Field lengths are a startup contract: the failure carries the
    /// offending field name so the operator can fix the right variable.
    pub fn new(
        mode: &str,
        project_root: &str,
        api_project_root: &str,
        api_config_path: &str,
    ) -> Result<Self> {
        let project_root = validation::require_min_len(project_root, "PROJECT_ROOT", MIN_PATH_LEN)?;
        let api_project_root =
            validation::require_min_len(api_project_root, "API_PROJECT_ROOT", MIN_API_ROOT_LEN)?;
        let api_config_path =
            validation::require_min_len(api_config_path, "API_CONFIG_FILE_PATH", MIN_PATH_LEN)?;
        validation::require_non_empty(mode, "APP_ENV")?;

        Ok(Self {
            mode: DeployMode::parse(mode.trim()),
            project_root: PathBuf::from(project_root),
            api_project_root: PathBuf::from(api_project_root),
            api_config_path: PathBuf::from(api_config_path),
        })
    }

    pub fn mode(&self) -> DeployMode {
        self.mode
    }

    pub fn is_production(&self) -> bool {
        self.mode.is_production()
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn api_project_root(&self) -> &Path {
        &self.api_project_root
    }

    /// Directory holding the API secrets config file.
    ///
    /// Production uses the explicitly configured path; development uses a
    /// fixed subtree of the project root.
    pub fn api_config_dir(&self) -> PathBuf {
        if self.is_production() {
            self.api_config_path.clone()
        } else {
            self.project_root.join("storage").join("api")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn dev_env() -> Env {
        Env::new("local", "/work/app", "/work/app/api", "/etc/stagehand").unwrap()
    }

    #[test]
    fn production_requires_exact_literal() {
        assert_eq!(DeployMode::parse("production"), DeployMode::Production);
        assert_eq!(DeployMode::parse("Production"), DeployMode::Development);
        assert_eq!(DeployMode::parse("prod"), DeployMode::Development);
        assert_eq!(DeployMode::parse(""), DeployMode::Development);
    }

    #[test]
    fn dev_config_dir_is_fixed_subtree() {
        let env = dev_env();
        assert!(!env.is_production());
        assert_eq!(
            env.api_config_dir(),
            PathBuf::from("/work/app/storage/api")
        );
    }

    #[test]
    fn production_config_dir_is_configured_path() {
        let env = Env::new("production", "/srv/app", "/srv/api", "/etc/stagehand").unwrap();
        assert!(env.is_production());
        assert_eq!(env.api_config_dir(), PathBuf::from("/etc/stagehand"));
    }

    #[test]
    fn project_root_is_unconditional() {
        let env = Env::new("production", "/srv/app", "/srv/api", "/etc/stagehand").unwrap();
        assert_eq!(env.project_root(), Path::new("/srv/app"));
    }

    #[test]
    fn short_project_root_is_rejected() {
        let err = Env::new("local", "/a", "/work/app/api", "/etc/stagehand").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["key"], "PROJECT_ROOT");
    }

    #[test]
    fn short_api_project_root_is_rejected() {
        let err = Env::new("local", "/work/app", "ab", "/etc/stagehand").unwrap_err();
        assert_eq!(err.details["key"], "API_PROJECT_ROOT");
    }

    #[test]
    fn empty_mode_is_rejected_at_construction() {
        let err = Env::new("  ", "/work/app", "/work/app/api", "/etc/stagehand").unwrap_err();
        assert_eq!(err.details["key"], "APP_ENV");
    }
}
