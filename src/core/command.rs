use serde::Serialize;

use crate::env::Env;
use crate::secrets::DbSecrets;

/// The external build-orchestration tool.
pub const BUILD_TOOL: &str = "make";

/// Build target used for every non-production run.
pub const FALLBACK_COMMAND: &str = "build-test";

/// Ordered argument vector for the external build invocation.
///
/// The argument order and the KEY=VALUE key names are a wire contract with
/// the build tool, which parses them positionally and by key name. Do not
/// reorder or rename them independently of that tool.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CommandSpec {
    args: Vec<String>,
}

impl CommandSpec {
    /// Assemble the argument vector from the environment and secrets.
    ///
    /// Production runs in the API project root with the configured command;
    /// everything else runs in the project root with the test-build target.
    /// Secret values pass through unvalidated; empty values stay empty and
    /// rejecting them is the build tool's job.
    pub fn build(env: &Env, secrets: &DbSecrets, deploy_command: Option<&str>) -> Self {
        let working_dir = if env.is_production() {
            env.api_project_root()
        } else {
            env.project_root()
        };

        // Config loading guarantees a command token in production; the
        // fallback keeps this total.
        let command = if env.is_production() {
            deploy_command.unwrap_or(FALLBACK_COMMAND)
        } else {
            FALLBACK_COMMAND
        };

        let args = vec![
            "-C".to_string(),
            working_dir.display().to_string(),
            command.to_string(),
            format!("POSTGRES_DB_SECRET_PATH={}", secrets.db_name_file),
            format!("POSTGRES_USER_SECRET_PATH={}", secrets.user_name_file),
            format!("POSTGRES_PASSWORD_SECRET_PATH={}", secrets.password_file),
            format!("ENV_DB_DATABASE_NAME={}", secrets.db_name),
            format!("ENV_DB_USER_NAME={}", secrets.user_name),
            format!("ENV_DB_USER_PASSWORD={}", secrets.password),
        ];

        let spec = Self { args };

        // Operator visibility only; never blocks or fails the build.
        log_status!("deploy", "Command: {} {:?}", BUILD_TOOL, spec.args);

        spec
    }

    pub fn program(&self) -> &'static str {
        BUILD_TOOL
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// Rendered single-line form, for diagnostics and error details.
    pub fn rendered(&self) -> String {
        format!("{} {}", BUILD_TOOL, self.args.join(" "))
    }
}
