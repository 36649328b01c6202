pub mod check;
pub mod config;
pub mod deploy;

pub type CmdResult<T> = stagehand::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Validate a `--command` override before it reaches config loading.
pub(crate) fn command_override(command: Option<String>) -> stagehand::Result<Option<String>> {
    match command {
        Some(c) if c.trim().is_empty() => Err(stagehand::Error::validation_invalid_argument(
            "command",
            "Build target override must not be empty",
        )),
        other => Ok(other),
    }
}
