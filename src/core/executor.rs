// Local execution of the external build tool. No capture: the operator
// watches the build in real time.

use std::process::{Command, Stdio};

use crate::command::CommandSpec;
use crate::error::{Error, Result};

/// Spawn the build tool with the spec's arguments and wait for completion.
///
/// The child inherits the parent's environment variables unmodified, and
/// its stdout/stderr stream straight to the caller's. Returns the child's
/// exit code; a spawn failure (tool not installed, not executable) is the
/// only error path.
pub fn run_build(spec: &CommandSpec) -> Result<i32> {
    let status = Command::new(spec.program())
        .args(spec.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::deploy_build_failed(spec.rendered(), -1, Some(e.to_string())))?;

    Ok(status.code().unwrap_or(-1))
}
