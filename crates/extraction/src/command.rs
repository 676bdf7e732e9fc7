//! External command execution with a deadline.

use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

/// Run a command to completion, failing on timeout or non-zero exit.
///
/// Returns the raw output on success. Errors are plain strings so callers can
/// wrap them in the variant that fits their stage.
pub(crate) async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    let output = tokio::time::timeout(timeout, cmd.output())
        .await
        .map_err(|_| format!("command timed out after {}s", timeout.as_secs()))?
        .map_err(|e| format!("failed to execute command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("command failed ({}): {}", output.status, stderr.trim()));
    }

    Ok(output)
}
