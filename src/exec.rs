//! Command Execution
//!
//! Final pipeline stage: either print the built command (dry-run) or hand it
//! to a shell with the controlling terminal's standard streams attached, so
//! the native client's own prompt (password entry, REPL) works unmodified.

use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{RdshellError, Result};

/// Run or print the built client command.
///
/// In dry-run mode the command is printed verbatim to stdout and nothing is
/// executed.
///
/// # Errors
///
/// Returns [`RdshellError::Subprocess`] when the shell cannot be spawned or
/// the client exits non-zero.
pub fn execute(command: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{command}");
        return Ok(());
    }

    info!("running... : {command}");

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| RdshellError::subprocess(format!("could not start shell: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(RdshellError::subprocess(format!("client exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_never_spawns() {
        // "false" would exit non-zero if executed.
        assert!(execute("false", true).is_ok());
    }

    #[test]
    fn test_successful_command() {
        assert!(execute("true", false).is_ok());
    }

    #[test]
    fn test_nonzero_exit_is_subprocess_error() {
        let err = execute("exit 3", false).unwrap_err();
        assert!(matches!(err, RdshellError::Subprocess(_)));
        assert!(err.to_string().contains("3"));
    }
}
