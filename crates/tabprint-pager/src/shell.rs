//! Pager subprocess plumbing.
//!
//! [`run_pager`] runs a command through the platform shell with the content
//! on its stdin. The child is always killed and reaped, even on early return.

use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Pager `{0}` could not be started: {1}")]
    Spawn(String, std::io::Error),
    #[error("Pager `{0}` failed with status {1}")]
    Exited(String, ExitStatus),
}

impl PagerError {
    /// True when the pager stopped reading before all input was written,
    /// which is what happens when the user quits early.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, PagerError::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// Kills the child when dropped, whatever path led there.
struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn shell_command(command_str: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_str);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_str);
        c
    }
}

/// Run a shell command as a pager with `content` on its stdin.
///
/// The pager inherits stdout and stderr. Its stdin is closed once all
/// content is written, then the call blocks until the pager exits.
pub fn run_pager(command_str: &str, content: &str) -> Result<(), PagerError> {
    let mut cmd = shell_command(command_str);
    cmd.stdin(Stdio::piped());

    let child = cmd
        .spawn()
        .map_err(|e| PagerError::Spawn(command_str.to_string(), e))?;
    let mut guard = ChildGuard(child);

    if let Some(mut stdin) = guard.0.stdin.take() {
        stdin.write_all(content.as_bytes())?;
        stdin.flush()?;
    }

    let status = guard.0.wait()?;
    if !status.success() {
        return Err(PagerError::Exited(command_str.to_string(), status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_pager_consumes_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("paged.txt");
        let cmd = format!("cat > '{}'", out.display());
        run_pager(&cmd, "┌┐\n└┘\n").unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "┌┐\n└┘\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_includes_command() {
        let res = run_pager("cat > /dev/null; exit 3", "x\n");
        match res {
            Err(PagerError::Exited(cmd, status)) => {
                assert_eq!(cmd, "cat > /dev/null; exit 3");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("Expected Exited error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_early_quit_is_broken_pipe() {
        // Larger than any pipe buffer, so the write outlives the pager.
        let content = "x".repeat(8 * 1024 * 1024);
        let err = run_pager("exit 0", &content).unwrap_err();
        assert!(err.is_broken_pipe(), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_other_errors_are_not_broken_pipe() {
        let err = PagerError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!err.is_broken_pipe());
    }
}
