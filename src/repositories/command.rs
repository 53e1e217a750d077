//! Process spawning - runs a command line and captures its stdout as lines.

use crate::error::{Result, ServiceControlError};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Runs a fully formed command line and hands back stdout, one entry per line.
pub trait CommandExecutor {
    /// # Errors
    ///
    /// Returns `Execution` if the process cannot be spawned or terminates
    /// without an exit code
    fn run(&self, command_line: &str) -> Result<Vec<String>>;
}

impl<F> CommandExecutor for F
where
    F: Fn(&str) -> Result<Vec<String>>,
{
    fn run(&self, command_line: &str) -> Result<Vec<String>> {
        self(command_line)
    }
}

/// Hands the command line to the platform shell (`cmd /C` on Windows, `sh -c`
/// elsewhere) and blocks until it exits. No timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }

    fn command(command_line: &str) -> Command {
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;

            const CREATE_NO_WINDOW: u32 = 0x08000000;

            let mut cmd = Command::new("cmd");
            cmd.arg("/C").raw_arg(command_line);
            cmd.creation_flags(CREATE_NO_WINDOW);
            cmd
        }

        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }
}

impl CommandExecutor for ShellExecutor {
    fn run(&self, command_line: &str) -> Result<Vec<String>> {
        debug!("Running: {}", command_line);

        let output = Self::command(command_line)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ServiceControlError::execution(command_line, e))?;

        let Some(code) = output.status.code() else {
            return Err(ServiceControlError::execution(
                command_line,
                format!("terminated without exit code ({})", output.status),
            ));
        };

        // Console code page output; only the ASCII codes and markers matter.
        let stdout = String::from_utf8_lossy(&output.stdout);

        if code != 0 {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                "`{}` exited with {}: {}",
                command_line,
                code,
                stderr.trim()
            );
        }

        let lines = split_lines(&stdout);
        trace!("`{}` produced {} lines", command_line, lines.len());
        Ok(lines)
    }
}

/// Splits on `\n`, dropping a trailing `\r` and the empty tail after a final newline.
pub fn split_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}
