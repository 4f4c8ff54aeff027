// Process invocation for systemctl, behind a trait so the manager can be driven by fakes.

use crate::error::{Error, Result};
use log::debug;
use std::process::{Command, Stdio};

pub trait CommandRunner {
    /// Runs `program args...` and returns its stdout.
    fn output(&self, program: &str, args: &[String]) -> Result<String>;

    /// Runs `program args...` for its exit status only.
    fn status(&self, program: &str, args: &[String]) -> Result<()>;
}

/// Spawns real processes with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, program: &str, args: &[String]) -> Result<String> {
        let command = command_line(program, args);
        debug!("running {command}");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn status(&self, program: &str, args: &[String]) -> Result<()> {
        let command = command_line(program, args);
        debug!("running {command}");

        // stdout is discarded so the child cannot draw over a TUI.
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| Error::Spawn {
                command: command.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

pub(crate) fn command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
