// Error type shared by the systemctl adapter.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The command ran but exited unsuccessfully. `code` is `None` when it was
    /// terminated by a signal.
    #[error("`{command}` failed ({}){}", exit_label(.code), stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("invalid unit name: {0:?}")]
    InvalidUnit(String),

    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// Exit code of the external command, if that is what failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_message_carries_exit_code_and_stderr() {
        let err = Error::CommandFailed {
            command: "systemctl start foo.service".into(),
            code: Some(5),
            stderr: "Unit foo.service not found.\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`systemctl start foo.service` failed (exit code 5): Unit foo.service not found."
        );
        assert_eq!(err.exit_code(), Some(5));
    }

    #[test]
    fn signal_termination_has_no_exit_code() {
        let err = Error::CommandFailed {
            command: "systemctl stop foo.service".into(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "`systemctl stop foo.service` failed (terminated by signal)"
        );
        assert_eq!(err.exit_code(), None);
    }
}
