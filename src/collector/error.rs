//! Error types for collection failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::storage::StorageError;

/// A source's content could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Error that aborts the remainder of a collection pass.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Probing or reading a source file failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fallback tool could not be run or exited unsuccessfully.
    #[error("command `{command}` failed: {source}")]
    Command {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CollectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn command(program: &str, args: &[&str], source: io::Error) -> Self {
        let mut command = program.to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        CollectError::Command { command, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CollectError::command("sysctl", &["-n", "vm.loadavg"], io::Error::other("boom"));
        assert_eq!(
            err.to_string(),
            "command `sysctl -n vm.loadavg` failed: boom"
        );

        let err = CollectError::from(ParseError::new("invalid load1"));
        assert_eq!(err.to_string(), "parse error: invalid load1");
    }
}
