//! Canned command output for testing fallback collection paths.

use crate::collector::traits::CommandRunner;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Command runner that answers from a table of canned outputs.
///
/// Commands are keyed by their full command line (`"sysctl -n vm.loadavg"`).
/// Unknown commands fail with `NotFound`, like a missing binary.
#[derive(Debug, Default)]
pub struct MockRunner {
    outputs: HashMap<String, Result<String, String>>,
    calls: AtomicUsize,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the combined output of a command line.
    pub fn add_output(&mut self, command: impl Into<String>, output: impl Into<String>) {
        self.outputs.insert(command.into(), Ok(output.into()));
    }

    /// Registers a command line that exits unsuccessfully.
    pub fn add_failure(&mut self, command: impl Into<String>, message: impl Into<String>) {
        self.outputs.insert(command.into(), Err(message.into()));
    }

    /// Number of commands run so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl CommandRunner for MockRunner {
    fn combined_output(&self, program: &str, args: &[&str]) -> io::Result<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }

        match self.outputs.get(&line) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(io::Error::other(message.clone())),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("command not found: {}", line),
            )),
        }
    }
}
