//! Abstractions over the host's data sources to enable testing and mocking.
//!
//! Collectors read pseudo-files through [`FileSystem`] and run fallback tools
//! through [`CommandRunner`]. Production code uses [`RealFs`] and
//! [`RealRunner`]; tests use the in-memory types from
//! [`mock`](crate::collector::mock).

use std::io;
use std::path::Path;
use std::process::Command;

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Probes whether a path exists.
    ///
    /// # Returns
    /// `Ok(false)` if the path is definitely absent, or an I/O error if
    /// existence could not be determined (e.g. permission denied on a
    /// parent directory).
    fn try_exists(&self, path: &Path) -> io::Result<bool>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn try_exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}

/// Abstraction for running external tools.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns its stdout followed by its
    /// stderr.
    ///
    /// A program that cannot be spawned or exits unsuccessfully is an error.
    fn combined_output(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

/// Runs tools with [`std::process::Command`].
///
/// No timeout is applied; the scheduler driving collection owns that policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealRunner;

impl RealRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for RealRunner {
    fn combined_output(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let output = Command::new(program).args(args).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(io::Error::other(format!(
                "exited with {}: {}",
                output.status,
                combined.trim()
            )));
        }
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_real_fs_read_to_string() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.50 1.20 2.35 1/150 1234").unwrap();

        let fs = RealFs::new();
        let content = fs.read_to_string(file.path()).unwrap();
        assert!(content.starts_with("0.50"));
    }

    #[test]
    fn test_real_fs_try_exists() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("loadavg");
        std::fs::write(&present, "1.00 1.00 1.00\n").unwrap();

        let fs = RealFs::new();
        assert!(fs.try_exists(&present).unwrap());
        assert!(!fs.try_exists(&dir.path().join("meminfo")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runner_captures_output() {
        let runner = RealRunner::new();
        let out = runner
            .combined_output("sh", &["-c", "echo out; echo err 1>&2"])
            .unwrap();
        assert!(out.contains("out"));
        assert!(out.contains("err"));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runner_failure_is_error() {
        let runner = RealRunner::new();
        assert!(runner.combined_output("sh", &["-c", "exit 3"]).is_err());
        assert!(
            runner
                .combined_output("definitely-not-a-real-tool-42", &[])
                .is_err()
        );
    }
}
