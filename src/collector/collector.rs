//! Main collector that runs every host collector in one pass.
//!
//! The `HostCollector` struct provides a unified interface for collecting
//! all host facts into a [`Storage`].

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::collector::error::CollectError;
use crate::collector::system::SystemCollector;
use crate::collector::traits::{CommandRunner, FileSystem, RealFs, RealRunner};
use crate::config::HostConfig;
use crate::storage::Storage;

/// Timing information for each collector phase.
///
/// Used for debugging and performance monitoring.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total pass time.
    pub total: Duration,
    /// Time to collect load average.
    pub loadavg: Duration,
    /// Time to collect swap usage.
    pub swap: Duration,
    /// Time to collect CPU ticks.
    pub cpu: Duration,
    /// Time to collect disk usage.
    pub disk: Duration,
}

/// Runs one collection pass per call: load average, swap, CPU, disk.
///
/// The first failing collector aborts the rest of the pass, so a swap
/// failure also leaves disk metrics stale for that cycle.
pub struct HostCollector<F: FileSystem, R: CommandRunner> {
    system: SystemCollector<F, R>,
    /// Timing information from the last successful pass.
    last_timing: Option<CollectorTiming>,
}

impl<F: FileSystem, R: CommandRunner> HostCollector<F, R> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `runner` - Command runner implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, runner: R, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            system: SystemCollector::new(fs, runner, proc_path),
            last_timing: None,
        }
    }

    /// Reads disk usage from a `df`-formatted file instead of running `df`.
    pub fn with_disk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.system = self.system.with_disk_path(path);
        self
    }

    pub fn system(&self) -> &SystemCollector<F, R> {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut SystemCollector<F, R> {
        &mut self.system
    }

    /// Returns timing information from the last successful pass.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    /// Runs every collector once, returning the first error encountered.
    pub fn collect_pass(&mut self, store: &Storage) -> Result<(), CollectError> {
        let start = Instant::now();
        let mut timing = CollectorTiming::default();

        let t = Instant::now();
        self.system.collect_loadavg(store)?;
        timing.loadavg = t.elapsed();

        let t = Instant::now();
        self.system.collect_swap(store)?;
        timing.swap = t.elapsed();

        let t = Instant::now();
        self.system.collect_cpu(store)?;
        timing.cpu = t.elapsed();

        let t = Instant::now();
        self.system.collect_disk(store)?;
        timing.disk = t.elapsed();

        timing.total = start.elapsed();
        debug!(
            total = ?timing.total,
            loadavg = ?timing.loadavg,
            swap = ?timing.swap,
            cpu = ?timing.cpu,
            disk = ?timing.disk,
            "collection pass finished"
        );
        self.last_timing = Some(timing);
        Ok(())
    }
}

impl HostCollector<RealFs, RealRunner> {
    /// Creates a collector reading the real host as configured.
    pub fn from_config(config: &HostConfig) -> Self {
        let collector = Self::new(RealFs::new(), RealRunner::new(), &config.proc_path);
        match &config.disk_path {
            Some(path) => collector.with_disk_path(path),
            None => collector,
        }
    }
}

/// Collects one pass of host metrics from the real host.
///
/// `proc_path` overrides the pseudo-filesystem root (normally `/proc`).
pub fn collect_host(store: &Storage, proc_path: impl AsRef<Path>) -> Result<(), CollectError> {
    HostCollector::new(RealFs::new(), RealRunner::new(), proc_path.as_ref()).collect_pass(store)
}
