//! Per-fact host collectors.
//!
//! Each collector probes its preferred `/proc` file first and falls back to
//! a system tool when the file is absent. The probe is an explicit existence
//! check: a missing file selects the fallback, while a failing probe or an
//! unreadable file aborts the pass.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::collector::error::CollectError;
use crate::collector::procfs::parser::{parse_cpu_stat, parse_loadavg, parse_meminfo};
use crate::collector::tools::parser::{parse_df, parse_sysctl_loadavg, parse_sysctl_swapusage};
use crate::collector::traits::{CommandRunner, FileSystem};
use crate::storage::host::{CPU, DISK, LOAD, LOAD_WINDOWS, SWAP};
use crate::storage::{MetricKind, Storage};

/// Scales a fractional value to hundredths, keeping two decimals in an
/// integer.
pub fn hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Percentage of swap in use, from free and total sizes in the same unit.
///
/// No free swap reads as fully used and untouched swap as unused, whatever
/// the total. The result is kept within `0..=100`.
pub fn swap_used_percent(free: f64, total: f64) -> i64 {
    if free == 0.0 {
        100
    } else if free == total {
        0
    } else if total <= 0.0 {
        100
    } else {
        (100 - (100.0 * free / total).round() as i64).clamp(0, 100)
    }
}

/// Collects host facts into a [`Storage`].
pub struct SystemCollector<F: FileSystem, R: CommandRunner> {
    fs: F,
    runner: R,
    proc_path: PathBuf,
    /// File read instead of running `df`.
    disk_path: Option<PathBuf>,
}

impl<F: FileSystem, R: CommandRunner> SystemCollector<F, R> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `runner` - Command runner for fallback tools (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, runner: R, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            runner,
            proc_path: proc_path.into(),
            disk_path: None,
        }
    }

    /// Reads `df`-formatted disk usage from `path` instead of running `df`.
    pub fn with_disk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disk_path = Some(path.into());
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Returns the path of `<proc>/<name>` if it exists.
    fn probe(&self, name: &str) -> Result<Option<PathBuf>, CollectError> {
        let path = self.proc_path.join(name);
        match self.fs.try_exists(&path) {
            Ok(true) => Ok(Some(path)),
            Ok(false) => Ok(None),
            Err(e) => Err(CollectError::io(path, e)),
        }
    }

    fn read(&self, path: &Path) -> Result<String, CollectError> {
        self.fs
            .read_to_string(path)
            .map_err(|e| CollectError::io(path, e))
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<String, CollectError> {
        self.runner
            .combined_output(program, args)
            .map_err(|e| CollectError::command(program, args, e))
    }

    /// Collects the 1, 5 and 15 minute load averages, stored in hundredths.
    pub fn collect_loadavg(&self, store: &Storage) -> Result<(), CollectError> {
        let load = match self.probe("loadavg")? {
            Some(path) => parse_loadavg(&self.read(&path)?)?,
            None => {
                trace!("no loadavg file, falling back to sysctl");
                parse_sysctl_loadavg(&self.run("sysctl", &["-n", "vm.loadavg"])?)?
            }
        };

        let values = [load.load1, load.load5, load.load15];
        for (window, value) in LOAD_WINDOWS.into_iter().zip(values) {
            store.save(LOAD, window, hundredths(value))?;
        }
        Ok(())
    }

    /// Collects the percentage of swap in use.
    pub fn collect_swap(&self, store: &Storage) -> Result<(), CollectError> {
        let percent = match self.probe("meminfo")? {
            Some(path) => {
                let info = parse_meminfo(&self.read(&path)?)?;
                let free = info.get("SwapFree").copied().unwrap_or(0);
                let total = info.get("SwapTotal").copied().unwrap_or(0);
                swap_used_percent(free as f64, total as f64)
            }
            None => {
                trace!("no meminfo file, falling back to sysctl");
                let usage = parse_sysctl_swapusage(&self.run("sysctl", &["-n", "vm.swapusage"])?)?;
                swap_used_percent(usage.free(), usage.total)
            }
        };

        store.save(SWAP, "", percent)?;
        Ok(())
    }

    /// Collects cumulative CPU ticks. Hosts without `<proc>/stat` get no CPU
    /// metrics.
    pub fn collect_cpu(&self, store: &Storage) -> Result<(), CollectError> {
        let Some(path) = self.probe("stat")? else {
            trace!("no stat file, skipping cpu");
            return Ok(());
        };
        let ticks = parse_cpu_stat(&self.read(&path)?)?;

        store.save(CPU, "", ticks.busy())?;
        store.save(CPU, "user", ticks.user)?;
        store.save(CPU, "system", ticks.system)?;
        store.save(CPU, "iowait", ticks.iowait)?;
        store.save(CPU, "steal", ticks.steal)?;
        Ok(())
    }

    /// Collects percent used per mounted filesystem.
    pub fn collect_disk(&self, store: &Storage) -> Result<(), CollectError> {
        let output = match &self.disk_path {
            Some(path) => self.read(path)?,
            None => self.run("df", &[])?,
        };

        for (mount, used) in parse_df(&output) {
            store.save_type(DISK, &mount, used, MetricKind::Gauge)?;
        }
        Ok(())
    }
}
