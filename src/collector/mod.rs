//! Host metrics collector.
//!
//! This module collects host facts from the Linux `/proc` filesystem, falling
//! back to system tools (`sysctl`, `df`) where `/proc` is not available, and
//! normalizes them into a [`Storage`](crate::storage::Storage).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       HostCollector                         │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │                   SystemCollector                     │  │
//! │  │  loadavg:  /proc/loadavg   -> sysctl -n vm.loadavg    │  │
//! │  │  swap:     /proc/meminfo   -> sysctl -n vm.swapusage  │  │
//! │  │  cpu:      /proc/stat      (no fallback)              │  │
//! │  │  disk:     df              (or override file)         │  │
//! │  └──────────────┬──────────────────────────┬─────────────┘  │
//! │          ┌──────▼──────┐            ┌──────▼────────┐       │
//! │          │  FileSystem │ (trait)    │ CommandRunner │ (trait)
//! │          └──────┬──────┘            └──────┬────────┘       │
//! └─────────────────┼──────────────────────────┼────────────────┘
//!            ┌──────┴──────┐            ┌──────┴──────┐
//!            │ RealFs      │            │ RealRunner  │
//!            │ MockFs      │            │ MockRunner  │
//!            └─────────────┘            └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production
//!
//! ```no_run
//! use hostmetrics::collector::collect_host;
//! use hostmetrics::storage::Storage;
//!
//! let store = Storage::host(15).unwrap();
//! collect_host(&store, "/proc").unwrap();
//! ```
//!
//! ## Testing (with mocks)
//!
//! ```
//! use hostmetrics::collector::{HostCollector, MockFs, MockRunner};
//! use hostmetrics::storage::Storage;
//!
//! let store = Storage::host(15).unwrap();
//! let mut collector = HostCollector::new(MockFs::typical_system(), MockRunner::linux(), "/proc");
//! collector.collect_pass(&store).unwrap();
//! assert_eq!(store.read("load", "1").as_deref(), Some("0.50"));
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod error;
pub mod mock;
pub mod procfs;
pub mod system;
pub mod tools;
pub mod traits;

pub use collector::{CollectorTiming, HostCollector, collect_host};
pub use error::{CollectError, ParseError};
pub use mock::{MockFs, MockRunner};
pub use system::SystemCollector;
pub use traits::{CommandRunner, FileSystem, RealFs, RealRunner};
