//! Schema of the host metric store.
//!
//! | family | submetrics                        | kind    | format     |
//! |--------|-----------------------------------|---------|------------|
//! | swap   | `""`                              | gauge   | percent    |
//! | load   | `1`, `5`, `15`                    | gauge   | hundredths |
//! | cpu    | `""`, user, system, iowait, steal | counter | percent    |
//! | disk   | one per mount point (dynamic)     | gauge   | percent    |

use crate::fmt::Format;
use crate::storage::model::Transform;
use crate::storage::{Storage, StorageError};

pub const SWAP: &str = "swap";
pub const LOAD: &str = "load";
pub const CPU: &str = "cpu";
pub const DISK: &str = "disk";

/// Load average windows in minutes, as submetric names.
pub const LOAD_WINDOWS: [&str; 3] = ["1", "5", "15"];

/// CPU categories stored individually next to the `""` aggregate.
pub const CPU_CATEGORIES: [&str; 4] = ["user", "system", "iowait", "steal"];

/// Mount point declared up front so rules can reference it before the first
/// disk pass.
pub const ROOT_MOUNT: &str = "/";

impl Storage {
    /// Builds the host store for a sampling interval of `cycle_seconds`.
    pub fn host(cycle_seconds: u32) -> Result<Self, StorageError> {
        let store = Storage::new(cycle_seconds);

        store.declare_gauge(SWAP, "", Transform::Identity, Format::Percent)?;
        for window in LOAD_WINDOWS {
            store.declare_gauge(LOAD, window, Transform::Identity, Format::Hundredths)?;
        }
        store.declare_counter(CPU, "", Transform::TickPercentage, Format::Percent)?;
        for category in CPU_CATEGORIES {
            store.declare_counter(CPU, category, Transform::TickPercentage, Format::Percent)?;
        }
        store.declare_dynamic_family(DISK, Format::Percent)?;
        store.declare_gauge(DISK, ROOT_MOUNT, Transform::Identity, Format::Percent)?;

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::model::MetricKind;

    #[test]
    fn test_host_schema() {
        let store = Storage::host(15).unwrap();
        assert_eq!(store.cycle_ticks(), 1500);

        assert!(store.contains(SWAP, ""));
        for window in LOAD_WINDOWS {
            assert!(store.contains(LOAD, window));
        }
        assert!(store.contains(CPU, ""));
        for category in CPU_CATEGORIES {
            assert!(store.contains(CPU, category));
        }
        assert!(!store.contains(CPU, "nice"));
        assert_eq!(store.submetrics(DISK), Some(vec!["/".to_string()]));
    }

    #[test]
    fn test_host_schema_kinds() {
        let store = Storage::host(15).unwrap();
        store.save(LOAD, "1", 235).unwrap();
        store.save(CPU, "", 1_000).unwrap();
        store.save_type(DISK, "/srv", 12, MetricKind::Gauge).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.get(LOAD, "1").unwrap().kind, MetricKind::Gauge);
        assert_eq!(snapshot.get(CPU, "").unwrap().kind, MetricKind::Counter);
        assert_eq!(snapshot.get(DISK, "/srv").unwrap().kind, MetricKind::Gauge);
        assert_eq!(store.read(LOAD, "1").as_deref(), Some("2.35"));
        assert_eq!(store.read(DISK, "/srv").as_deref(), Some("12%"));
    }
}
