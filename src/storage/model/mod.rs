//! Data models for the metric store.
//!
//! - [`metric`]: metrics, their kinds and transforms, and families
//! - [`snapshot`]: serializable point-in-time copy of a store
//!
//! ```text
//! Storage
//!   └── Family (static | dynamic)
//!         └── Metric (gauge | counter)
//!               ├── previous
//!               └── current
//! ```

mod metric;
mod snapshot;

pub use metric::{CLK_TCK, Family, FamilyMode, Metric, MetricKind, Transform};
pub use snapshot::{MetricReading, Snapshot};
