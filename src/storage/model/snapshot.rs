//! Point-in-time copy of the whole metric store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metric::MetricKind;

/// One metric as seen at snapshot time.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct MetricReading {
    pub family: String,
    /// Empty for the family aggregate.
    pub submetric: String,
    pub kind: MetricKind,
    pub previous: Option<i64>,
    pub current: Option<i64>,
    /// Reported value (post-transform), `None` until one is available.
    pub value: Option<i64>,
    /// Reported value rendered through the metric's format.
    pub display: Option<String>,
}

impl MetricReading {
    /// Name in `family(submetric)` form, or just `family` for the aggregate.
    pub fn name(&self) -> String {
        if self.submetric.is_empty() {
            self.family.clone()
        } else {
            format!("{}({})", self.family, self.submetric)
        }
    }
}

/// All metrics of a store, sorted by family then submetric.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub metrics: Vec<MetricReading>,
}

impl Snapshot {
    pub fn get(&self, family: &str, submetric: &str) -> Option<&MetricReading> {
        self.metrics
            .iter()
            .find(|m| m.family == family && m.submetric == submetric)
    }
}
