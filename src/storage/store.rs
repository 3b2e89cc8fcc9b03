//! The metric store.
//!
//! [`Storage`] owns every family and metric. Collectors write through
//! [`Storage::save`] / [`Storage::save_type`]; rule evaluation reads through
//! [`Storage::read`] / [`Storage::raw_value`], possibly from another thread
//! while a collection pass is running.
//!
//! All families sit behind a single [`RwLock`]. A save shifts a metric's
//! `(previous, current)` pair under the write lock and every read copies the
//! pair under the read lock, so a reader sees either the old pair or the new
//! one, never a mix.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::trace;

use crate::fmt::Format;
use crate::storage::model::{
    CLK_TCK, Family, FamilyMode, Metric, MetricKind, MetricReading, Snapshot, Transform,
};

/// Errors returned by the metric store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("unknown metric {family}({submetric})")]
    UnknownMetric { family: String, submetric: String },

    #[error("metric {family}({submetric}) is already declared")]
    AlreadyDeclared { family: String, submetric: String },

    #[error("family {0} is already declared")]
    FamilyAlreadyDeclared(String),

    #[error("metric {family}({submetric}) is a {declared:?}, not a {requested:?}")]
    KindMismatch {
        family: String,
        submetric: String,
        declared: MetricKind,
        requested: MetricKind,
    },

    #[error("transform {transform:?} cannot be used on a {kind:?}")]
    InvalidTransform {
        kind: MetricKind,
        transform: Transform,
    },
}

impl StorageError {
    fn unknown(family: &str, submetric: &str) -> Self {
        StorageError::UnknownMetric {
            family: family.to_string(),
            submetric: submetric.to_string(),
        }
    }
}

/// Typed, queryable store of host metrics.
#[derive(Debug)]
pub struct Storage {
    families: RwLock<HashMap<String, Family>>,
    /// Clock ticks elapsing in one sampling cycle; divisor of
    /// [`Transform::TickPercentage`].
    cycle_ticks: i64,
}

impl Storage {
    /// Creates an empty store for a sampling interval of `cycle_seconds`.
    ///
    /// A zero interval is treated as one second.
    pub fn new(cycle_seconds: u32) -> Self {
        Self::with_cycle_ticks(CLK_TCK * i64::from(cycle_seconds.max(1)))
    }

    /// Creates an empty store with an explicit tick count per cycle.
    pub fn with_cycle_ticks(cycle_ticks: i64) -> Self {
        Self {
            families: RwLock::new(HashMap::new()),
            cycle_ticks: cycle_ticks.max(1),
        }
    }

    pub fn cycle_ticks(&self) -> i64 {
        self.cycle_ticks
    }

    /// Declares a gauge, creating a static family on first use.
    pub fn declare_gauge(
        &self,
        family: &str,
        submetric: &str,
        transform: Transform,
        format: Format,
    ) -> Result<(), StorageError> {
        self.declare(family, submetric, MetricKind::Gauge, transform, format)
    }

    /// Declares a counter, creating a static family on first use.
    pub fn declare_counter(
        &self,
        family: &str,
        submetric: &str,
        transform: Transform,
        format: Format,
    ) -> Result<(), StorageError> {
        self.declare(family, submetric, MetricKind::Counter, transform, format)
    }

    fn declare(
        &self,
        family: &str,
        submetric: &str,
        kind: MetricKind,
        transform: Transform,
        format: Format,
    ) -> Result<(), StorageError> {
        if kind == MetricKind::Gauge && transform == Transform::TickPercentage {
            return Err(StorageError::InvalidTransform { kind, transform });
        }

        let mut families = self.families.write();
        let fam = families
            .entry(family.to_string())
            .or_insert_with(Family::fixed);

        if fam.metrics.contains_key(submetric) {
            return Err(StorageError::AlreadyDeclared {
                family: family.to_string(),
                submetric: submetric.to_string(),
            });
        }

        fam.metrics
            .insert(submetric.to_string(), Metric::new(kind, transform, format));
        Ok(())
    }

    /// Declares an open-membership family whose submetrics are created on
    /// first save and rendered with `format`.
    pub fn declare_dynamic_family(&self, name: &str, format: Format) -> Result<(), StorageError> {
        let mut families = self.families.write();
        if families.contains_key(name) {
            return Err(StorageError::FamilyAlreadyDeclared(name.to_string()));
        }
        families.insert(name.to_string(), Family::dynamic(format));
        Ok(())
    }

    /// Saves a raw sample. Unseen submetrics of a dynamic family become gauges.
    pub fn save(&self, family: &str, submetric: &str, raw: i64) -> Result<(), StorageError> {
        self.store(family, submetric, raw, None)
    }

    /// Saves a raw sample, creating an unseen dynamic submetric as `kind`.
    ///
    /// An existing metric keeps its declared kind; asking for another kind is
    /// an error.
    pub fn save_type(
        &self,
        family: &str,
        submetric: &str,
        raw: i64,
        kind: MetricKind,
    ) -> Result<(), StorageError> {
        self.store(family, submetric, raw, Some(kind))
    }

    fn store(
        &self,
        family: &str,
        submetric: &str,
        raw: i64,
        kind: Option<MetricKind>,
    ) -> Result<(), StorageError> {
        let mut families = self.families.write();
        let fam = families
            .get_mut(family)
            .ok_or_else(|| StorageError::unknown(family, submetric))?;
        let mode = fam.mode;

        match fam.metrics.get_mut(submetric) {
            Some(metric) => {
                if let Some(requested) = kind.filter(|k| *k != metric.kind()) {
                    return Err(StorageError::KindMismatch {
                        family: family.to_string(),
                        submetric: submetric.to_string(),
                        declared: metric.kind(),
                        requested,
                    });
                }
                metric.record(raw);
            }
            None => {
                let FamilyMode::Dynamic { format } = mode else {
                    return Err(StorageError::unknown(family, submetric));
                };
                let kind = kind.unwrap_or(MetricKind::Gauge);
                trace!(family, submetric, ?kind, "discovered dynamic metric");

                let mut metric = Metric::new(kind, Transform::Identity, format);
                metric.record(raw);
                fam.metrics.insert(submetric.to_string(), metric);
            }
        }
        Ok(())
    }

    /// Returns the reported value rendered for display.
    ///
    /// `None` if the metric does not exist or has no value to report yet.
    pub fn read(&self, family: &str, submetric: &str) -> Option<String> {
        let families = self.families.read();
        families
            .get(family)?
            .metrics
            .get(submetric)?
            .display(self.cycle_ticks)
    }

    /// Returns the reported value (post-transform, pre-format) for rule
    /// evaluation.
    ///
    /// `None` if the metric does not exist or has no value to report yet.
    pub fn raw_value(&self, family: &str, submetric: &str) -> Option<i64> {
        let families = self.families.read();
        families
            .get(family)?
            .metrics
            .get(submetric)?
            .value(self.cycle_ticks)
    }

    /// Returns whether `family(submetric)` exists, whether or not it holds a
    /// value.
    pub fn contains(&self, family: &str, submetric: &str) -> bool {
        self.families
            .read()
            .get(family)
            .is_some_and(|f| f.metrics.contains_key(submetric))
    }

    /// Returns the sorted submetric names of a family.
    pub fn submetrics(&self, family: &str) -> Option<Vec<String>> {
        let families = self.families.read();
        let mut names: Vec<String> = families.get(family)?.metrics.keys().cloned().collect();
        names.sort();
        Some(names)
    }

    /// Copies every metric into a serializable [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot {
        let families = self.families.read();
        let mut metrics: Vec<MetricReading> = families
            .iter()
            .flat_map(|(family, fam)| {
                fam.metrics.iter().map(move |(submetric, metric)| MetricReading {
                    family: family.clone(),
                    submetric: submetric.clone(),
                    kind: metric.kind(),
                    previous: metric.previous(),
                    current: metric.current(),
                    value: metric.value(self.cycle_ticks),
                    display: metric.display(self.cycle_ticks),
                })
            })
            .collect();
        metrics.sort_by(|a, b| (&a.family, &a.submetric).cmp(&(&b.family, &b.submetric)));

        Snapshot {
            taken_at: Utc::now(),
            metrics,
        }
    }
}
