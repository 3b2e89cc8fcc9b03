//! Metrics and the families that own them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fmt::Format;

/// Clock ticks per second (USER_HZ). Standard value for Linux.
pub const CLK_TCK: i64 = 100;

/// Whether a metric reports its latest sample or the change between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Reported value is the latest raw sample.
    Gauge,
    /// Reported value is derived from the last two raw samples of a
    /// monotonically increasing source.
    Counter,
}

/// Conversion applied when computing a counter's reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Gauges report the raw sample, counters the plain delta.
    Identity,
    /// Counter delta as a percentage of the ticks in one sampling cycle.
    TickPercentage,
}

impl Transform {
    /// Computes a counter's reported value.
    ///
    /// Counter rollover is not detected: a source that wraps or resets
    /// produces a negative delta for one cycle.
    pub fn counter_value(self, current: i64, previous: i64, cycle_ticks: i64) -> i64 {
        let delta = current.saturating_sub(previous);
        match self {
            Transform::Identity => delta,
            Transform::TickPercentage => ((delta as f64 / cycle_ticks as f64) * 100.0) as i64,
        }
    }
}

/// A single metric with its two-slot value history.
///
/// Kind, transform and format are fixed when the metric is created; only
/// `previous` and `current` change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    kind: MetricKind,
    transform: Transform,
    format: Format,
    previous: Option<i64>,
    current: Option<i64>,
}

impl Metric {
    pub fn new(kind: MetricKind, transform: Transform, format: Format) -> Self {
        Self {
            kind,
            transform,
            format,
            previous: None,
            current: None,
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn previous(&self) -> Option<i64> {
        self.previous
    }

    pub fn current(&self) -> Option<i64> {
        self.current
    }

    /// Stores a new raw sample, shifting the old `current` into `previous`.
    pub fn record(&mut self, raw: i64) {
        self.previous = self.current.replace(raw);
    }

    /// Returns the reported value, or `None` when there is nothing to report
    /// yet (never saved, or a counter saved only once).
    pub fn value(&self, cycle_ticks: i64) -> Option<i64> {
        match self.kind {
            MetricKind::Gauge => self.current,
            MetricKind::Counter => {
                let current = self.current?;
                let previous = self.previous?;
                Some(self.transform.counter_value(current, previous, cycle_ticks))
            }
        }
    }

    /// Returns the reported value rendered through the metric's format.
    pub fn display(&self, cycle_ticks: i64) -> Option<String> {
        self.value(cycle_ticks).map(|v| self.format.apply(v))
    }
}

/// Membership mode of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyMode {
    /// Every submetric must be declared before it is saved.
    Static,
    /// Unseen submetrics are created on first save, rendered with `format`.
    Dynamic { format: Format },
}

/// A named group of metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    pub mode: FamilyMode,
    pub metrics: HashMap<String, Metric>,
}

impl Family {
    pub fn fixed() -> Self {
        Self {
            mode: FamilyMode::Static,
            metrics: HashMap::new(),
        }
    }

    pub fn dynamic(format: Format) -> Self {
        Self {
            mode: FamilyMode::Dynamic { format },
            metrics: HashMap::new(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.mode, FamilyMode::Dynamic { .. })
    }
}
