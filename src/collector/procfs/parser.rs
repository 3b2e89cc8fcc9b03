//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc` files into
//! structured data, so they are easy to test with string inputs.

use std::collections::HashMap;

use tracing::warn;

use crate::collector::error::ParseError;

/// Load averages over 1, 5 and 15 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadAvg {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

/// Parses the first three whitespace-separated floats of a load average line.
///
/// Shared by `/proc/loadavg` and the trimmed `sysctl -n vm.loadavg` output.
pub(crate) fn parse_load_triplet(content: &str) -> Result<LoadAvg, ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::new(format!(
            "invalid loadavg format: expected 3 fields, got {}",
            parts.len()
        )));
    }

    let parse = |idx: usize, name: &str| -> Result<f64, ParseError> {
        parts[idx]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::new(format!("invalid {}: {:?}", name, parts[idx])))
    };

    Ok(LoadAvg {
        load1: parse(0, "load1")?,
        load5: parse(1, "load5")?,
        load15: parse(2, "load15")?,
    })
}

/// Parses `/proc/loadavg` content.
///
/// Format: `0.50 1.20 2.35 1/150 1234`; only the averages are used.
pub fn parse_loadavg(content: &str) -> Result<LoadAvg, ParseError> {
    parse_load_triplet(content)
}

/// Parses `/proc/meminfo` content into a `key -> value` lookup.
///
/// Values keep the unit of the file (kB). Lines that do not look like
/// `Key: <digits>` are logged and skipped; a digit run that does not fit in
/// an `i64` is an error.
pub fn parse_meminfo(content: &str) -> Result<HashMap<String, i64>, ParseError> {
    let mut values = HashMap::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let Some((key, digits)) = split_meminfo_line(line) else {
            warn!("Unknown meminfo input: {}", line);
            continue;
        };
        let value: i64 = digits.parse().map_err(|e| {
            ParseError::new(format!("unexpected value {:?} in {:?}: {}", digits, line, e))
        })?;
        values.insert(key.to_string(), value);
    }

    Ok(values)
}

fn split_meminfo_line(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    let key = key.trim();
    let digits = rest.split_whitespace().next()?;
    if key.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((key, digits))
}

/// Cumulative CPU time per category, in clock ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuTicks {
    pub user: i64,
    pub nice: i64,
    pub system: i64,
    pub iowait: i64,
    pub irq: i64,
    pub softirq: i64,
    pub steal: i64,
}

impl CpuTicks {
    /// Sum of every category above (idle excluded).
    pub fn busy(&self) -> i64 {
        self.user + self.nice + self.system + self.iowait + self.irq + self.softirq + self.steal
    }
}

/// Parses the aggregate `cpu` line at the top of `/proc/stat`.
///
/// Format: `cpu user nice system idle iowait irq softirq steal [guest guest_nice]`
pub fn parse_cpu_stat(content: &str) -> Result<CpuTicks, ParseError> {
    let line = content
        .lines()
        .next()
        .ok_or_else(|| ParseError::new("empty stat"))?;
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.first() != Some(&"cpu") {
        return Err(ParseError::new(format!(
            "first stat line is not the cpu aggregate: {:?}",
            line
        )));
    }
    if fields.len() < 9 {
        return Err(ParseError::new(format!(
            "not enough fields in cpu line: expected 9+, got {}",
            fields.len()
        )));
    }

    let field = |idx: usize, name: &str| -> Result<i64, ParseError> {
        fields[idx]
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {}: {:?}", name, fields[idx])))
    };

    Ok(CpuTicks {
        user: field(1, "user")?,
        nice: field(2, "nice")?,
        system: field(3, "system")?,
        iowait: field(5, "iowait")?,
        irq: field(6, "irq")?,
        softirq: field(7, "softirq")?,
        steal: field(8, "steal")?,
    })
}
