//! Parsers for the output of system tools (`sysctl`, `df`).
//!
//! Tool output is meant for humans: values carry unit suffixes, sit inside
//! braces or are laid out as columns. These functions turn it into the same
//! numeric model as the `/proc` parsers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::collector::error::ParseError;
use crate::collector::procfs::parser::{LoadAvg, parse_load_triplet};

/// `= <number><unit suffix>` groups of `sysctl -n vm.swapusage`.
static SWAP_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=\s*(\d+(?:\.\d+)?)([A-Za-z]?)").expect("swap field regex is valid")
});

fn first_line(output: &str) -> Result<&str, ParseError> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| ParseError::new("empty command output"))
}

/// Parses `sysctl -n vm.loadavg` output: `{ 1.64 1.85 1.93 }`.
pub fn parse_sysctl_loadavg(output: &str) -> Result<LoadAvg, ParseError> {
    let line = first_line(output)?;
    let inner = line.trim_start_matches('{').trim_end_matches('}');
    parse_load_triplet(inner)
}

/// Swap sizes in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwapUsage {
    pub total: f64,
    pub used: f64,
}

impl SwapUsage {
    pub fn free(&self) -> f64 {
        self.total - self.used
    }
}

/// Parses `sysctl -n vm.swapusage` output:
/// `total = 4096.00M  used = 2048.00M  free = 2048.00M  (encrypted)`.
///
/// The first two `=` groups are total and used.
pub fn parse_sysctl_swapusage(output: &str) -> Result<SwapUsage, ParseError> {
    let line = first_line(output)?;
    let mut sizes = SWAP_FIELD.captures_iter(line).map(|caps| {
        let number = &caps[1];
        let suffix = caps[2].chars().next();
        number
            .parse::<f64>()
            .map(|v| normalize_swap(v, suffix))
            .map_err(|e| ParseError::new(format!("invalid swap size {:?}: {}", number, e)))
    });

    let total = sizes
        .next()
        .ok_or_else(|| ParseError::new(format!("missing swap total in {:?}", line)))??;
    let used = sizes
        .next()
        .ok_or_else(|| ParseError::new(format!("missing swap used in {:?}", line)))??;

    Ok(SwapUsage { total, used })
}

/// Scales a size with a unit suffix to KiB.
///
/// An unknown or missing suffix leaves the value as-is.
pub fn normalize_swap(value: f64, suffix: Option<char>) -> f64 {
    match suffix.map(|c| c.to_ascii_uppercase()) {
        Some('K') => value,
        Some('M') => value * 1024.0,
        Some('G') => value * 1024.0 * 1024.0,
        Some('T') => value * 1024.0 * 1024.0 * 1024.0,
        _ => value,
    }
}

/// Parses `df` output into `mount point -> percent used`.
///
/// Only lines starting with `/` (device paths) are considered. Lines with
/// fewer than five fields or a non-numeric percentage are logged and
/// skipped. The mount point is the last column, so mount points containing
/// spaces are cut at the last space.
pub fn parse_df(output: &str) -> BTreeMap<String, i64> {
    let mut usage = BTreeMap::new();

    for line in output.lines() {
        if !line.starts_with('/') {
            continue;
        }

        let items: Vec<&str> = line.split_whitespace().collect();
        if items.len() < 5 {
            debug!("Cannot parse df output: {:?}", items);
            continue;
        }

        let Some(pct) = items[4].strip_suffix('%') else {
            debug!("Cannot parse df output: {}", line);
            continue;
        };
        match pct.parse::<i64>() {
            Ok(value) => {
                usage.insert(items[items.len() - 1].to_string(), value);
            }
            Err(_) => debug!("Cannot parse df output: {}", line),
        }
    }

    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{DARWIN_DF, LINUX_DF};

    #[test]
    fn test_parse_sysctl_loadavg() {
        let load = parse_sysctl_loadavg("{ 1.64 1.85 1.93 }\n").unwrap();
        assert_eq!(load.load1, 1.64);
        assert_eq!(load.load5, 1.85);
        assert_eq!(load.load15, 1.93);

        // Braces hugging the numbers are trimmed too.
        let load = parse_sysctl_loadavg("{0.50 1.20 2.35}").unwrap();
        assert_eq!(load.load15, 2.35);
    }

    #[test]
    fn test_parse_sysctl_loadavg_invalid() {
        assert!(parse_sysctl_loadavg("").is_err());
        assert!(parse_sysctl_loadavg("{ }").is_err());
        assert!(parse_sysctl_loadavg("sysctl: unknown oid 'vm.loadavg'").is_err());
    }

    #[test]
    fn test_parse_sysctl_swapusage() {
        let usage = parse_sysctl_swapusage(
            "total = 4096.00M  used = 2048.00M  free = 2048.00M  (encrypted)\n",
        )
        .unwrap();
        assert_eq!(usage.total, 4096.0 * 1024.0);
        assert_eq!(usage.used, 2048.0 * 1024.0);
        assert_eq!(usage.free(), 2048.0 * 1024.0);
    }

    #[test]
    fn test_parse_sysctl_swapusage_mixed_units() {
        let usage =
            parse_sysctl_swapusage("total = 2.00G  used = 512.00M  free = 1.50G").unwrap();
        assert_eq!(usage.total, 2.0 * 1024.0 * 1024.0);
        assert_eq!(usage.used, 512.0 * 1024.0);
    }

    #[test]
    fn test_parse_sysctl_swapusage_missing_groups() {
        assert!(parse_sysctl_swapusage("").is_err());
        assert!(parse_sysctl_swapusage("total = 4096.00M").is_err());
        assert!(parse_sysctl_swapusage("no swap here").is_err());
    }

    #[test]
    fn test_normalize_swap() {
        assert_eq!(normalize_swap(3.0, Some('K')), 3.0);
        assert_eq!(normalize_swap(3.0, Some('m')), 3.0 * 1024.0);
        assert_eq!(normalize_swap(1.0, Some('G')), 1024.0 * 1024.0);
        assert_eq!(normalize_swap(1.0, Some('t')), 1024.0 * 1024.0 * 1024.0);
        assert_eq!(normalize_swap(7.5, Some('X')), 7.5);
        assert_eq!(normalize_swap(7.5, None), 7.5);
    }

    #[test]
    fn test_parse_df_linux() {
        let usage = parse_df(LINUX_DF);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage["/"], 53);
        assert_eq!(usage["/home"], 27);
    }

    #[test]
    fn test_parse_df_darwin() {
        let usage = parse_df(DARWIN_DF);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage["/"], 4);
        assert_eq!(usage["/System/Volumes/VM"], 1);
    }

    #[test]
    fn test_parse_df_skips_malformed_lines() {
        let output = "\
/dev/sda1  100G  50G  50G  50%  /
/dev/sdb1  100G  50G
/dev/sdc1  100G  50G  50G  half  /mnt/c
/dev/sdd1  100G  50G  50G  x%  /mnt/d

/dev/sde1  100G  10G  90G  10%  /mnt/e
";
        let usage = parse_df(output);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage["/"], 50);
        assert_eq!(usage["/mnt/e"], 10);
    }
}
