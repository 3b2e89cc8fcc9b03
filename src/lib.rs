//! hostmetrics - host metric collection and storage for a monitoring agent.
//!
//! Provides:
//! - `storage`: typed metric store (gauges, counters, dynamic families)
//! - `collector`: host collectors (`/proc` first, system tools as fallback)
//! - `fmt`: display formatting of stored values
//! - `config`: collection settings
//!
//! The `hostmetricsd` binary drives collection on a timer.

pub mod collector;
pub mod config;
pub mod fmt;
pub mod storage;
