//! Parsers for the Linux `/proc` filesystem, the preferred source of every
//! host fact that has one.

pub mod parser;

pub use parser::{CpuTicks, LoadAvg};
