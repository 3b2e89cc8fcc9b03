//! Parsers for system tool output, the fallback source on hosts without
//! `/proc` and the only source of disk usage.

pub mod parser;

pub use parser::SwapUsage;
