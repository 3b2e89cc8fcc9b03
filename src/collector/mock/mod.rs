//! Mock data sources for testing.
//!
//! This module provides `MockFs`, `MockRunner` and pre-built scenarios for
//! testing collectors without a real `/proc` or real system tools.

mod filesystem;
mod runner;
mod scenarios;

pub use filesystem::MockFs;
pub use runner::MockRunner;
pub use scenarios::{DARWIN_DF, LINUX_DF, TYPICAL_STAT};
