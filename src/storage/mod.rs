pub mod host;
pub mod model;
mod store;

pub use model::{MetricKind, MetricReading, Snapshot, Transform};
pub use store::{Storage, StorageError};
