//! Service layer for the collection point registry.
//! - `storage`: durable, single-writer persistence of the point collection.
//! - `registry`: validation/normalization of submissions and filtered reads.
//! - `metrics`: Prometheus counters for registry and store activity.

pub mod errors;
pub mod metrics;
pub mod registry;
pub mod runtime;
pub mod storage;

pub use errors::ServiceError;
pub use registry::{PointRegistry, RegistryPolicy};
pub use storage::{json_file_store::JsonFileStore, PointStore, StoreError};
