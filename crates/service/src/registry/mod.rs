//! Registry Service: turns untrusted submissions into canonical, persisted
//! collection points and answers filtered reads.

pub mod service;
pub mod validation;

pub use service::{PointRegistry, RegistryPolicy};
pub use validation::{ValidationError, ValidationKind};
