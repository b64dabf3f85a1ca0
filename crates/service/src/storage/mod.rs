//! Durable storage for the point collection.
//!
//! The whole collection is one logical document. Implementations must
//! serialize appends against each other and commit atomically so every
//! observable state is either before or after a given append.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use models::CollectionPoint;
use thiserror::Error;

pub mod json_file_store;

/// Failures of the backing medium. Every variant means the store is unavailable
/// for the current request; none of them are retried here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content of {} is not a valid points document: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("store operation `{op}` timed out after {timeout:?}")]
    Timeout { op: &'static str, timeout: Duration },
    #[error("cannot encode points document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Persistence seam used by the registry.
#[async_trait]
pub trait PointStore: Send + Sync {
    /// Read the full collection in insertion order.
    async fn load(&self) -> Result<Vec<CollectionPoint>, StoreError>;

    /// Load, append and commit as one serialized step.
    async fn append_one(&self, point: CollectionPoint) -> Result<(), StoreError>;
}
