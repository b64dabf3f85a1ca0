use std::sync::Arc;

use models::{timestamp::now_millis, CollectionPoint, MATERIAL_CATALOG};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::validation::{self, ValidatedPoint};
use crate::errors::ServiceError;
use crate::metrics;
use crate::storage::PointStore;

/// Registry behaviour switches, usually taken from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryPolicy {
    /// Fail with `InvalidMaterials` when every material is blank after trimming.
    pub reject_blank_materials: bool,
}

/// Validates submissions, persists them through a [`PointStore`] and serves reads.
///
/// Holds no copy of the collection: every read goes back to the store.
#[derive(Clone)]
pub struct PointRegistry {
    store: Arc<dyn PointStore>,
    policy: RegistryPolicy,
}

impl PointRegistry {
    pub fn new(store: Arc<dyn PointStore>, policy: RegistryPolicy) -> Self {
        Self { store, policy }
    }

    /// Validate `raw`, build the canonical record and append it to the store.
    ///
    /// Validation completes before any store access, so a rejected submission
    /// leaves the store untouched.
    pub async fn create(&self, raw: &Value) -> Result<CollectionPoint, ServiceError> {
        let input = validation::validate(raw, self.policy.reject_blank_materials).map_err(|e| {
            metrics::VALIDATION_REJECTED_TOTAL
                .with_label_values(&[e.kind.as_str()])
                .inc();
            debug!(kind = e.kind.as_str(), "point submission rejected");
            e
        })?;
        if input.materials.is_empty() {
            warn!(name = %input.name, "point accepted with no non-blank materials");
        }

        let point = build_point(input);
        self.store.append_one(point.clone()).await.map_err(|e| {
            error!(error = %e, id = %point.id, "failed to persist point");
            e
        })?;

        metrics::POINTS_CREATED_TOTAL.inc();
        info!(id = %point.id, name = %point.name, "point created");
        Ok(point)
    }

    /// All points in insertion order, or only those accepting `material`.
    ///
    /// An absent or blank filter returns everything. Matching is exact after
    /// trimming and lowercasing both sides.
    pub async fn list(&self, material: Option<&str>) -> Result<Vec<CollectionPoint>, ServiceError> {
        let points = self.store.load().await.map_err(|e| {
            error!(error = %e, "failed to load points");
            e
        })?;
        match material.map(str::trim).filter(|m| !m.is_empty()) {
            None => Ok(points),
            Some(m) => Ok(points.into_iter().filter(|p| p.accepts(m)).collect()),
        }
    }

    pub fn materials_catalog(&self) -> &'static [&'static str] {
        MATERIAL_CATALOG
    }
}

fn build_point(input: ValidatedPoint) -> CollectionPoint {
    CollectionPoint {
        id: Uuid::new_v4(),
        name: input.name,
        address: input.address,
        lat: input.lat,
        lng: input.lng,
        materials: input.materials,
        hours: input.hours,
        contact: input.contact,
        notes: input.notes,
        created_at: now_millis(),
    }
}
