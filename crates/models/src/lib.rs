//! Domain types for the collection point registry.
//! - `point`: the persisted `CollectionPoint` record and its on-disk document.
//! - `limits`: field bounds shared by validation and normalization.
//! - `catalog`: the fixed Material Catalog used to seed client filters.

pub mod catalog;
pub mod limits;
pub mod point;
pub mod timestamp;

pub use catalog::MATERIAL_CATALOG;
pub use point::{CollectionPoint, PointsDocument};
