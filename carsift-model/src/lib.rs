//! Core data model definitions shared across carsift crates.
#![allow(missing_docs)]

pub mod acquisition;
pub mod ad;
pub mod asset;
pub mod error;
pub mod ids;
pub mod prelude;

// Intentionally curated re-exports for downstream consumers.
pub use acquisition::{AcquisitionFailure, JobPhase, JobStatus, MediaCount};
pub use ad::{AdSummary, SourceRef};
pub use asset::{AssetHandle, AssetIndex};
pub use error::{ModelError, Result as ModelResult};
pub use ids::EntityKey;
