//! Snapshot of the model surface for client crates.

pub use super::acquisition::{
    AcquisitionFailure, JobPhase, JobStatus, MediaCount,
};
pub use super::ad::{AdSummary, SourceRef};
pub use super::asset::{AssetHandle, AssetIndex};
pub use super::error::ModelError;
pub use super::ids::EntityKey;
