//! Shared configuration library for carsift.
//!
//! Centralises defaults, file/env layering and validation for the viewer so
//! the `carsift` binary and integration tests resolve settings the same way.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{ConfigSource, EnvConfig, FileConfig};
pub use models::{
    AcquisitionConfig, GalleryConfig, ServerConfig, ViewerConfig,
};
pub use validation::ConfigGuardRailError;
