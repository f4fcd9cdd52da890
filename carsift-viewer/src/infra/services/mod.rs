//! Service layer over the acquisition backend.
//!
//! Domains depend on the [`acquisition::AcquisitionApiService`] trait only;
//! the reqwest-backed adapter and the scripted stub in `infra::testing` are
//! interchangeable behind it.

pub mod acquisition;

pub use acquisition::{AcquisitionApiAdapter, AcquisitionApiService, AssetFetch};
