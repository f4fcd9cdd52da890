//! Contracts shared by the carsift client and any backend speaking to it.
//!
//! The route table doubles as axum path templates (`{param}` segments), so a
//! test or stand-in server can mount handlers on exactly the paths the client
//! requests.

pub mod routes;
pub mod wire;

/// Frequently used imports for client crates.
pub mod prelude {
    pub use super::routes::{utils, v1};
    pub use super::wire::{
        AcquireMediaRequest, AcquisitionProgressResponse, MediaCountResponse,
    };
}
