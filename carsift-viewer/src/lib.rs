//! carsift viewer library
//!
//! Client-side core of the car-shopping triage tool: it makes sure an ad's
//! photo gallery exists before the user can page through it, triggering and
//! tracking a backend acquisition job when it does not.
//!
//! Notes
//! - `domains` holds the state machines (acquisition coordinator, gallery
//!   presenter, card controller); they never touch the network directly and
//!   return [`common::task::Task`] values instead.
//! - `runtime` executes those tasks on tokio and feeds results back one
//!   message at a time.
//! - The `carsift` binary in `src/main.rs` drives the same stack headlessly.

pub mod app;
pub mod common;
pub mod domains;
pub mod infra;
pub mod runtime;

pub use app::{App, AppView};
pub use common::messages::Message;
pub use runtime::{Program, Runtime};
