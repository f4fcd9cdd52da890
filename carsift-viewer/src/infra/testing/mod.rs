//! In-memory collaborators for tests and the `demo` command.

pub mod stubs;

pub use stubs::{ScriptedAcquisitionService, ServiceCall, ServiceCallKind};
