//! Domain state machines.
//!
//! Each domain owns its state and message type; none of them perform IO
//! directly. Work is returned as [`crate::common::task::Task`] values.

pub mod acquisition;
pub mod card;
pub mod gallery;
