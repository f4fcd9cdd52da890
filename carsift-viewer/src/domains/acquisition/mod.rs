//! Acquisition domain - makes an entity's gallery exist
//!
//! One [`AcquisitionCoordinator`] per entity key walks
//! `NotStarted -> Checking -> Triggering -> Polling` and settles in
//! `Ready`, `Empty` or `Failed`. Every response it schedules carries a
//! [`Ticket`]; responses whose ticket no longer matches the coordinator's
//! current activation are dropped.

pub mod coordinator;
pub mod messages;
pub mod types;
pub mod update;

pub use self::coordinator::AcquisitionCoordinator;
pub use self::messages::{AcquisitionMessage, PollOutcome};
pub use self::types::{
    AcquisitionSnapshot, AcquisitionStatus, Epoch, EpochSource, PollPolicy,
    Ticket,
};
