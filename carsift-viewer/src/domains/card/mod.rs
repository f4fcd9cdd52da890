//! Card domain - binds an ad card to its acquisition coordinator
//!
//! The [`CardController`] is the only owner of the coordinator registry: it
//! creates a coordinator when the card shows a new ad, discards the old one
//! on entity change, and routes responses to whichever coordinator is
//! registered for the response's key.

pub mod controller;
pub mod registry;

pub use self::controller::{CardController, CardFace, CardView};
pub use self::registry::CoordinatorRegistry;
