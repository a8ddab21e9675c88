//! Pure core of the shipment lifecycle.
//!
//! This module contains the decision logic with no side effects:
//! - Status and role definitions as closed enums
//! - The role-gated status transition engine
//! - Immutable timeline tracking
//!
//! All logic here is pure (no I/O, no clocks beyond timestamps carried in
//! values), following the "pure core, imperative shell" split: the
//! effectful orchestration lives in [`crate::service`].

pub mod engine;
mod history;
mod status;

pub use engine::TransitionError;
pub use history::{Actor, Timeline, TimelineEntry};
pub use status::{ActorRole, ParseRoleError, ParseStatusError, ShipmentStatus};
