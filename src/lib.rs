//! Waybill: shipment lifecycle core.
//!
//! Waybill models one consignment's journey from creation to delivery as a
//! role-gated finite state machine, with every change durably recorded on
//! an append-only timeline. It follows a "pure core, imperative shell"
//! split:
//!
//! - [`core`] holds the decision logic - status and role enums, the
//!   transition engine, and the immutable timeline. No side effects.
//! - [`service`] orchestrates state changes as stillwater effects over a
//!   persistence environment: validate through the engine, persist the new
//!   status, append a timeline entry, return the result.
//! - [`store`] is the persistence collaborator contract plus an in-memory
//!   reference implementation.
//!
//! The transition table: drivers move shipments
//! `CREATED -> PICKED_UP -> IN_TRANSIT -> OUT_FOR_DELIVERY -> DELIVERED`,
//! with `FAILED` reachable from `IN_TRANSIT` and `OUT_FOR_DELIVERY`.
//! `DELIVERED` and `FAILED` are terminal. Admins create shipments and
//! manage driver assignment but never drive status transitions.
//!
//! # Example
//!
//! ```rust
//! use waybill::core::{engine, ActorRole, ShipmentStatus};
//!
//! // What can a driver do with a shipment that is out for delivery?
//! let next = engine::allowed_transitions(ShipmentStatus::OutForDelivery, ActorRole::Driver);
//! assert_eq!(next, vec![ShipmentStatus::Delivered, ShipmentStatus::Failed]);
//!
//! // Terminal states accept nothing further.
//! let blocked = engine::validate_transition(
//!     ShipmentStatus::Delivered,
//!     "IN_TRANSIT",
//!     ActorRole::Driver,
//! );
//! assert!(blocked.is_err());
//! ```

pub mod core;
pub mod model;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Actor, ActorRole, ShipmentStatus, Timeline, TimelineEntry, TransitionError};
pub use model::{ContactInfo, NewParcel, NewShipment, Parcel, Shipment, ShipmentUpdate};
pub use service::{LifecycleError, ShipmentLifecycle, Violation};
pub use store::{EntryDraft, MemoryStore, ShipmentStore, StoreError};
