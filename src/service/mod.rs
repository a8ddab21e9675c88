//! Effectful shell around the pure core.
//!
//! [`ShipmentLifecycle`] is the single authority for mutating a shipment's
//! status and timeline. Its operations return stillwater effects over an
//! environment implementing [`crate::store::ShipmentStore`]; nothing
//! touches storage until the effect is run.

pub mod codes;
mod error;
mod lifecycle;
pub mod validate;

pub use error::LifecycleError;
pub use lifecycle::ShipmentLifecycle;
pub use validate::Violation;
