//! Persistence collaborator contract.
//!
//! The lifecycle service talks to storage exclusively through
//! [`ShipmentStore`]. Each trait method is one atomic transaction: either
//! all of its writes land or none do. Timeline entries are created by the
//! store itself from an [`EntryDraft`], which stamps the in-transaction
//! status and timestamp - callers cannot write an entry whose status
//! disagrees with the shipment row.

mod memory;

pub use memory::MemoryStore;

use crate::core::{Actor, ShipmentStatus, Timeline};
use crate::model::{DriverId, Parcel, ParcelUpdate, Shipment, ShipmentUpdate};
use thiserror::Error;
use uuid::Uuid;

/// What the caller supplies for a timeline entry; the store fills in the
/// shipment id, the status at the time of the write, and the timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryDraft {
    pub actor: Actor,
    pub note: Option<String>,
}

impl EntryDraft {
    pub fn new(actor: Actor, note: Option<String>) -> Self {
        Self { actor, note }
    }

    pub fn noted(actor: Actor, note: impl Into<String>) -> Self {
        Self::new(actor, Some(note.into()))
    }
}

/// Store-layer failures. All are transaction-scoped: a failed call leaves
/// the store exactly as it was.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum StoreError {
    #[error("shipment {0} not found")]
    ShipmentNotFound(Uuid),

    #[error("parcel {0} not found")]
    ParcelNotFound(Uuid),

    /// The compare-and-set in [`ShipmentStore::commit_transition`] found a
    /// status other than the one the caller validated against. A concurrent
    /// transition won.
    #[error("shipment status changed concurrently: expected {expected}, found {actual}")]
    StatusConflict {
        expected: ShipmentStatus,
        actual: ShipmentStatus,
    },

    #[error("tracking code {0} already exists")]
    DuplicateTrackingCode(String),

    #[error("barcode {0} already exists")]
    DuplicateBarcode(String),

    /// Backend rejected the transaction (constraint violation,
    /// connectivity). Propagated to the caller unchanged.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence contract for shipments, parcels, and timelines.
///
/// Implementations must make every method atomic and must keep a
/// shipment's denormalized status equal to its latest timeline entry.
pub trait ShipmentStore: Send + Sync {
    /// Persist a new shipment together with its initial timeline entry
    /// (recorded at the shipment's status), atomically.
    fn insert_shipment(&self, shipment: &Shipment, draft: EntryDraft) -> Result<(), StoreError>;

    fn shipment(&self, id: Uuid) -> Result<Shipment, StoreError>;

    fn find_by_tracking_code(&self, code: &str) -> Result<Option<Shipment>, StoreError>;

    /// All shipments, newest created first.
    fn all_shipments(&self) -> Result<Vec<Shipment>, StoreError>;

    /// Shipments assigned to a driver, newest created first.
    fn shipments_for_driver(&self, driver_id: DriverId) -> Result<Vec<Shipment>, StoreError>;

    fn tracking_code_exists(&self, code: &str) -> Result<bool, StoreError>;

    fn barcode_exists(&self, barcode: &str) -> Result<bool, StoreError>;

    /// Whether the identity collaborator knows this driver.
    fn driver_exists(&self, driver_id: DriverId) -> Result<bool, StoreError>;

    /// Apply detail edits. No timeline entry is written.
    fn update_details(&self, id: Uuid, update: ShipmentUpdate) -> Result<Shipment, StoreError>;

    /// Change the assigned driver and append a timeline entry carrying the
    /// unchanged current status, atomically.
    fn set_assigned_driver(
        &self,
        id: Uuid,
        driver_id: Option<DriverId>,
        draft: EntryDraft,
    ) -> Result<Shipment, StoreError>;

    /// Compare-and-set status update plus timeline append, atomically.
    ///
    /// Fails with [`StoreError::StatusConflict`] when the stored status no
    /// longer equals `expected`; in that case nothing is written.
    fn commit_transition(
        &self,
        id: Uuid,
        expected: ShipmentStatus,
        new_status: ShipmentStatus,
        draft: EntryDraft,
    ) -> Result<Shipment, StoreError>;

    /// Full timeline for a shipment, oldest first. Idempotent read.
    fn timeline(&self, id: Uuid) -> Result<Timeline, StoreError>;

    /// Delete a shipment, cascading to its parcels and timeline.
    fn delete_shipment(&self, id: Uuid) -> Result<(), StoreError>;

    fn insert_parcel(&self, parcel: &Parcel) -> Result<(), StoreError>;

    fn parcel(&self, id: Uuid) -> Result<Parcel, StoreError>;

    fn parcels_for_shipment(&self, shipment_id: Uuid) -> Result<Vec<Parcel>, StoreError>;

    fn update_parcel(&self, id: Uuid, update: ParcelUpdate) -> Result<Parcel, StoreError>;

    fn delete_parcel(&self, id: Uuid) -> Result<(), StoreError>;
}
