//! In-memory store implementation.
//!
//! Reference implementation of [`ShipmentStore`] backed by a single mutex;
//! the lock scope is the transaction boundary, so every trait method is
//! atomic by construction. Cloning shares the underlying data, which makes
//! it usable as a stillwater environment.

use super::{EntryDraft, ShipmentStore, StoreError};
use crate::core::{ShipmentStatus, Timeline, TimelineEntry};
use crate::model::{DriverId, Parcel, ParcelUpdate, Shipment, ShipmentUpdate};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    /// Insertion order preserved; newest-first reads reverse it.
    shipments: Vec<Shipment>,
    parcels: Vec<Parcel>,
    timelines: HashMap<Uuid, Timeline>,
    drivers: HashSet<DriverId>,
}

/// Mutex-backed [`ShipmentStore`] for tests, examples, and single-process
/// deployments.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a driver known to the store. Drivers are owned by the external
    /// identity collaborator; this seeds its view for tests and demos.
    pub fn register_driver(&self, driver_id: DriverId) {
        self.lock().drivers.insert(driver_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a writer panicked mid-transaction; the data
        // is still a consistent snapshot of completed transactions.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Inner {
    fn shipment_mut(&mut self, id: Uuid) -> Result<&mut Shipment, StoreError> {
        self.shipments
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::ShipmentNotFound(id))
    }

    fn append_entry(&mut self, id: Uuid, status: ShipmentStatus, draft: EntryDraft) {
        let entry = TimelineEntry {
            shipment_id: id,
            status,
            actor: draft.actor,
            note: draft.note,
            recorded_at: Utc::now(),
        };
        let timeline = self.timelines.entry(id).or_default();
        *timeline = timeline.record(entry);
    }
}

impl ShipmentStore for MemoryStore {
    fn insert_shipment(&self, shipment: &Shipment, draft: EntryDraft) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner
            .shipments
            .iter()
            .any(|s| s.tracking_code == shipment.tracking_code)
        {
            return Err(StoreError::DuplicateTrackingCode(
                shipment.tracking_code.clone(),
            ));
        }
        inner.shipments.push(shipment.clone());
        inner.append_entry(shipment.id, shipment.status, draft);
        Ok(())
    }

    fn shipment(&self, id: Uuid) -> Result<Shipment, StoreError> {
        self.lock()
            .shipments
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::ShipmentNotFound(id))
    }

    fn find_by_tracking_code(&self, code: &str) -> Result<Option<Shipment>, StoreError> {
        Ok(self
            .lock()
            .shipments
            .iter()
            .find(|s| s.tracking_code == code)
            .cloned())
    }

    fn all_shipments(&self) -> Result<Vec<Shipment>, StoreError> {
        Ok(self.lock().shipments.iter().rev().cloned().collect())
    }

    fn shipments_for_driver(&self, driver_id: DriverId) -> Result<Vec<Shipment>, StoreError> {
        Ok(self
            .lock()
            .shipments
            .iter()
            .rev()
            .filter(|s| s.assigned_driver == Some(driver_id))
            .cloned()
            .collect())
    }

    fn tracking_code_exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.lock().shipments.iter().any(|s| s.tracking_code == code))
    }

    fn barcode_exists(&self, barcode: &str) -> Result<bool, StoreError> {
        Ok(self.lock().parcels.iter().any(|p| p.barcode == barcode))
    }

    fn driver_exists(&self, driver_id: DriverId) -> Result<bool, StoreError> {
        Ok(self.lock().drivers.contains(&driver_id))
    }

    fn update_details(&self, id: Uuid, update: ShipmentUpdate) -> Result<Shipment, StoreError> {
        let mut inner = self.lock();
        let shipment = inner.shipment_mut(id)?;
        if let Some(sender) = update.sender {
            shipment.sender = sender;
        }
        if let Some(receiver) = update.receiver {
            shipment.receiver = receiver;
        }
        if let Some(estimated) = update.estimated_delivery {
            shipment.estimated_delivery = Some(estimated);
        }
        shipment.updated_at = Utc::now();
        Ok(shipment.clone())
    }

    fn set_assigned_driver(
        &self,
        id: Uuid,
        driver_id: Option<DriverId>,
        draft: EntryDraft,
    ) -> Result<Shipment, StoreError> {
        let mut inner = self.lock();
        let shipment = inner.shipment_mut(id)?;
        shipment.assigned_driver = driver_id;
        shipment.updated_at = Utc::now();
        let snapshot = shipment.clone();
        inner.append_entry(id, snapshot.status, draft);
        Ok(snapshot)
    }

    fn commit_transition(
        &self,
        id: Uuid,
        expected: ShipmentStatus,
        new_status: ShipmentStatus,
        draft: EntryDraft,
    ) -> Result<Shipment, StoreError> {
        let mut inner = self.lock();
        let shipment = inner.shipment_mut(id)?;
        if shipment.status != expected {
            warn!(
                shipment = %id,
                expected = %expected,
                actual = %shipment.status,
                "rejecting stale status transition"
            );
            return Err(StoreError::StatusConflict {
                expected,
                actual: shipment.status,
            });
        }
        shipment.status = new_status;
        shipment.updated_at = Utc::now();
        let snapshot = shipment.clone();
        inner.append_entry(id, new_status, draft);
        Ok(snapshot)
    }

    fn timeline(&self, id: Uuid) -> Result<Timeline, StoreError> {
        let inner = self.lock();
        if !inner.shipments.iter().any(|s| s.id == id) {
            return Err(StoreError::ShipmentNotFound(id));
        }
        Ok(inner.timelines.get(&id).cloned().unwrap_or_default())
    }

    fn delete_shipment(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.shipments.len();
        inner.shipments.retain(|s| s.id != id);
        if inner.shipments.len() == before {
            return Err(StoreError::ShipmentNotFound(id));
        }
        inner.parcels.retain(|p| p.shipment_id != id);
        inner.timelines.remove(&id);
        Ok(())
    }

    fn insert_parcel(&self, parcel: &Parcel) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if !inner.shipments.iter().any(|s| s.id == parcel.shipment_id) {
            return Err(StoreError::ShipmentNotFound(parcel.shipment_id));
        }
        if inner.parcels.iter().any(|p| p.barcode == parcel.barcode) {
            return Err(StoreError::DuplicateBarcode(parcel.barcode.clone()));
        }
        inner.parcels.push(parcel.clone());
        Ok(())
    }

    fn parcel(&self, id: Uuid) -> Result<Parcel, StoreError> {
        self.lock()
            .parcels
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::ParcelNotFound(id))
    }

    fn parcels_for_shipment(&self, shipment_id: Uuid) -> Result<Vec<Parcel>, StoreError> {
        Ok(self
            .lock()
            .parcels
            .iter()
            .filter(|p| p.shipment_id == shipment_id)
            .cloned()
            .collect())
    }

    fn update_parcel(&self, id: Uuid, update: ParcelUpdate) -> Result<Parcel, StoreError> {
        let mut inner = self.lock();
        let parcel = inner
            .parcels
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::ParcelNotFound(id))?;
        if let Some(weight) = update.weight_kg {
            parcel.weight_kg = weight;
        }
        if let Some(dimensions) = update.dimensions {
            parcel.dimensions = Some(dimensions);
        }
        if let Some(fragile) = update.fragile {
            parcel.fragile = fragile;
        }
        Ok(parcel.clone())
    }

    fn delete_parcel(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.parcels.len();
        inner.parcels.retain(|p| p.id != id);
        if inner.parcels.len() == before {
            return Err(StoreError::ParcelNotFound(id));
        }
        Ok(())
    }
}
