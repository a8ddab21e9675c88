//! Shipment record and its input types.

use crate::core::ShipmentStatus;
use crate::model::DriverId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact details for one end of a shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

/// One consignment tracked end-to-end from creation to delivery or failure.
///
/// `status` is a denormalized cache of the latest timeline entry's status;
/// the store keeps the two in lockstep. `tracking_code` is globally unique
/// and never changes after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: Uuid,
    pub tracking_code: String,
    pub sender: ContactInfo,
    pub receiver: ContactInfo,
    pub status: ShipmentStatus,
    pub assigned_driver: Option<DriverId>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    /// Whether the shipment has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Input for creating a shipment. Status and tracking code are not inputs:
/// every shipment starts at `CREATED` with a generated code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewShipment {
    pub sender: ContactInfo,
    pub receiver: ContactInfo,
    pub assigned_driver: Option<DriverId>,
    pub estimated_delivery: Option<DateTime<Utc>>,
}

/// Detail edits. Never touches status, assignment, or the timeline.
/// `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentUpdate {
    pub sender: Option<ContactInfo>,
    pub receiver: Option<ContactInfo>,
    pub estimated_delivery: Option<DateTime<Utc>>,
}
