//! Parcel record and its input types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One physical package within a shipment.
///
/// Parcels are owned exclusively by their shipment and are deleted with it.
/// `barcode` is unique and immutable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: Uuid,
    pub shipment_id: Uuid,
    /// Weight in kilograms; strictly positive.
    pub weight_kg: f64,
    /// Free-form dimensions string, e.g. "40x30x20 cm".
    pub dimensions: Option<String>,
    pub fragile: bool,
    pub barcode: String,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a parcel to a shipment.
///
/// When `barcode` is absent a unique one is generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewParcel {
    pub weight_kg: f64,
    pub dimensions: Option<String>,
    pub fragile: bool,
    pub barcode: Option<String>,
}

/// Parcel edits. The barcode is immutable and cannot be updated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelUpdate {
    pub weight_kg: Option<f64>,
    pub dimensions: Option<String>,
    pub fragile: Option<bool>,
}
