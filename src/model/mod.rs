//! Domain records: shipments and the parcels they carry.

mod parcel;
mod shipment;

pub use parcel::{NewParcel, Parcel, ParcelUpdate};
pub use shipment::{ContactInfo, NewShipment, Shipment, ShipmentUpdate};

/// Identifier of a driver in the external identity collaborator's keyspace.
pub type DriverId = i64;
