//! Shipment status and actor role enums.
//!
//! Both enums are closed: every status a shipment can hold and every role
//! that can act on one is a variant here, so authorization decisions are
//! made over types rather than free-form strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of a shipment in its delivery lifecycle.
///
/// The wire representation (serde, [`ShipmentStatus::as_str`], `FromStr`)
/// is the screaming-snake form stored in the timeline: `CREATED`,
/// `PICKED_UP`, `IN_TRANSIT`, `OUT_FOR_DELIVERY`, `DELIVERED`, `FAILED`.
///
/// # Example
///
/// ```rust
/// use waybill::core::ShipmentStatus;
///
/// assert_eq!(ShipmentStatus::OutForDelivery.as_str(), "OUT_FOR_DELIVERY");
/// assert_eq!("DELIVERED".parse(), Ok(ShipmentStatus::Delivered));
/// assert!(ShipmentStatus::Delivered.is_terminal());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Created,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Failed,
}

impl ShipmentStatus {
    /// All statuses in canonical lifecycle order.
    ///
    /// Used upstream to populate choice lists; pure enumeration.
    pub fn all() -> &'static [ShipmentStatus] {
        &[
            Self::Created,
            Self::PickedUp,
            Self::InTransit,
            Self::OutForDelivery,
            Self::Delivered,
            Self::Failed,
        ]
    }

    /// The stored/wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::PickedUp => "PICKED_UP",
            Self::InTransit => "IN_TRANSIT",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Failed => "FAILED",
        }
    }

    /// Terminal statuses have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }

    /// Whether this status represents a failed delivery.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized status string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for ShipmentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "PICKED_UP" => Ok(Self::PickedUp),
            "IN_TRANSIT" => Ok(Self::InTransit),
            "OUT_FOR_DELIVERY" => Ok(Self::OutForDelivery),
            "DELIVERED" => Ok(Self::Delivered),
            "FAILED" => Ok(Self::Failed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Category of principal acting on a shipment.
///
/// Admins create shipments and manage driver assignment; drivers move
/// shipments through the delivery workflow. The transition table in
/// [`crate::core::engine`] is keyed on this enum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Admin,
    Driver,
}

impl ActorRole {
    /// The stored/wire string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Driver => "driver",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized role string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown actor role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for ActorRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "driver" => Ok(Self::Driver),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_strings() {
        for status in ShipmentStatus::all() {
            assert_eq!(status.as_str().parse::<ShipmentStatus>(), Ok(*status));
        }
    }

    #[test]
    fn status_enumeration_is_in_lifecycle_order() {
        let names: Vec<&str> = ShipmentStatus::all().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "CREATED",
                "PICKED_UP",
                "IN_TRANSIT",
                "OUT_FOR_DELIVERY",
                "DELIVERED",
                "FAILED",
            ]
        );
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        let err = "TELEPORTED".parse::<ShipmentStatus>().unwrap_err();
        assert_eq!(err, ParseStatusError("TELEPORTED".to_string()));
        // Casing matters: the wire form is exact.
        assert!("delivered".parse::<ShipmentStatus>().is_err());
    }

    #[test]
    fn terminal_statuses_are_delivered_and_failed() {
        assert!(ShipmentStatus::Delivered.is_terminal());
        assert!(ShipmentStatus::Failed.is_terminal());
        assert!(!ShipmentStatus::Created.is_terminal());
        assert!(!ShipmentStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn only_failed_is_a_failure() {
        assert!(ShipmentStatus::Failed.is_failure());
        assert!(!ShipmentStatus::Delivered.is_failure());
    }

    #[test]
    fn status_serializes_as_wire_string() {
        let json = serde_json::to_string(&ShipmentStatus::PickedUp).unwrap();
        assert_eq!(json, "\"PICKED_UP\"");
        let back: ShipmentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ShipmentStatus::PickedUp);
    }

    #[test]
    fn role_round_trips_through_wire_strings() {
        assert_eq!("admin".parse(), Ok(ActorRole::Admin));
        assert_eq!("driver".parse(), Ok(ActorRole::Driver));
        assert!("courier".parse::<ActorRole>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ActorRole::Driver).unwrap(), "\"driver\"");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ShipmentStatus::InTransit.to_string(), "IN_TRANSIT");
        assert_eq!(ActorRole::Admin.to_string(), "admin");
    }
}
