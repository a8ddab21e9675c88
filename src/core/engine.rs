//! Pure status transition engine.
//!
//! Answers one question with no side effects: can this actor role move a
//! shipment from status A to status B? The transition table is a `match`
//! over [`ShipmentStatus`], so adding a status without wiring its edges is
//! a compile error rather than a silent dead end.
//!
//! Validation outcomes are values, never panics. The check order is part of
//! the contract: an unknown proposed status wins over a missing edge, which
//! wins over an unauthorized role.
//!
//! # Example
//!
//! ```rust
//! use waybill::core::{engine, ActorRole, ShipmentStatus};
//!
//! let next = engine::validate_transition(
//!     ShipmentStatus::Created,
//!     "PICKED_UP",
//!     ActorRole::Driver,
//! );
//! assert_eq!(next, Ok(ShipmentStatus::PickedUp));
//!
//! // Terminal states have no outgoing edges.
//! assert!(engine::allowed_transitions(ShipmentStatus::Delivered, ActorRole::Driver).is_empty());
//! ```

use super::status::{ActorRole, ShipmentStatus};
use thiserror::Error;

/// Why a proposed transition was rejected.
///
/// Display messages are meant to be surfaced to the caller verbatim, and
/// distinguish the three rejection categories.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TransitionError {
    /// The proposed status is not one of the six known values.
    #[error("unknown status: {value}")]
    UnknownStatus { value: String },

    /// No edge exists from the current status to the proposed one. Covers
    /// terminal states and same-status "transitions".
    #[error("cannot transition from {from} to {to}")]
    NotPermitted {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    /// The edge exists but the acting role is not on it.
    #[error("{role} cannot change status from {from} to {to}")]
    RoleNotAuthorized {
        role: ActorRole,
        from: ShipmentStatus,
        to: ShipmentStatus,
    },
}

const DRIVER_ONLY: &[ActorRole] = &[ActorRole::Driver];

/// Outgoing edges for a status, each labeled with the roles allowed to
/// traverse it. Immutable table, fixed at compile time.
fn edges(from: ShipmentStatus) -> &'static [(ShipmentStatus, &'static [ActorRole])] {
    use ShipmentStatus::*;
    match from {
        Created => &[(PickedUp, DRIVER_ONLY)],
        PickedUp => &[(InTransit, DRIVER_ONLY)],
        InTransit => &[(OutForDelivery, DRIVER_ONLY), (Failed, DRIVER_ONLY)],
        OutForDelivery => &[(Delivered, DRIVER_ONLY), (Failed, DRIVER_ONLY)],
        Delivered | Failed => &[],
    }
}

/// Validate a proposed transition, returning the parsed target status.
///
/// Checks apply in contract order:
/// 1. `proposed` must parse to a known status ([`TransitionError::UnknownStatus`]);
/// 2. an edge `current -> proposed` must exist ([`TransitionError::NotPermitted`]);
/// 3. `actor` must be on that edge ([`TransitionError::RoleNotAuthorized`]).
pub fn validate_transition(
    current: ShipmentStatus,
    proposed: &str,
    actor: ActorRole,
) -> Result<ShipmentStatus, TransitionError> {
    let target: ShipmentStatus =
        proposed.parse().map_err(|_| TransitionError::UnknownStatus {
            value: proposed.to_string(),
        })?;

    let Some((_, roles)) = edges(current).iter().find(|(to, _)| *to == target) else {
        return Err(TransitionError::NotPermitted {
            from: current,
            to: target,
        });
    };

    if !roles.contains(&actor) {
        return Err(TransitionError::RoleNotAuthorized {
            role: actor,
            from: current,
            to: target,
        });
    }

    Ok(target)
}

/// Every status reachable in one step from `current` by the given role.
///
/// Empty for terminal states regardless of role.
pub fn allowed_transitions(current: ShipmentStatus, actor: ActorRole) -> Vec<ShipmentStatus> {
    edges(current)
        .iter()
        .filter(|(_, roles)| roles.contains(&actor))
        .map(|(to, _)| *to)
        .collect()
}

/// Whether a raw string names one of the six statuses.
pub fn is_known_status(value: &str) -> bool {
    value.parse::<ShipmentStatus>().is_ok()
}
