//! Lifecycle error taxonomy.
//!
//! All variants are recoverable and request-scoped; none are fatal to the
//! process. Engine and store reasons pass through transparently so callers
//! can surface them verbatim.

use crate::core::TransitionError;
use crate::model::DriverId;
use crate::service::validate::Violation;
use crate::store::StoreError;
use thiserror::Error;

/// Failures reported by [`crate::service::ShipmentLifecycle`] operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LifecycleError {
    /// The engine rejected the proposed transition. Unwrapped: the engine's
    /// message is the caller-facing message.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Input validation rejected the request; all violations are collected,
    /// not just the first.
    #[error("invalid input: {}", format_violations(.0))]
    Invalid(Vec<Violation>),

    /// Unique code generation ran past its retry bound. Defensive: should
    /// not occur given the code space size.
    #[error("gave up generating a unique {what} after {attempts} attempts")]
    GenerationExhausted {
        what: &'static str,
        attempts: usize,
    },

    /// Assignment or creation referenced a driver the identity collaborator
    /// does not know.
    #[error("driver {driver_id} does not exist")]
    UnknownDriver { driver_id: DriverId },

    /// The persistence collaborator rejected the transaction.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActorRole, ShipmentStatus};

    #[test]
    fn transition_errors_pass_through_verbatim() {
        let engine_err = TransitionError::RoleNotAuthorized {
            role: ActorRole::Admin,
            from: ShipmentStatus::Created,
            to: ShipmentStatus::PickedUp,
        };
        let lifecycle_err = LifecycleError::from(engine_err.clone());
        assert_eq!(lifecycle_err.to_string(), engine_err.to_string());
    }

    #[test]
    fn violations_are_joined_into_one_message() {
        let err = LifecycleError::Invalid(vec![
            Violation::EmptyField {
                field: "sender name".to_string(),
            },
            Violation::NonPositiveWeight { weight: -1.0 },
        ]);
        let message = err.to_string();
        assert!(message.contains("sender name"));
        assert!(message.contains("; "));
    }
}
