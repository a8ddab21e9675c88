//! Property-based tests for the status transition table.
//!
//! These tests use proptest to check the transition contract across the
//! full (status x status x role) grid rather than hand-picked cases.

use proptest::prelude::*;
use waybill::core::{engine, ActorRole, ShipmentStatus, TransitionError};

prop_compose! {
    fn arbitrary_status()(variant in 0..6u8) -> ShipmentStatus {
        match variant {
            0 => ShipmentStatus::Created,
            1 => ShipmentStatus::PickedUp,
            2 => ShipmentStatus::InTransit,
            3 => ShipmentStatus::OutForDelivery,
            4 => ShipmentStatus::Delivered,
            _ => ShipmentStatus::Failed,
        }
    }
}

prop_compose! {
    fn arbitrary_role()(driver in any::<bool>()) -> ActorRole {
        if driver {
            ActorRole::Driver
        } else {
            ActorRole::Admin
        }
    }
}

/// The six edges of the spec'd workflow, driver-only.
fn table_contains(from: ShipmentStatus, to: ShipmentStatus) -> bool {
    use ShipmentStatus::*;
    matches!(
        (from, to),
        (Created, PickedUp)
            | (PickedUp, InTransit)
            | (InTransit, OutForDelivery)
            | (InTransit, Failed)
            | (OutForDelivery, Delivered)
            | (OutForDelivery, Failed)
    )
}

proptest! {
    #[test]
    fn validation_agrees_with_allowed_transitions(
        from in arbitrary_status(),
        to in arbitrary_status(),
        role in arbitrary_role(),
    ) {
        let valid = engine::validate_transition(from, to.as_str(), role).is_ok();
        let listed = engine::allowed_transitions(from, role).contains(&to);
        prop_assert_eq!(valid, listed);
    }

    #[test]
    fn driver_validation_matches_the_table(
        from in arbitrary_status(),
        to in arbitrary_status(),
    ) {
        let result = engine::validate_transition(from, to.as_str(), ActorRole::Driver);
        if table_contains(from, to) {
            prop_assert_eq!(result, Ok(to));
        } else {
            prop_assert_eq!(
                result,
                Err(TransitionError::NotPermitted { from, to })
            );
        }
    }

    #[test]
    fn admin_never_moves_status(
        from in arbitrary_status(),
        to in arbitrary_status(),
    ) {
        let result = engine::validate_transition(from, to.as_str(), ActorRole::Admin);
        prop_assert!(result.is_err());
        // An admin rejection on a real edge must be the authorization
        // category, never a missing-edge report.
        if table_contains(from, to) {
            prop_assert_eq!(
                result,
                Err(TransitionError::RoleNotAuthorized {
                    role: ActorRole::Admin,
                    from,
                    to,
                })
            );
        }
    }

    #[test]
    fn terminal_states_allow_nothing(
        from in prop_oneof![Just(ShipmentStatus::Delivered), Just(ShipmentStatus::Failed)],
        role in arbitrary_role(),
    ) {
        prop_assert!(engine::allowed_transitions(from, role).is_empty());
    }

    #[test]
    fn unrecognized_strings_always_report_unknown_status(
        from in arbitrary_status(),
        role in arbitrary_role(),
        proposed in "[a-z][a-z_ ]{0,15}",
    ) {
        // Wire strings are uppercase, so these never parse; the unknown
        // category must win regardless of the current state.
        prop_assert_eq!(
            engine::validate_transition(from, &proposed, role),
            Err(TransitionError::UnknownStatus { value: proposed })
        );
    }

    #[test]
    fn allowed_transitions_is_deterministic(
        from in arbitrary_status(),
        role in arbitrary_role(),
    ) {
        let first = engine::allowed_transitions(from, role);
        let second = engine::allowed_transitions(from, role);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn role_rejection_implies_the_edge_exists(
        from in arbitrary_status(),
        to in arbitrary_status(),
        role in arbitrary_role(),
    ) {
        if let Err(TransitionError::RoleNotAuthorized { .. }) =
            engine::validate_transition(from, to.as_str(), role)
        {
            // Precedence: the edge check ran and passed before the role
            // check fired.
            prop_assert!(engine::allowed_transitions(from, ActorRole::Driver).contains(&to));
        }
    }
}
