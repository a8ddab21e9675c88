//! Accumulating input validation.
//!
//! Uses stillwater's `Validation` to collect every violation in one pass
//! instead of stopping at the first, so a caller fixing a form sees the
//! whole list at once.

use crate::model::{ContactInfo, NewParcel, NewShipment, ParcelUpdate, ShipmentUpdate};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single rejected input field.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Violation {
    #[error("{field} must not be empty")]
    EmptyField { field: String },

    #[error("parcel weight must be positive, got {weight}")]
    NonPositiveWeight { weight: f64 },
}

type Checked = Validation<(), NonEmptyVec<Violation>>;

fn require_filled(field: &str, value: &str) -> Checked {
    if value.trim().is_empty() {
        Validation::fail(Violation::EmptyField {
            field: field.to_string(),
        })
    } else {
        Validation::success(())
    }
}

fn require_positive_weight(weight: f64) -> Checked {
    if weight.is_finite() && weight > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(Violation::NonPositiveWeight { weight })
    }
}

/// Check one contact block. `who` prefixes field names in violations
/// ("sender", "receiver").
pub fn validate_contact(who: &str, contact: &ContactInfo) -> Checked {
    Validation::all_vec(vec![
        require_filled(&format!("{who} name"), &contact.name),
        require_filled(&format!("{who} phone"), &contact.phone),
        require_filled(&format!("{who} address"), &contact.address),
    ])
    .map(|_| ())
}

pub fn validate_new_shipment(input: &NewShipment) -> Checked {
    Validation::all_vec(vec![
        validate_contact("sender", &input.sender),
        validate_contact("receiver", &input.receiver),
    ])
    .map(|_| ())
}

/// Check detail edits; only the provided fields are validated.
pub fn validate_shipment_update(update: &ShipmentUpdate) -> Checked {
    let mut checks = Vec::new();
    if let Some(sender) = &update.sender {
        checks.push(validate_contact("sender", sender));
    }
    if let Some(receiver) = &update.receiver {
        checks.push(validate_contact("receiver", receiver));
    }
    Validation::all_vec(checks).map(|_| ())
}

pub fn validate_new_parcel(input: &NewParcel) -> Checked {
    let mut checks = vec![require_positive_weight(input.weight_kg)];
    if let Some(barcode) = &input.barcode {
        checks.push(require_filled("barcode", barcode));
    }
    Validation::all_vec(checks).map(|_| ())
}

pub fn validate_parcel_update(update: &ParcelUpdate) -> Checked {
    let mut checks = Vec::new();
    if let Some(weight) = update.weight_kg {
        checks.push(require_positive_weight(weight));
    }
    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, phone: &str, address: &str) -> ContactInfo {
        ContactInfo::new(name, phone, address)
    }

    #[test]
    fn valid_shipment_passes() {
        let input = NewShipment {
            sender: contact("Ann", "555-0100", "1 First St"),
            receiver: contact("Ben", "555-0101", "2 Second St"),
            assigned_driver: None,
            estimated_delivery: None,
        };
        assert!(validate_new_shipment(&input).is_success());
    }

    #[test]
    fn all_violations_are_accumulated() {
        let input = NewShipment {
            sender: contact("", "", "1 First St"),
            receiver: contact("Ben", "555-0101", "   "),
            assigned_driver: None,
            estimated_delivery: None,
        };

        match validate_new_shipment(&input) {
            Validation::Failure(violations) => {
                assert_eq!(violations.len(), 3);
                let fields: Vec<String> = violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect();
                assert!(fields.iter().any(|f| f.contains("sender name")));
                assert!(fields.iter().any(|f| f.contains("sender phone")));
                assert!(fields.iter().any(|f| f.contains("receiver address")));
            }
            Validation::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn parcel_weight_must_be_positive_and_finite() {
        for weight in [0.0, -2.5, f64::NAN, f64::INFINITY] {
            let input = NewParcel {
                weight_kg: weight,
                dimensions: None,
                fragile: false,
                barcode: None,
            };
            assert!(
                !validate_new_parcel(&input).is_success(),
                "weight {weight} should be rejected"
            );
        }
    }

    #[test]
    fn supplied_blank_barcode_is_rejected() {
        let input = NewParcel {
            weight_kg: 1.0,
            dimensions: None,
            fragile: true,
            barcode: Some("  ".to_string()),
        };
        assert!(!validate_new_parcel(&input).is_success());
    }

    #[test]
    fn update_validates_only_provided_fields() {
        assert!(validate_shipment_update(&ShipmentUpdate::default()).is_success());
        assert!(validate_parcel_update(&ParcelUpdate::default()).is_success());

        let bad = ShipmentUpdate {
            sender: Some(contact("", "555-0100", "1 First St")),
            ..ShipmentUpdate::default()
        };
        assert!(!validate_shipment_update(&bad).is_success());
    }
}
