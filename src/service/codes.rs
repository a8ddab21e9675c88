//! Tracking code and barcode generation.
//!
//! Codes are a fixed prefix plus random uppercase characters drawn from a
//! v4 UUID. Uniqueness is the store's to confirm; callers retry on
//! collision up to [`MAX_GENERATION_ATTEMPTS`] and fail loudly after that
//! rather than looping forever.

use uuid::Uuid;

/// Retry bound for unique code generation.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

const TRACKING_PREFIX: &str = "SHP";
const TRACKING_SUFFIX_LEN: usize = 10;

const BARCODE_PREFIX: &str = "PKG";
const BARCODE_SUFFIX_LEN: usize = 12;

fn random_suffix(len: usize) -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .to_uppercase()
        .chars()
        .take(len)
        .collect()
}

/// A candidate shipment tracking code, e.g. `SHP3F2A09BC41`.
pub fn tracking_code_candidate() -> String {
    format!("{TRACKING_PREFIX}{}", random_suffix(TRACKING_SUFFIX_LEN))
}

/// A candidate parcel barcode, e.g. `PKG0B7E44D1A2C9`.
pub fn barcode_candidate() -> String {
    format!("{BARCODE_PREFIX}{}", random_suffix(BARCODE_SUFFIX_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_codes_have_prefix_and_length() {
        let code = tracking_code_candidate();
        assert!(code.starts_with("SHP"));
        assert_eq!(code.len(), 3 + TRACKING_SUFFIX_LEN);
        assert!(code[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn barcodes_have_prefix_and_length() {
        let barcode = barcode_candidate();
        assert!(barcode.starts_with("PKG"));
        assert_eq!(barcode.len(), 3 + BARCODE_SUFFIX_LEN);
    }

    #[test]
    fn candidates_vary() {
        // Not a uniqueness proof, just a sanity check on the entropy source.
        let codes: std::collections::HashSet<String> =
            (0..64).map(|_| tracking_code_candidate()).collect();
        assert!(codes.len() > 1);
    }
}
