//! Fixed-point currency conversion. The provider encodes every monetary
//! amount as milliunits: the integer 1000 is 1.00 in currency units.

use std::collections::BTreeMap;

const MILLIUNITS_PER_UNIT: f64 = 1000.0;

/// Exact conversion from raw milliunits to currency units.
pub fn to_currency(milliunits: i64) -> f64 {
    milliunits as f64 / MILLIUNITS_PER_UNIT
}

/// Conversion for write paths: rounds to the nearest integer milliunit,
/// never truncates.
pub fn to_milliunits(currency: f64) -> i64 {
    (currency * MILLIUNITS_PER_UNIT).round() as i64
}

pub fn opt_to_currency(milliunits: Option<i64>) -> Option<f64> {
    milliunits.map(to_currency)
}

/// Element-wise conversion for month-keyed amount maps (debt interest
/// rates, minimum payments, escrow amounts).
pub fn map_to_currency(map: &BTreeMap<String, i64>) -> BTreeMap<String, f64> {
    map.iter().map(|(k, v)| (k.clone(), to_currency(*v))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_is_exact_division() {
        assert_eq!(to_currency(1000), 1.0);
        assert_eq!(to_currency(-25_500), -25.5);
        assert_eq!(to_currency(1), 0.001);
        assert_eq!(to_currency(0), 0.0);
    }

    #[test]
    fn round_trip_preserves_raw_amounts() {
        for m in [0i64, 1, -1, 999, 1000, -25_500, 123_456_789, -987_654_321] {
            assert_eq!(to_milliunits(to_currency(m)), m);
        }
    }

    #[test]
    fn write_conversion_rounds_instead_of_truncating() {
        // int(1.0005 * 1000) would truncate to 1000
        assert_eq!(to_milliunits(1.0006), 1001);
        assert_eq!(to_milliunits(-1.0006), -1001);
        assert_eq!(to_milliunits(0.9994), 999);
    }

    #[test]
    fn maps_convert_element_wise() {
        let mut map = BTreeMap::new();
        map.insert("2024-01-01".to_string(), 3_500);
        map.insert("2024-02-01".to_string(), -1_000);
        let converted = map_to_currency(&map);
        assert_eq!(converted["2024-01-01"], 3.5);
        assert_eq!(converted["2024-02-01"], -1.0);
    }
}
