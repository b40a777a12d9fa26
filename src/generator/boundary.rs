//! Named boundary constants used by the scenario catalog.

use serde_json::{json, Value};

pub const INT32_MIN: i64 = i32::MIN as i64;
pub const INT32_MAX: i64 = i32::MAX as i64;
pub const INT32_UNDER_MIN: i64 = INT32_MIN - 1;
pub const INT32_OVER_MAX: i64 = INT32_MAX + 1;

pub const INT64_MIN: i64 = i64::MIN;
pub const INT64_MAX: i64 = i64::MAX;
/// Sent as an unsigned JSON integer.
pub const INT64_OVER_MAX: u64 = i64::MAX as u64 + 1;
/// Nearest float to `i64::MIN - 1`, sent as a JSON float.
pub const INT64_UNDER_MIN: f64 = -9_223_372_036_854_775_809.0;

/// Maximum length of a `text` column.
pub const TEXT_MAX_LENGTH: i64 = 65_535;
pub const TEXT_OVER_MAX_LENGTH: i64 = TEXT_MAX_LENGTH + 1;

/// Maximum length of a `varchar` column.
pub const VARCHAR_MAX_LENGTH: i64 = 255;
pub const VARCHAR_OVER_MAX_LENGTH: i64 = VARCHAR_MAX_LENGTH + 1;

/// Canonical SQL-injection-shaped payload; must be stored verbatim.
pub static SQL_INJECTION: &str = "'; DROP TABLE news; --";

/// A named boundary constant and the JSON literal sent for it.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryValue {
    pub name: &'static str,
    pub value: Value,
}

impl BoundaryValue {
    pub fn new(name: &'static str, value: Value) -> Self {
        Self { name, value }
    }
}

/// Every named boundary constant as a descriptor.
pub fn descriptors() -> Vec<BoundaryValue> {
    vec![
        BoundaryValue::new("INT32_MIN", json!(INT32_MIN)),
        BoundaryValue::new("INT32_MAX", json!(INT32_MAX)),
        BoundaryValue::new("INT32_UNDER_MIN", json!(INT32_UNDER_MIN)),
        BoundaryValue::new("INT32_OVER_MAX", json!(INT32_OVER_MAX)),
        BoundaryValue::new("INT64_MIN", json!(INT64_MIN)),
        BoundaryValue::new("INT64_MAX", json!(INT64_MAX)),
        BoundaryValue::new("INT64_UNDER_MIN", json!(INT64_UNDER_MIN)),
        BoundaryValue::new("INT64_OVER_MAX", json!(INT64_OVER_MAX)),
        BoundaryValue::new("TEXT_MAX_LENGTH", json!(TEXT_MAX_LENGTH)),
        BoundaryValue::new("TEXT_OVER_MAX_LENGTH", json!(TEXT_OVER_MAX_LENGTH)),
        BoundaryValue::new("VARCHAR_MAX_LENGTH", json!(VARCHAR_MAX_LENGTH)),
        BoundaryValue::new("VARCHAR_OVER_MAX_LENGTH", json!(VARCHAR_OVER_MAX_LENGTH)),
        BoundaryValue::new("SQL_INJECTION", json!(SQL_INJECTION)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Option<BoundaryValue> {
        descriptors().into_iter().find(|d| d.name == name)
    }

    #[test]
    fn over_int64_max_is_an_unsigned_integer() {
        let value = named("INT64_OVER_MAX").unwrap().value;
        assert!(value.is_u64());
        assert!(!value.is_i64());
        assert_eq!(value.as_u64(), Some(9_223_372_036_854_775_808));
    }

    #[test]
    fn under_int64_min_is_a_float() {
        assert!(named("INT64_UNDER_MIN").unwrap().value.is_f64());
    }

    #[test]
    fn int32_neighbours_are_one_past_bounds() {
        assert_eq!(INT32_OVER_MAX, 2_147_483_648);
        assert_eq!(INT32_UNDER_MIN, -2_147_483_649);
    }

    #[test]
    fn descriptor_names_are_unique() {
        let descriptors = descriptors();
        for (i, d) in descriptors.iter().enumerate() {
            assert!(descriptors[i + 1..].iter().all(|other| other.name != d.name));
        }
    }
}
