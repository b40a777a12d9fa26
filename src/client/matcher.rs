//! Deep partial matching of JSON values.

use serde_json::Value;

use crate::model::shape::{json_type_name, Mismatch};

/// Find the first place where `actual` does not contain `expected`.
///
/// Objects match when every expected key matches, extra keys are ignored. Arrays match
/// element by element by position; `actual` may hold extra trailing elements. Scalars must
/// be equal, with numbers compared by value.
pub fn find_mismatch(expected: &Value, actual: &Value) -> Option<Mismatch> {
    mismatch_at(expected, actual, "$")
}

fn mismatch_at(expected: &Value, actual: &Value, path: &str) -> Option<Mismatch> {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            expected.iter().find_map(|(key, expected)| {
                let path = format!("{}.{}", path, key);
                match actual.get(key) {
                    Some(actual) => mismatch_at(expected, actual, &path),
                    None => Some(Mismatch {
                        path,
                        expected: expected.to_string(),
                        actual: "missing".to_string(),
                    }),
                }
            })
        }
        (Value::Array(expected), Value::Array(actual)) => {
            if expected.len() > actual.len() {
                let index = actual.len();
                return Some(Mismatch {
                    path: format!("{}[{}]", path, index),
                    expected: expected[index].to_string(),
                    actual: "missing".to_string(),
                });
            }
            expected
                .iter()
                .zip(actual)
                .enumerate()
                .find_map(|(index, (expected, actual))| {
                    mismatch_at(expected, actual, &format!("{}[{}]", path, index))
                })
        }
        (Value::Number(e), Value::Number(a)) => {
            let equal = match (e.as_i64(), a.as_i64()) {
                (Some(e), Some(a)) => e == a,
                _ => e.as_f64() == a.as_f64(),
            };
            (!equal).then(|| scalar_mismatch(path, expected, actual))
        }
        (expected, actual) if expected == actual => None,
        (Value::Object(_) | Value::Array(_), _) => Some(Mismatch {
            path: path.to_string(),
            expected: json_type_name(expected).to_string(),
            actual: json_type_name(actual).to_string(),
        }),
        _ => Some(scalar_mismatch(path, expected, actual)),
    }
}

fn scalar_mismatch(path: &str, expected: &Value, actual: &Value) -> Mismatch {
    Mismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}
