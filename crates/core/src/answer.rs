//! Answer checking: decides whether a learner's query result matches a level's
//! expected result.
//!
//! The comparison is order-sensitive on the outer sequence and key-order
//! insensitive inside objects. Objects are re-emitted with keys in code-point
//! order and nested objects are normalized the same way, but arrays nested
//! inside an object keep their elements as-is, element objects included.
//! Numbers are compared by value everywhere, so `1` and `1.0` agree.

use serde_json::{Map, Number};

use crate::model::Value;

/// Normalize a single result element for comparison.
#[must_use]
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sorted_object(map)),
        other => normalize_numbers(other),
    }
}

fn sorted_object(map: &Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Object(inner) => Value::Object(sorted_object(inner)),
                other => normalize_numbers(other),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Rewrite every number to one spelling per value; structure and key order are kept.
fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(integral(n)),
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), normalize_numbers(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Whole floats that fit in `i64` become integers.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(n: &Number) -> Number {
    match n.as_f64() {
        Some(f)
            if n.is_f64() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
        {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

/// `true` when `candidate` and `expected` serialize identically after
/// canonicalizing each element.
#[must_use]
pub fn is_equivalent(candidate: &[Value], expected: &[Value]) -> bool {
    if candidate.len() != expected.len() {
        return false;
    }
    match (serialize(candidate), serialize(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn serialize(values: &[Value]) -> Option<String> {
    let canonical: Vec<Value> = values.iter().map(canonicalize).collect();
    serde_json::to_string(&canonical).ok()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn empty_matches_only_empty() {
        assert!(is_equivalent(&[], &[]));
        assert!(!is_equivalent(&[], &seq(json!([1]))));
        assert!(!is_equivalent(&seq(json!([null])), &[]));
    }

    #[test]
    fn key_order_is_ignored() {
        assert!(is_equivalent(
            &seq(json!([{ "a": 1, "b": 2 }])),
            &seq(json!([{ "b": 2, "a": 1 }]))
        ));
    }

    #[test]
    fn outer_order_matters() {
        assert!(!is_equivalent(&seq(json!([1, 2])), &seq(json!([2, 1]))));
    }

    #[test]
    fn scalars_compare_by_value() {
        assert!(is_equivalent(
            &seq(json!(["a", "b", "c"])),
            &seq(json!(["a", "b", "c"]))
        ));
        assert!(!is_equivalent(&seq(json!(["a", "b"])), &seq(json!(["a", "c"]))));
        assert!(!is_equivalent(&seq(json!([1])), &seq(json!(["1"]))));
        assert!(!is_equivalent(&seq(json!([true])), &seq(json!([1]))));
    }

    #[test]
    fn nulls_pass_through() {
        let value = json!([null, { "z": 1, "a": 2 }]);
        let canonical: Vec<Value> = seq(value).iter().map(canonicalize).collect();
        assert_eq!(canonical[0], Value::Null);
        let keys: Vec<&String> = canonical[1].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "z"]);
    }

    #[test]
    fn nested_objects_are_sorted() {
        assert!(is_equivalent(
            &seq(json!([{ "id": "C1", "supplies": { "oxygen": 40, "food": 80 } }])),
            &seq(json!([{ "supplies": { "food": 80, "oxygen": 40 }, "id": "C1" }]))
        ));
    }

    #[test]
    fn objects_inside_nested_arrays_keep_their_key_order() {
        assert!(!is_equivalent(
            &seq(json!([{ "zones": [{ "a": 1, "b": 2 }] }])),
            &seq(json!([{ "zones": [{ "b": 2, "a": 1 }] }]))
        ));
    }

    #[test]
    fn top_level_arrays_compare_positionally() {
        assert!(is_equivalent(
            &seq(json!([["rockfall", "exposure"]])),
            &seq(json!([["rockfall", "exposure"]]))
        ));
        assert!(!is_equivalent(
            &seq(json!([["rockfall", "exposure"]])),
            &seq(json!([["exposure", "rockfall"]]))
        ));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(is_equivalent(&seq(json!([1])), &seq(json!([1.0]))));
        assert!(is_equivalent(&seq(json!([-0.0])), &seq(json!([0]))));
        assert!(!is_equivalent(&seq(json!([1])), &seq(json!([1.5]))));
        assert!(is_equivalent(
            &seq(json!([{ "elevation": 3120 }])),
            &seq(json!([{ "elevation": 3120.0 }]))
        ));
        assert!(is_equivalent(
            &seq(json!([{ "camp": { "oxygen": 40.0 }, "ids": [1, 2.0] }])),
            &seq(json!([{ "ids": [1.0, 2], "camp": { "oxygen": 40 } }]))
        ));
    }

    #[test]
    fn canonicalize_keeps_scalars() {
        assert_eq!(canonicalize(&json!("x")), json!("x"));
        assert_eq!(canonicalize(&json!(3120)), json!(3120));
    }
}
