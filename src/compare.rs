//! Structural JSON comparison used for change detection. Two records are
//! compared in their wire shape so that anything serde skips client-side
//! never influences the result.

use serde_json::Value;

/// Deep equality over two optional JSON values. If either side is absent the
/// records are reported as different, which makes a record with no stored
/// counterpart (a new, unsaved one) permanently dirty.
///
/// `ignore` lists object keys excluded from the comparison at every nesting
/// depth; it is how server bookkeeping fields stay out of dirty tracking.
pub fn objects_equal(a: Option<&Value>, b: Option<&Value>, ignore: &[&str]) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    values_equal(a, b, ignore)
}

fn values_equal(a: &Value, b: &Value, ignore: &[&str]) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            let a_keys: Vec<&String> = a
                .keys()
                .filter(|k| !ignore.contains(&k.as_str()))
                .collect();
            let b_count = b.keys().filter(|k| !ignore.contains(&k.as_str())).count();
            if a_keys.len() != b_count {
                return false;
            }
            a_keys.iter().all(|k| match b.get(k.as_str()) {
                Some(bv) => values_equal(&a[k.as_str()], bv, ignore),
                None => false,
            })
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y, ignore))
        }
        _ => a == b,
    }
}

#[cfg(test)]
#[path = "tests/compare_tests.rs"]
mod tests;
