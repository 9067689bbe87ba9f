//! Merging of property maps from the two sides of a join.

use crate::feature::Properties;

/// Keys present in both `left` and `right`, in the order they appear in `left`.
pub fn find_duplicate_keys<'a>(left: &'a Properties, right: &Properties) -> Vec<&'a str> {
    left.keys()
        .filter(|key| right.contains_key(key.as_str()))
        .map(|key| key.as_str())
        .collect()
}

/// Merge two property maps into a new one.
///
/// A key that appears on both sides is a collision and is written twice, as
/// `{key}_{lsuffix}` with the left value and `{key}_{rsuffix}` with the right value. Every other
/// key keeps its name. Left keys come first in their original order, followed by the right keys
/// in theirs.
///
/// ```
/// use geo_sjoin::{merge_properties, Properties};
/// use serde_json::json;
///
/// let left: Properties = [("a".to_string(), json!(1)), ("b".to_string(), json!(2))].into();
/// let right: Properties = [("b".to_string(), json!(3)), ("c".to_string(), json!(4))].into();
///
/// let merged = merge_properties(&left, &right, "L", "R");
/// assert_eq!(merged.keys().collect::<Vec<_>>(), ["a", "b_L", "b_R", "c"]);
/// ```
pub fn merge_properties(
    left: &Properties,
    right: &Properties,
    lsuffix: &str,
    rsuffix: &str,
) -> Properties {
    let mut merged = Properties::with_capacity(left.len() + right.len());

    for (key, value) in left {
        if right.contains_key(key) {
            merged.insert(format!("{key}_{lsuffix}"), value.clone());
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }

    for (key, value) in right {
        if left.contains_key(key) {
            merged.insert(format!("{key}_{rsuffix}"), value.clone());
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}
