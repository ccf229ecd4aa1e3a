use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A flat mapping from string keys to values, managed as one unit.
///
/// `shallow_merge` is the default merge policy: keys present in the patch
/// overwrite the current ones, every other key is kept as is. Values are
/// replaced whole, never merged recursively.
pub trait Aggregate: Clone + 'static {
    /// Partial mapping accepted by updates.
    type Patch: 'static;

    fn shallow_merge(&self, patch: Self::Patch) -> Self;
}

impl<V: Clone + 'static> Aggregate for BTreeMap<String, V> {
    type Patch = BTreeMap<String, V>;

    fn shallow_merge(&self, patch: Self::Patch) -> Self {
        let mut next = self.clone();
        next.extend(patch);
        next
    }
}

impl<V, S> Aggregate for HashMap<String, V, S>
where
    V: Clone + 'static,
    S: BuildHasher + Clone + 'static,
{
    type Patch = HashMap<String, V, S>;

    fn shallow_merge(&self, patch: Self::Patch) -> Self {
        let mut next = self.clone();
        next.extend(patch);
        next
    }
}

#[cfg(feature = "json")]
mod json {
    use serde_json::{Map, Value};

    use super::Aggregate;

    impl Aggregate for Map<String, Value> {
        type Patch = Map<String, Value>;

        fn shallow_merge(&self, patch: Self::Patch) -> Self {
            let mut next = self.clone();
            next.extend(patch);
            next
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("expected a JSON object, found {found}")]
    pub struct NotAnObject {
        pub found: &'static str,
    }

    /// Unwrap a JSON object so it can be used as state or as a patch.
    ///
    /// ```rust
    /// let m = ezstate::object(serde_json::json!({ "name": "John" })).unwrap();
    /// assert_eq!(m["name"], "John");
    /// assert!(ezstate::object(serde_json::json!([1, 2])).is_err());
    /// ```
    pub fn object(value: Value) -> Result<Map<String, Value>, NotAnObject> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(NotAnObject {
                found: kind(&other),
            }),
        }
    }

    fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}

#[cfg(feature = "json")]
pub use json::{NotAnObject, object};

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, i32)]) -> BTreeMap<String, i32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn shallow_merge_overwrites_and_keeps() {
        let cur = map(&[("a", 1), ("b", 2)]);
        let next = cur.shallow_merge(map(&[("b", 20), ("c", 30)]));
        assert_eq!(next, map(&[("a", 1), ("b", 20), ("c", 30)]));
        // current is untouched
        assert_eq!(cur, map(&[("a", 1), ("b", 2)]));
    }

    #[test]
    fn empty_patch_is_identity() {
        let cur: HashMap<String, &str> = [("name".to_string(), "John")].into_iter().collect();
        assert_eq!(cur.shallow_merge(HashMap::new()), cur);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_merge_is_not_deep() {
        use serde_json::json;

        let cur = object(json!({ "user": { "name": "John", "age": 3 }, "n": 1 })).unwrap();
        let next = cur.shallow_merge(object(json!({ "user": { "name": "Jane" } })).unwrap());
        assert_eq!(
            serde_json::Value::Object(next),
            json!({ "user": { "name": "Jane" }, "n": 1 })
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn object_rejects_non_objects() {
        assert_eq!(
            object(serde_json::Value::Null),
            Err(NotAnObject { found: "null" })
        );
        assert_eq!(
            object(serde_json::json!("x")).unwrap_err().to_string(),
            "expected a JSON object, found a string"
        );
    }
}
