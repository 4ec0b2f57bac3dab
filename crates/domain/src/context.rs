//! Structured context maps and their merge semantics.

use std::collections::BTreeMap;

/// One set of structured key/value context supplied at a call site.
///
/// Values are arbitrary JSON shapes; keys are caller-owned strings.
pub type ContextMap = BTreeMap<Box<str>, serde_json::Value>;

/// Combine an ordered sequence of optional context maps into one.
///
/// Later maps win on key collision; `None` entries are skipped without
/// affecting the surrounding maps. The operation is pure and has no error
/// channel: for any input it produces a map (possibly empty).
#[must_use]
pub fn merge_context(sources: &[Option<ContextMap>]) -> ContextMap {
    let mut merged = ContextMap::new();
    for source in sources.iter().flatten() {
        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Build a [`ContextMap`] from literal key/value pairs.
///
/// Each value is an expression serializable as JSON. Inline object literals
/// are not expressions; wrap them in `serde_json::json!({ ... })`.
///
/// ```
/// use unilog_domain::context;
///
/// let fields = context! { "attempt" => 3, "source" => "cache" };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! context {
    () => { $crate::ContextMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::ContextMap::new();
        $(
            map.insert(
                ::std::string::String::from($key).into_boxed_str(),
                $crate::serde_json::json!($value),
            );
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn merging_nothing_yields_empty_map() {
        assert!(merge_context(&[]).is_empty());
        assert!(merge_context(&[None, None]).is_empty());
    }

    #[test]
    fn later_maps_win_on_collision() {
        let first = context! { "x" => "1", "only_first" => true };
        let second = context! { "x" => "2" };
        let merged = merge_context(&[Some(first), Some(second)]);

        assert_eq!(merged.get("x"), Some(&json!("2")));
        assert_eq!(merged.get("only_first"), Some(&json!(true)));
    }

    #[test]
    fn none_entries_are_transparent() {
        let first = context! { "a" => 1 };
        let second = context! { "b" => 2 };
        let with_gaps = merge_context(&[Some(first.clone()), None, Some(second.clone())]);
        let without_gaps = merge_context(&[Some(first), Some(second)]);

        assert_eq!(with_gaps, without_gaps);
    }

    #[test]
    fn context_macro_builds_nested_values() {
        let fields = context! {
            "tags" => ["a", "b"],
            "meta" => json!({ "retries": 2 }),
        };
        assert_eq!(fields.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(fields.get("meta"), Some(&json!({ "retries": 2 })));
    }

    fn arbitrary_map() -> impl Strategy<Value = ContextMap> {
        proptest::collection::btree_map("[a-z]{1,4}", "[a-z0-9]{0,6}", 0..6).prop_map(|map| {
            map.into_iter()
                .map(|(key, value)| (key.into_boxed_str(), json!(value)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn merge_never_invents_or_loses_keys(
            maps in proptest::collection::vec(
                proptest::option::of(arbitrary_map()),
                0..5,
            )
        ) {
            let merged = merge_context(&maps);

            // Every merged entry comes from the last map containing its key.
            for (key, value) in &merged {
                let expected = maps
                    .iter()
                    .flatten()
                    .rev()
                    .find_map(|map| map.get(key));
                prop_assert_eq!(expected, Some(value));
            }

            // Every input key appears in the result.
            for map in maps.iter().flatten() {
                for key in map.keys() {
                    prop_assert!(merged.contains_key(key));
                }
            }
        }
    }
}
