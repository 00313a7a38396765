//! Key-level diff of declared vs. expected descriptor maps.

use indexmap::IndexMap;

/// Keys present on both sides whose values differ, in `expected` order.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use prop_types_test_support::find_different_properties;
///
/// let declared: IndexMap<String, u8> =
///     [("a".to_string(), 1), ("b".to_string(), 1)].into_iter().collect();
/// let expected: IndexMap<String, u8> =
///     [("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)].into_iter().collect();
/// assert_eq!(find_different_properties(&declared, &expected), vec!["b"]);
/// ```
pub fn find_different_properties<T: PartialEq>(
    declared: &IndexMap<String, T>,
    expected: &IndexMap<String, T>,
) -> Vec<String> {
    expected
        .iter()
        .filter(|(key, value)| declared.get(*key).is_some_and(|declared| declared != *value))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Keys expected but not declared, in `expected` order.
pub fn find_missing_properties<T>(
    declared: &IndexMap<String, T>,
    expected: &IndexMap<String, T>,
) -> Vec<String> {
    expected
        .keys()
        .filter(|key| !declared.contains_key(*key))
        .cloned()
        .collect()
}

/// Keys declared but not expected, in `declared` order.
pub fn find_unexpected_properties<T>(
    declared: &IndexMap<String, T>,
    expected: &IndexMap<String, T>,
) -> Vec<String> {
    declared
        .keys()
        .filter(|key| !expected.contains_key(*key))
        .cloned()
        .collect()
}

/// One summary line per non-empty list, always in the order different,
/// missing, unexpected.
pub fn create_messages<S: AsRef<str>>(
    different: &[S],
    missing: &[S],
    unexpected: &[S],
) -> Vec<String> {
    let sections = [
        ("The following propTypes are different than expected", different),
        ("The following propTypes were not found but are expected", missing),
        ("The following propTypes were found but not expected in the test", unexpected),
    ];

    sections
        .into_iter()
        .filter(|(_, keys)| !keys.is_empty())
        .map(|(heading, keys)| {
            let joined = keys.iter().map(|key| key.as_ref()).collect::<Vec<&str>>().join(", ");
            format!("{heading}: {joined}")
        })
        .collect()
}
