//! Test helpers for asserting that an object declares the property
//! descriptors a test expects.
//!
//! The comparison is a pure diff of two descriptor maps: keys present on
//! both sides with unequal descriptors are *different*, keys only in the
//! expected map are *missing*, keys only in the declared map are
//! *unexpected*. [`create_messages`] turns the three lists into one summary
//! line each.
//!
//! # Example
//!
//! ```
//! use prop_types_core::{Descriptor, Schema};
//! use prop_types_test_support::{assert_prop_types, check_prop_types};
//!
//! let declared: Schema =
//!     [("title".to_string(), Descriptor::string().required())].into_iter().collect();
//! let expected = declared.clone();
//! assert_prop_types(&declared, &expected);
//!
//! let expected: Schema = [("title".to_string(), Descriptor::string())].into_iter().collect();
//! assert_eq!(
//!     check_prop_types(&declared, &expected),
//!     vec!["The following propTypes are different than expected: title"]
//! );
//! ```

mod diff;

pub use diff::{
    create_messages, find_different_properties, find_missing_properties,
    find_unexpected_properties,
};

use indexmap::IndexMap;

/// Returns one summary line per kind of mismatch between `declared` and
/// `expected`; empty when they agree.
pub fn check_prop_types<T: PartialEq>(
    declared: &IndexMap<String, T>,
    expected: &IndexMap<String, T>,
) -> Vec<String> {
    create_messages(
        &find_different_properties(declared, expected),
        &find_missing_properties(declared, expected),
        &find_unexpected_properties(declared, expected),
    )
}

/// Panics with every mismatch between `declared` and `expected`.
#[track_caller]
pub fn assert_prop_types<T: PartialEq>(
    declared: &IndexMap<String, T>,
    expected: &IndexMap<String, T>,
) {
    let messages = check_prop_types(declared, expected);
    assert!(messages.is_empty(), "{}", messages.join("\n"));
}
