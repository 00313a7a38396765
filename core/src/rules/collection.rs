//! Homogeneous collections: `arrayOf` and `objectOf`.
//!
//! Every item is checked (no short-circuit) so each bad item gets its own
//! diagnostic, followed by one message for the collection.

use crate::error::Result;
use crate::validate::{Check, Session};

pub(super) fn array_of(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let Some(element) = check.descriptor.element_type.as_deref() else {
        return session.misconfigured(&check, "arrayOf() requires a descriptor for its items");
    };
    let message = format!(
        "Expected property {} to be an array of type {}",
        check.path,
        element.expected_type()
    );
    let Some(items) = check.value.as_array() else {
        return session.fail(&check, &message);
    };

    let mut valid = true;
    for (index, item) in items.iter().enumerate() {
        let path = format!("{}[{index}]", check.path);
        valid &= session.check(Check {
            path: &path,
            value: item,
            descriptor: element,
            ..check
        })?;
    }

    if !valid {
        session.fail(&check, &message)?;
    }
    Ok(valid)
}

pub(super) fn object_of(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let Some(element) = check.descriptor.element_type.as_deref() else {
        return session.misconfigured(&check, "objectOf() requires a descriptor for its values");
    };
    let message = format!(
        "Expected property {} to be an object of type {}",
        check.path,
        element.expected_type()
    );
    let Some(record) = check.value.as_plain_record() else {
        return session.fail(&check, &message);
    };

    let mut valid = true;
    for (key, field) in record.iter() {
        let path = format!("{}.{key}", check.path);
        valid &= session.check(Check {
            path: &path,
            value: field,
            descriptor: element,
            ..check
        })?;
    }

    if !valid {
        session.fail(&check, &message)?;
    }
    Ok(valid)
}
