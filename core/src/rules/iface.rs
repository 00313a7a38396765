//! Nested property maps: `iface` and `shape`.
//!
//! Both check a value's properties against `type_defs`, in declaration
//! order, without stopping at the first failure. `iface` accepts any
//! object-like value (plain record or class instance) and ignores extra
//! properties; `shape` accepts plain records only and rejects properties it
//! does not declare.

use super::mismatch_message;
use crate::error::Result;
use crate::validate::{Check, Session};
use crate::{PropertyLookup, Schema, get_path};

pub(super) fn iface(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let Some(type_defs) = &check.descriptor.type_defs else {
        return session.misconfigured(
            &check,
            "iface() requires a plain mapping of property descriptors",
        );
    };
    let Some(lookup) = check.value.as_lookup() else {
        return session.fail(&check, &mismatch_message(&check, "interface"));
    };

    let valid = check_properties(session, &check, lookup, type_defs)?;
    if !valid {
        session.fail(&check, &mismatch_message(&check, "interface"))?;
    }
    Ok(valid)
}

pub(super) fn shape(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let Some(type_defs) = &check.descriptor.type_defs else {
        return session.misconfigured(
            &check,
            "shape() requires a plain mapping of property descriptors",
        );
    };
    let Some(record) = check.value.as_plain_record() else {
        return session.fail(&check, &mismatch_message(&check, "shape"));
    };

    let mut valid = check_properties(session, &check, record, type_defs)?;
    for key in record.property_names() {
        let declared = type_defs.keys().any(|def| {
            def == key
                || def
                    .strip_prefix(key)
                    .is_some_and(|rest| rest.starts_with('.'))
        });
        if !declared {
            session.fail(
                &check,
                &format!("Property {} has unknown property {key}", check.path),
            )?;
            valid = false;
        }
    }

    if !valid {
        session.fail(&check, &mismatch_message(&check, "shape"))?;
    }
    Ok(valid)
}

fn check_properties(
    session: &mut Session<'_>,
    check: &Check<'_>,
    lookup: &dyn PropertyLookup,
    type_defs: &Schema,
) -> Result<bool> {
    let mut valid = true;
    for (key, def) in type_defs {
        match get_path(lookup, key) {
            None if !def.required => {}
            None => {
                session.fail(
                    check,
                    &format!("Property {} is missing required property {key}", check.path),
                )?;
                valid = false;
            }
            Some(value) => {
                let path = format!("{}.{key}", check.path);
                valid &= session.check(Check {
                    path: &path,
                    value,
                    descriptor: def,
                    ..*check
                })?;
            }
        }
    }
    Ok(valid)
}
