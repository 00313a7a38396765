//! Single-value type checks.

use crate::error::Result;
use crate::validate::{Check, Session};
use crate::Value;

fn expect(
    session: &mut Session<'_>,
    check: Check<'_>,
    accepted: bool,
    expected: &str,
) -> Result<bool> {
    if accepted {
        return Ok(true);
    }
    session.fail(
        &check,
        &format!("Expected property {} to be {expected}", check.path),
    )
}

pub(super) fn any(_: &mut Session<'_>, _: Check<'_>) -> Result<bool> {
    Ok(true)
}

pub(super) fn array(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Array(_));
    expect(session, check, accepted, "an array")
}

pub(super) fn bool(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Bool(_));
    expect(session, check, accepted, "a boolean")
}

pub(super) fn date(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Date(_));
    expect(session, check, accepted, "a date")
}

pub(super) fn element(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Element(_));
    expect(session, check, accepted, "an element")
}

pub(super) fn func(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Function(_));
    expect(session, check, accepted, "a function")
}

pub(super) fn null(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Null);
    expect(session, check, accepted, "null")
}

pub(super) fn number(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Number(_));
    expect(session, check, accepted, "a number")
}

/// Plain records only; class instances are not plain objects.
pub(super) fn object(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = check.value.as_plain_record().is_some();
    expect(session, check, accepted, "an object")
}

pub(super) fn string(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::String(_));
    expect(session, check, accepted, "a string")
}

pub(super) fn symbol(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let accepted = matches!(check.value, Value::Symbol(_));
    expect(session, check, accepted, "a symbol")
}

pub(super) fn instance_of(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let Some(class) = check.descriptor.class_name.as_deref() else {
        return session.misconfigured(&check, "instanceOf() requires a class name");
    };
    let accepted = matches!(check.value, Value::Object(record) if record.class() == Some(class));
    expect(session, check, accepted, &format!("an instance of {class}"))
}

pub(super) fn custom(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let Some(predicate) = &check.descriptor.custom_validator else {
        return session.misconfigured(&check, "custom() requires a validator function");
    };
    if predicate.test(check.value) {
        return Ok(true);
    }
    session.fail(
        &check,
        &format!("Expected property {} to pass custom validation", check.path),
    )
}
