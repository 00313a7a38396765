//! Choices: `oneOf` (enumeration of literals) and `oneOfType` (union).

use crate::error::Result;
use crate::validate::{Check, Session};

pub(super) fn one_of(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let values = &check.descriptor.values;
    if values.is_empty() {
        return session.misconfigured(&check, "oneOf() requires a non-empty list of values");
    }
    if values.iter().any(|allowed| allowed == check.value) {
        return Ok(true);
    }

    let listed = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    session.fail(
        &check,
        &format!("Property {} is not one of: {listed}", check.path),
    )
}

/// Alternatives are tried silently in declared order; the first success
/// wins.
pub(super) fn one_of_type(session: &mut Session<'_>, check: Check<'_>) -> Result<bool> {
    let validators = &check.descriptor.validators;
    if validators.is_empty() {
        return session.misconfigured(&check, "oneOfType() requires a non-empty list of types");
    }

    for descriptor in validators {
        let accepted = session.check(Check {
            descriptor,
            log_errors: false,
            ..check
        })?;
        if accepted {
            return Ok(true);
        }
    }

    let attempted = validators
        .iter()
        .map(|descriptor| descriptor.expected_type())
        .collect::<Vec<_>>()
        .join(", ");
    session.fail(
        &check,
        &format!(
            "Expected property {} to be one of expected types: [{attempted}]",
            check.path
        ),
    )
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::run;
    use crate::{Descriptor, Function, Record, Value};

    #[test]
    fn test_one_of_uses_strict_equality() {
        let descriptor = Descriptor::one_of(["small", "large"]);
        assert!(run("size", Value::from("small"), &descriptor).0);

        let (valid, messages) = run("size", Value::from("medium"), &descriptor);
        assert!(!valid);
        assert_eq!(messages, vec!["Property size is not one of: small, large"]);
    }

    #[test]
    fn test_one_of_does_not_coerce() {
        let descriptor = Descriptor::one_of([1, 2]);
        assert!(run("n", Value::from(2), &descriptor).0);
        assert!(!run("n", Value::from("2"), &descriptor).0);
    }

    #[test]
    fn test_one_of_compares_functions_by_identity() {
        let handler = Function::noop("handler");
        let descriptor = Descriptor::one_of([Value::from(handler.clone())]);
        assert!(run("cb", Value::from(handler), &descriptor).0);
        assert!(!run("cb", Value::from(Function::noop("handler")), &descriptor).0);
    }

    #[test]
    fn test_one_of_compares_composite_literals_deeply() {
        let pair = Value::from(vec![Value::from(1), Value::from(2)]);
        let origin = Record::new().with("x", 0).with("y", 0);
        let descriptor = Descriptor::one_of([pair, Value::from(origin.clone())]);

        assert!(run("p", Value::from(vec![Value::from(1), Value::from(2)]), &descriptor).0);
        assert!(run("p", Value::from(Record::new().with("x", 0).with("y", 0)), &descriptor).0);

        let reversed = Value::from(vec![Value::from(2), Value::from(1)]);
        let (valid, messages) = run("p", reversed, &descriptor);
        assert!(!valid);
        assert_eq!(messages, vec!["Property p is not one of: 1,2, [object Object]"]);

        let extra = origin.clone().with("z", 0);
        assert!(!run("p", Value::from(extra), &descriptor).0);

        let instance = Record::instance("Point").with("x", 0).with("y", 0);
        assert!(!run("p", Value::from(instance), &descriptor).0);
    }

    #[test]
    fn test_one_of_type_accepts_any_alternative() {
        let descriptor = Descriptor::one_of_type([Descriptor::string(), Descriptor::number()]);
        assert_eq!(run("id", Value::from(7), &descriptor), (true, vec![]));
        assert_eq!(run("id", Value::from("7"), &descriptor), (true, vec![]));
    }

    #[test]
    fn test_one_of_type_names_attempted_types() {
        let descriptor = Descriptor::one_of_type([
            Descriptor::string(),
            Descriptor::array_of(Descriptor::number()),
        ]);
        let (valid, messages) = run("id", Value::Bool(true), &descriptor);
        assert!(!valid);
        assert_eq!(
            messages,
            vec!["Expected property id to be one of expected types: [string, arrayOf(number)]"]
        );
    }

    #[test]
    fn test_one_of_type_keeps_nested_failures_quiet() {
        let descriptor = Descriptor::one_of_type([
            Descriptor::iface([("a", Descriptor::number().required())]),
            Descriptor::null(),
        ]);
        let (valid, messages) = run("x", Value::from(Record::new()), &descriptor);
        assert!(!valid);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_one_of_type_stops_at_first_success() {
        let descriptor = Descriptor::one_of_type([Descriptor::any(), Descriptor::named("missing")]);
        assert!(run("x", Value::from(1), &descriptor).0);
    }
}
