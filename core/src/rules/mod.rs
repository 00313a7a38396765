//! Built-in validation rules.
//!
//! Every rule has the same contract: given the running session and a
//! [`Check`](crate::Check), return `Ok(true)` if the value conforms, otherwise report
//! through the session and return `Ok(false)`. Composite rules recurse with
//! [`Session::check`](crate::Session::check) using `path.key` and `path[index]` property paths.

mod choice;
mod collection;
mod iface;
mod primitive;

use crate::render::render_json;
use crate::validate::Check;
use crate::{Registry, TypeName};

pub(crate) fn register_builtins(registry: &mut Registry) {
    registry.register(TypeName::Any, primitive::any);
    registry.register(TypeName::Array, primitive::array);
    registry.register(TypeName::ArrayOf, collection::array_of);
    registry.register(TypeName::Bool, primitive::bool);
    registry.register(TypeName::Custom, primitive::custom);
    registry.register(TypeName::Date, primitive::date);
    registry.register(TypeName::Element, primitive::element);
    registry.register(TypeName::Func, primitive::func);
    registry.register(TypeName::Iface, iface::iface);
    registry.register(TypeName::InstanceOf, primitive::instance_of);
    registry.register(TypeName::Null, primitive::null);
    registry.register(TypeName::Number, primitive::number);
    registry.register(TypeName::Object, primitive::object);
    registry.register(TypeName::ObjectOf, collection::object_of);
    registry.register(TypeName::OneOf, choice::one_of);
    registry.register(TypeName::OneOfType, choice::one_of_type);
    registry.register(TypeName::Shape, iface::shape);
    registry.register(TypeName::String, primitive::string);
    registry.register(TypeName::Symbol, primitive::symbol);
}

/// `Expected property {path} to match given {what}`, followed by the
/// rendered value when it can be rendered.
fn mismatch_message(check: &Check<'_>, what: &str) -> String {
    let mut message = format!("Expected property {} to match given {what}", check.path);
    if let Some(rendered) = render_json(check.value) {
        message.push_str(", but instead got value ");
        message.push_str(&rendered);
    }
    message
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::{Context, Descriptor, MemorySink, Registry, Validator, Value};

    /// Validates `value` as property `path` of context `foo`, returning the
    /// outcome and the recorded messages.
    pub(crate) fn run(path: &str, value: Value, descriptor: &Descriptor) -> (bool, Vec<String>) {
        let sink = MemorySink::new();
        let valid = Validator::new(Registry::global(), &sink)
            .validate(&Context::new("foo"), path, &value, descriptor)
            .unwrap();
        (valid, sink.messages())
    }
}
