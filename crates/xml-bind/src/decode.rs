//! Generic decoder: interprets kind descriptors against a parsed element
//! tree. Unknown attributes and elements are not looked at, so server-side
//! schema additions decode cleanly.

use crate::descriptor::{FieldSpec, KindSpec, Placement, ValueType};
use crate::error::{DecodeError, MalformedMessageError, ReadError};
use crate::node::XmlElement;
use crate::registry::Registry;
use crate::value::{Record, Value};

pub(crate) fn decode_element(
    registry: &Registry,
    spec: &KindSpec,
    element: &XmlElement,
) -> Result<Record, ReadError> {
    let mut record = Record::new(spec.name);
    for field in &spec.fields {
        match field.placement {
            Placement::Attribute => {
                match element.attr(&field.wire) {
                    Some(text) => record.put(field.field, parse_scalar(spec, field, text)?),
                    None if field.required => return Err(missing(spec, field)),
                    None => {}
                }
            }
            Placement::FlattenedValue => {
                let text = element.text.trim();
                match scalar_if_present(spec, field, text)? {
                    Some(value) => record.put(field.field, value),
                    None if field.required => return Err(missing(spec, field)),
                    None => {}
                }
            }
            Placement::Element => match element.child(&field.wire) {
                Some(child) => {
                    match decode_child(registry, spec, field, child)? {
                        Some(value) => record.put(field.field, value),
                        None if field.required => return Err(missing(spec, field)),
                        None => {}
                    }
                }
                None if field.required => return Err(missing(spec, field)),
                None => {}
            },
            Placement::ImplicitCollection => {
                // Collections are never absent, only empty; document order
                // is the in-memory order.
                let mut items = Vec::new();
                for child in element.children_named(&field.wire) {
                    // An empty repeated non-string element carries nothing
                    // and is dropped rather than failing the whole document.
                    if let Some(value) = decode_child(registry, spec, field, child)? {
                        items.push(value);
                    }
                }
                record.put(field.field, Value::List(items));
            }
        }
    }
    Ok(record)
}

fn decode_child(
    registry: &Registry,
    spec: &KindSpec,
    field: &FieldSpec,
    child: &XmlElement,
) -> Result<Option<Value>, ReadError> {
    match field.ty {
        ValueType::Nested(target) => {
            let nested_spec = registry
                .kind(target)
                .ok_or_else(|| ReadError::UnknownKind(target.to_string()))?;
            Ok(Some(Value::Record(decode_element(
                registry,
                nested_spec,
                child,
            )?)))
        }
        _ => scalar_if_present(spec, field, child.text.trim()),
    }
}

/// Empty text in a non-string scalar position means "not there"; required
/// checks then decide whether that is an error. Empty string fields stay
/// empty strings.
fn scalar_if_present(
    spec: &KindSpec,
    field: &FieldSpec,
    text: &str,
) -> Result<Option<Value>, ReadError> {
    if text.is_empty() && field.ty != ValueType::Str {
        return Ok(None);
    }
    parse_scalar(spec, field, text).map(Some)
}

fn parse_scalar(spec: &KindSpec, field: &FieldSpec, text: &str) -> Result<Value, ReadError> {
    let value = match field.ty {
        ValueType::Str => Value::Str(text.to_string()),
        ValueType::Int => Value::Int(
            text.parse::<i32>()
                .map_err(|_| bad_scalar(spec, field, text))?,
        ),
        ValueType::Double => Value::Double(
            text.parse::<f64>()
                .map_err(|_| bad_scalar(spec, field, text))?,
        ),
        ValueType::Bool => match text {
            t if t.eq_ignore_ascii_case("true") => Value::Bool(true),
            t if t.eq_ignore_ascii_case("false") => Value::Bool(false),
            _ => return Err(bad_scalar(spec, field, text)),
        },
        ValueType::Nested(_) => {
            return Err(DecodeError::WrongShape {
                kind: spec.name,
                field: field.field,
                expected: "nested record",
            }
            .into())
        }
    };
    Ok(value)
}

fn bad_scalar(spec: &KindSpec, field: &FieldSpec, text: &str) -> ReadError {
    DecodeError::BadScalar {
        kind: spec.name,
        field: field.field,
        text: text.to_string(),
        expected: field.ty.label(),
    }
    .into()
}

fn missing(spec: &KindSpec, field: &FieldSpec) -> ReadError {
    MalformedMessageError::MissingField {
        kind: spec.name,
        field: field.field,
    }
    .into()
}
