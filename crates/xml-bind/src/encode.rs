//! Generic encoder: interprets kind descriptors against a record graph and
//! produces an element tree.

use crate::descriptor::{FieldSpec, KindSpec, Placement, ValueType};
use crate::error::EncodeError;
use crate::node::XmlElement;
use crate::registry::Registry;
use crate::value::{Record, Value};

pub(crate) fn encode_record(
    registry: &Registry,
    record: &Record,
) -> Result<XmlElement, EncodeError> {
    let spec = registry
        .kind(record.kind())
        .ok_or_else(|| EncodeError::UnknownKind(record.kind().to_string()))?;
    let mut element = XmlElement::new(spec.root.clone());
    if let Some(ns) = &spec.namespace {
        element.attrs.push((ns.attr.clone(), ns.uri.clone()));
    }
    fill_element(registry, spec, record, &mut element)?;
    Ok(element)
}

/// Writes every present field of `record` into `element` following the
/// kind's placement rules. Absent optional fields never reach the wire.
fn fill_element(
    registry: &Registry,
    spec: &KindSpec,
    record: &Record,
    element: &mut XmlElement,
) -> Result<(), EncodeError> {
    for field in &spec.fields {
        let Some(value) = record.get(field.field) else {
            continue;
        };
        match field.placement {
            Placement::Attribute => {
                let text = scalar_text(spec, field, value)?;
                element.attrs.push((field.wire.clone(), text));
            }
            Placement::FlattenedValue => {
                element.text = scalar_text(spec, field, value)?;
            }
            Placement::Element => {
                element
                    .children
                    .push(encode_child(registry, spec, field, value)?);
            }
            Placement::ImplicitCollection => {
                let Value::List(items) = value else {
                    return Err(wrong_shape(spec, field, "list"));
                };
                for item in items {
                    element
                        .children
                        .push(encode_child(registry, spec, field, item)?);
                }
            }
        }
    }
    Ok(())
}

/// One child element: either a nested kind resolved through the registry or
/// a scalar wrapped in the field's wire tag.
fn encode_child(
    registry: &Registry,
    spec: &KindSpec,
    field: &FieldSpec,
    value: &Value,
) -> Result<XmlElement, EncodeError> {
    match field.ty {
        ValueType::Nested(target) => {
            let Value::Record(nested) = value else {
                return Err(wrong_shape(spec, field, "nested record"));
            };
            if nested.kind() != target {
                return Err(wrong_shape(spec, field, field.ty.label()));
            }
            let nested_spec = registry
                .kind(target)
                .ok_or_else(|| EncodeError::UnknownKind(target.to_string()))?;
            let mut child = XmlElement::new(field.wire.clone());
            fill_element(registry, nested_spec, nested, &mut child)?;
            Ok(child)
        }
        _ => Ok(XmlElement::with_text(
            field.wire.clone(),
            scalar_text(spec, field, value)?,
        )),
    }
}

fn scalar_text(spec: &KindSpec, field: &FieldSpec, value: &Value) -> Result<String, EncodeError> {
    match (field.ty, value) {
        (ValueType::Str, Value::Str(s)) => Ok(s.clone()),
        (ValueType::Int, Value::Int(i)) => Ok(i.to_string()),
        (ValueType::Double, Value::Double(d)) => Ok(format_double(*d)),
        (ValueType::Bool, Value::Bool(b)) => Ok(if *b { "true" } else { "false" }.to_string()),
        _ => Err(wrong_shape(spec, field, field.ty.label())),
    }
}

/// Locale-independent numeric text: dot decimal separator, no grouping.
/// Rust's `Display` for `f64` already guarantees this in every locale.
pub(crate) fn format_double(value: f64) -> String {
    format!("{value}")
}

fn wrong_shape(spec: &KindSpec, field: &FieldSpec, expected: &'static str) -> EncodeError {
    EncodeError::WrongShape {
        kind: spec.name,
        field: field.field,
        expected,
    }
}
