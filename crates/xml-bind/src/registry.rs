//! The immutable mapping registry and its validating builder.

use std::collections::{HashMap, HashSet};

use crate::decode::decode_element;
use crate::descriptor::{fold_name, KindSpec, Placement, ValueType};
use crate::encode::encode_record;
use crate::error::{DefinitionError, EncodeError, MalformedMessageError, ReadError};
use crate::node::{parse_document, write_document};
use crate::value::Record;

/// Complete, immutable table of kind specs. Built once, safe to share and
/// call from any number of threads; `serialize` and `deserialize` are pure
/// functions of their inputs and this table.
#[derive(Debug)]
pub struct Registry {
    kinds: HashMap<&'static str, KindSpec>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder { kinds: Vec::new() }
    }

    pub fn kind(&self, name: &str) -> Option<&KindSpec> {
        self.kinds.get(name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Renders the record as a wire document. Structural correctness (tag,
    /// nesting, attribute placement) is the contract; field order is not.
    pub fn serialize(&self, record: &Record) -> Result<Vec<u8>, EncodeError> {
        let element = encode_record(self, record)?;
        write_document(&element)
    }

    /// Parses wire bytes into a record of the named kind. All-or-nothing:
    /// on error no partial record is returned. Unknown wire content is
    /// ignored for forward compatibility.
    pub fn deserialize(&self, bytes: &[u8], kind: &str) -> Result<Record, ReadError> {
        let spec = self
            .kind(kind)
            .ok_or_else(|| ReadError::UnknownKind(kind.to_string()))?;
        let root = parse_document(bytes)?;
        if root.tag != spec.root {
            return Err(MalformedMessageError::RootMismatch {
                expected: spec.root.clone(),
                found: root.tag,
            }
            .into());
        }
        decode_element(self, spec, &root)
    }
}

/// Collects kind specs and validates the whole table at once. Any
/// contradiction aborts the build; a process must not reach service calls
/// with a partially valid mapping.
pub struct RegistryBuilder {
    kinds: Vec<KindSpec>,
}

impl RegistryBuilder {
    pub fn register(mut self, spec: KindSpec) -> Self {
        self.kinds.push(spec);
        self
    }

    pub fn build(self) -> Result<Registry, DefinitionError> {
        let mut kinds: HashMap<&'static str, KindSpec> = HashMap::with_capacity(self.kinds.len());
        for spec in &self.kinds {
            validate_kind(spec)?;
        }
        for spec in self.kinds {
            let name = spec.name;
            if kinds.insert(name, spec).is_some() {
                return Err(DefinitionError::DuplicateKind(name));
            }
        }
        let registry = Registry { kinds };
        validate_references(&registry)?;
        Ok(registry)
    }
}

fn validate_kind(spec: &KindSpec) -> Result<(), DefinitionError> {
    let mut field_names = HashSet::new();
    let mut attr_wires = HashSet::new();
    let mut element_wires = HashSet::new();
    let mut value_fields = 0usize;

    for field in &spec.fields {
        if !field_names.insert(field.field) {
            return Err(DefinitionError::DuplicateField {
                kind: spec.name,
                field: field.field,
            });
        }
        match field.placement {
            Placement::Attribute => {
                if !attr_wires.insert(field.wire.as_str()) {
                    return Err(DefinitionError::DuplicateWireName {
                        kind: spec.name,
                        wire: field.wire.clone(),
                    });
                }
            }
            // Single elements and implicit item tags share the child tag
            // namespace of the parent element.
            Placement::Element | Placement::ImplicitCollection => {
                if !element_wires.insert(field.wire.as_str()) {
                    return Err(DefinitionError::DuplicateWireName {
                        kind: spec.name,
                        wire: field.wire.clone(),
                    });
                }
            }
            Placement::FlattenedValue => {
                value_fields += 1;
                if value_fields > 1 {
                    return Err(DefinitionError::MultipleValueFields { kind: spec.name });
                }
                if matches!(field.ty, ValueType::Nested(_)) {
                    return Err(DefinitionError::NestedValueField {
                        kind: spec.name,
                        field: field.field,
                    });
                }
            }
        }
        if field.required && field.placement == Placement::ImplicitCollection {
            return Err(DefinitionError::RequiredCollection {
                kind: spec.name,
                field: field.field,
            });
        }
        // Renames must be flagged. Implicit collections name the repeated
        // item tag, not the field, and flattened values have no wire name,
        // so both are exempt.
        let check_rename = matches!(field.placement, Placement::Attribute | Placement::Element);
        if check_rename && !field.renamed && fold_name(&field.wire) != fold_name(field.field) {
            return Err(DefinitionError::UnflaggedRename {
                kind: spec.name,
                field: field.field,
                wire: field.wire.clone(),
            });
        }
    }

    if spec.flattened_field().is_some() {
        for field in &spec.fields {
            if !matches!(
                field.placement,
                Placement::Attribute | Placement::FlattenedValue
            ) {
                return Err(DefinitionError::NonAttributeSibling {
                    kind: spec.name,
                    field: field.field,
                });
            }
        }
    }
    Ok(())
}

fn validate_references(registry: &Registry) -> Result<(), DefinitionError> {
    for spec in registry.kinds.values() {
        for field in &spec.fields {
            if let ValueType::Nested(target) = field.ty {
                if registry.kind(target).is_none() {
                    return Err(DefinitionError::UnknownKindRef {
                        kind: spec.name,
                        field: field.field,
                        target,
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldSpec;

    fn quality_kind() -> KindSpec {
        KindSpec::new("quality", "oml:quality")
            .field(FieldSpec::attribute("name", "name", ValueType::Str).required())
            .field(FieldSpec::flattened("value", ValueType::Double))
    }

    #[test]
    fn duplicate_kind_is_rejected() {
        let err = Registry::builder()
            .register(quality_kind())
            .register(quality_kind())
            .build()
            .unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateKind(_)));
    }

    #[test]
    fn duplicate_field_name_is_rejected() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::element("id", "oml:id", ValueType::Int))
            .field(FieldSpec::attribute("id", "id", ValueType::Int));
        let err = Registry::builder().register(spec).build().unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateField { .. }));
    }

    #[test]
    fn duplicate_wire_name_within_kind_is_rejected() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::element("id", "oml:id", ValueType::Int))
            .field(FieldSpec::element("id2", "oml:id", ValueType::Int).renamed());
        let err = Registry::builder().register(spec).build().unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateWireName { .. }));
    }

    #[test]
    fn attribute_and_element_may_share_a_wire_name() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::attribute("name", "name", ValueType::Str))
            .field(FieldSpec::element("name2", "name", ValueType::Str).renamed());
        assert!(Registry::builder().register(spec).build().is_ok());
    }

    #[test]
    fn unresolved_nested_kind_is_rejected() {
        let spec = KindSpec::new("t", "oml:t").field(FieldSpec::element(
            "inner",
            "oml:inner",
            ValueType::Nested("missing"),
        ));
        let err = Registry::builder().register(spec).build().unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::UnknownKindRef {
                target: "missing",
                ..
            }
        ));
    }

    #[test]
    fn flattened_value_allows_only_attribute_siblings() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::flattened("value", ValueType::Str))
            .field(FieldSpec::element("extra", "oml:extra", ValueType::Str));
        let err = Registry::builder().register(spec).build().unwrap_err();
        assert!(matches!(err, DefinitionError::NonAttributeSibling { .. }));
    }

    #[test]
    fn second_flattened_value_is_rejected() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::flattened("value", ValueType::Str))
            .field(FieldSpec::flattened("other", ValueType::Str));
        let err = Registry::builder().register(spec).build().unwrap_err();
        assert!(matches!(err, DefinitionError::MultipleValueFields { .. }));
    }

    #[test]
    fn flattened_nested_kind_is_rejected() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::flattened("inner", ValueType::Nested("quality")));
        let err = Registry::builder()
            .register(quality_kind())
            .register(spec)
            .build()
            .unwrap_err();
        assert!(matches!(err, DefinitionError::NestedValueField { .. }));
    }

    #[test]
    fn required_collection_is_rejected() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::implicit("tags", "oml:tag", ValueType::Str).required());
        let err = Registry::builder().register(spec).build().unwrap_err();
        assert!(matches!(err, DefinitionError::RequiredCollection { .. }));
    }

    #[test]
    fn unflagged_rename_is_rejected() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::element("function", "oml:name", ValueType::Str));
        let err = Registry::builder().register(spec).build().unwrap_err();
        assert!(matches!(err, DefinitionError::UnflaggedRename { .. }));
    }

    #[test]
    fn flagged_rename_and_folded_match_are_accepted() {
        let spec = KindSpec::new("t", "oml:t")
            .field(FieldSpec::element("function", "oml:name", ValueType::Str).renamed())
            .field(FieldSpec::element(
                "full_name",
                "oml:fullName",
                ValueType::Str,
            ));
        assert!(Registry::builder().register(spec).build().is_ok());
    }
}
