//! Mapping descriptors: the data table that defines each message kind's wire
//! shape.

/// Where a field lives inside its kind's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An attribute on the kind's element.
    Attribute,
    /// A single child element whose text (or nested structure) is the value.
    Element,
    /// Repeated child elements with a fixed tag and no wrapping list element.
    /// Document order is preserved; an absent collection decodes as empty.
    ImplicitCollection,
    /// The element's own text content. A kind with a flattened value field
    /// serializes as `<tag attr="...">value</tag>`; all of its other fields
    /// must be attributes.
    FlattenedValue,
}

/// Semantic type of a field's wire text, or a reference to another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Str,
    Int,
    Double,
    Bool,
    /// Composition: the field is (or collects) another registered kind,
    /// resolved through the same registry instance.
    Nested(&'static str),
}

impl ValueType {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            ValueType::Str => "string",
            ValueType::Int => "integer",
            ValueType::Double => "double",
            ValueType::Bool => "boolean",
            ValueType::Nested(_) => "nested record",
        }
    }
}

/// One field's mapping rule.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// In-memory field name, the key used in [`crate::Record`].
    pub field: &'static str,
    /// Wire name: attribute name, child element tag, or the repeated item
    /// tag for implicit collections. Unused for flattened values.
    pub wire: String,
    pub placement: Placement,
    pub ty: ValueType,
    /// Required fields fail decoding with a missing-field error when absent.
    pub required: bool,
    /// Marks a deliberate wire/field name mismatch kept for compatibility
    /// with the legacy schema. Unmarked mismatches are rejected at build
    /// time so renames stay visible in the mapping table.
    pub renamed: bool,
}

impl FieldSpec {
    fn new(field: &'static str, wire: String, placement: Placement, ty: ValueType) -> Self {
        Self {
            field,
            wire,
            placement,
            ty,
            required: false,
            renamed: false,
        }
    }

    pub fn attribute(field: &'static str, wire: impl Into<String>, ty: ValueType) -> Self {
        Self::new(field, wire.into(), Placement::Attribute, ty)
    }

    pub fn element(field: &'static str, wire: impl Into<String>, ty: ValueType) -> Self {
        Self::new(field, wire.into(), Placement::Element, ty)
    }

    /// Repeated child elements tagged `wire`, collected in document order.
    pub fn implicit(field: &'static str, wire: impl Into<String>, ty: ValueType) -> Self {
        Self::new(field, wire.into(), Placement::ImplicitCollection, ty)
    }

    /// The element's own text content.
    pub fn flattened(field: &'static str, ty: ValueType) -> Self {
        Self::new(field, field.to_string(), Placement::FlattenedValue, ty)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn renamed(mut self) -> Self {
        self.renamed = true;
        self
    }
}

/// Namespace declaration emitted as an attribute on a serialized root
/// element, e.g. `xmlns:oml="http://openml.org/openml"`.
#[derive(Debug, Clone)]
pub struct NamespaceDecl {
    pub attr: String,
    pub uri: String,
}

/// Complete wire definition of one message kind.
#[derive(Debug, Clone)]
pub struct KindSpec {
    /// Registry identity; unique across the table.
    pub name: &'static str,
    /// Root element tag when this kind is serialized as a document. Nested
    /// occurrences take their tag from the referencing [`FieldSpec`].
    pub root: String,
    pub namespace: Option<NamespaceDecl>,
    pub fields: Vec<FieldSpec>,
}

impl KindSpec {
    pub fn new(name: &'static str, root: impl Into<String>) -> Self {
        Self {
            name,
            root: root.into(),
            namespace: None,
            fields: Vec::new(),
        }
    }

    pub fn namespace(mut self, attr: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespace = Some(NamespaceDecl {
            attr: attr.into(),
            uri: uri.into(),
        });
        self
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub(crate) fn flattened_field(&self) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.placement == Placement::FlattenedValue)
    }
}

/// Folds a name for the rename check: the wire prefix (`oml:`), case, and
/// underscores are insignificant, so `oml:NumberOfValues` matches the field
/// `number_of_values` while `oml:name` does not match `function`.
pub(crate) fn fold_name(name: &str) -> String {
    let local = name.rsplit(':').next().unwrap_or(name);
    local
        .chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_name_ignores_prefix_case_and_underscores() {
        assert_eq!(fold_name("oml:NumberOfDistinctValues"), fold_name("number_of_distinct_values"));
        assert_eq!(fold_name("oml:fullName"), fold_name("full_name"));
        assert_ne!(fold_name("oml:name"), fold_name("function"));
    }

    #[test]
    fn builders_set_placement_and_flags() {
        let f = FieldSpec::element("did", "oml:did", ValueType::Int).required();
        assert_eq!(f.placement, Placement::Element);
        assert!(f.required);
        assert!(!f.renamed);

        let f = FieldSpec::attribute("name", "name", ValueType::Str);
        assert_eq!(f.placement, Placement::Attribute);

        let f = FieldSpec::flattened("value", ValueType::Double);
        assert_eq!(f.placement, Placement::FlattenedValue);
    }
}
