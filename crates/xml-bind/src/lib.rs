//! Declarative XML binding engine.
//!
//! The OpenML wire protocol encodes every message as a namespaced XML
//! document with per-kind placement quirks: some fields are attributes, some
//! are child elements, repeated children appear without a wrapping list
//! element, and a few objects flatten to a single text value plus sibling
//! attributes. This crate models those rules as data ([`KindSpec`] /
//! [`FieldSpec`]) collected in an immutable [`Registry`], and interprets them
//! with generic encode/decode routines over an ordered [`Record`] graph.
//!
//! The registry is validated when built; a contradictory mapping table is a
//! [`DefinitionError`] and never reaches a round trip.

mod decode;
mod encode;
mod node;

pub mod descriptor;
pub mod error;
pub mod registry;
pub mod value;

pub use descriptor::{FieldSpec, KindSpec, NamespaceDecl, Placement, ValueType};
pub use error::{
    DecodeError, DefinitionError, EncodeError, MalformedMessageError, ReadError,
};
pub use registry::{Registry, RegistryBuilder};
pub use value::{Record, Value};
