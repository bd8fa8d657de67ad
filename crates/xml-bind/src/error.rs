//! Error types of the binding engine.

use thiserror::Error;

/// A contradiction in the static mapping table, detected when the registry
/// is built. Fatal: the process must not proceed to service calls.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("kind `{0}` registered twice")]
    DuplicateKind(&'static str),
    #[error("kind `{kind}` declares field `{field}` twice")]
    DuplicateField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("kind `{kind}` maps two fields to wire name `{wire}`")]
    DuplicateWireName { kind: &'static str, wire: String },
    #[error("kind `{kind}` field `{field}` references unregistered kind `{target}`")]
    UnknownKindRef {
        kind: &'static str,
        field: &'static str,
        target: &'static str,
    },
    #[error("kind `{kind}` declares more than one flattened value field")]
    MultipleValueFields { kind: &'static str },
    #[error("kind `{kind}` flattens a value but field `{field}` is not an attribute")]
    NonAttributeSibling {
        kind: &'static str,
        field: &'static str,
    },
    #[error("kind `{kind}` field `{field}` flattens a nested kind")]
    NestedValueField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("kind `{kind}` marks collection field `{field}` required; collections are only ever empty")]
    RequiredCollection {
        kind: &'static str,
        field: &'static str,
    },
    #[error("kind `{kind}` field `{field}` maps to wire name `{wire}` without a rename flag")]
    UnflaggedRename {
        kind: &'static str,
        field: &'static str,
        wire: String,
    },
}

/// Required structure absent from the input, or input that is not a
/// well-formed document of the expected kind.
#[derive(Debug, Error)]
pub enum MalformedMessageError {
    #[error("kind `{kind}` is missing required field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("expected root element `{expected}`, found `{found}`")]
    RootMismatch { expected: String, found: String },
    #[error("document has no root element")]
    EmptyDocument,
    #[error("xml syntax error: {0}")]
    Syntax(String),
}

/// Wire text that cannot be converted into the declared semantic type, with
/// enough context to locate the offending field.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("kind `{kind}` field `{field}`: cannot parse `{text}` as {expected}")]
    BadScalar {
        kind: &'static str,
        field: &'static str,
        text: String,
        expected: &'static str,
    },
    #[error("kind `{kind}` field `{field}`: expected {expected}")]
    WrongShape {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
    },
}

/// Everything `deserialize` can report. Distinguishes "the server sent
/// something we cannot understand" (`Malformed`/`Decode`) from misuse of the
/// registry itself (`UnknownKind`).
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Malformed(#[from] MalformedMessageError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("unknown message kind `{0}`")]
    UnknownKind(String),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unknown message kind `{0}`")]
    UnknownKind(String),
    #[error("kind `{kind}` field `{field}`: expected {expected}")]
    WrongShape {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
    },
    #[error("xml write error: {0}")]
    Write(String),
}
