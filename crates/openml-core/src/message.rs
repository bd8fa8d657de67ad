//! The seam between typed message structs and the generic record graph.

use openml_xml_bind::{EncodeError, ReadError, Record, Value};

use crate::bindings::registry;

/// A typed wire message. `to_record`/`from_record` translate between the
/// struct and the generic field graph the registry interprets; they are the
/// only place a struct's members meet their in-memory field names.
pub trait Message: Sized {
    /// Registry identity of this kind.
    const KIND: &'static str;

    fn to_record(&self) -> Record;
    fn from_record(record: &Record) -> Result<Self, ReadError>;
}

/// Renders a message to wire bytes.
pub fn to_xml<T: Message>(message: &T) -> Result<Vec<u8>, EncodeError> {
    registry().serialize(&message.to_record())
}

/// Parses wire bytes into the expected message kind. The caller names the
/// kind; the bytes themselves are not trusted to identify it.
pub fn from_xml<T: Message>(bytes: &[u8]) -> Result<T, ReadError> {
    let record = registry().deserialize(bytes, T::KIND)?;
    T::from_record(&record)
}

pub(crate) fn str_list(items: &[String]) -> Value {
    Value::List(items.iter().cloned().map(Value::Str).collect())
}

pub(crate) fn i32_list(items: &[i32]) -> Value {
    Value::List(items.iter().copied().map(Value::Int).collect())
}

pub(crate) fn record_list<T: Message>(items: &[T]) -> Value {
    Value::List(items.iter().map(|m| Value::Record(m.to_record())).collect())
}

pub(crate) fn from_records<T: Message>(records: Vec<&Record>) -> Result<Vec<T>, ReadError> {
    records.into_iter().map(T::from_record).collect()
}

pub(crate) fn opt_nested<T: Message>(
    record: &Record,
    field: &'static str,
) -> Result<Option<T>, ReadError> {
    record.opt_record(field)?.map(T::from_record).transpose()
}
