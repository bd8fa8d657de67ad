//! Generic value graph interpreted against the mapping descriptors.
//!
//! A [`Record`] is an ordered list of `(field, value)` pairs keyed by the
//! in-memory field names of one kind. Order is preserved so implicit
//! collections survive round trips positionally; absent optional fields are
//! simply not present.

use crate::error::{DecodeError, MalformedMessageError, ReadError};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i32),
    Double(f64),
    Bool(bool),
    Record(Record),
    List(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn put(&mut self, field: &'static str, value: Value) {
        self.fields.push((field, value));
    }

    /// Puts the value if present; absent optionals never reach the wire.
    pub fn put_opt(&mut self, field: &'static str, value: Option<Value>) {
        if let Some(v) = value {
            self.put(field, v);
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, v)| (*name, v))
    }

    fn missing(&self, field: &'static str) -> ReadError {
        MalformedMessageError::MissingField {
            kind: self.kind,
            field,
        }
        .into()
    }

    fn wrong_shape(&self, field: &'static str, expected: &'static str) -> ReadError {
        DecodeError::WrongShape {
            kind: self.kind,
            field,
            expected,
        }
        .into()
    }

    pub fn req_str(&self, field: &'static str) -> Result<String, ReadError> {
        self.opt_str(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_str(&self, field: &'static str) -> Result<Option<String>, ReadError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.wrong_shape(field, "string")),
        }
    }

    pub fn req_i32(&self, field: &'static str) -> Result<i32, ReadError> {
        self.opt_i32(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_i32(&self, field: &'static str) -> Result<Option<i32>, ReadError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            Some(_) => Err(self.wrong_shape(field, "integer")),
        }
    }

    pub fn req_f64(&self, field: &'static str) -> Result<f64, ReadError> {
        self.opt_f64(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_f64(&self, field: &'static str) -> Result<Option<f64>, ReadError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Double(d)) => Ok(Some(*d)),
            Some(_) => Err(self.wrong_shape(field, "double")),
        }
    }

    pub fn req_bool(&self, field: &'static str) -> Result<bool, ReadError> {
        self.opt_bool(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_bool(&self, field: &'static str) -> Result<Option<bool>, ReadError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.wrong_shape(field, "boolean")),
        }
    }

    pub fn req_record(&self, field: &'static str) -> Result<&Record, ReadError> {
        self.opt_record(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_record(&self, field: &'static str) -> Result<Option<&Record>, ReadError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r)),
            Some(_) => Err(self.wrong_shape(field, "nested record")),
        }
    }

    /// Collection accessors: an absent collection is an empty one.
    pub fn str_list(&self, field: &'static str) -> Result<Vec<String>, ReadError> {
        self.list(field, "string", |v| match v {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn i32_list(&self, field: &'static str) -> Result<Vec<i32>, ReadError> {
        self.list(field, "integer", |v| match v {
            Value::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn record_list(&self, field: &'static str) -> Result<Vec<&Record>, ReadError> {
        self.list(field, "nested record", |v| match v {
            Value::Record(r) => Some(r),
            _ => None,
        })
    }

    fn list<'a, T>(
        &'a self,
        field: &'static str,
        expected: &'static str,
        extract: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Vec<T>, ReadError> {
        match self.get(field) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => items
                .iter()
                .map(|v| extract(v).ok_or_else(|| self.wrong_shape(field, expected)))
                .collect(),
            Some(_) => Err(self.wrong_shape(field, "list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_collection_reads_as_empty() {
        let rec = Record::new("t");
        assert_eq!(rec.str_list("tags").unwrap(), Vec::<String>::new());
        assert_eq!(rec.i32_list("ids").unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn required_scalar_missing_is_malformed() {
        let rec = Record::new("t");
        let err = rec.req_i32("id").unwrap_err();
        assert!(matches!(
            err,
            ReadError::Malformed(MalformedMessageError::MissingField { kind: "t", field: "id" })
        ));
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        let mut rec = Record::new("t");
        rec.put("id", Value::Str("x".into()));
        assert!(matches!(
            rec.req_i32("id").unwrap_err(),
            ReadError::Decode(DecodeError::WrongShape { .. })
        ));
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut rec = Record::new("t");
        rec.put(
            "tags",
            Value::List(vec![
                Value::Str("b".into()),
                Value::Str("a".into()),
                Value::Str("c".into()),
            ]),
        );
        assert_eq!(rec.str_list("tags").unwrap(), vec!["b", "a", "c"]);
    }
}
