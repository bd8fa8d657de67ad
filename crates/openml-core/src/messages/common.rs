//! Cross-cutting messages: the generic error envelope, authentication, and
//! the tag acknowledgements.

use openml_xml_bind::{ReadError, Record, Value};

use crate::message::Message;

/// Generic error envelope (`oml:error`). Distinct from this crate's own
/// error types: this is a message the server sends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
    pub additional_information: Option<String>,
}

impl Message for ApiError {
    const KIND: &'static str = "error";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("code", Value::Int(self.code));
        rec.put("message", Value::Str(self.message.clone()));
        rec.put_opt(
            "additional_information",
            self.additional_information.clone().map(Value::Str),
        );
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            code: record.req_i32("code")?,
            message: record.req_str("message")?,
            additional_information: record.opt_str("additional_information")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Authenticate {
    pub session_hash: String,
    pub valid_until: Option<String>,
    pub timezone: Option<String>,
}

impl Message for Authenticate {
    const KIND: &'static str = "authenticate";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("session_hash", Value::Str(self.session_hash.clone()));
        rec.put_opt("valid_until", self.valid_until.clone().map(Value::Str));
        rec.put_opt("timezone", self.timezone.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            session_hash: record.req_str("session_hash")?,
            valid_until: record.opt_str("valid_until")?,
            timezone: record.opt_str("timezone")?,
        })
    }
}

macro_rules! tag_ack {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            pub id: i32,
        }

        impl Message for $name {
            const KIND: &'static str = $kind;

            fn to_record(&self) -> Record {
                let mut rec = Record::new(Self::KIND);
                rec.put("id", Value::Int(self.id));
                rec
            }

            fn from_record(record: &Record) -> Result<Self, ReadError> {
                Ok(Self {
                    id: record.req_i32("id")?,
                })
            }
        }
    };
}

tag_ack!(
    /// Acknowledgement of tagging a dataset.
    DataTag,
    "data_tag"
);
tag_ack!(ImplementationTag, "implementation_tag");
tag_ack!(SetupTag, "setup_tag");
tag_ack!(TaskTag, "task_tag");
tag_ack!(RunTag, "run_tag");
