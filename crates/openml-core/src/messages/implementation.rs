//! Implementation (flow) messages: the descriptor itself plus its
//! ownership, existence, upload, and delete responses.

use openml_xml_bind::{ReadError, Record, Value};

use crate::message::{from_records, i32_list, record_list, str_list, Message};

/// Implementation descriptor (`oml:implementation`). Components nest full
/// implementations recursively; the registry resolves the reference back to
/// this same kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Implementation {
    pub id: Option<i32>,
    pub full_name: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub external_version: Option<String>,
    pub uploader: Option<i32>,
    pub upload_date: Option<String>,
    pub description: Option<String>,
    pub licence: Option<String>,
    pub language: Option<String>,
    pub full_description: Option<String>,
    pub installation_notes: Option<String>,
    pub dependencies: Option<String>,
    pub source_url: Option<String>,
    pub source_format: Option<String>,
    pub source_md5: Option<String>,
    pub binary_url: Option<String>,
    pub binary_format: Option<String>,
    pub binary_md5: Option<String>,
    pub creators: Vec<String>,
    pub contributors: Vec<String>,
    pub bibliographical_references: Vec<BibliographicalReference>,
    pub parameters: Vec<Parameter>,
    pub components: Vec<Component>,
    pub tags: Vec<String>,
}

impl Message for Implementation {
    const KIND: &'static str = "implementation";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt("id", self.id.map(Value::Int));
        rec.put_opt("full_name", self.full_name.clone().map(Value::Str));
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("version", self.version.clone().map(Value::Str));
        rec.put_opt(
            "external_version",
            self.external_version.clone().map(Value::Str),
        );
        rec.put_opt("uploader", self.uploader.map(Value::Int));
        rec.put_opt("upload_date", self.upload_date.clone().map(Value::Str));
        rec.put_opt("description", self.description.clone().map(Value::Str));
        rec.put_opt("licence", self.licence.clone().map(Value::Str));
        rec.put_opt("language", self.language.clone().map(Value::Str));
        rec.put_opt(
            "full_description",
            self.full_description.clone().map(Value::Str),
        );
        rec.put_opt(
            "installation_notes",
            self.installation_notes.clone().map(Value::Str),
        );
        rec.put_opt("dependencies", self.dependencies.clone().map(Value::Str));
        rec.put_opt("source_url", self.source_url.clone().map(Value::Str));
        rec.put_opt("source_format", self.source_format.clone().map(Value::Str));
        rec.put_opt("source_md5", self.source_md5.clone().map(Value::Str));
        rec.put_opt("binary_url", self.binary_url.clone().map(Value::Str));
        rec.put_opt("binary_format", self.binary_format.clone().map(Value::Str));
        rec.put_opt("binary_md5", self.binary_md5.clone().map(Value::Str));
        rec.put("creators", str_list(&self.creators));
        rec.put("contributors", str_list(&self.contributors));
        rec.put(
            "bibliographical_references",
            record_list(&self.bibliographical_references),
        );
        rec.put("parameters", record_list(&self.parameters));
        rec.put("components", record_list(&self.components));
        rec.put("tags", str_list(&self.tags));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            id: record.opt_i32("id")?,
            full_name: record.opt_str("full_name")?,
            name: record.req_str("name")?,
            version: record.opt_str("version")?,
            external_version: record.opt_str("external_version")?,
            uploader: record.opt_i32("uploader")?,
            upload_date: record.opt_str("upload_date")?,
            description: record.opt_str("description")?,
            licence: record.opt_str("licence")?,
            language: record.opt_str("language")?,
            full_description: record.opt_str("full_description")?,
            installation_notes: record.opt_str("installation_notes")?,
            dependencies: record.opt_str("dependencies")?,
            source_url: record.opt_str("source_url")?,
            source_format: record.opt_str("source_format")?,
            source_md5: record.opt_str("source_md5")?,
            binary_url: record.opt_str("binary_url")?,
            binary_format: record.opt_str("binary_format")?,
            binary_md5: record.opt_str("binary_md5")?,
            creators: record.str_list("creators")?,
            contributors: record.str_list("contributors")?,
            bibliographical_references: from_records(
                record.record_list("bibliographical_references")?,
            )?,
            parameters: from_records(record.record_list("parameters")?)?,
            components: from_records(record.record_list("components")?)?,
            tags: record.str_list("tags")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BibliographicalReference {
    pub citation: Option<String>,
    pub url: Option<String>,
}

impl Message for BibliographicalReference {
    const KIND: &'static str = "implementation/bibliographical_reference";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt("citation", self.citation.clone().map(Value::Str));
        rec.put_opt("url", self.url.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            citation: record.opt_str("citation")?,
            url: record.opt_str("url")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    pub name: String,
    pub data_type: Option<String>,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

impl Message for Parameter {
    const KIND: &'static str = "implementation/parameter";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("data_type", self.data_type.clone().map(Value::Str));
        rec.put_opt("default_value", self.default_value.clone().map(Value::Str));
        rec.put_opt("description", self.description.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            data_type: record.opt_str("data_type")?,
            default_value: record.opt_str("default_value")?,
            description: record.opt_str("description")?,
        })
    }
}

/// A sub-implementation, identified within its parent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    pub identifier: Option<String>,
    pub implementation: Implementation,
}

impl Message for Component {
    const KIND: &'static str = "implementation/component";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt("identifier", self.identifier.clone().map(Value::Str));
        rec.put(
            "implementation",
            Value::Record(self.implementation.to_record()),
        );
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            identifier: record.opt_str("identifier")?,
            implementation: Implementation::from_record(record.req_record("implementation")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadImplementation {
    pub id: i32,
}

impl Message for UploadImplementation {
    const KIND: &'static str = "upload_implementation";

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

/// Ids of implementations owned by the session user, as an implicit
/// collection of `oml:id` elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImplementationOwned {
    pub ids: Vec<i32>,
}

impl Message for ImplementationOwned {
    const KIND: &'static str = "implementation_owned";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("ids", i32_list(&self.ids));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            ids: record.i32_list("ids")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImplementationDelete {
    pub id: i32,
}

impl Message for ImplementationDelete {
    const KIND: &'static str = "implementation_delete";

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

/// Existence check: `id` is only present when `exists` is true.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImplementationExists {
    pub exists: bool,
    pub id: Option<i32>,
}

impl Message for ImplementationExists {
    const KIND: &'static str = "implementation_exists";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("exists", Value::Bool(self.exists));
        rec.put_opt("id", self.id.map(Value::Int));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            exists: record.req_bool("exists")?,
            id: record.opt_i32("id")?,
        })
    }
}
