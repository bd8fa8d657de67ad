//! Dataset-side messages: listings, descriptions, features, qualities,
//! licences, and their upload acknowledgements.

use openml_xml_bind::{ReadError, Record, Value};

use crate::message::{from_records, record_list, str_list, Message};

/// Dataset listing (`oml:data`): implicit `oml:dataset` children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Data {
    pub datasets: Vec<DataSet>,
}

impl Message for Data {
    const KIND: &'static str = "data";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("datasets", record_list(&self.datasets));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            datasets: from_records(record.record_list("datasets")?)?,
        })
    }
}

/// One entry of the dataset listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    pub did: i32,
    pub status: Option<String>,
    pub name: Option<String>,
    pub qualities: Vec<NamedQuality>,
}

impl Message for DataSet {
    const KIND: &'static str = "data/dataset";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("did", Value::Int(self.did));
        rec.put_opt("status", self.status.clone().map(Value::Str));
        rec.put_opt("name", self.name.clone().map(Value::Str));
        rec.put("qualities", record_list(&self.qualities));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            did: record.req_i32("did")?,
            status: record.opt_str("status")?,
            name: record.opt_str("name")?,
            qualities: from_records(record.record_list("qualities")?)?,
        })
    }
}

/// Value-wrapped quality: `<oml:quality name="MeanEntropy">1.234</oml:quality>`.
/// Shared by the dataset listing, the tasks overview, and task-evaluation
/// measures, which all use this exact shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedQuality {
    pub name: String,
    pub value: Option<f64>,
}

impl NamedQuality {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}

impl Message for NamedQuality {
    const KIND: &'static str = "quality";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("value", self.value.map(Value::Double));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            value: record.opt_f64("value")?,
        })
    }
}

/// Full dataset description (`oml:data_set_description`). The on-disk
/// dataset handle the original client kept alongside this is a cache
/// concern and never appears on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSetDescription {
    pub id: i32,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
    pub collection_date: Option<String>,
    pub language: Option<String>,
    pub upload_date: Option<String>,
    pub licence: Option<String>,
    pub url: Option<String>,
    pub row_id_attribute: Option<String>,
    pub default_target_attribute: Option<String>,
    pub visibility: Option<String>,
    pub md5_checksum: Option<String>,
    pub creators: Vec<String>,
    pub contributors: Vec<String>,
    pub ignore_attributes: Vec<String>,
    pub tags: Vec<String>,
}

impl Message for DataSetDescription {
    const KIND: &'static str = "data_set_description";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("id", Value::Int(self.id));
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("version", self.version.clone().map(Value::Str));
        rec.put_opt("description", self.description.clone().map(Value::Str));
        rec.put_opt("format", self.format.clone().map(Value::Str));
        rec.put_opt(
            "collection_date",
            self.collection_date.clone().map(Value::Str),
        );
        rec.put_opt("language", self.language.clone().map(Value::Str));
        rec.put_opt("upload_date", self.upload_date.clone().map(Value::Str));
        rec.put_opt("licence", self.licence.clone().map(Value::Str));
        rec.put_opt("url", self.url.clone().map(Value::Str));
        rec.put_opt(
            "row_id_attribute",
            self.row_id_attribute.clone().map(Value::Str),
        );
        rec.put_opt(
            "default_target_attribute",
            self.default_target_attribute.clone().map(Value::Str),
        );
        rec.put_opt("visibility", self.visibility.clone().map(Value::Str));
        rec.put_opt("md5_checksum", self.md5_checksum.clone().map(Value::Str));
        rec.put("creators", str_list(&self.creators));
        rec.put("contributors", str_list(&self.contributors));
        rec.put("ignore_attributes", str_list(&self.ignore_attributes));
        rec.put("tags", str_list(&self.tags));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            id: record.req_i32("id")?,
            name: record.req_str("name")?,
            version: record.opt_str("version")?,
            description: record.opt_str("description")?,
            format: record.opt_str("format")?,
            collection_date: record.opt_str("collection_date")?,
            language: record.opt_str("language")?,
            upload_date: record.opt_str("upload_date")?,
            licence: record.opt_str("licence")?,
            url: record.opt_str("url")?,
            row_id_attribute: record.opt_str("row_id_attribute")?,
            default_target_attribute: record.opt_str("default_target_attribute")?,
            visibility: record.opt_str("visibility")?,
            md5_checksum: record.opt_str("md5_checksum")?,
            creators: record.str_list("creators")?,
            contributors: record.str_list("contributors")?,
            ignore_attributes: record.str_list("ignore_attributes")?,
            tags: record.str_list("tags")?,
        })
    }
}

/// Feature listing of a dataset (`oml:data_features`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFeatures {
    pub did: i32,
    pub error: Option<String>,
    /// Ordered: consumers index features positionally.
    pub features: Vec<Feature>,
}

impl Message for DataFeatures {
    const KIND: &'static str = "data_features";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("did", Value::Int(self.did));
        rec.put_opt("error", self.error.clone().map(Value::Str));
        rec.put("features", record_list(&self.features));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            did: record.req_i32("did")?,
            error: record.opt_str("error")?,
            features: from_records(record.record_list("features")?)?,
        })
    }
}

/// One feature with its per-feature statistics. The statistic elements keep
/// the legacy CamelCase wire tags (`oml:NumberOfDistinctValues` and
/// friends).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    pub index: i32,
    pub name: String,
    pub data_type: Option<String>,
    pub is_target: Option<bool>,
    pub number_of_distinct_values: Option<i32>,
    pub number_of_unique_values: Option<i32>,
    pub number_of_missing_values: Option<i32>,
    pub number_of_integer_values: Option<i32>,
    pub number_of_real_values: Option<i32>,
    pub number_of_nominal_values: Option<i32>,
    pub number_of_values: Option<i32>,
    pub maximum_value: Option<f64>,
    pub minimum_value: Option<f64>,
    pub mean_value: Option<f64>,
    pub standard_deviation: Option<f64>,
    pub class_distribution: Option<String>,
}

impl Message for Feature {
    const KIND: &'static str = "data_features/feature";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("index", Value::Int(self.index));
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("data_type", self.data_type.clone().map(Value::Str));
        rec.put_opt("is_target", self.is_target.map(Value::Bool));
        rec.put_opt(
            "number_of_distinct_values",
            self.number_of_distinct_values.map(Value::Int),
        );
        rec.put_opt(
            "number_of_unique_values",
            self.number_of_unique_values.map(Value::Int),
        );
        rec.put_opt(
            "number_of_missing_values",
            self.number_of_missing_values.map(Value::Int),
        );
        rec.put_opt(
            "number_of_integer_values",
            self.number_of_integer_values.map(Value::Int),
        );
        rec.put_opt(
            "number_of_real_values",
            self.number_of_real_values.map(Value::Int),
        );
        rec.put_opt(
            "number_of_nominal_values",
            self.number_of_nominal_values.map(Value::Int),
        );
        rec.put_opt("number_of_values", self.number_of_values.map(Value::Int));
        rec.put_opt("maximum_value", self.maximum_value.map(Value::Double));
        rec.put_opt("minimum_value", self.minimum_value.map(Value::Double));
        rec.put_opt("mean_value", self.mean_value.map(Value::Double));
        rec.put_opt(
            "standard_deviation",
            self.standard_deviation.map(Value::Double),
        );
        rec.put_opt(
            "class_distribution",
            self.class_distribution.clone().map(Value::Str),
        );
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            index: record.req_i32("index")?,
            name: record.req_str("name")?,
            data_type: record.opt_str("data_type")?,
            is_target: record.opt_bool("is_target")?,
            number_of_distinct_values: record.opt_i32("number_of_distinct_values")?,
            number_of_unique_values: record.opt_i32("number_of_unique_values")?,
            number_of_missing_values: record.opt_i32("number_of_missing_values")?,
            number_of_integer_values: record.opt_i32("number_of_integer_values")?,
            number_of_real_values: record.opt_i32("number_of_real_values")?,
            number_of_nominal_values: record.opt_i32("number_of_nominal_values")?,
            number_of_values: record.opt_i32("number_of_values")?,
            maximum_value: record.opt_f64("maximum_value")?,
            minimum_value: record.opt_f64("minimum_value")?,
            mean_value: record.opt_f64("mean_value")?,
            standard_deviation: record.opt_f64("standard_deviation")?,
            class_distribution: record.opt_str("class_distribution")?,
        })
    }
}

/// Quality listing of a dataset (`oml:data_qualities`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataQualities {
    pub did: i32,
    pub error: Option<String>,
    pub qualities: Vec<DataQuality>,
}

impl Message for DataQualities {
    const KIND: &'static str = "data_qualities";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("did", Value::Int(self.did));
        rec.put_opt("error", self.error.clone().map(Value::Str));
        rec.put("qualities", record_list(&self.qualities));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            did: record.req_i32("did")?,
            error: record.opt_str("error")?,
            qualities: from_records(record.record_list("qualities")?)?,
        })
    }
}

/// Unlike the value-wrapped [`NamedQuality`], this kind carries name and
/// value as child elements, with the interval bounds as attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataQuality {
    pub name: String,
    pub value: Option<f64>,
    pub interval_start: Option<i32>,
    pub interval_end: Option<i32>,
}

impl Message for DataQuality {
    const KIND: &'static str = "data_qualities/quality";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("value", self.value.map(Value::Double));
        rec.put_opt("interval_start", self.interval_start.map(Value::Int));
        rec.put_opt("interval_end", self.interval_end.map(Value::Int));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            value: record.opt_f64("value")?,
            interval_start: record.opt_i32("interval_start")?,
            interval_end: record.opt_i32("interval_end")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataQualitiesUpload {
    pub did: i32,
}

impl Message for DataQualitiesUpload {
    const KIND: &'static str = "data_qualities_upload";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("did", Value::Int(self.did));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            did: record.req_i32("did")?,
        })
    }
}

/// Names of the known data qualities (`oml:data_qualities_list`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataQualityList {
    pub qualities: Vec<String>,
}

impl Message for DataQualityList {
    const KIND: &'static str = "data_qualities_list";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("qualities", str_list(&self.qualities));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            qualities: record.str_list("qualities")?,
        })
    }
}

/// Licence overview (`oml:data_licences`). The wire nests the individual
/// licences inside an `oml:licences` wrapper element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataLicences {
    pub licences: Licences,
}

impl Message for DataLicences {
    const KIND: &'static str = "data_licences";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("licences", Value::Record(self.licences.to_record()));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            licences: Licences::from_record(record.req_record("licences")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Licences {
    pub licences: Vec<String>,
}

impl Message for Licences {
    const KIND: &'static str = "data_licences/licences";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("licences", str_list(&self.licences));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            licences: record.str_list("licences")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFeaturesUpload {
    pub did: i32,
}

impl Message for DataFeaturesUpload {
    const KIND: &'static str = "data_features_upload";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("did", Value::Int(self.did));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            did: record.req_i32("did")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadDataSet {
    pub id: i32,
}

impl Message for UploadDataSet {
    const KIND: &'static str = "upload_data_set";

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
