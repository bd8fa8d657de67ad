//! The complete wire mapping table.
//!
//! One registration per message kind, mirroring the server's schema
//! element for element. Wire names here are load-bearing: the server
//! accepts and emits exactly these tags and attributes, so any edit must
//! match a server-side schema change. Renamed fields (wire name differing
//! from the in-memory name) are explicit; the builder rejects unmarked
//! mismatches.

use std::sync::OnceLock;

use openml_xml_bind::{DefinitionError, FieldSpec, KindSpec, Registry, ValueType};

use crate::messages::common::{
    ApiError, Authenticate, DataTag, ImplementationTag, RunTag, SetupTag, TaskTag,
};
use crate::messages::data::{
    Data, DataFeatures, DataFeaturesUpload, DataLicences, DataQualities, DataQualitiesUpload,
    DataQualityList, DataSet, DataSetDescription, Feature, Licences, NamedQuality, UploadDataSet,
};
use crate::messages::implementation::{
    BibliographicalReference, Component, Implementation, ImplementationDelete,
    ImplementationExists, ImplementationOwned, Parameter, UploadImplementation,
};
use crate::messages::run::{
    EvaluationScore, FileUpload, Job, ParameterSetting, Run, RunData, RunDataset, RunDelete,
    RunEvaluate, RunEvaluation, RunReset, UploadRun,
};
use crate::messages::task::{
    EstimationProcedure, EvaluationMeasures, PredictionFeature, Predictions, ProcedureParameter,
    Task, TaskDataSet, TaskEvaluation, TaskEvaluations, TaskInput, TaskOutput, TaskSummary, Tasks,
};
use crate::Message;

/// Namespace URI bound to the `oml` prefix on every serialized root.
pub const XMLNS_OML: &str = "http://openml.org/openml";

const XMLNS_ATTR: &str = "xmlns:oml";

/// Shared immutable registry handle. Built on first use; a definition error
/// is a bug in this table and aborts before any service call can run on a
/// broken mapping.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| match build_registry() {
        Ok(registry) => registry,
        Err(err) => panic!("invalid wire mapping table: {err}"),
    })
}

/// Element whose wire tag is `oml:` plus the field name.
fn el(field: &'static str, ty: ValueType) -> FieldSpec {
    FieldSpec::element(field, format!("oml:{field}"), ty)
}

/// Attribute (attributes are unprefixed on this wire).
fn attr(field: &'static str, ty: ValueType) -> FieldSpec {
    FieldSpec::attribute(field, field, ty)
}

/// Implicit collection of `oml:{tag}` children.
fn items(field: &'static str, tag: &str, ty: ValueType) -> FieldSpec {
    FieldSpec::implicit(field, format!("oml:{tag}"), ty)
}

/// Nested kind in an `oml:` element named after the field.
fn nested(field: &'static str, kind: &'static str) -> FieldSpec {
    FieldSpec::element(field, format!("oml:{field}"), ValueType::Nested(kind))
}

fn build_registry() -> Result<Registry, DefinitionError> {
    use ValueType::{Bool, Double, Int, Str};

    Registry::builder()
        // dataset listing
        .register(
            KindSpec::new(Data::KIND, "oml:data")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(items("datasets", "dataset", ValueType::Nested(DataSet::KIND))),
        )
        .register(
            KindSpec::new(DataSet::KIND, "oml:dataset")
                .field(el("did", Int).required())
                .field(el("status", Str))
                .field(el("name", Str))
                .field(items(
                    "qualities",
                    "quality",
                    ValueType::Nested(NamedQuality::KIND),
                )),
        )
        .register(
            KindSpec::new(NamedQuality::KIND, "oml:quality")
                .field(attr("name", Str).required())
                .field(FieldSpec::flattened("value", Double)),
        )
        // dataset description
        .register(
            KindSpec::new(DataSetDescription::KIND, "oml:data_set_description")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("id", Int).required())
                .field(el("name", Str).required())
                .field(el("version", Str))
                .field(el("description", Str))
                .field(el("format", Str))
                .field(el("collection_date", Str))
                .field(el("language", Str))
                .field(el("upload_date", Str))
                .field(el("licence", Str))
                .field(el("url", Str))
                .field(el("row_id_attribute", Str))
                .field(el("default_target_attribute", Str))
                .field(el("visibility", Str))
                .field(el("md5_checksum", Str))
                .field(items("creators", "creator", Str))
                .field(items("contributors", "contributor", Str))
                .field(items("ignore_attributes", "ignore_attribute", Str))
                .field(items("tags", "tag", Str)),
        )
        // data features
        .register(
            KindSpec::new(DataFeatures::KIND, "oml:data_features")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("did", Int).required())
                .field(el("error", Str))
                .field(items("features", "feature", ValueType::Nested(Feature::KIND))),
        )
        .register(
            KindSpec::new(Feature::KIND, "oml:feature")
                .field(el("index", Int).required())
                .field(el("name", Str).required())
                .field(el("data_type", Str))
                .field(el("is_target", Bool))
                // Statistics keep the legacy CamelCase tags.
                .field(FieldSpec::element(
                    "number_of_distinct_values",
                    "oml:NumberOfDistinctValues",
                    Int,
                ))
                .field(FieldSpec::element(
                    "number_of_unique_values",
                    "oml:NumberOfUniqueValues",
                    Int,
                ))
                .field(FieldSpec::element(
                    "number_of_missing_values",
                    "oml:NumberOfMissingValues",
                    Int,
                ))
                .field(FieldSpec::element(
                    "number_of_integer_values",
                    "oml:NumberOfIntegerValues",
                    Int,
                ))
                .field(FieldSpec::element(
                    "number_of_real_values",
                    "oml:NumberOfRealValues",
                    Int,
                ))
                .field(FieldSpec::element(
                    "number_of_nominal_values",
                    "oml:NumberOfNominalValues",
                    Int,
                ))
                .field(FieldSpec::element("number_of_values", "oml:NumberOfValues", Int))
                .field(FieldSpec::element("maximum_value", "oml:MaximumValue", Double))
                .field(FieldSpec::element("minimum_value", "oml:MinimumValue", Double))
                .field(FieldSpec::element("mean_value", "oml:MeanValue", Double))
                .field(FieldSpec::element(
                    "standard_deviation",
                    "oml:StandardDeviation",
                    Double,
                ))
                .field(FieldSpec::element(
                    "class_distribution",
                    "oml:ClassDistribution",
                    Str,
                )),
        )
        // data qualities
        .register(
            KindSpec::new(DataQualities::KIND, "oml:data_qualities")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("did", Int).required())
                .field(el("error", Str))
                .field(items(
                    "qualities",
                    "quality",
                    ValueType::Nested(crate::messages::data::DataQuality::KIND),
                )),
        )
        .register(
            KindSpec::new(crate::messages::data::DataQuality::KIND, "oml:quality")
            .field(el("name", Str).required())
            .field(el("value", Double))
            .field(attr("interval_start", Int))
            .field(attr("interval_end", Int)),
        )
        .register(
            KindSpec::new(DataQualitiesUpload::KIND, "oml:data_qualities_upload")
                .field(el("did", Int).required()),
        )
        .register(
            KindSpec::new(DataQualityList::KIND, "oml:data_qualities_list")
                .field(items("qualities", "quality", Str)),
        )
        // licences
        .register(
            KindSpec::new(DataLicences::KIND, "oml:data_licences")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(nested("licences", Licences::KIND).required()),
        )
        .register(
            KindSpec::new(Licences::KIND, "oml:licences")
                .field(items("licences", "licence", Str)),
        )
        .register(
            KindSpec::new(DataFeaturesUpload::KIND, "oml:data_features_upload")
                .field(el("did", Int).required()),
        )
        .register(
            KindSpec::new(UploadDataSet::KIND, "oml:upload_data_set")
                .field(el("id", Int).required()),
        )
        // implementation
        .register(
            KindSpec::new(Implementation::KIND, "oml:implementation")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("id", Int))
                .field(FieldSpec::element("full_name", "oml:fullName", Str))
                .field(el("name", Str).required())
                .field(el("version", Str))
                .field(el("external_version", Str))
                .field(el("uploader", Int))
                .field(el("upload_date", Str))
                .field(el("description", Str))
                .field(el("licence", Str))
                .field(el("language", Str))
                .field(el("full_description", Str))
                .field(el("installation_notes", Str))
                .field(el("dependencies", Str))
                .field(el("source_url", Str))
                .field(el("source_format", Str))
                .field(el("source_md5", Str))
                .field(el("binary_url", Str))
                .field(el("binary_format", Str))
                .field(el("binary_md5", Str))
                .field(items("creators", "creator", Str))
                .field(items("contributors", "contributor", Str))
                .field(items(
                    "bibliographical_references",
                    "bibliographical_reference",
                    ValueType::Nested(BibliographicalReference::KIND),
                ))
                .field(items(
                    "parameters",
                    "parameter",
                    ValueType::Nested(Parameter::KIND),
                ))
                .field(items(
                    "components",
                    "component",
                    ValueType::Nested(Component::KIND),
                ))
                .field(items("tags", "tag", Str)),
        )
        .register(
            KindSpec::new(
                BibliographicalReference::KIND,
                "oml:bibliographical_reference",
            )
            .field(el("citation", Str))
            .field(el("url", Str)),
        )
        .register(
            KindSpec::new(Parameter::KIND, "oml:parameter")
                .field(el("name", Str).required())
                .field(el("data_type", Str))
                .field(el("default_value", Str))
                .field(el("description", Str)),
        )
        .register(
            KindSpec::new(Component::KIND, "oml:component")
                .field(el("identifier", Str))
                .field(nested("implementation", Implementation::KIND).required()),
        )
        .register(
            KindSpec::new(UploadImplementation::KIND, "oml:upload_implementation")
                .field(el("id", Int).required()),
        )
        .register(
            KindSpec::new(ImplementationOwned::KIND, "oml:implementation_owned")
                .field(items("ids", "id", Int)),
        )
        .register(
            KindSpec::new(ImplementationDelete::KIND, "oml:implementation_delete")
                .field(el("id", Int).required()),
        )
        .register(
            KindSpec::new(ImplementationExists::KIND, "oml:implementation_exists")
                .field(el("exists", Bool).required())
                .field(el("id", Int)),
        )
        // error envelope and authentication
        .register(
            KindSpec::new(ApiError::KIND, "oml:error")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("code", Int).required())
                .field(el("message", Str).required())
                .field(el("additional_information", Str)),
        )
        .register(
            KindSpec::new(Authenticate::KIND, "oml:authenticate")
                .field(el("session_hash", Str).required())
                .field(el("valid_until", Str))
                .field(el("timezone", Str)),
        )
        // task
        .register(
            KindSpec::new(Task::KIND, "oml:task")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("task_id", Int).required())
                .field(el("task_type", Str).required())
                .field(items("inputs", "input", ValueType::Nested(TaskInput::KIND)))
                .field(items("outputs", "output", ValueType::Nested(TaskOutput::KIND)))
                .field(items("tags", "tag", Str)),
        )
        .register(
            KindSpec::new(TaskInput::KIND, "oml:input")
                .field(attr("name", Str).required())
                .field(nested("data_set", TaskDataSet::KIND))
                .field(nested("estimation_procedure", EstimationProcedure::KIND))
                .field(el("cost_matrix", Str))
                .field(nested("evaluation_measures", EvaluationMeasures::KIND)),
        )
        .register(
            KindSpec::new(TaskDataSet::KIND, "oml:data_set")
                .field(el("data_set_id", Int))
                .field(el("labeled_data_set_id", Int))
                .field(el("target_feature", Str))
                .field(el("target_feature_left", Str))
                .field(el("target_feature_right", Str))
                .field(el("target_feature_event", Str)),
        )
        .register(
            KindSpec::new(EstimationProcedure::KIND, "oml:estimation_procedure")
                // Legacy wire name; `type` is taken in most client languages.
                .field(FieldSpec::element("procedure_type", "oml:type", Str).renamed())
                .field(el("data_splits_url", Str))
                .field(items(
                    "parameters",
                    "parameter",
                    ValueType::Nested(ProcedureParameter::KIND),
                )),
        )
        .register(
            KindSpec::new(ProcedureParameter::KIND, "oml:parameter")
                .field(attr("name", Str).required())
                .field(FieldSpec::flattened("value", Str)),
        )
        .register(
            KindSpec::new(EvaluationMeasures::KIND, "oml:evaluation_measures")
                .field(items("measures", "evaluation_measure", Str)),
        )
        .register(
            KindSpec::new(TaskOutput::KIND, "oml:output")
                .field(attr("name", Str).required())
                .field(nested("predictions", Predictions::KIND)),
        )
        .register(
            KindSpec::new(Predictions::KIND, "oml:predictions")
                .field(el("format", Str))
                .field(items(
                    "features",
                    "feature",
                    ValueType::Nested(PredictionFeature::KIND),
                )),
        )
        .register(
            KindSpec::new(PredictionFeature::KIND, "oml:feature")
                .field(attr("name", Str).required())
                .field(FieldSpec::attribute("feature_type", "type", Str).renamed()),
        )
        // tasks overview
        .register(
            KindSpec::new(Tasks::KIND, "oml:tasks").field(items(
                "tasks",
                "task",
                ValueType::Nested(TaskSummary::KIND),
            )),
        )
        .register(
            KindSpec::new(TaskSummary::KIND, "oml:task")
                .field(el("task_id", Int).required())
                .field(el("task_type", Str))
                .field(el("did", Int))
                .field(el("name", Str))
                .field(el("status", Str))
                .field(items(
                    "qualities",
                    "quality",
                    ValueType::Nested(NamedQuality::KIND),
                )),
        )
        // task evaluations
        .register(
            KindSpec::new(TaskEvaluations::KIND, "oml:task_evaluations")
                .field(el("task_id", Int).required())
                .field(el("task_name", Str))
                .field(el("task_type_id", Int))
                .field(el("input_data", Int))
                .field(el("estimation_procedure", Str))
                .field(items(
                    "evaluations",
                    "evaluation",
                    ValueType::Nested(TaskEvaluation::KIND),
                )),
        )
        .register(
            KindSpec::new(TaskEvaluation::KIND, "oml:evaluation")
                .field(el("run_id", Int).required())
                .field(el("setup_id", Int))
                .field(el("implementation_id", Int))
                .field(el("implementation", Str))
                .field(attr("interval_start", Int))
                .field(attr("interval_end", Int))
                .field(items(
                    "measures",
                    "measure",
                    ValueType::Nested(NamedQuality::KIND),
                )),
        )
        // run
        .register(
            KindSpec::new(Run::KIND, "oml:run")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("task_id", Int).required())
                .field(el("implementation_id", Int))
                .field(el("error_message", Str))
                .field(el("setup_string", Str))
                .field(items(
                    "parameter_settings",
                    "parameter_setting",
                    ValueType::Nested(ParameterSetting::KIND),
                ))
                .field(items("tags", "tag", Str))
                .field(nested("input_data", RunData::KIND))
                .field(nested("output_data", RunData::KIND)),
        )
        .register(
            KindSpec::new(ParameterSetting::KIND, "oml:parameter_setting")
                .field(el("name", Str).required())
                .field(el("component", Int))
                .field(el("value", Str)),
        )
        .register(
            KindSpec::new(RunData::KIND, "oml:data")
                .field(items(
                    "datasets",
                    "dataset",
                    ValueType::Nested(RunDataset::KIND),
                ))
                .field(items(
                    "evaluations",
                    "evaluation",
                    ValueType::Nested(EvaluationScore::KIND),
                )),
        )
        .register(
            KindSpec::new(RunDataset::KIND, "oml:dataset")
                .field(el("did", Int))
                .field(el("name", Str))
                .field(el("url", Str)),
        )
        .register(
            KindSpec::new(EvaluationScore::KIND, "oml:evaluation")
                .field(el("did", Int))
                // Legacy inconsistency on the wire: the score's function
                // name travels in `oml:name`.
                .field(FieldSpec::element("function", "oml:name", Str).renamed())
                .field(el("implementation", Str))
                .field(el("value", Double))
                .field(el("array_data", Str))
                .field(el("sample_size", Int))
                .field(attr("repeat", Int))
                .field(attr("fold", Int))
                .field(attr("sample", Int))
                .field(attr("interval_start", Int))
                .field(attr("interval_end", Int)),
        )
        .register(
            KindSpec::new(RunEvaluation::KIND, "oml:run_evaluation")
                .namespace(XMLNS_ATTR, XMLNS_OML)
                .field(el("run_id", Int).required())
                .field(el("error", Str))
                .field(items(
                    "evaluations",
                    "evaluation",
                    ValueType::Nested(EvaluationScore::KIND),
                )),
        )
        .register(
            KindSpec::new(UploadRun::KIND, "oml:upload_run")
                .field(el("run_id", Int).required()),
        )
        .register(
            KindSpec::new(RunReset::KIND, "oml:run_reset")
                .field(FieldSpec::element("run_id", "oml:id", ValueType::Int)
                    .required()
                    .renamed()),
        )
        .register(
            KindSpec::new(RunDelete::KIND, "oml:run_delete").field(el("id", Int).required()),
        )
        .register(
            KindSpec::new(RunEvaluate::KIND, "oml:run_evaluate")
                .field(el("run_id", Int).required()),
        )
        .register(
            KindSpec::new(FileUpload::KIND, "oml:file_upload")
                .field(el("id", Int).required())
                .field(el("url", Str)),
        )
        .register(
            KindSpec::new(Job::KIND, "oml:job")
                .field(el("task_id", Int).required())
                .field(el("learner", Str)),
        )
        // tag acknowledgements
        .register(KindSpec::new(DataTag::KIND, "oml:data_tag").field(el("id", Int).required()))
        .register(
            KindSpec::new(ImplementationTag::KIND, "oml:implementation_tag")
                .field(el("id", Int).required()),
        )
        .register(KindSpec::new(SetupTag::KIND, "oml:setup_tag").field(el("id", Int).required()))
        .register(KindSpec::new(TaskTag::KIND, "oml:task_tag").field(el("id", Int).required()))
        .register(KindSpec::new(RunTag::KIND, "oml:run_tag").field(el("id", Int).required()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_table_builds() {
        let registry = registry();
        assert!(registry.len() >= 40, "got {} kinds", registry.len());
    }

    #[test]
    fn every_namespaced_root_declares_the_oml_prefix() {
        let registry = registry();
        for kind in [
            Data::KIND,
            DataSetDescription::KIND,
            DataFeatures::KIND,
            DataQualities::KIND,
            DataLicences::KIND,
            Implementation::KIND,
            ApiError::KIND,
            Task::KIND,
            Run::KIND,
            RunEvaluation::KIND,
        ] {
            let spec = registry.kind(kind).expect(kind);
            let ns = spec.namespace.as_ref().expect(kind);
            assert_eq!(ns.uri, XMLNS_OML);
        }
    }

    #[test]
    fn legacy_renames_are_flagged_in_the_table() {
        let registry = registry();
        let score = registry.kind(EvaluationScore::KIND).unwrap();
        let function = score
            .fields
            .iter()
            .find(|f| f.field == "function")
            .unwrap();
        assert_eq!(function.wire, "oml:name");
        assert!(function.renamed);

        let reset = registry.kind(RunReset::KIND).unwrap();
        let run_id = reset.fields.iter().find(|f| f.field == "run_id").unwrap();
        assert_eq!(run_id.wire, "oml:id");
        assert!(run_id.renamed);
    }
}
