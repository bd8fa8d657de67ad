//! Task messages: the task descriptor with its polymorphic named inputs and
//! outputs, the tasks overview, and per-task evaluation reports.

use openml_xml_bind::{ReadError, Record, Value};

use crate::message::{from_records, opt_nested, record_list, str_list, Message};
use crate::messages::data::NamedQuality;

/// Task descriptor (`oml:task`). Inputs and outputs are implicit
/// collections discriminated by their `name` attribute; which of the
/// optional payload fields is populated depends on that name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Task {
    pub task_id: i32,
    pub task_type: String,
    pub inputs: Vec<TaskInput>,
    pub outputs: Vec<TaskOutput>,
    pub tags: Vec<String>,
}

impl Message for Task {
    const KIND: &'static str = "task";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("task_id", Value::Int(self.task_id));
        rec.put("task_type", Value::Str(self.task_type.clone()));
        rec.put("inputs", record_list(&self.inputs));
        rec.put("outputs", record_list(&self.outputs));
        rec.put("tags", str_list(&self.tags));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            task_id: record.req_i32("task_id")?,
            task_type: record.req_str("task_type")?,
            inputs: from_records(record.record_list("inputs")?)?,
            outputs: from_records(record.record_list("outputs")?)?,
            tags: record.str_list("tags")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskInput {
    pub name: String,
    pub data_set: Option<TaskDataSet>,
    pub estimation_procedure: Option<EstimationProcedure>,
    /// JSON-encoded numeric matrix; see [`crate::task_info::cost_matrix`].
    pub cost_matrix: Option<String>,
    pub evaluation_measures: Option<EvaluationMeasures>,
}

impl Message for TaskInput {
    const KIND: &'static str = "task/input";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt(
            "data_set",
            self.data_set.as_ref().map(|d| Value::Record(d.to_record())),
        );
        rec.put_opt(
            "estimation_procedure",
            self.estimation_procedure
                .as_ref()
                .map(|p| Value::Record(p.to_record())),
        );
        rec.put_opt("cost_matrix", self.cost_matrix.clone().map(Value::Str));
        rec.put_opt(
            "evaluation_measures",
            self.evaluation_measures
                .as_ref()
                .map(|m| Value::Record(m.to_record())),
        );
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            data_set: opt_nested(record, "data_set")?,
            estimation_procedure: opt_nested(record, "estimation_procedure")?,
            cost_matrix: record.opt_str("cost_matrix")?,
            evaluation_measures: opt_nested(record, "evaluation_measures")?,
        })
    }
}

/// Source data reference of a task. The original client also kept the
/// downloaded description here as a local cache; that never crosses the
/// wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDataSet {
    pub data_set_id: Option<i32>,
    pub labeled_data_set_id: Option<i32>,
    pub target_feature: Option<String>,
    pub target_feature_left: Option<String>,
    pub target_feature_right: Option<String>,
    pub target_feature_event: Option<String>,
}

impl Message for TaskDataSet {
    const KIND: &'static str = "task/input/data_set";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt("data_set_id", self.data_set_id.map(Value::Int));
        rec.put_opt(
            "labeled_data_set_id",
            self.labeled_data_set_id.map(Value::Int),
        );
        rec.put_opt(
            "target_feature",
            self.target_feature.clone().map(Value::Str),
        );
        rec.put_opt(
            "target_feature_left",
            self.target_feature_left.clone().map(Value::Str),
        );
        rec.put_opt(
            "target_feature_right",
            self.target_feature_right.clone().map(Value::Str),
        );
        rec.put_opt(
            "target_feature_event",
            self.target_feature_event.clone().map(Value::Str),
        );
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            data_set_id: record.opt_i32("data_set_id")?,
            labeled_data_set_id: record.opt_i32("labeled_data_set_id")?,
            target_feature: record.opt_str("target_feature")?,
            target_feature_left: record.opt_str("target_feature_left")?,
            target_feature_right: record.opt_str("target_feature_right")?,
            target_feature_event: record.opt_str("target_feature_event")?,
        })
    }
}

/// Estimation procedure of a task. `procedure_type` keeps the wire name
/// `oml:type`; the data-splits download handle of the original client is a
/// cache concern and not mapped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EstimationProcedure {
    pub procedure_type: Option<String>,
    pub data_splits_url: Option<String>,
    pub parameters: Vec<ProcedureParameter>,
}

impl EstimationProcedure {
    pub fn parameter(&self, name: &str) -> Option<&ProcedureParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl Message for EstimationProcedure {
    const KIND: &'static str = "task/input/estimation_procedure";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt(
            "procedure_type",
            self.procedure_type.clone().map(Value::Str),
        );
        rec.put_opt(
            "data_splits_url",
            self.data_splits_url.clone().map(Value::Str),
        );
        rec.put("parameters", record_list(&self.parameters));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            procedure_type: record.opt_str("procedure_type")?,
            data_splits_url: record.opt_str("data_splits_url")?,
            parameters: from_records(record.record_list("parameters")?)?,
        })
    }
}

/// Value-wrapped procedure parameter:
/// `<oml:parameter name="number_folds">10</oml:parameter>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcedureParameter {
    pub name: String,
    pub value: Option<String>,
}

impl ProcedureParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

impl Message for ProcedureParameter {
    const KIND: &'static str = "task/input/estimation_procedure/parameter";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("value", self.value.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            value: record.opt_str("value")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationMeasures {
    pub measures: Vec<String>,
}

impl Message for EvaluationMeasures {
    const KIND: &'static str = "task/input/evaluation_measures";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("measures", str_list(&self.measures));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            measures: record.str_list("measures")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskOutput {
    pub name: String,
    pub predictions: Option<Predictions>,
}

impl Message for TaskOutput {
    const KIND: &'static str = "task/output";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt(
            "predictions",
            self.predictions
                .as_ref()
                .map(|p| Value::Record(p.to_record())),
        );
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            predictions: opt_nested(record, "predictions")?,
        })
    }
}

/// Expected prediction file layout: a format plus attribute-only feature
/// declarations, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predictions {
    pub format: Option<String>,
    pub features: Vec<PredictionFeature>,
}

impl Message for Predictions {
    const KIND: &'static str = "task/output/predictions";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt("format", self.format.clone().map(Value::Str));
        rec.put("features", record_list(&self.features));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            format: record.opt_str("format")?,
            features: from_records(record.record_list("features")?)?,
        })
    }
}

/// `<oml:feature name="confidence.classname" type="numeric"/>` —
/// `feature_type` keeps the wire attribute name `type`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionFeature {
    pub name: String,
    pub feature_type: Option<String>,
}

impl Message for PredictionFeature {
    const KIND: &'static str = "task/output/predictions/feature";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("feature_type", self.feature_type.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            feature_type: record.opt_str("feature_type")?,
        })
    }
}

/// Tasks overview (`oml:tasks`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tasks {
    pub tasks: Vec<TaskSummary>,
}

impl Message for Tasks {
    const KIND: &'static str = "tasks";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("tasks", record_list(&self.tasks));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            tasks: from_records(record.record_list("tasks")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskSummary {
    pub task_id: i32,
    pub task_type: Option<String>,
    pub did: Option<i32>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub qualities: Vec<NamedQuality>,
}

impl Message for TaskSummary {
    const KIND: &'static str = "tasks/task";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("task_id", Value::Int(self.task_id));
        rec.put_opt("task_type", self.task_type.clone().map(Value::Str));
        rec.put_opt("did", self.did.map(Value::Int));
        rec.put_opt("name", self.name.clone().map(Value::Str));
        rec.put_opt("status", self.status.clone().map(Value::Str));
        rec.put("qualities", record_list(&self.qualities));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            task_id: record.req_i32("task_id")?,
            task_type: record.opt_str("task_type")?,
            did: record.opt_i32("did")?,
            name: record.opt_str("name")?,
            status: record.opt_str("status")?,
            qualities: from_records(record.record_list("qualities")?)?,
        })
    }
}

/// Evaluation report for one task (`oml:task_evaluations`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskEvaluations {
    pub task_id: i32,
    pub task_name: Option<String>,
    pub task_type_id: Option<i32>,
    pub input_data: Option<i32>,
    pub estimation_procedure: Option<String>,
    pub evaluations: Vec<TaskEvaluation>,
}

impl Message for TaskEvaluations {
    const KIND: &'static str = "task_evaluations";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("task_id", Value::Int(self.task_id));
        rec.put_opt("task_name", self.task_name.clone().map(Value::Str));
        rec.put_opt("task_type_id", self.task_type_id.map(Value::Int));
        rec.put_opt("input_data", self.input_data.map(Value::Int));
        rec.put_opt(
            "estimation_procedure",
            self.estimation_procedure.clone().map(Value::Str),
        );
        rec.put("evaluations", record_list(&self.evaluations));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            task_id: record.req_i32("task_id")?,
            task_name: record.opt_str("task_name")?,
            task_type_id: record.opt_i32("task_type_id")?,
            input_data: record.opt_i32("input_data")?,
            estimation_procedure: record.opt_str("estimation_procedure")?,
            evaluations: from_records(record.record_list("evaluations")?)?,
        })
    }
}

/// One run's scores within a task evaluation report. Measures are
/// value-wrapped `oml:measure` elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskEvaluation {
    pub run_id: i32,
    pub setup_id: Option<i32>,
    pub implementation_id: Option<i32>,
    pub implementation: Option<String>,
    pub interval_start: Option<i32>,
    pub interval_end: Option<i32>,
    pub measures: Vec<NamedQuality>,
}

impl Message for TaskEvaluation {
    const KIND: &'static str = "task_evaluations/evaluation";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("run_id", Value::Int(self.run_id));
        rec.put_opt("setup_id", self.setup_id.map(Value::Int));
        rec.put_opt("implementation_id", self.implementation_id.map(Value::Int));
        rec.put_opt(
            "implementation",
            self.implementation.clone().map(Value::Str),
        );
        rec.put_opt("interval_start", self.interval_start.map(Value::Int));
        rec.put_opt("interval_end", self.interval_end.map(Value::Int));
        rec.put("measures", record_list(&self.measures));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            run_id: record.req_i32("run_id")?,
            setup_id: record.opt_i32("setup_id")?,
            implementation_id: record.opt_i32("implementation_id")?,
            implementation: record.opt_str("implementation")?,
            interval_start: record.opt_i32("interval_start")?,
            interval_end: record.opt_i32("interval_end")?,
            measures: from_records(record.record_list("measures")?)?,
        })
    }
}
