//! Run messages: the run descriptor, evaluation results, job assignment,
//! file upload, and the run lifecycle acknowledgements.

use openml_xml_bind::{ReadError, Record, Value};

use crate::message::{from_records, opt_nested, record_list, str_list, Message};

/// Run descriptor (`oml:run`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub task_id: i32,
    pub implementation_id: Option<i32>,
    pub error_message: Option<String>,
    pub setup_string: Option<String>,
    pub parameter_settings: Vec<ParameterSetting>,
    pub tags: Vec<String>,
    pub input_data: Option<RunData>,
    pub output_data: Option<RunData>,
}

impl Message for Run {
    const KIND: &'static str = "run";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("task_id", Value::Int(self.task_id));
        rec.put_opt("implementation_id", self.implementation_id.map(Value::Int));
        rec.put_opt("error_message", self.error_message.clone().map(Value::Str));
        rec.put_opt("setup_string", self.setup_string.clone().map(Value::Str));
        rec.put("parameter_settings", record_list(&self.parameter_settings));
        rec.put("tags", str_list(&self.tags));
        rec.put_opt(
            "input_data",
            self.input_data.as_ref().map(|d| Value::Record(d.to_record())),
        );
        rec.put_opt(
            "output_data",
            self.output_data
                .as_ref()
                .map(|d| Value::Record(d.to_record())),
        );
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            task_id: record.req_i32("task_id")?,
            implementation_id: record.opt_i32("implementation_id")?,
            error_message: record.opt_str("error_message")?,
            setup_string: record.opt_str("setup_string")?,
            parameter_settings: from_records(record.record_list("parameter_settings")?)?,
            tags: record.str_list("tags")?,
            input_data: opt_nested(record, "input_data")?,
            output_data: opt_nested(record, "output_data")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterSetting {
    pub name: String,
    /// Id of the component the parameter belongs to, when not the root
    /// implementation.
    pub component: Option<i32>,
    pub value: Option<String>,
}

impl Message for ParameterSetting {
    const KIND: &'static str = "run/parameter_setting";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("name", Value::Str(self.name.clone()));
        rec.put_opt("component", self.component.map(Value::Int));
        rec.put_opt("value", self.value.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            name: record.req_str("name")?,
            component: record.opt_i32("component")?,
            value: record.opt_str("value")?,
        })
    }
}

/// Input or output data block of a run: implicit dataset references and
/// evaluation scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunData {
    pub datasets: Vec<RunDataset>,
    pub evaluations: Vec<EvaluationScore>,
}

impl Message for RunData {
    const KIND: &'static str = "run/data";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("datasets", record_list(&self.datasets));
        rec.put("evaluations", record_list(&self.evaluations));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            datasets: from_records(record.record_list("datasets")?)?,
            evaluations: from_records(record.record_list("evaluations")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunDataset {
    pub did: Option<i32>,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl Message for RunDataset {
    const KIND: &'static str = "run/data/dataset";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt("did", self.did.map(Value::Int));
        rec.put_opt("name", self.name.clone().map(Value::Str));
        rec.put_opt("url", self.url.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            did: record.opt_i32("did")?,
            name: record.opt_str("name")?,
            url: record.opt_str("url")?,
        })
    }
}

/// A single evaluation score. The in-memory field `function` maps to the
/// wire element `oml:name` — a legacy inconsistency kept for compatibility
/// and flagged as a rename in the mapping table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationScore {
    pub did: Option<i32>,
    pub function: Option<String>,
    pub implementation: Option<String>,
    pub value: Option<f64>,
    pub array_data: Option<String>,
    pub sample_size: Option<i32>,
    pub repeat: Option<i32>,
    pub fold: Option<i32>,
    pub sample: Option<i32>,
    pub interval_start: Option<i32>,
    pub interval_end: Option<i32>,
}

impl Message for EvaluationScore {
    const KIND: &'static str = "evaluation_score";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put_opt("did", self.did.map(Value::Int));
        rec.put_opt("function", self.function.clone().map(Value::Str));
        rec.put_opt(
            "implementation",
            self.implementation.clone().map(Value::Str),
        );
        rec.put_opt("value", self.value.map(Value::Double));
        rec.put_opt("array_data", self.array_data.clone().map(Value::Str));
        rec.put_opt("sample_size", self.sample_size.map(Value::Int));
        rec.put_opt("repeat", self.repeat.map(Value::Int));
        rec.put_opt("fold", self.fold.map(Value::Int));
        rec.put_opt("sample", self.sample.map(Value::Int));
        rec.put_opt("interval_start", self.interval_start.map(Value::Int));
        rec.put_opt("interval_end", self.interval_end.map(Value::Int));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            did: record.opt_i32("did")?,
            function: record.opt_str("function")?,
            implementation: record.opt_str("implementation")?,
            value: record.opt_f64("value")?,
            array_data: record.opt_str("array_data")?,
            sample_size: record.opt_i32("sample_size")?,
            repeat: record.opt_i32("repeat")?,
            fold: record.opt_i32("fold")?,
            sample: record.opt_i32("sample")?,
            interval_start: record.opt_i32("interval_start")?,
            interval_end: record.opt_i32("interval_end")?,
        })
    }
}

/// Server-side evaluation of an uploaded run (`oml:run_evaluation`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunEvaluation {
    pub run_id: i32,
    pub error: Option<String>,
    pub evaluations: Vec<EvaluationScore>,
}

impl Message for RunEvaluation {
    const KIND: &'static str = "run_evaluation";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("run_id", Value::Int(self.run_id));
        rec.put_opt("error", self.error.clone().map(Value::Str));
        rec.put("evaluations", record_list(&self.evaluations));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            run_id: record.req_i32("run_id")?,
            error: record.opt_str("error")?,
            evaluations: from_records(record.record_list("evaluations")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadRun {
    pub run_id: i32,
}

impl Message for UploadRun {
    const KIND: &'static str = "upload_run";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("run_id", Value::Int(self.run_id));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            run_id: record.req_i32("run_id")?,
        })
    }
}

/// Reset acknowledgement. The wire element is `oml:id`, a legacy rename of
/// `run_id` flagged in the mapping table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReset {
    pub run_id: i32,
}

impl Message for RunReset {
    const KIND: &'static str = "run_reset";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("run_id", Value::Int(self.run_id));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            run_id: record.req_i32("run_id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunDelete {
    pub id: i32,
}

impl Message for RunDelete {
    const KIND: &'static str = "run_delete";

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

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunEvaluate {
    pub run_id: i32,
}

impl Message for RunEvaluate {
    const KIND: &'static str = "run_evaluate";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("run_id", Value::Int(self.run_id));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            run_id: record.req_i32("run_id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileUpload {
    pub id: i32,
    pub url: Option<String>,
}

impl Message for FileUpload {
    const KIND: &'static str = "file_upload";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("id", Value::Int(self.id));
        rec.put_opt("url", self.url.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            id: record.req_i32("id")?,
            url: record.opt_str("url")?,
        })
    }
}

/// Job assignment for a worker (`oml:job`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Job {
    pub task_id: i32,
    pub learner: Option<String>,
}

impl Message for Job {
    const KIND: &'static str = "job";

    fn to_record(&self) -> Record {
        let mut rec = Record::new(Self::KIND);
        rec.put("task_id", Value::Int(self.task_id));
        rec.put_opt("learner", self.learner.clone().map(Value::Str));
        rec
    }

    fn from_record(record: &Record) -> Result<Self, ReadError> {
        Ok(Self {
            task_id: record.req_i32("task_id")?,
            learner: record.opt_str("learner")?,
        })
    }
}
