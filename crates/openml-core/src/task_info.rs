//! Convenience accessors over [`Task`]: a task's inputs and outputs are
//! discriminated by their `name` attribute, and the interesting payloads sit
//! a few levels deep. These helpers do the digging and turn absent pieces
//! into errors that say which task was missing what.

use thiserror::Error;

use crate::messages::task::{EstimationProcedure, Predictions, Task, TaskDataSet};

#[derive(Debug, Error)]
pub enum TaskInfoError {
    #[error("task {task_id} has no input named {name:?}")]
    MissingInput { task_id: i32, name: &'static str },
    #[error("task {task_id} has no output named {name:?}")]
    MissingOutput { task_id: i32, name: &'static str },
    #[error("task {task_id}: estimation procedure has no parameter {name:?}")]
    MissingParameter { task_id: i32, name: &'static str },
    #[error("task {task_id}: parameter {name:?} is not an integer: {value:?}")]
    BadParameter {
        task_id: i32,
        name: &'static str,
        value: String,
    },
    #[error("task {task_id}: cost matrix is not a numeric matrix")]
    BadCostMatrix {
        task_id: i32,
        #[source]
        source: serde_json::Error,
    },
}

fn input<'a>(task: &'a Task, name: &'static str) -> Result<&'a crate::messages::task::TaskInput, TaskInfoError> {
    task.inputs
        .iter()
        .find(|i| i.name == name)
        .ok_or(TaskInfoError::MissingInput {
            task_id: task.task_id,
            name,
        })
}

/// The task's estimation procedure, from the input named
/// `estimation_procedure`.
pub fn estimation_procedure(task: &Task) -> Result<&EstimationProcedure, TaskInfoError> {
    let input = input(task, "estimation_procedure")?;
    input
        .estimation_procedure
        .as_ref()
        .ok_or(TaskInfoError::MissingInput {
            task_id: task.task_id,
            name: "estimation_procedure",
        })
}

/// The source data reference, from the input named `source_data`.
pub fn source_data(task: &Task) -> Result<&TaskDataSet, TaskInfoError> {
    let input = input(task, "source_data")?;
    input.data_set.as_ref().ok_or(TaskInfoError::MissingInput {
        task_id: task.task_id,
        name: "source_data",
    })
}

/// The expected prediction file layout, from the output named `predictions`.
pub fn predictions(task: &Task) -> Result<&Predictions, TaskInfoError> {
    let output = task
        .outputs
        .iter()
        .find(|o| o.name == "predictions")
        .ok_or(TaskInfoError::MissingOutput {
            task_id: task.task_id,
            name: "predictions",
        })?;
    output
        .predictions
        .as_ref()
        .ok_or(TaskInfoError::MissingOutput {
            task_id: task.task_id,
            name: "predictions",
        })
}

fn procedure_parameter(task: &Task, name: &'static str) -> Result<i32, TaskInfoError> {
    let procedure = estimation_procedure(task)?;
    let parameter = procedure
        .parameter(name)
        .ok_or(TaskInfoError::MissingParameter {
            task_id: task.task_id,
            name,
        })?;
    let value = parameter.value.as_deref().unwrap_or("");
    value
        .trim()
        .parse()
        .map_err(|_| TaskInfoError::BadParameter {
            task_id: task.task_id,
            name,
            value: value.to_string(),
        })
}

pub fn number_of_repeats(task: &Task) -> Result<i32, TaskInfoError> {
    procedure_parameter(task, "number_repeats")
}

pub fn number_of_folds(task: &Task) -> Result<i32, TaskInfoError> {
    procedure_parameter(task, "number_folds")
}

pub fn number_of_samples(task: &Task) -> Result<i32, TaskInfoError> {
    procedure_parameter(task, "number_samples")
}

/// The cost matrix, parsed from the JSON text of the input named
/// `cost_matrix`. Tasks without one yield `None`; an unparsable matrix is an
/// error rather than an empty one.
pub fn cost_matrix(task: &Task) -> Result<Option<Vec<Vec<f64>>>, TaskInfoError> {
    let Some(input) = task.inputs.iter().find(|i| i.name == "cost_matrix") else {
        return Ok(None);
    };
    let Some(text) = input.cost_matrix.as_deref() else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|source| TaskInfoError::BadCostMatrix {
            task_id: task.task_id,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::task::{ProcedureParameter, TaskInput, TaskOutput};

    fn fixture() -> Task {
        Task {
            task_id: 59,
            task_type: "Supervised Classification".into(),
            inputs: vec![
                TaskInput {
                    name: "source_data".into(),
                    data_set: Some(TaskDataSet {
                        data_set_id: Some(61),
                        target_feature: Some("class".into()),
                        ..TaskDataSet::default()
                    }),
                    ..TaskInput::default()
                },
                TaskInput {
                    name: "estimation_procedure".into(),
                    estimation_procedure: Some(EstimationProcedure {
                        procedure_type: Some("crossvalidation".into()),
                        data_splits_url: None,
                        parameters: vec![
                            ProcedureParameter::new("number_repeats", "1"),
                            ProcedureParameter::new("number_folds", "10"),
                            ProcedureParameter::new("stratified_sampling", "true"),
                        ],
                    }),
                    ..TaskInput::default()
                },
                TaskInput {
                    name: "cost_matrix".into(),
                    cost_matrix: Some("[[0.0, 1.0], [1.0, 0.0]]".into()),
                    ..TaskInput::default()
                },
            ],
            outputs: vec![TaskOutput {
                name: "predictions".into(),
                predictions: Some(Predictions {
                    format: Some("arff".into()),
                    features: Vec::new(),
                }),
            }],
            tags: Vec::new(),
        }
    }

    #[test]
    fn reads_procedure_counts() {
        let task = fixture();
        assert_eq!(number_of_repeats(&task).unwrap(), 1);
        assert_eq!(number_of_folds(&task).unwrap(), 10);
    }

    #[test]
    fn missing_parameter_names_task_and_parameter() {
        let task = fixture();
        let err = number_of_samples(&task).unwrap_err();
        assert!(matches!(
            err,
            TaskInfoError::MissingParameter {
                task_id: 59,
                name: "number_samples"
            }
        ));
    }

    #[test]
    fn non_numeric_parameter_is_rejected() {
        let mut task = fixture();
        task.inputs[1]
            .estimation_procedure
            .as_mut()
            .unwrap()
            .parameters[1]
            .value = Some("ten".into());
        let err = number_of_folds(&task).unwrap_err();
        assert!(matches!(err, TaskInfoError::BadParameter { .. }));
    }

    #[test]
    fn finds_source_data_and_predictions() {
        let task = fixture();
        assert_eq!(source_data(&task).unwrap().data_set_id, Some(61));
        assert_eq!(predictions(&task).unwrap().format.as_deref(), Some("arff"));
    }

    #[test]
    fn parses_cost_matrix_json() {
        let task = fixture();
        let matrix = cost_matrix(&task).unwrap().unwrap();
        assert_eq!(matrix, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn absent_cost_matrix_is_none() {
        let mut task = fixture();
        task.inputs.retain(|i| i.name != "cost_matrix");
        assert!(cost_matrix(&task).unwrap().is_none());
    }

    #[test]
    fn malformed_cost_matrix_is_an_error() {
        let mut task = fixture();
        task.inputs[2].cost_matrix = Some("[[0.0, oops]]".into());
        assert!(matches!(
            cost_matrix(&task),
            Err(TaskInfoError::BadCostMatrix { task_id: 59, .. })
        ));
    }

    #[test]
    fn missing_estimation_procedure_is_an_error() {
        let mut task = fixture();
        task.inputs.retain(|i| i.name != "estimation_procedure");
        assert!(matches!(
            estimation_procedure(&task),
            Err(TaskInfoError::MissingInput {
                task_id: 59,
                name: "estimation_procedure"
            })
        ));
    }
}
