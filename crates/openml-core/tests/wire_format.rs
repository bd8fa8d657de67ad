//! Fixture-level checks of the wire format itself: exact tags, attributes,
//! the namespace declaration, legacy renames, and tolerance of unknown
//! content.

use openml_core::messages::common::Authenticate;
use openml_core::messages::data::{Data, DataQualities, DataSetDescription, NamedQuality, DataSet};
use openml_core::messages::run::{EvaluationScore, RunEvaluation, RunReset};
use openml_core::messages::task::Task;
use openml_core::{from_xml, to_xml};
use openml_xml_bind::{DecodeError, MalformedMessageError, ReadError};

fn xml_string<T: openml_core::Message>(message: &T) -> String {
    String::from_utf8(to_xml(message).expect("serialize")).expect("utf-8")
}

#[test]
fn parses_a_server_task_document() {
    let xml = br#"<oml:task xmlns:oml="http://openml.org/openml">
        <oml:task_id>59</oml:task_id>
        <oml:task_type>Supervised Classification</oml:task_type>
        <oml:input name="source_data">
            <oml:data_set>
                <oml:data_set_id>61</oml:data_set_id>
                <oml:target_feature>class</oml:target_feature>
            </oml:data_set>
        </oml:input>
        <oml:input name="estimation_procedure">
            <oml:estimation_procedure>
                <oml:type>crossvalidation</oml:type>
                <oml:parameter name="number_repeats">1</oml:parameter>
                <oml:parameter name="number_folds">10</oml:parameter>
                <oml:parameter name="stratified_sampling">true</oml:parameter>
            </oml:estimation_procedure>
        </oml:input>
        <oml:output name="predictions">
            <oml:predictions>
                <oml:format>arff</oml:format>
                <oml:feature name="prediction" type="string"/>
                <oml:feature name="confidence.Iris-setosa" type="numeric"/>
            </oml:predictions>
        </oml:output>
    </oml:task>"#;

    let task: Task = from_xml(xml).unwrap();
    assert_eq!(task.task_id, 59);
    assert_eq!(task.inputs.len(), 2);
    assert_eq!(task.inputs[0].name, "source_data");
    let procedure = task.inputs[1].estimation_procedure.as_ref().unwrap();
    assert_eq!(procedure.procedure_type.as_deref(), Some("crossvalidation"));
    assert_eq!(
        procedure.parameter("number_folds").unwrap().value.as_deref(),
        Some("10")
    );
    let predictions = task.outputs[0].predictions.as_ref().unwrap();
    assert_eq!(predictions.features.len(), 2);
    assert_eq!(
        predictions.features[1].feature_type.as_deref(),
        Some("numeric")
    );

    // Convenience accessors work against the parsed document.
    assert_eq!(openml_core::task_info::number_of_folds(&task).unwrap(), 10);
    assert_eq!(openml_core::task_info::number_of_repeats(&task).unwrap(), 1);
    assert_eq!(
        openml_core::task_info::source_data(&task).unwrap().data_set_id,
        Some(61)
    );
}

#[test]
fn parses_qualities_with_interval_attributes() {
    let xml = br#"<oml:data_qualities xmlns:oml="http://openml.org/openml">
        <oml:did>61</oml:did>
        <oml:quality>
            <oml:name>MeanEntropy</oml:name>
            <oml:value>1.585</oml:value>
        </oml:quality>
        <oml:quality interval_start="0" interval_end="10000">
            <oml:name>Drift</oml:name>
        </oml:quality>
    </oml:data_qualities>"#;

    let qualities: DataQualities = from_xml(xml).unwrap();
    assert_eq!(qualities.did, 61);
    assert_eq!(qualities.qualities.len(), 2);
    assert_eq!(qualities.qualities[0].name, "MeanEntropy");
    assert_eq!(qualities.qualities[0].value, Some(1.585));
    assert_eq!(qualities.qualities[1].interval_start, Some(0));
    assert_eq!(qualities.qualities[1].interval_end, Some(10000));
    assert_eq!(qualities.qualities[1].value, None);
}

#[test]
fn value_wrapped_quality_serializes_as_text_content() {
    let data = Data {
        datasets: vec![DataSet {
            did: 61,
            qualities: vec![
                NamedQuality::new("MeanEntropy", 1.585),
                NamedQuality {
                    name: "Skewness".into(),
                    value: None,
                },
            ],
            ..DataSet::default()
        }],
    };
    let xml = xml_string(&data);
    assert!(xml.contains(r#"<oml:quality name="MeanEntropy">1.585</oml:quality>"#));
    assert!(xml.contains(r#"<oml:quality name="Skewness"/>"#));
}

#[test]
fn namespace_is_declared_once_on_the_root() {
    let data = Data {
        datasets: vec![DataSet {
            did: 1,
            ..DataSet::default()
        }],
    };
    let xml = xml_string(&data);
    assert_eq!(
        xml.matches(r#"xmlns:oml="http://openml.org/openml""#).count(),
        1
    );
    assert!(xml.starts_with("<oml:data "));

    // Kinds without a namespace declaration stay bare.
    let auth = Authenticate {
        session_hash: "abc123".into(),
        ..Authenticate::default()
    };
    assert!(!xml_string(&auth).contains("xmlns"));
}

#[test]
fn legacy_renames_appear_on_the_wire() {
    let evaluation = RunEvaluation {
        run_id: 472,
        evaluations: vec![EvaluationScore {
            function: Some("predictive_accuracy".into()),
            value: Some(0.96),
            ..EvaluationScore::default()
        }],
        ..RunEvaluation::default()
    };
    let xml = xml_string(&evaluation);
    assert!(xml.contains("<oml:name>predictive_accuracy</oml:name>"));
    assert!(!xml.contains("function"));

    let reset = RunReset { run_id: 472 };
    let xml = xml_string(&reset);
    assert!(xml.contains("<oml:run_reset>"));
    assert!(xml.contains("<oml:id>472</oml:id>"));

    // And parse back into the in-memory names.
    let reset: RunReset = from_xml(xml.as_bytes()).unwrap();
    assert_eq!(reset.run_id, 472);
}

#[test]
fn doubles_keep_dot_decimal_notation() {
    let data = Data {
        datasets: vec![DataSet {
            did: 1,
            qualities: vec![NamedQuality::new("MinorityClassSize", 0.1)],
            ..DataSet::default()
        }],
    };
    let xml = xml_string(&data);
    assert!(xml.contains(">0.1<"));
    assert!(!xml.contains("0,1"));
}

#[test]
fn unknown_wire_content_is_ignored() {
    let xml = br#"<oml:authenticate>
        <oml:session_hash>abc123</oml:session_hash>
        <oml:added_in_a_future_version>x</oml:added_in_a_future_version>
        <oml:valid_until>2026-08-25 12:00:00</oml:valid_until>
    </oml:authenticate>"#;
    let auth: Authenticate = from_xml(xml).unwrap();
    assert_eq!(auth.session_hash, "abc123");
    assert_eq!(auth.valid_until.as_deref(), Some("2026-08-25 12:00:00"));
}

#[test]
fn missing_required_field_is_malformed() {
    let xml = br#"<oml:data_set_description xmlns:oml="http://openml.org/openml">
        <oml:name>iris</oml:name>
    </oml:data_set_description>"#;
    let err = from_xml::<DataSetDescription>(xml).unwrap_err();
    match err {
        ReadError::Malformed(MalformedMessageError::MissingField { kind, field }) => {
            assert_eq!(kind, "data_set_description");
            assert_eq!(field, "id");
        }
        other => panic!("expected missing-field error, got {other:?}"),
    }
}

#[test]
fn unparsable_scalar_reports_kind_field_and_text() {
    let xml = br#"<oml:data_qualities xmlns:oml="http://openml.org/openml">
        <oml:did>sixty-one</oml:did>
    </oml:data_qualities>"#;
    let err = from_xml::<DataQualities>(xml).unwrap_err();
    match err {
        ReadError::Decode(DecodeError::BadScalar { kind, field, text, .. }) => {
            assert_eq!(kind, "data_qualities");
            assert_eq!(field, "did");
            assert_eq!(text, "sixty-one");
        }
        other => panic!("expected bad-scalar error, got {other:?}"),
    }
}

#[test]
fn wrong_root_element_is_rejected() {
    let xml = br#"<oml:authenticate>
        <oml:session_hash>abc123</oml:session_hash>
    </oml:authenticate>"#;
    let err = from_xml::<Task>(xml).unwrap_err();
    match err {
        ReadError::Malformed(MalformedMessageError::RootMismatch { expected, found }) => {
            assert_eq!(expected, "oml:task");
            assert_eq!(found, "oml:authenticate");
        }
        other => panic!("expected root-mismatch error, got {other:?}"),
    }
}

#[test]
fn implicit_collection_order_follows_the_document() {
    let xml = br#"<oml:data_set_description xmlns:oml="http://openml.org/openml">
        <oml:id>61</oml:id>
        <oml:name>iris</oml:name>
        <oml:creator>B</oml:creator>
        <oml:creator>A</oml:creator>
        <oml:creator>C</oml:creator>
    </oml:data_set_description>"#;
    let dsd: DataSetDescription = from_xml(xml).unwrap();
    assert_eq!(dsd.creators, vec!["B", "A", "C"]);
}
