//! Behavioral tests of the generic engine against a small synthetic schema
//! exercising every placement rule.

use openml_xml_bind::{
    FieldSpec, KindSpec, MalformedMessageError, ReadError, Record, Registry, Value, ValueType,
};

fn test_registry() -> Registry {
    let report = KindSpec::new("report", "x:report")
        .namespace("xmlns:x", "http://example.org/x")
        .field(FieldSpec::element("id", "x:id", ValueType::Int).required())
        .field(FieldSpec::element("title", "x:title", ValueType::Str))
        .field(FieldSpec::implicit("tags", "x:tag", ValueType::Str))
        .field(FieldSpec::implicit(
            "scores",
            "x:score",
            ValueType::Nested("score"),
        ))
        .field(FieldSpec::element(
            "summary",
            "x:summary",
            ValueType::Nested("summary"),
        ));
    let score = KindSpec::new("score", "x:score")
        .field(FieldSpec::attribute("name", "name", ValueType::Str).required())
        .field(FieldSpec::flattened("value", ValueType::Double));
    let summary = KindSpec::new("summary", "x:summary")
        .field(FieldSpec::element("total", "x:total", ValueType::Int))
        .field(FieldSpec::element("passed", "x:passed", ValueType::Bool));

    Registry::builder()
        .register(report)
        .register(score)
        .register(summary)
        .build()
        .expect("test registry must build")
}

fn score(name: &str, value: Option<f64>) -> Value {
    let mut rec = Record::new("score");
    rec.put("name", Value::Str(name.to_string()));
    rec.put_opt("value", value.map(Value::Double));
    Value::Record(rec)
}

fn sample_report() -> Record {
    let mut summary = Record::new("summary");
    summary.put("total", Value::Int(3));
    summary.put("passed", Value::Bool(true));

    let mut rec = Record::new("report");
    rec.put("id", Value::Int(42));
    rec.put("title", Value::Str("weekly".to_string()));
    rec.put(
        "tags",
        Value::List(vec![
            Value::Str("a".to_string()),
            Value::Str("b".to_string()),
        ]),
    );
    rec.put(
        "scores",
        Value::List(vec![
            score("MeanEntropy", Some(1.234)),
            score("Skewness", None),
        ]),
    );
    rec.put("summary", Value::Record(summary));
    rec
}

#[test]
fn round_trip_preserves_every_placement_rule() {
    let registry = test_registry();
    let original = sample_report();
    let bytes = registry.serialize(&original).expect("serialize");
    let back = registry.deserialize(&bytes, "report").expect("deserialize");
    assert_eq!(back, original);
}

#[test]
fn serialize_emits_namespace_attribute_once_on_root() {
    let registry = test_registry();
    let xml = String::from_utf8(registry.serialize(&sample_report()).unwrap()).unwrap();
    assert_eq!(xml.matches("xmlns:x=\"http://example.org/x\"").count(), 1);
    assert!(xml.starts_with("<x:report"));
}

#[test]
fn value_wrapped_object_flattens_to_attributed_text() {
    let registry = test_registry();
    let xml = String::from_utf8(registry.serialize(&sample_report()).unwrap()).unwrap();
    assert!(xml.contains("<x:score name=\"MeanEntropy\">1.234</x:score>"));
    // Empty scalar content still serializes its attributes.
    assert!(xml.contains("<x:score name=\"Skewness\"/>"));
}

#[test]
fn implicit_collection_keeps_document_order() {
    let registry = test_registry();
    let doc = br#"<x:report><x:id>1</x:id>
        <x:tag>third</x:tag><x:tag>first</x:tag><x:tag>second</x:tag>
    </x:report>"#;
    let rec = registry.deserialize(doc, "report").unwrap();
    assert_eq!(
        rec.str_list("tags").unwrap(),
        vec!["third", "first", "second"]
    );
}

#[test]
fn empty_implicit_collection_decodes_to_empty_list_not_absence() {
    let registry = test_registry();
    let rec = registry
        .deserialize(b"<x:report><x:id>1</x:id></x:report>", "report")
        .unwrap();
    assert_eq!(rec.get("tags"), Some(&Value::List(Vec::new())));
}

#[test]
fn unknown_elements_and_attributes_are_ignored() {
    let registry = test_registry();
    let doc = br#"<x:report future="yes">
        <x:id>7</x:id>
        <x:added_by_server>ignored</x:added_by_server>
    </x:report>"#;
    let rec = registry.deserialize(doc, "report").unwrap();
    assert_eq!(rec.req_i32("id").unwrap(), 7);
    assert!(rec.get("added_by_server").is_none());
}

#[test]
fn missing_required_field_is_malformed_not_partial() {
    let registry = test_registry();
    let err = registry
        .deserialize(b"<x:report><x:title>t</x:title></x:report>", "report")
        .unwrap_err();
    assert!(matches!(
        err,
        ReadError::Malformed(MalformedMessageError::MissingField {
            kind: "report",
            field: "id"
        })
    ));
}

#[test]
fn root_tag_mismatch_is_malformed() {
    let registry = test_registry();
    let err = registry
        .deserialize(b"<x:other><x:id>1</x:id></x:other>", "report")
        .unwrap_err();
    assert!(matches!(
        err,
        ReadError::Malformed(MalformedMessageError::RootMismatch { .. })
    ));
}

#[test]
fn non_numeric_text_in_numeric_field_is_a_decode_error() {
    let registry = test_registry();
    let err = registry
        .deserialize(b"<x:report><x:id>seven</x:id></x:report>", "report")
        .unwrap_err();
    match err {
        ReadError::Decode(e) => {
            let msg = e.to_string();
            assert!(msg.contains("report"), "context in `{msg}`");
            assert!(msg.contains("id"), "context in `{msg}`");
            assert!(msg.contains("seven"), "context in `{msg}`");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn serialize_after_deserialize_is_structurally_idempotent() {
    let registry = test_registry();
    let original = sample_report();
    let first = registry.serialize(&original).unwrap();
    let decoded = registry.deserialize(&first, "report").unwrap();
    let second = registry.serialize(&decoded).unwrap();
    let again = registry.deserialize(&second, "report").unwrap();
    assert_eq!(again, original);
}

#[test]
fn numeric_text_is_locale_independent() {
    let registry = test_registry();
    let mut rec = Record::new("report");
    rec.put("id", Value::Int(1));
    rec.put("scores", Value::List(vec![score("frac", Some(0.1))]));
    let xml = String::from_utf8(registry.serialize(&rec).unwrap()).unwrap();
    assert!(xml.contains(">0.1<"), "got {xml}");
    assert!(!xml.contains("0,1"));
}
