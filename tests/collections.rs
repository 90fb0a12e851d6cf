use zodic::prelude::*;
use zodic::SchemaExt;

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn array_validates_each_element() {
    let schema = zodic::array(zodic::int().positive());
    let out = schema.parse_value(input(serde_json::json!([1, 2, 3]))).unwrap();
    assert_eq!(out.as_array().unwrap().len(), 3);
}

#[test]
fn array_issues_are_index_prefixed() {
    let schema = zodic::array(zodic::string());
    let err = schema
        .parse_value(input(serde_json::json!(["a", 1, "c", 2])))
        .unwrap_err();
    assert_eq!(err.issues().len(), 2);
    assert_eq!(err.issues()[0].path, vec![PathSegment::Index(1)]);
    assert_eq!(err.issues()[1].path, vec![PathSegment::Index(3)]);
}

#[test]
fn array_size_checks() {
    let schema = zodic::array(zodic::int()).min(2).max(3);
    assert!(schema.parse_value(input(serde_json::json!([1, 2]))).is_ok());

    let err = schema.parse_value(input(serde_json::json!([1]))).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
    assert_eq!(err.issues()[0].origin.as_deref(), Some("array"));

    let err = schema
        .parse_value(input(serde_json::json!([1, 2, 3, 4])))
        .unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooBig);
}

#[test]
fn array_nonempty_and_length() {
    assert!(zodic::array(zodic::int())
        .nonempty()
        .parse_value(input(serde_json::json!([])))
        .is_err());
    assert!(zodic::array(zodic::int())
        .length(2)
        .parse_value(input(serde_json::json!([1, 2])))
        .is_ok());
}

#[test]
fn array_rejects_non_arrays() {
    let err = zodic::array(zodic::int()).parse(3).unwrap_err();
    assert_eq!(err.issues()[0].expected.as_deref(), Some("array"));
}

#[test]
fn tuple_validates_positionally() {
    let schema = zodic::tuple(vec![
        zodic::string().into_schema(),
        zodic::int().into_schema(),
    ]);
    let out = schema
        .parse_value(input(serde_json::json!(["a", 1])))
        .unwrap();
    assert_eq!(out.as_array().unwrap().len(), 2);

    let err = schema
        .parse_value(input(serde_json::json!(["a", "b"])))
        .unwrap_err();
    assert_eq!(err.issues()[0].path, vec![PathSegment::Index(1)]);
}

#[test]
fn tuple_size_mismatch_uses_tuple_origin() {
    let schema = zodic::tuple(vec![
        zodic::string().into_schema(),
        zodic::int().into_schema(),
    ]);

    let err = schema.parse_value(input(serde_json::json!(["a"]))).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
    assert_eq!(err.issues()[0].origin.as_deref(), Some("tuple"));

    let err = schema
        .parse_value(input(serde_json::json!(["a", 1, true])))
        .unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooBig);
}

#[test]
fn tuple_rest_accepts_variadic_tail() {
    let schema = zodic::tuple(vec![zodic::string().into_schema()]).rest(zodic::int());
    assert!(schema
        .parse_value(input(serde_json::json!(["head", 1, 2, 3])))
        .is_ok());
    let err = schema
        .parse_value(input(serde_json::json!(["head", 1, "x"])))
        .unwrap_err();
    assert_eq!(err.issues()[0].path, vec![PathSegment::Index(2)]);
}

#[test]
fn record_applies_value_schema_per_entry() {
    let schema = zodic::record(zodic::string(), zodic::int().positive());
    let out = schema
        .parse_value(input(serde_json::json!({"a": 1, "b": 2})))
        .unwrap();
    assert_eq!(out.as_record().unwrap().len(), 2);

    let err = schema
        .parse_value(input(serde_json::json!({"a": -1})))
        .unwrap_err();
    assert_eq!(err.issues()[0].path, vec![PathSegment::Key("a".into())]);
}

#[test]
fn record_key_schema_rejections_use_invalid_key() {
    let schema = zodic::record(zodic::string().min(2), zodic::int());
    let err = schema
        .parse_value(input(serde_json::json!({"a": 1, "ok": 2})))
        .unwrap_err();
    assert_eq!(err.issues().len(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.code, IssueCode::InvalidKey);
    assert_eq!(issue.key.as_deref(), Some("a"));
    assert_eq!(issue.path, vec![PathSegment::Key("a".into())]);
}

#[test]
fn loose_record_passes_unmatched_keys_through() {
    let schema = zodic::loose_record(zodic::string().min(2), zodic::int());
    let out = schema
        .parse_value(input(serde_json::json!({"a": "anything", "ok": 2})))
        .unwrap();
    let record = out.as_record().unwrap();
    assert_eq!(record["a"].as_str(), Some("anything"));
    assert_eq!(record["ok"].as_i64(), Some(2));
}
