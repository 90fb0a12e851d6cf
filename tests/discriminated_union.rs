use zodic::prelude::*;

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn shapes() -> ZDiscriminatedUnion {
    zodic::discriminated_union(
        "kind",
        vec![
            zodic::object()
                .field("kind", zodic::literal("a"))
                .field("x", zodic::int()),
            zodic::object()
                .field("kind", zodic::literal("b"))
                .field("y", zodic::string()),
        ],
    )
}

#[test]
fn dispatches_to_matching_branch() {
    let schema = shapes();
    let out = schema
        .parse_value(input(serde_json::json!({"kind": "a", "x": 1})))
        .unwrap();
    let record = out.as_record().unwrap();
    assert_eq!(record["kind"].as_str(), Some("a"));
    assert_eq!(record["x"].as_i64(), Some(1));

    assert!(schema
        .parse_value(input(serde_json::json!({"kind": "b", "y": "hi"})))
        .is_ok());
}

#[test]
fn branch_issues_come_from_the_single_branch() {
    let schema = shapes();
    let err = schema
        .parse_value(input(serde_json::json!({"kind": "a", "x": "not-int"})))
        .unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].path, vec![PathSegment::Key("x".into())]);
    assert_eq!(err.issues()[0].expected.as_deref(), Some("int"));
}

#[test]
fn unmatched_discriminator_is_invalid_union() {
    let schema = shapes();
    let err = schema
        .parse_value(input(serde_json::json!({"kind": "c"})))
        .unwrap_err();
    let issue = &err.issues()[0];
    assert_eq!(issue.code, IssueCode::InvalidUnion);
    assert_eq!(issue.discriminator.as_deref(), Some("kind"));
}

#[test]
fn missing_discriminator_is_invalid_union() {
    let err = shapes()
        .parse_value(input(serde_json::json!({"x": 1})))
        .unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::InvalidUnion);
}

#[test]
fn non_record_input_is_invalid_union() {
    let err = shapes().parse(42).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::InvalidUnion);
}

#[test]
fn enum_discriminators_index_every_variant() {
    let schema = zodic::discriminated_union(
        "op",
        vec![
            zodic::object()
                .field("op", zodic::enumeration(&["add", "sub"]))
                .field("n", zodic::int()),
            zodic::object()
                .field("op", zodic::literal("neg"))
                .field("n", zodic::int()),
        ],
    );
    assert!(schema
        .parse_value(input(serde_json::json!({"op": "sub", "n": 2})))
        .is_ok());
    assert!(schema
        .parse_value(input(serde_json::json!({"op": "neg", "n": 2})))
        .is_ok());
}

#[test]
#[should_panic]
fn construction_panics_without_discriminator_field() {
    zodic::discriminated_union("kind", vec![zodic::object().field("x", zodic::int())]);
}
