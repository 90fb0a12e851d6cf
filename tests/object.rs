use zodic::prelude::*;

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn validates_declared_fields() {
    let schema = zodic::object()
        .field("name", zodic::string().min(1))
        .field("age", zodic::int().min(0));
    let out = schema
        .parse_value(input(serde_json::json!({"name": "Alex", "age": 30})))
        .unwrap();
    let record = out.as_record().unwrap();
    assert_eq!(record["name"].as_str(), Some("Alex"));
    assert_eq!(record["age"].as_i64(), Some(30));
}

#[test]
fn missing_required_field_reports_undefined_at_path() {
    let schema = zodic::object()
        .field("name", zodic::string())
        .field("age", zodic::int());
    let err = schema
        .parse_value(input(serde_json::json!({"name": "A"})))
        .unwrap_err();
    assert_eq!(err.issues().len(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.code, IssueCode::InvalidType);
    assert_eq!(issue.expected.as_deref(), Some("int"));
    assert_eq!(issue.received.as_deref(), Some("undefined"));
    assert_eq!(issue.path, vec![PathSegment::Key("age".into())]);
}

#[test]
fn nested_field_issues_are_path_prefixed() {
    let schema = zodic::object().field(
        "profile",
        zodic::object().field("email", zodic::string().includes("@")),
    );
    let err = schema
        .parse_value(input(serde_json::json!({"profile": {"email": "bad"}})))
        .unwrap_err();
    assert_eq!(
        err.issues()[0].path,
        vec![
            PathSegment::Key("profile".into()),
            PathSegment::Key("email".into())
        ]
    );
}

#[test]
fn non_record_input_is_invalid_type() {
    let schema = zodic::object().field("a", zodic::string());
    let err = schema.parse(42).unwrap_err();
    assert_eq!(err.issues()[0].expected.as_deref(), Some("object"));
}

#[test]
fn optional_field_missing_produces_no_entry() {
    let schema = zodic::object()
        .field("name", zodic::string())
        .field("nickname", zodic::string().optional());
    let out = schema
        .parse_value(input(serde_json::json!({"name": "Alex"})))
        .unwrap();
    assert!(!out.as_record().unwrap().contains_key("nickname"));
}

#[test]
fn pick_restricts_shape() {
    let schema = zodic::object()
        .field("a", zodic::string())
        .field("b", zodic::int())
        .field("c", zodic::boolean())
        .pick(&["a", "c"]);
    assert_eq!(schema.shape_keys(), vec!["a", "c"]);
    let out = schema
        .parse_value(input(serde_json::json!({"a": "x", "c": true})))
        .unwrap();
    assert_eq!(out.as_record().unwrap().len(), 2);
}

#[test]
fn omit_removes_keys() {
    let schema = zodic::object()
        .field("a", zodic::string())
        .field("b", zodic::int())
        .omit(&["b"]);
    assert_eq!(schema.shape_keys(), vec!["a"]);
}

#[test]
fn pick_omit_round_trip() {
    let base = zodic::object()
        .field("a", zodic::string())
        .field("b", zodic::int());
    let left = base.clone().pick(&["a"]).omit(&["a"]);
    assert!(left.shape_keys().is_empty());
    let right = base.clone().omit(&["b"]).pick(&["a"]);
    let omitted = base.omit(&["b"]);
    assert_eq!(right.shape_keys(), omitted.shape_keys());
}

#[test]
fn extend_overrides_incoming_keys() {
    let base = zodic::object().field("a", zodic::string().min(1));
    let stricter = zodic::object().field("a", zodic::string().min(10));
    let schema = base.extend(stricter);
    assert!(schema.parse_value(input(serde_json::json!({"a": "hi"}))).is_err());
}

#[test]
fn merge_takes_others_policy_and_catchall() {
    let base = zodic::object().field("a", zodic::string()).strict();
    let other = zodic::object().field("b", zodic::int()).passthrough();
    let schema = base.merge(other);
    let out = schema
        .parse_value(input(serde_json::json!({"a": "x", "b": 1, "extra": true})))
        .unwrap();
    assert!(out.as_record().unwrap().contains_key("extra"));
}

#[test]
fn partial_makes_all_fields_optional() {
    let schema = zodic::object()
        .field("name", zodic::string().min(1))
        .field("age", zodic::int())
        .partial();
    let out = schema.parse_value(input(serde_json::json!({}))).unwrap();
    assert!(out.as_record().unwrap().is_empty());
}

#[test]
fn partial_is_idempotent() {
    let schema = zodic::object()
        .field("name", zodic::string())
        .partial()
        .partial();
    assert!(schema.parse_value(input(serde_json::json!({}))).is_ok());
    for key in schema.shape_keys() {
        let field = schema.field_schema(key).unwrap();
        assert!(field.internals().optional);
    }
}

#[test]
fn required_undoes_optional() {
    let schema = zodic::object()
        .field("name", zodic::string().optional())
        .required(None);
    let err = schema.parse_value(input(serde_json::json!({}))).unwrap_err();
    assert_eq!(err.issues()[0].received.as_deref(), Some("undefined"));
    let err = schema
        .parse_value(input(serde_json::json!({"name": null})))
        .unwrap_err();
    assert_eq!(err.issues()[0].received.as_deref(), Some("null"));
}

#[test]
fn required_with_listed_keys_only() {
    let schema = zodic::object()
        .field("a", zodic::string().optional())
        .field("b", zodic::string().optional())
        .required(Some(&["a"]));
    let err = schema.parse_value(input(serde_json::json!({}))).unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].path, vec![PathSegment::Key("a".into())]);
}

#[test]
fn keyof_builds_enum_over_shape() {
    let schema = zodic::object()
        .field("name", zodic::string())
        .field("age", zodic::int());
    let keys = schema.keyof();
    assert!(keys.parse("name").is_ok());
    assert!(keys.parse("age").is_ok());
    assert!(keys.parse("email").is_err());
}

#[test]
fn zobject_macro_builds_shapes() {
    let schema = zodic::zobject! {
        "name" => zodic::string().min(2),
        "age" => zodic::int().min(0).optional(),
    };
    assert!(schema
        .parse_value(input(serde_json::json!({"name": "Alex"})))
        .is_ok());
}

#[test]
fn strict_object_scenario() {
    let schema = zodic::object()
        .field("name", zodic::string())
        .field("age", zodic::int())
        .strict();

    let err = schema
        .parse_value(input(serde_json::json!({"name": "A", "age": 3, "extra": 1})))
        .unwrap_err();
    assert_eq!(err.issues().len(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.code, IssueCode::UnrecognizedKeys);
    assert_eq!(issue.keys.clone().unwrap(), vec!["extra".to_string()]);
    assert_eq!(issue.path, vec![PathSegment::Key("extra".into())]);
}
