use zodic::prelude::*;

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn identical_primitives_merge_to_the_value() {
    let schema = zodic::intersection(zodic::string().min(2), zodic::string().max(5));
    assert_eq!(schema.parse("abc").unwrap().as_str(), Some("abc"));
}

#[test]
fn both_sides_report_their_issues() {
    let schema = zodic::intersection(zodic::string().min(5), zodic::string().starts_with("x"));
    let err = schema.parse("ab").unwrap_err();
    assert_eq!(err.issues().len(), 2);
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
    assert_eq!(err.issues()[1].code, IssueCode::InvalidFormat);
}

#[test]
fn records_merge_per_key() {
    let schema = zodic::intersection(
        zodic::object().field("a", zodic::string()).passthrough(),
        zodic::object().field("b", zodic::int()).passthrough(),
    );
    let out = schema
        .parse_value(input(serde_json::json!({"a": "x", "b": 2})))
        .unwrap();
    let record = out.as_record().unwrap();
    assert_eq!(record["a"].as_str(), Some("x"));
    assert_eq!(record["b"].as_i64(), Some(2));
}

#[test]
fn record_merge_recurses_into_shared_keys() {
    let schema = zodic::intersection(
        zodic::object()
            .field("nested", zodic::object().field("a", zodic::int()).passthrough())
            .passthrough(),
        zodic::object()
            .field("nested", zodic::object().field("b", zodic::int()).passthrough())
            .passthrough(),
    );
    let out = schema
        .parse_value(input(serde_json::json!({"nested": {"a": 1, "b": 2}})))
        .unwrap();
    let nested = out.as_record().unwrap()["nested"].as_record().unwrap().clone();
    assert!(nested.contains_key("a"));
    assert!(nested.contains_key("b"));
}

#[test]
fn equal_length_sequences_merge_elementwise() {
    let schema = zodic::intersection(zodic::array(zodic::int()), zodic::array(zodic::int().min(0)));
    assert!(schema.parse_value(input(serde_json::json!([1, 2]))).is_ok());
}

#[test]
fn leaf_conflict_is_unmergable() {
    // Transform one side so both succeed with different scalar outputs.
    let upper = zodic::string().transform(|value, _| {
        Ok(Value::from(value.as_str().unwrap_or_default().to_uppercase()))
    });
    let schema = zodic::intersection(zodic::string(), upper);
    let err = schema.parse("abc").unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::Custom);
    assert_eq!(err.issues()[0].message, "Unmergable intersection");
}

#[test]
fn and_sugar_chains_intersections() {
    let schema = zodic::string().min(2).and(zodic::string().max(4));
    assert!(schema.parse("abc").is_ok());
    assert!(schema.parse("a").is_err());
    assert!(schema.parse("abcdef").is_err());
}
