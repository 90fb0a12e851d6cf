use zodic::prelude::*;

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn union_first_success_wins() {
    let schema = zodic::union(vec![
        zodic::object()
            .field("email", zodic::string())
            .into_schema(),
        zodic::string().into_schema(),
    ]);

    assert_eq!(schema.parse("hi").unwrap().as_str(), Some("hi"));

    let out = schema
        .parse_value(input(serde_json::json!({"email": "a@b"})))
        .unwrap();
    assert_eq!(out.as_record().unwrap()["email"].as_str(), Some("a@b"));
}

#[test]
fn union_failure_aggregates_per_option_errors() {
    let schema = zodic::union(vec![
        zodic::object()
            .field("email", zodic::string())
            .into_schema(),
        zodic::string().into_schema(),
    ]);

    let err = schema.parse(42).unwrap_err();
    assert_eq!(err.issues().len(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.code, IssueCode::InvalidUnion);
    assert_eq!(issue.errors.len(), 2);
    assert_eq!(issue.errors[1][0].code, IssueCode::InvalidType);
    assert_eq!(issue.errors[1][0].expected.as_deref(), Some("string"));
    assert_eq!(issue.errors[1][0].received.as_deref(), Some("number"));
}

#[test]
fn union_overlapping_options_take_first() {
    let schema = zodic::union(vec![
        zodic::int().into_schema(),
        zodic::int().min(100).into_schema(),
    ]);
    // Both admit 200; the first option's output is the result.
    assert!(schema.parse(200).is_ok());
    assert!(schema.parse(5).is_ok());
}

#[test]
fn or_sugar_builds_a_union() {
    let schema = zodic::string().or(zodic::int());
    assert!(schema.parse("x").is_ok());
    assert!(schema.parse(3).is_ok());
    assert!(schema.parse(true).is_err());
}

#[test]
fn pipe_feeds_first_output_into_second() {
    let schema = zodic::string().coerce().pipe(zodic::string().min(2));
    assert_eq!(schema.parse(42).unwrap().as_str(), Some("42"));
    let err = schema.parse(7).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn pipe_first_failure_propagates_unchanged() {
    let schema = zodic::string().pipe(zodic::string().min(1));
    let err = schema.parse(1).unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].code, IssueCode::InvalidType);
}

#[test]
fn transform_maps_the_output() {
    let schema = zodic::string().transform(|value, _ctx| {
        let len = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
        Ok(Value::from(len))
    });
    assert_eq!(schema.parse("hello").unwrap().as_u64(), Some(5));
}

#[test]
fn transform_error_becomes_custom_issue() {
    let schema = zodic::string().transform(|_value, _ctx| Err("nope".to_string()));
    let err = schema.parse("x").unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::Custom);
    assert_eq!(err.issues()[0].message, "nope");
}

#[test]
fn transform_can_attach_extra_issues() {
    let schema = zodic::string().transform(|value, ctx| {
        ctx.add_message("heads up");
        Ok(value)
    });
    let err = schema.parse("x").unwrap_err();
    assert_eq!(err.issues()[0].message, "heads up");
}

#[test]
fn transform_skipped_when_inner_fails() {
    let schema = zodic::string().transform(|_value, _ctx| panic!("must not run"));
    assert!(schema.parse(1).is_err());
}

#[test]
fn refine_appends_custom_issue() {
    let schema = zodic::string().refine(|v| v.as_str().is_some_and(|s| s.len() >= 5), "too short");
    assert!(schema.parse("hello").is_ok());
    let err = schema.parse("hi").unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::Custom);
    assert_eq!(err.issues()[0].message, "too short");
}

#[test]
fn refine_passes_null_through_to_nil_policy() {
    let schema = zodic::string()
        .nilable()
        .refine(|_| false, "never runs on null");
    assert!(schema.parse_value(Value::Null).is_ok());
}

#[test]
fn refine_with_path_and_abort() {
    let schema = zodic::string().refine_with(
        |_| false,
        RefineParams::new()
            .message("bad")
            .abort()
            .at(PathSegment::Key("inner".into())),
    );
    let err = schema.parse("x").unwrap_err();
    assert_eq!(err.issues()[0].path, vec![PathSegment::Key("inner".into())]);
}

#[test]
fn check_manipulates_the_payload_directly() {
    let schema = zodic::int().check(|payload| {
        if payload.value.as_i64().is_some_and(|n| n % 2 != 0) {
            payload.push(RawIssue::custom("odd"));
        }
    });
    assert!(schema.parse(4).is_ok());
    let err = schema.parse(5).unwrap_err();
    assert_eq!(err.issues()[0].message, "odd");
}

#[test]
fn custom_schema_from_closure() {
    let even = zodic::custom(|value| match value.as_i64() {
        Some(n) if n % 2 == 0 => Ok(value.clone()),
        _ => Err("Must be even".to_string()),
    });
    assert!(even.parse(4).is_ok());
    assert_eq!(even.parse(5).unwrap_err().issues()[0].message, "Must be even");
}

#[test]
fn describe_is_metadata_only() {
    let schema = zodic::string().min(2).describe("a short label");
    assert_eq!(schema.description(), Some("a short label"));
    assert!(schema.parse("ab").is_ok());
    assert!(schema.parse("a").is_err());
}
