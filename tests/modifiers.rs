use zodic::prelude::*;

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn optional_accepts_null() {
    let schema = zodic::string().optional();
    assert!(schema.parse_value(Value::Null).unwrap().is_null());
    assert_eq!(schema.parse("x").unwrap().as_str(), Some("x"));
    assert!(schema.parse(1).is_err());
}

#[test]
fn optional_reports_itself_for_object_detection() {
    let schema = zodic::string().optional();
    assert!(schema.internals().optional);
    assert!(!zodic::string().internals().optional);
}

#[test]
fn nilable_accepts_null_but_is_not_optional() {
    let schema = zodic::string().nilable();
    assert!(schema.parse_value(Value::Null).unwrap().is_null());
    assert!(schema.internals().nilable);
    assert!(!schema.internals().optional);

    // A missing nilable (non-optional) field still fails.
    let object = zodic::object().field("name", zodic::string().nilable());
    assert!(object.parse_value(input(serde_json::json!({}))).is_err());
    assert!(object
        .parse_value(input(serde_json::json!({"name": null})))
        .is_ok());
}

#[test]
fn nullish_is_both() {
    let schema = zodic::string().nullish();
    assert!(schema.internals().optional);
    assert!(schema.internals().nilable);
    assert!(schema.parse_value(Value::Null).is_ok());
}

#[test]
fn default_fires_on_null_only() {
    let schema = zodic::int().min(0).default_value(7);
    assert_eq!(schema.parse_value(Value::Null).unwrap().as_i64(), Some(7));
    assert_eq!(schema.parse(5).unwrap().as_i64(), Some(5));
    // Invalid non-null input still fails; default is not a catch.
    assert!(schema.parse(-1).is_err());
}

#[test]
fn default_value_is_parsed_through_the_inner() {
    let schema = zodic::int().min(10).default_value(7);
    let err = schema.parse_value(Value::Null).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn default_fn_is_invoked_per_parse() {
    let schema = zodic::int().default_fn(|| Value::Int(41));
    assert_eq!(schema.parse_value(Value::Null).unwrap().as_i64(), Some(41));
}

#[test]
fn prefault_replaces_any_failure() {
    let schema = zodic::string()
        .refine(|v| v.as_str().is_some_and(|s| s.len() >= 5), "too short")
        .prefault("default");
    assert_eq!(schema.parse("ok").unwrap().as_str(), Some("default"));
    assert_eq!(schema.parse("hello").unwrap().as_str(), Some("hello"));
}

#[test]
fn prefault_does_not_catch_null() {
    let schema = zodic::string()
        .refine(|v| v.as_str().is_some_and(|s| s.len() >= 5), "too short")
        .prefault("default");
    let err = schema.parse_value(Value::Null).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::InvalidType);
}

#[test]
fn prefault_fallback_is_validated_too() {
    let schema = zodic::string().min(5).prefault("no");
    let err = schema.parse("x").unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn default_over_prefault_runs_default_first() {
    let schema = zodic::string()
        .min(5)
        .prefault("fallback!")
        .default_value("hi");
    // Null -> default "hi" -> inner rejects min(5) -> the prefault beneath
    // the default catches the residual failure.
    let out = schema.parse_value(Value::Null).unwrap();
    assert_eq!(out.as_str(), Some("fallback!"));

    let schema = zodic::string()
        .min(5)
        .default_value("hi")
        .prefault("fallback!");
    // Null passes the outer prefault untouched, the default swaps in "hi",
    // the inner rejects it, and nothing catches the residue.
    assert!(schema.parse_value(Value::Null).is_err());
}

#[test]
fn prefault_over_default_catches_residual_failures() {
    let schema = zodic::string()
        .min(5)
        .default_value("hi")
        .prefault("fallback!");
    // Non-null failing input: prefault catches, fallback re-parses fine.
    assert_eq!(schema.parse("no").unwrap().as_str(), Some("fallback!"));
}

#[test]
fn wrappers_remain_wrappable() {
    let schema = zodic::int().min(0).default_value(1).optional().nilable();
    assert!(schema.parse_value(Value::Null).is_ok());
    assert!(schema.parse(3).is_ok());
}
