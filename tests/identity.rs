//! Smart-inference guarantees: recognized values come back as themselves,
//! and boxes are never silently unwrapped.

use std::sync::Arc;

use zodic::prelude::*;

#[test]
fn direct_value_round_trips_unchanged() {
    let out = zodic::int().parse(Value::Int(42)).unwrap();
    assert!(matches!(out, Value::Int(42)));

    let out = zodic::string().parse("ab").unwrap();
    assert_eq!(out.as_str(), Some("ab"));
}

#[test]
fn storage_tag_is_preserved() {
    // A uint-tagged value through an int schema stays uint-tagged.
    let out = zodic::int().parse(Value::Uint(7)).unwrap();
    assert!(matches!(out, Value::Uint(7)));
}

#[test]
fn boxed_value_keeps_its_allocation() {
    let inner = Arc::new(Value::String("hello".to_string()));
    let out = zodic::string()
        .min(2)
        .parse_value(Value::Boxed(inner.clone()))
        .unwrap();
    match out {
        Value::Boxed(returned) => assert!(Arc::ptr_eq(&returned, &inner)),
        other => panic!("box was unwrapped: {:?}", other),
    }
}

#[test]
fn boxed_value_is_checked_through_the_box() {
    let boxed = Value::boxed(Value::String("a".to_string()));
    let err = zodic::string().min(2).parse_value(boxed).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn boxed_mismatch_reports_inner_type_name() {
    let boxed = Value::boxed(Value::Int(3));
    let err = zodic::string().parse_value(boxed).unwrap_err();
    assert_eq!(err.issues()[0].received.as_deref(), Some("number"));
}

#[test]
fn coercion_replaces_the_box() {
    let boxed = Value::boxed(Value::Int(42));
    let out = zodic::string().coerce().parse_value(boxed).unwrap();
    assert!(matches!(out, Value::String(_)));
    assert_eq!(out.as_str(), Some("42"));
}

#[test]
fn nilable_null_stays_null() {
    let out = zodic::string().nilable().parse_value(Value::Null).unwrap();
    assert!(out.is_null());
}

#[test]
fn opaque_values_pass_through_any() {
    struct Session {
        id: u32,
    }
    let value = Value::opaque("session", Session { id: 9 });
    let out = zodic::any().parse_value(value).unwrap();
    match out {
        Value::Opaque { tag, value } => {
            assert_eq!(tag, "session");
            assert_eq!(value.downcast_ref::<Session>().map(|s| s.id), Some(9));
        }
        other => panic!("expected opaque, got {:?}", other),
    }
}

#[test]
fn concurrent_parses_share_one_schema() {
    let schema = Arc::new(zodic::object().field("n", zodic::int().min(0)));
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let schema = schema.clone();
            std::thread::spawn(move || {
                let input = Value::from(serde_json::json!({ "n": n }));
                schema.parse_value(input).is_ok()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
