use std::sync::Arc;

use zodic::prelude::*;

fn tree() -> Arc<dyn Schema> {
    zodic::object()
        .field("value", zodic::int())
        .field("children", zodic::array(zodic::lazy(tree)).optional())
        .into_schema()
}

#[test]
fn recursive_schema_validates_nested_levels() {
    let schema = tree();
    let input = Value::from(serde_json::json!({
        "value": 1,
        "children": [
            {"value": 2},
            {"value": 3, "children": [{"value": 4}]},
        ],
    }));
    assert!(schema.parse_value(input).is_ok());
}

#[test]
fn recursive_schema_reports_deep_paths() {
    let schema = tree();
    let input = Value::from(serde_json::json!({
        "value": 1,
        "children": [{"value": "bad"}],
    }));
    let err = schema.parse_value(input).unwrap_err();
    assert_eq!(
        err.issues()[0].path,
        vec![
            PathSegment::Key("children".into()),
            PathSegment::Index(0),
            PathSegment::Key("value".into()),
        ]
    );
}

#[test]
fn factory_resolves_once() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    let schema = zodic::lazy(|| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        zodic::int().into_schema()
    });
    let _ = schema.parse(1);
    let _ = schema.parse(2);
    let _ = schema.parse("x");
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn pathological_cycle_hits_the_recursion_bound() {
    // A lazy that resolves to itself: every level recurses without
    // consuming input.
    fn looping() -> Arc<dyn Schema> {
        Arc::new(zodic::lazy(looping))
    }
    let schema = looping();
    let err = schema.parse_value(Value::Int(1)).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::Custom);
    assert_eq!(err.issues()[0].message, "Recursion limit exceeded");
}
