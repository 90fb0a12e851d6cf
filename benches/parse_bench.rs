use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zodic::prelude::*;

fn bench_string_parse(c: &mut Criterion) {
    let re = regex_lite::Regex::new("^[a-z.@]+$").unwrap();
    let schema = zodic::string().min(3).max(50).regex(re);
    c.bench_function("string_checks_valid", |b| {
        b.iter(|| schema.parse(black_box("test@example.com")))
    });
    c.bench_function("string_checks_invalid", |b| {
        b.iter(|| schema.parse(black_box("NO")))
    });
}

fn bench_int_parse(c: &mut Criterion) {
    let schema = zodic::int().min(0).max(1000);
    c.bench_function("int_valid", |b| b.iter(|| schema.parse(black_box(500))));
    c.bench_function("int_out_of_bounds", |b| {
        b.iter(|| schema.parse(black_box(5000)))
    });
}

fn bench_object_parse(c: &mut Criterion) {
    let schema = zodic::object()
        .field("name", zodic::string().min(1))
        .field("email", zodic::string().includes("@"))
        .field("age", zodic::int().min(0));
    let input = Value::from(serde_json::json!({
        "name": "Alex",
        "email": "alex@example.com",
        "age": 30,
    }));
    c.bench_function("object_3_fields", |b| {
        b.iter(|| schema.parse_value(black_box(input.clone())))
    });
}

fn bench_array_parse(c: &mut Criterion) {
    let schema = zodic::array(zodic::int().positive());
    let input = Value::from(serde_json::json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
    c.bench_function("array_10_ints", |b| {
        b.iter(|| schema.parse_value(black_box(input.clone())))
    });
}

fn bench_union_dispatch(c: &mut Criterion) {
    let trial = zodic::union(vec![
        zodic::object().field("email", zodic::string()).into_schema(),
        zodic::string().into_schema(),
    ]);
    let discriminated = zodic::discriminated_union(
        "kind",
        vec![
            zodic::object()
                .field("kind", zodic::literal("a"))
                .field("x", zodic::int()),
            zodic::object()
                .field("kind", zodic::literal("b"))
                .field("y", zodic::string()),
        ],
    );
    let input = Value::from(serde_json::json!({"kind": "b", "y": "hi"}));

    c.bench_function("union_second_option", |b| {
        b.iter(|| trial.parse(black_box("hello")))
    });
    c.bench_function("discriminated_fast_path", |b| {
        b.iter(|| discriminated.parse_value(black_box(input.clone())))
    });
}

criterion_group!(
    benches,
    bench_string_parse,
    bench_int_parse,
    bench_object_parse,
    bench_array_parse,
    bench_union_dispatch
);
criterion_main!(benches);
