use std::collections::BTreeMap;
use std::sync::Arc;

use regex_lite::Regex;

use crate::checks::{run_checks, ZCheck};
use crate::combinators::{
    RefineParams, TransformCtx, ZCheckSchema, ZDescribe, ZIntersection, ZPipe, ZRefine,
    ZTransform, ZUnion,
};
use crate::config::{self, ErrorMap};
use crate::error::{RawIssue, ZodicError};
use crate::modifiers::{ZDefault, ZNilable, ZNullish, ZOptional, ZPrefault};
use crate::payload::{ParseCtx, Payload};
use crate::value::Value;

/// Definition record owned by every schema: type code, attached checks,
/// null-policy flags, and schema-level options. Immutable once the schema
/// is constructed; builder methods consume the schema and hand back a new
/// one.
#[derive(Clone)]
pub struct Internals {
    /// Stable type code (`"string"`, `"int8"`, `"object"`, …).
    pub kind: &'static str,
    pub checks: Vec<ZCheck>,
    /// Reported to object validation: a missing field parses null instead
    /// of failing outright.
    pub optional: bool,
    /// The value may legitimately be null.
    pub nilable: bool,
    /// Opt-in coercion flag; honored by schemas that implement a coercer.
    pub coerce: bool,
    /// Authoritative admissible set for literal/enum schemas.
    pub values: Option<Vec<Value>>,
    /// Compiled pattern cache, recorded by regex checks at attach time.
    pub pattern: Option<Regex>,
    /// Schema-level error map; first rung of the resolution ladder.
    pub error: Option<ErrorMap>,
    pub description: Option<String>,
    /// Schema-level option bag for anything without a dedicated field.
    pub bag: BTreeMap<String, Value>,
}

impl Internals {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            checks: vec![],
            optional: false,
            nilable: false,
            coerce: false,
            values: None,
            pattern: None,
            error: None,
            description: None,
            bag: BTreeMap::new(),
        }
    }

    /// Attach a check, running its attach hooks first.
    pub fn push_check(&mut self, check: ZCheck) {
        for hook in check.attach_hooks().to_vec() {
            hook(self);
        }
        self.checks.push(check);
    }
}

/// The polymorphic validator protocol. Every schema and wrapper implements
/// `run`, which refines `payload.value` in place and appends raw issues on
/// failure; the provided `parse*` wrappers finalize those issues into a
/// [`ZodicError`].
pub trait Schema: Send + Sync {
    fn internals(&self) -> &Internals;

    /// Validate the payload value in place. Appends issues on failure; a
    /// successful run leaves the issue list untouched.
    fn run(&self, payload: &mut Payload, ctx: &ParseCtx);

    /// Parse a value under the default context.
    fn parse_value(&self, input: Value) -> Result<Value, ZodicError> {
        self.parse_value_with(input, &ParseCtx::new())
    }

    /// Parse a value under an explicit context.
    fn parse_value_with(&self, input: Value, ctx: &ParseCtx) -> Result<Value, ZodicError> {
        let mut payload = Payload::new(input);
        self.run(&mut payload, ctx);
        if payload.ok() {
            Ok(payload.value)
        } else {
            let cfg = config::snapshot();
            Err(ZodicError::from_raw(payload.issues, ctx, &cfg))
        }
    }

    /// Convenience over [`Schema::parse_value`] accepting anything
    /// convertible to [`Value`].
    fn parse<V: Into<Value>>(&self, input: V) -> Result<Value, ZodicError>
    where
        Self: Sized,
    {
        self.parse_value(input.into())
    }

    fn parse_with<V: Into<Value>>(&self, input: V, ctx: &ParseCtx) -> Result<Value, ZodicError>
    where
        Self: Sized,
    {
        self.parse_value_with(input.into(), ctx)
    }

    /// Like [`Schema::parse`] but panics with the error aggregate on
    /// failure.
    fn must_parse<V: Into<Value>>(&self, input: V) -> Value
    where
        Self: Sized,
    {
        match self.parse_value(input.into()) {
            Ok(value) => value,
            Err(error) => panic!("zodic: parse failed: {}", error),
        }
    }

    /// Parse a JSON document. A malformed document fails with a single
    /// `custom` issue carrying the deserializer's message.
    fn parse_json(&self, json: &str) -> Result<Value, ZodicError> {
        match serde_json::from_str::<serde_json::Value>(json) {
            Ok(parsed) => self.parse_value(Value::from(parsed)),
            Err(error) => Err(ZodicError {
                issues: vec![crate::error::finalize(
                    RawIssue::custom(format!("Failed to parse JSON: {}", error)),
                    &ParseCtx::new(),
                    &config::snapshot(),
                )],
            }),
        }
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn internals(&self) -> &Internals {
        (**self).internals()
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        (**self).run(payload, ctx)
    }
}

/// Chainable modifier surface shared by every sized schema.
pub trait SchemaExt: Schema + Sized + 'static {
    /// Erase to a shared schema handle.
    fn into_schema(self) -> Arc<dyn Schema> {
        Arc::new(self)
    }

    /// Missing or null input becomes a successful null result.
    fn optional(self) -> ZOptional {
        ZOptional::new(self.into_schema())
    }

    /// Null input becomes a successful null result.
    fn nilable(self) -> ZNilable {
        ZNilable::new(self.into_schema())
    }

    /// Optional and nilable combined.
    fn nullish(self) -> ZNullish {
        ZNullish::new(self.into_schema())
    }

    /// Replace null input with `value`, then parse it through this schema.
    fn default_value(self, value: impl Into<Value>) -> ZDefault {
        ZDefault::new(self.into_schema(), value.into())
    }

    /// Replace null input with `f()`, then parse it through this schema.
    fn default_fn<F>(self, f: F) -> ZDefault
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        ZDefault::new_fn(self.into_schema(), f)
    }

    /// On any validation failure (null excepted), parse `value` through
    /// this schema instead.
    fn prefault(self, value: impl Into<Value>) -> ZPrefault {
        ZPrefault::new(self.into_schema(), value.into())
    }

    fn prefault_fn<F>(self, f: F) -> ZPrefault
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        ZPrefault::new_fn(self.into_schema(), f)
    }

    /// Add a predicate check; a `false` return appends one `custom` issue.
    /// Null values pass through to the surrounding nil policy.
    fn refine<F>(self, predicate: F, message: impl Into<String>) -> ZRefine
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        ZRefine::new(
            self.into_schema(),
            predicate,
            RefineParams::new().message(message),
        )
    }

    /// [`SchemaExt::refine`] with full parameter control (error map, abort,
    /// issue path).
    fn refine_with<F>(self, predicate: F, params: RefineParams) -> ZRefine
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        ZRefine::new(self.into_schema(), predicate, params)
    }

    /// Unrestricted check: the closure manipulates the payload directly.
    fn check<F>(self, f: F) -> ZCheckSchema
    where
        F: Fn(&mut Payload) + Send + Sync + 'static,
    {
        ZCheckSchema::new(self.into_schema(), f)
    }

    /// Map the parsed value through a fallible function.
    fn transform<F>(self, f: F) -> ZTransform
    where
        F: Fn(Value, &mut TransformCtx) -> Result<Value, String> + Send + Sync + 'static,
    {
        ZTransform::new(self.into_schema(), f)
    }

    /// Feed this schema's output into `next`.
    fn pipe<S: Schema + 'static>(self, next: S) -> ZPipe {
        ZPipe::new(self.into_schema(), next.into_schema())
    }

    /// Attach a description; validation behavior is unchanged.
    fn describe(self, text: impl Into<String>) -> ZDescribe {
        ZDescribe::new(self.into_schema(), text)
    }

    /// This schema or `other`.
    fn or<S: Schema + 'static>(self, other: S) -> ZUnion {
        ZUnion::new(vec![self.into_schema(), other.into_schema()])
    }

    /// This schema and `other`, outputs merged.
    fn and<S: Schema + 'static>(self, other: S) -> ZIntersection {
        ZIntersection::new(self.into_schema(), other.into_schema())
    }
}

impl<T: Schema + Sized + 'static> SchemaExt for T {}

/// Shared recognition template for primitive validators.
///
/// `matches` sees the unboxed value; a box whose inner value matches is
/// recognized without unwrapping, preserving box identity. `coerce`, when
/// the schema opted in, runs first and replaces the value (boxes included)
/// on success; a declining coercer falls through to normal recognition.
/// `prepare` runs on the recognized value before the checks (string
/// trimming and the like).
pub(crate) struct TypeParser<'a> {
    pub expected: &'static str,
    pub matches: &'a dyn Fn(&Value) -> bool,
    pub coerce: Option<&'a dyn Fn(&Value) -> Option<Value>>,
    pub prepare: Option<&'a dyn Fn(&mut Value)>,
}

pub(crate) fn parse_primitive(internals: &Internals, payload: &mut Payload, parser: TypeParser<'_>) {
    let start = payload.issues.len();
    if recognize(internals, payload, &parser) {
        if let Some(prepare) = parser.prepare {
            prepare(&mut payload.value);
        }
        run_checks(&internals.checks, payload);
    }
    attach_schema_error(internals, payload, start);
}

fn recognize(internals: &Internals, payload: &mut Payload, parser: &TypeParser<'_>) -> bool {
    if payload.value.is_null() {
        if internals.optional || internals.nilable {
            return false;
        }
        let raw = RawIssue::invalid_type_received(parser.expected, "null");
        payload.push(raw);
        return false;
    }
    if internals.coerce {
        if let Some(coercer) = parser.coerce {
            if let Some(coerced) = coercer(payload.value.unbox()) {
                payload.value = coerced;
            }
        }
    }
    if (parser.matches)(payload.value.unbox()) {
        return true;
    }
    let raw = RawIssue::invalid_type(&payload.value, parser.expected);
    payload.push(raw);
    false
}

/// Back-fill the schema-level error map onto issues emitted since `from`
/// that no check claimed.
pub(crate) fn attach_schema_error(internals: &Internals, payload: &mut Payload, from: usize) {
    if let Some(error) = &internals.error {
        for issue in &mut payload.issues[from..] {
            if issue.error.is_none() {
                issue.error = Some(error.clone());
            }
        }
    }
}
