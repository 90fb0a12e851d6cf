use std::collections::BTreeMap;
use std::sync::Arc;

use crate::checks::run_checks;
use crate::error::{PathSegment, RawIssue};
use crate::payload::{ParseCtx, Payload};
use crate::primitives::ZEnum;
use crate::schema::{attach_schema_error, Internals, Schema, SchemaExt};
use crate::value::Value;

/// How unknown keys are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnknownKeys {
    /// Unknown keys are rejected with `unrecognized_keys`.
    Strict,
    /// Unknown keys are dropped silently (default).
    Strip,
    /// Unknown keys pass through unchanged.
    Loose,
}

/// Record schema over a fixed shape of named fields. Created via
/// [`crate::object()`] or the [`zobject!`](crate::zobject) macro.
///
/// Fields validate in declaration order. A missing field whose schema
/// reports itself optional is parsed as null — which lets `default` supply
/// a value and lets `optional` succeed without producing an entry; a
/// missing required field reports `invalid_type` with `received =
/// "undefined"` at the field path.
///
/// # Unknown keys
///
/// - [`strip()`](Self::strip) (default) — dropped from the output.
/// - [`strict()`](Self::strict) — rejected, one issue per key.
/// - [`passthrough()`](Self::passthrough) — kept unchanged.
/// - [`catchall()`](Self::catchall) — validated against a schema,
///   whatever the mode.
///
/// # Example
/// ```
/// use zodic::prelude::*;
///
/// let schema = zodic::object()
///     .field("name", zodic::string().min(1))
///     .field("age", zodic::int().min(0));
/// ```
#[derive(Clone)]
pub struct ZObject {
    internals: Internals,
    shape: Vec<(String, Arc<dyn Schema>)>,
    policy: UnknownKeys,
    catchall: Option<Arc<dyn Schema>>,
}

impl ZObject {
    pub fn new() -> Self {
        Self {
            internals: Internals::new("object"),
            shape: vec![],
            policy: UnknownKeys::Strip,
            catchall: None,
        }
    }

    /// Add (or replace) a field with its schema.
    pub fn field(mut self, name: impl Into<String>, schema: impl Schema + 'static) -> Self {
        let name = name.into();
        self.shape.retain(|(existing, _)| *existing != name);
        self.shape.push((name, Arc::new(schema)));
        self
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    /// Reject unknown keys.
    pub fn strict(mut self) -> Self {
        self.policy = UnknownKeys::Strict;
        self
    }

    /// Silently drop unknown keys (default).
    pub fn strip(mut self) -> Self {
        self.policy = UnknownKeys::Strip;
        self
    }

    /// Keep unknown keys unchanged.
    pub fn passthrough(mut self) -> Self {
        self.policy = UnknownKeys::Loose;
        self
    }

    /// Validate unknown keys against `schema` instead of applying the
    /// unknown-key policy.
    pub fn catchall(mut self, schema: impl Schema + 'static) -> Self {
        self.catchall = Some(Arc::new(schema));
        self
    }

    /// Restrict the shape to the listed keys.
    pub fn pick(mut self, keys: &[&str]) -> Self {
        self.shape.retain(|(name, _)| keys.contains(&name.as_str()));
        self
    }

    /// Remove the listed keys from the shape.
    pub fn omit(mut self, keys: &[&str]) -> Self {
        self.shape.retain(|(name, _)| !keys.contains(&name.as_str()));
        self
    }

    /// Merge another object's shape into this one; incoming keys override.
    pub fn extend(mut self, other: ZObject) -> Self {
        for (name, schema) in other.shape {
            self.shape.retain(|(existing, _)| *existing != name);
            self.shape.push((name, schema));
        }
        self
    }

    /// Shape merge where `other`'s unknown-key policy and catchall win.
    pub fn merge(self, other: ZObject) -> Self {
        let policy = other.policy;
        let catchall = other.catchall.clone();
        let mut merged = self.extend(other);
        merged.policy = policy;
        merged.catchall = catchall;
        merged
    }

    /// Wrap every field in `optional`. Already-optional fields are left
    /// alone, so the operation is idempotent.
    pub fn partial(mut self) -> Self {
        self.shape = self
            .shape
            .into_iter()
            .map(|(name, schema)| {
                if schema.internals().optional {
                    (name, schema)
                } else {
                    let wrapped: Arc<dyn Schema> = Arc::new(schema.optional());
                    (name, wrapped)
                }
            })
            .collect();
        self
    }

    /// Make every field (or the listed ones) required again: null and
    /// missing values fail even through an `optional` wrapper.
    pub fn required(mut self, keys: Option<&[&str]>) -> Self {
        self.shape = self
            .shape
            .into_iter()
            .map(|(name, schema)| {
                let applies = keys.map_or(true, |keys| keys.contains(&name.as_str()));
                if applies {
                    let wrapped: Arc<dyn Schema> = Arc::new(ZRequired::new(schema));
                    (name, wrapped)
                } else {
                    (name, schema)
                }
            })
            .collect();
        self
    }

    /// Enum schema over the shape's keys.
    pub fn keyof(&self) -> ZEnum {
        ZEnum::from_strings(self.shape.iter().map(|(name, _)| name.clone()).collect())
    }

    /// Field names in declaration order.
    pub fn shape_keys(&self) -> Vec<&str> {
        self.shape.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The schema attached to a field, if declared.
    pub fn field_schema(&self, name: &str) -> Option<&Arc<dyn Schema>> {
        self.shape
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, schema)| schema)
    }
}

impl Default for ZObject {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for ZObject {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("object", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let input = match payload.value.unbox() {
            Value::Record(map) => map.clone(),
            _ => {
                let raw = RawIssue::invalid_type(&payload.value, "object");
                payload.push(raw);
                attach_schema_error(&self.internals, payload, start);
                return;
            }
        };

        let mut out: BTreeMap<String, Value> = BTreeMap::new();

        for (name, schema) in &self.shape {
            match input.get(name) {
                Some(field_value) => {
                    let mut child =
                        payload.child(field_value.clone(), PathSegment::Key(name.clone()));
                    schema.run(&mut child, ctx);
                    let ok = child.ok();
                    let value = payload.adopt(child);
                    if ok {
                        out.insert(name.clone(), value);
                    }
                }
                None if schema.internals().optional => {
                    let mut child = payload.child(Value::Null, PathSegment::Key(name.clone()));
                    schema.run(&mut child, ctx);
                    let ok = child.ok();
                    let value = payload.adopt(child);
                    if ok && !value.is_null() {
                        out.insert(name.clone(), value);
                    }
                }
                None => {
                    let raw =
                        RawIssue::invalid_type_received(schema.internals().kind, "undefined")
                            .at(PathSegment::Key(name.clone()));
                    payload.push(raw);
                }
            }
        }

        let unknown: Vec<(&String, &Value)> = input
            .iter()
            .filter(|(key, _)| !self.shape.iter().any(|(name, _)| name == *key))
            .collect();

        if let Some(catchall) = &self.catchall {
            for (key, value) in unknown {
                let mut child = payload.child(value.clone(), PathSegment::Key(key.clone()));
                catchall.run(&mut child, ctx);
                let ok = child.ok();
                let value = payload.adopt(child);
                if ok {
                    out.insert(key.clone(), value);
                }
            }
        } else {
            match self.policy {
                UnknownKeys::Strip => {}
                UnknownKeys::Strict => {
                    for (key, _) in unknown {
                        let raw = RawIssue::unrecognized_keys(vec![key.clone()])
                            .at(PathSegment::Key(key.clone()));
                        payload.push(raw);
                    }
                }
                UnknownKeys::Loose => {
                    for (key, value) in unknown {
                        out.insert(key.clone(), value.clone());
                    }
                }
            }
        }

        payload.value = Value::Record(out);
        run_checks(&self.internals.checks, payload);
        attach_schema_error(&self.internals, payload, start);
    }
}

/// Rejects null before delegating, undoing an inner `optional`/`nilable`
/// acceptance. Produced by [`ZObject::required`].
struct ZRequired {
    internals: Internals,
    inner: Arc<dyn Schema>,
}

impl ZRequired {
    fn new(inner: Arc<dyn Schema>) -> Self {
        Self {
            internals: Internals::new(inner.internals().kind),
            inner,
        }
    }
}

impl Schema for ZRequired {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        if payload.value.is_null() {
            let raw = RawIssue::invalid_type_received(self.internals.kind, "null");
            payload.push(raw);
            return;
        }
        self.inner.run(payload, ctx);
    }
}
