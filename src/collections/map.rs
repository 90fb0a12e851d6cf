use std::sync::Arc;

use crate::checks::run_checks;
use crate::error::{PathSegment, RawIssue};
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Map schema over arbitrary keys: key and value schemas validated
/// independently for every entry; successful entries populate a fresh
/// output map. Created via [`crate::map()`].
#[derive(Clone)]
pub struct ZMap {
    internals: Internals,
    key_schema: Arc<dyn Schema>,
    value_schema: Arc<dyn Schema>,
}

impl ZMap {
    pub fn new(key_schema: impl Schema + 'static, value_schema: impl Schema + 'static) -> Self {
        Self {
            internals: Internals::new("map"),
            key_schema: Arc::new(key_schema),
            value_schema: Arc::new(value_schema),
        }
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }
}

impl Schema for ZMap {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("map", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let entries = match payload.value.unbox() {
            Value::Map(entries) => entries.clone(),
            _ => {
                let raw = RawIssue::invalid_type(&payload.value, "map");
                payload.push(raw);
                attach_schema_error(&self.internals, payload, start);
                return;
            }
        };

        let mut out: Vec<(Value, Value)> = Vec::with_capacity(entries.len());

        for (key, value) in entries {
            let rendered = key.display_short();

            let mut key_trial = payload.trial(key.clone());
            self.key_schema.run(&mut key_trial, ctx);
            if !key_trial.ok() {
                let raw = RawIssue::invalid_key(rendered.clone(), &key, "map")
                    .at(PathSegment::Key(rendered));
                payload.push(raw);
                continue;
            }
            let validated_key = key_trial.value;

            let mut child = payload.child(value, PathSegment::Key(rendered));
            self.value_schema.run(&mut child, ctx);
            let ok = child.ok();
            let validated_value = payload.adopt(child);
            if ok {
                out.push((validated_key, validated_value));
            }
        }

        payload.value = Value::Map(out);
        run_checks(&self.internals.checks, payload);
        attach_schema_error(&self.internals, payload, start);
    }
}
