use std::collections::BTreeMap;
use std::sync::Arc;

use crate::checks::run_checks;
use crate::error::{PathSegment, RawIssue};
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Homogeneous record schema: a key schema and a value schema applied to
/// every entry. Created via [`crate::record()`] / [`crate::loose_record()`].
///
/// A key the key-schema rejects produces one `invalid_key` issue at that
/// key — unless the record is loose, in which case the whole entry passes
/// through unvalidated.
#[derive(Clone)]
pub struct ZRecord {
    internals: Internals,
    key_schema: Arc<dyn Schema>,
    value_schema: Arc<dyn Schema>,
    loose: bool,
}

impl ZRecord {
    pub fn new(key_schema: impl Schema + 'static, value_schema: impl Schema + 'static) -> Self {
        Self {
            internals: Internals::new("record"),
            key_schema: Arc::new(key_schema),
            value_schema: Arc::new(value_schema),
            loose: false,
        }
    }

    /// Entries whose keys the key-schema rejects pass through unchanged.
    pub fn loose(mut self) -> Self {
        self.loose = true;
        self
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }
}

impl Schema for ZRecord {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("record", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let input = match payload.value.unbox() {
            Value::Record(map) => map.clone(),
            _ => {
                let raw = RawIssue::invalid_type(&payload.value, "record");
                payload.push(raw);
                attach_schema_error(&self.internals, payload, start);
                return;
            }
        };

        let mut out: BTreeMap<String, Value> = BTreeMap::new();

        for (key, value) in input {
            let mut key_trial = payload.trial(Value::String(key.clone()));
            self.key_schema.run(&mut key_trial, ctx);
            if !key_trial.ok() {
                if self.loose {
                    out.insert(key, value);
                } else {
                    let key_value = Value::String(key.clone());
                    let raw = RawIssue::invalid_key(key.clone(), &key_value, "record")
                        .at(PathSegment::Key(key));
                    payload.push(raw);
                }
                continue;
            }
            // The key schema may rewrite the key (e.g. a coercing schema);
            // fall back to the original on a non-string result.
            let out_key = key_trial
                .value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| key.clone());

            let mut child = payload.child(value, PathSegment::Key(key));
            self.value_schema.run(&mut child, ctx);
            let ok = child.ok();
            let validated = payload.adopt(child);
            if ok {
                out.insert(out_key, validated);
            }
        }

        payload.value = Value::Record(out);
        run_checks(&self.internals.checks, payload);
        attach_schema_error(&self.internals, payload, start);
    }
}
