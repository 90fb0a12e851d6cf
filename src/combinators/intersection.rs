use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Intersection: the input must satisfy both schemas and their outputs are
/// merged. Created via [`crate::intersection()`] or
/// [`SchemaExt::and`](crate::SchemaExt::and); chain `and` for wider
/// intersections.
///
/// Merge rules: equal values merge to themselves; records and maps merge
/// per key with recursion on shared keys; equal-length sequences merge
/// elementwise. Anything else is a leaf conflict and produces one `custom`
/// "Unmergable intersection" issue.
#[derive(Clone)]
pub struct ZIntersection {
    internals: Internals,
    left: Arc<dyn Schema>,
    right: Arc<dyn Schema>,
}

impl ZIntersection {
    pub fn new(left: Arc<dyn Schema>, right: Arc<dyn Schema>) -> Self {
        Self {
            internals: Internals::new("intersection"),
            left,
            right,
        }
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }
}

fn merge(left: &Value, right: &Value) -> Result<Value, ()> {
    if left.deep_eq(right) {
        return Ok(left.clone());
    }
    match (left.unbox(), right.unbox()) {
        (Value::Record(a), Value::Record(b)) => {
            let mut out: BTreeMap<String, Value> = a.clone();
            for (key, rv) in b {
                match a.get(key) {
                    Some(lv) => {
                        out.insert(key.clone(), merge(lv, rv)?);
                    }
                    None => {
                        out.insert(key.clone(), rv.clone());
                    }
                }
            }
            Ok(Value::Record(out))
        }
        (Value::Map(a), Value::Map(b)) => {
            let mut out: Vec<(Value, Value)> = a.clone();
            for (key, rv) in b {
                match out.iter_mut().find(|(existing, _)| existing.deep_eq(key)) {
                    Some((_, lv)) => {
                        *lv = merge(lv, rv)?;
                    }
                    None => out.push((key.clone(), rv.clone())),
                }
            }
            Ok(Value::Map(out))
        }
        (Value::Array(a), Value::Array(b)) if a.len() == b.len() => {
            let merged: Result<Vec<Value>, ()> =
                a.iter().zip(b).map(|(x, y)| merge(x, y)).collect();
            Ok(Value::Array(merged?))
        }
        _ => Err(()),
    }
}

impl Schema for ZIntersection {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        let mut left = payload.trial(payload.value.clone());
        self.left.run(&mut left, ctx);
        let mut right = payload.trial(payload.value.clone());
        self.right.run(&mut right, ctx);

        if !left.ok() || !right.ok() {
            payload.issues.extend(left.issues);
            payload.issues.extend(right.issues);
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        match merge(&left.value, &right.value) {
            Ok(merged) => payload.value = merged,
            Err(()) => {
                let raw = RawIssue::custom("Unmergable intersection")
                    .with_input(payload.value.clone());
                payload.push(raw);
            }
        }
        attach_schema_error(&self.internals, payload, start);
    }
}
