use std::sync::Arc;

use crate::checks::run_checks;
use crate::error::{PathSegment, RawIssue};
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Fixed-arity tuple schema with an optional variadic rest. Created via
/// [`crate::tuple()`].
///
/// Size mismatches produce `too_small` / `too_big` with `origin = "tuple"`.
#[derive(Clone)]
pub struct ZTuple {
    internals: Internals,
    items: Vec<Arc<dyn Schema>>,
    rest: Option<Arc<dyn Schema>>,
}

impl ZTuple {
    pub fn new(items: Vec<Arc<dyn Schema>>) -> Self {
        Self {
            internals: Internals::new("tuple"),
            items,
            rest: None,
        }
    }

    /// Validate elements past the fixed arity against `schema`.
    pub fn rest(mut self, schema: impl Schema + 'static) -> Self {
        self.rest = Some(Arc::new(schema));
        self
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }
}

impl Schema for ZTuple {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("tuple", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let items = match payload.value.unbox() {
            Value::Array(items) => items.clone(),
            _ => {
                let raw = RawIssue::invalid_type(&payload.value, "tuple");
                payload.push(raw);
                attach_schema_error(&self.internals, payload, start);
                return;
            }
        };

        if items.len() < self.items.len() {
            let raw = RawIssue::too_small(&payload.value, "tuple", self.items.len(), true);
            payload.push(raw);
            attach_schema_error(&self.internals, payload, start);
            return;
        }
        if items.len() > self.items.len() && self.rest.is_none() {
            let raw = RawIssue::too_big(&payload.value, "tuple", self.items.len(), true);
            payload.push(raw);
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let schema = match self.items.get(index).or(self.rest.as_ref()) {
                Some(schema) => schema,
                None => continue,
            };
            let mut child = payload.child(item, PathSegment::Index(index));
            schema.run(&mut child, ctx);
            out.push(payload.adopt(child));
        }

        payload.value = Value::Array(out);
        run_checks(&self.internals.checks, payload);
        attach_schema_error(&self.internals, payload, start);
    }
}
