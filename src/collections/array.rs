use std::sync::Arc;

use crate::checks::{run_checks, ZCheck};
use crate::error::{PathSegment, RawIssue};
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Array schema: every element validated against one schema, issues
/// `[index]`-prefixed. Created via [`crate::array()`].
///
/// Size bounds are ordinary attached checks and run against the output
/// array after element validation.
#[derive(Clone)]
pub struct ZArray {
    internals: Internals,
    element: Arc<dyn Schema>,
}

impl ZArray {
    pub fn new(element: impl Schema + 'static) -> Self {
        Self {
            internals: Internals::new("array"),
            element: Arc::new(element),
        }
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    fn size_check(mut self, bound: usize, lower: bool, msg: Option<String>) -> Self {
        let mut check = ZCheck::new(move |payload: &mut Payload| {
            let len = match payload.value.as_array() {
                Some(items) => items.len(),
                None => return,
            };
            let fail = if lower { len < bound } else { len > bound };
            if fail {
                let raw = if lower {
                    RawIssue::too_small(&payload.value, "array", bound, true)
                } else {
                    RawIssue::too_big(&payload.value, "array", bound, true)
                };
                payload.push(raw);
            }
        });
        if let Some(msg) = msg {
            check = check.with_error(msg);
        }
        self.internals.push_check(check);
        self
    }

    /// Minimum number of elements.
    pub fn min(self, bound: usize) -> Self {
        self.size_check(bound, true, None)
    }

    pub fn min_msg(self, bound: usize, msg: impl Into<String>) -> Self {
        self.size_check(bound, true, Some(msg.into()))
    }

    /// Maximum number of elements.
    pub fn max(self, bound: usize) -> Self {
        self.size_check(bound, false, None)
    }

    pub fn max_msg(self, bound: usize, msg: impl Into<String>) -> Self {
        self.size_check(bound, false, Some(msg.into()))
    }

    /// Exact number of elements.
    pub fn length(self, len: usize) -> Self {
        self.size_check(len, true, None).size_check(len, false, None)
    }

    /// At least one element.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }
}

impl Schema for ZArray {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("array", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let items = match payload.value.unbox() {
            Value::Array(items) => items.clone(),
            _ => {
                let raw = RawIssue::invalid_type(&payload.value, "array");
                payload.push(raw);
                attach_schema_error(&self.internals, payload, start);
                return;
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let mut child = payload.child(item, PathSegment::Index(index));
            self.element.run(&mut child, ctx);
            out.push(payload.adopt(child));
        }

        payload.value = Value::Array(out);
        run_checks(&self.internals.checks, payload);
        attach_schema_error(&self.internals, payload, start);
    }
}
