use std::sync::Arc;

use crate::checks::{run_checks, ZCheck};
use crate::error::{PathSegment, RawIssue};
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Set schema: the element schema applied to every member; the output
/// deduplicates by deep equality. Created via [`crate::set()`].
///
/// A rejected member reports one `invalid_element` with `origin = "set"`
/// at its position.
#[derive(Clone)]
pub struct ZSet {
    internals: Internals,
    element: Arc<dyn Schema>,
}

impl ZSet {
    pub fn new(element: impl Schema + 'static) -> Self {
        Self {
            internals: Internals::new("set"),
            element: Arc::new(element),
        }
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    fn size_check(mut self, bound: usize, lower: bool) -> Self {
        let check = ZCheck::new(move |payload: &mut Payload| {
            let len = match payload.value.unbox() {
                Value::Set(items) => items.len(),
                _ => return,
            };
            let fail = if lower { len < bound } else { len > bound };
            if fail {
                let raw = if lower {
                    RawIssue::too_small(&payload.value, "set", bound, true)
                } else {
                    RawIssue::too_big(&payload.value, "set", bound, true)
                };
                payload.push(raw);
            }
        });
        self.internals.push_check(check);
        self
    }

    /// Minimum number of unique members.
    pub fn min(self, bound: usize) -> Self {
        self.size_check(bound, true)
    }

    /// Maximum number of unique members.
    pub fn max(self, bound: usize) -> Self {
        self.size_check(bound, false)
    }

    /// At least one member.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }
}

impl Schema for ZSet {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("set", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let members = match payload.value.unbox() {
            Value::Set(items) => items.clone(),
            _ => {
                let raw = RawIssue::invalid_type(&payload.value, "set");
                payload.push(raw);
                attach_schema_error(&self.internals, payload, start);
                return;
            }
        };

        let mut out: Vec<Value> = Vec::with_capacity(members.len());

        for (index, member) in members.into_iter().enumerate() {
            let mut trial = payload.trial(member.clone());
            self.element.run(&mut trial, ctx);
            if trial.ok() {
                let validated = trial.value;
                if !out.iter().any(|existing| existing.deep_eq(&validated)) {
                    out.push(validated);
                }
            } else {
                let raw =
                    RawIssue::invalid_element(&member, "set").at(PathSegment::Index(index));
                payload.push(raw);
            }
        }

        payload.value = Value::Set(out);
        run_checks(&self.internals.checks, payload);
        attach_schema_error(&self.internals, payload, start);
    }
}
