use std::sync::Arc;

use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};

/// Union over any number of options, tried in declaration order with
/// first-success tie-break. Created via [`crate::union()`] or
/// [`SchemaExt::or`](crate::SchemaExt::or).
///
/// When every option fails, one `invalid_union` issue is emitted whose
/// `errors` property holds each option's issue list in declaration order.
#[derive(Clone)]
pub struct ZUnion {
    internals: Internals,
    options: Vec<Arc<dyn Schema>>,
}

impl ZUnion {
    pub fn new(options: Vec<Arc<dyn Schema>>) -> Self {
        Self {
            internals: Internals::new("union"),
            options,
        }
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }
}

impl Schema for ZUnion {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();
        let mut failures: Vec<Vec<RawIssue>> = Vec::with_capacity(self.options.len());

        for option in &self.options {
            let mut trial = payload.trial(payload.value.clone());
            option.run(&mut trial, ctx);
            if trial.ok() {
                payload.value = trial.value;
                return;
            }
            failures.push(trial.issues);
        }

        let raw = RawIssue::invalid_union(failures);
        payload.push(raw);
        attach_schema_error(&self.internals, payload, start);
    }
}
