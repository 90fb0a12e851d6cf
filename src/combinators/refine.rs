use std::sync::Arc;

use crate::config::ErrorMap;
use crate::error::{IssueCode, PathSegment, RawIssue};
use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};
use crate::value::Value;

/// Parameters for a refinement: message or error map, abort-on-fail, and
/// extra path segments for the emitted issue.
#[derive(Clone, Default)]
pub struct RefineParams {
    pub message: Option<String>,
    pub error: Option<ErrorMap>,
    pub abort: bool,
    pub path: Vec<PathSegment>,
}

impl RefineParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Mark the emitted issue fatal, halting later checks in the run.
    pub fn abort(mut self) -> Self {
        self.abort = true;
        self
    }

    /// Report the issue at a sub-path of the refined value.
    pub fn at(mut self, segment: PathSegment) -> Self {
        self.path.push(segment);
        self
    }
}

pub type RefineFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Predicate check over the inner schema's output: a `false` return appends
/// one `custom` issue. Null values pass through untested — the surrounding
/// nil policy decides their fate. Created via
/// [`SchemaExt::refine`](crate::SchemaExt::refine).
#[derive(Clone)]
pub struct ZRefine {
    internals: Internals,
    inner: Arc<dyn Schema>,
    predicate: RefineFn,
    params: RefineParams,
}

impl ZRefine {
    pub fn new<F>(inner: Arc<dyn Schema>, predicate: F, params: RefineParams) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let mut internals = Internals::new(inner.internals().kind);
        internals.optional = inner.internals().optional;
        internals.nilable = inner.internals().nilable;
        Self {
            internals,
            inner,
            predicate: Arc::new(predicate),
            params,
        }
    }
}

impl Schema for ZRefine {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();
        self.inner.run(payload, ctx);
        if payload.issues.len() > start {
            return;
        }
        if payload.value.is_null() {
            return;
        }
        if (self.predicate)(&payload.value) {
            return;
        }
        let mut raw = RawIssue::new(IssueCode::Custom).with_input(payload.value.clone());
        if let Some(message) = &self.params.message {
            raw = raw.with_message(message.clone());
        }
        if let Some(error) = &self.params.error {
            raw = raw.with_error(error.clone());
        }
        if self.params.abort {
            raw = raw.fatal();
        }
        for segment in &self.params.path {
            raw = raw.at(segment.clone());
        }
        payload.push(raw);
    }
}
