use std::sync::Arc;

use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};
use crate::value::Value;

/// Issue collector handed to transform functions, so a transform can attach
/// problems beyond its own success/failure.
#[derive(Default)]
pub struct TransformCtx {
    issues: Vec<RawIssue>,
}

impl TransformCtx {
    pub fn new() -> Self {
        Self { issues: vec![] }
    }

    /// Attach a fully-built issue.
    pub fn add_issue(&mut self, issue: RawIssue) {
        self.issues.push(issue);
    }

    /// Attach a `custom` issue with the given message.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.issues.push(RawIssue::custom(message));
    }
}

pub type TransformFn =
    Arc<dyn Fn(Value, &mut TransformCtx) -> Result<Value, String> + Send + Sync>;

/// Maps the inner schema's output through a fallible function. A returned
/// error becomes a `custom` issue. Created via
/// [`SchemaExt::transform`](crate::SchemaExt::transform).
///
/// # Example
/// ```
/// use zodic::prelude::*;
///
/// let length = zodic::string().transform(|value, _ctx| {
///     let chars = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
///     Ok(Value::from(chars))
/// });
/// assert!(length.parse("hello").is_ok());
/// ```
#[derive(Clone)]
pub struct ZTransform {
    internals: Internals,
    inner: Arc<dyn Schema>,
    transform: TransformFn,
}

impl ZTransform {
    pub fn new<F>(inner: Arc<dyn Schema>, transform: F) -> Self
    where
        F: Fn(Value, &mut TransformCtx) -> Result<Value, String> + Send + Sync + 'static,
    {
        let mut internals = Internals::new("transform");
        internals.optional = inner.internals().optional;
        internals.nilable = inner.internals().nilable;
        Self {
            internals,
            inner,
            transform: Arc::new(transform),
        }
    }
}

impl Schema for ZTransform {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();
        self.inner.run(payload, ctx);
        if payload.issues.len() > start {
            return;
        }
        let value = std::mem::replace(&mut payload.value, Value::Null);
        let mut transform_ctx = TransformCtx::new();
        match (self.transform)(value, &mut transform_ctx) {
            Ok(output) => payload.value = output,
            Err(message) => {
                let raw = RawIssue::custom(message);
                payload.push(raw);
            }
        }
        for issue in transform_ctx.issues {
            payload.push(issue);
        }
    }
}
