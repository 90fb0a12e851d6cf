use std::sync::Arc;

use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};
use crate::value::Value;

pub type CustomFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// Standalone schema built from a fallible closure. Created via
/// [`crate::custom()`].
///
/// # Example
/// ```
/// use zodic::prelude::*;
///
/// let even = zodic::custom(|value| match value.as_i64() {
///     Some(n) if n % 2 == 0 => Ok(value.clone()),
///     Some(_) => Err("Must be even".to_string()),
///     None => Err("Expected integer".to_string()),
/// });
/// assert!(even.parse(4).is_ok());
/// assert!(even.parse(5).is_err());
/// ```
#[derive(Clone)]
pub struct ZCustom {
    internals: Internals,
    check: CustomFn,
}

impl ZCustom {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            internals: Internals::new("custom"),
            check: Arc::new(check),
        }
    }
}

impl Schema for ZCustom {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        match (self.check)(&payload.value) {
            Ok(output) => payload.value = output,
            Err(message) => {
                let raw = RawIssue::custom(message).with_input(payload.value.clone());
                payload.push(raw);
            }
        }
    }
}

pub type PayloadCheckFn = Arc<dyn Fn(&mut Payload) + Send + Sync>;

/// Unrestricted check wrapper: after the inner schema succeeds, the closure
/// gets the payload itself and may rewrite the value or append any issues.
/// Created via [`SchemaExt::check`](crate::SchemaExt::check).
#[derive(Clone)]
pub struct ZCheckSchema {
    internals: Internals,
    inner: Arc<dyn Schema>,
    check: PayloadCheckFn,
}

impl ZCheckSchema {
    pub fn new<F>(inner: Arc<dyn Schema>, check: F) -> Self
    where
        F: Fn(&mut Payload) + Send + Sync + 'static,
    {
        let mut internals = Internals::new(inner.internals().kind);
        internals.optional = inner.internals().optional;
        internals.nilable = inner.internals().nilable;
        Self {
            internals,
            inner,
            check: Arc::new(check),
        }
    }
}

impl Schema for ZCheckSchema {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();
        self.inner.run(payload, ctx);
        if payload.issues.len() > start {
            return;
        }
        (self.check)(payload);
    }
}
