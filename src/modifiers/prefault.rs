use std::sync::Arc;

use super::FallbackSource;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};
use crate::value::Value;

/// Fallback-on-failure: the input is first parsed through the inner schema,
/// and only if that fails is the prefault value parsed through the inner
/// instead. Null input delegates without a fallback — only
/// [`ZDefault`](super::ZDefault) handles null. Created via
/// [`SchemaExt::prefault`](crate::SchemaExt::prefault) /
/// [`SchemaExt::prefault_fn`](crate::SchemaExt::prefault_fn).
///
/// The fallback itself is validated; a prefault value the inner schema
/// rejects surfaces the fallback attempt's issues.
#[derive(Clone)]
pub struct ZPrefault {
    internals: Internals,
    inner: Arc<dyn Schema>,
    source: FallbackSource,
}

impl ZPrefault {
    pub fn new(inner: Arc<dyn Schema>, value: Value) -> Self {
        Self::with_source(inner, FallbackSource::Value(value))
    }

    pub fn new_fn<F>(inner: Arc<dyn Schema>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::with_source(inner, FallbackSource::Func(Arc::new(f)))
    }

    fn with_source(inner: Arc<dyn Schema>, source: FallbackSource) -> Self {
        let mut internals = Internals::new(inner.internals().kind);
        internals.optional = inner.internals().optional;
        internals.nilable = inner.internals().nilable;
        Self {
            internals,
            inner,
            source,
        }
    }

    pub fn inner(&self) -> &Arc<dyn Schema> {
        &self.inner
    }
}

impl Schema for ZPrefault {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        if payload.value.is_null() {
            self.inner.run(payload, ctx);
            return;
        }
        let mut trial = payload.trial(payload.value.clone());
        self.inner.run(&mut trial, ctx);
        if trial.ok() {
            payload.value = trial.value;
            return;
        }
        payload.value = self.source.produce();
        self.inner.run(payload, ctx);
    }
}
