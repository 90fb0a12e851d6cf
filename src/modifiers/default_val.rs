use std::sync::Arc;

use super::FallbackSource;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};
use crate::value::Value;

/// Replaces null (or absent) input with a default, then parses the default
/// through the inner schema — defaults are not trusted. Non-null input
/// delegates unchanged. Created via
/// [`SchemaExt::default_value`](crate::SchemaExt::default_value) /
/// [`SchemaExt::default_fn`](crate::SchemaExt::default_fn).
///
/// Contrast with [`ZPrefault`](super::ZPrefault): `default` fires only on
/// null; `prefault` fires on any inner failure.
#[derive(Clone)]
pub struct ZDefault {
    internals: Internals,
    inner: Arc<dyn Schema>,
    source: FallbackSource,
}

impl ZDefault {
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
        // A defaulted field tolerates absence, like an optional one.
        internals.optional = true;
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

impl Schema for ZDefault {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        if payload.value.is_null() {
            payload.value = self.source.produce();
        }
        self.inner.run(payload, ctx);
    }
}
