use std::sync::Arc;

use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};

/// Null input becomes a successful null result. The kernel-level behavior
/// matches [`ZOptional`](super::ZOptional); the distinction is semantic —
/// "the value may legitimately be null" versus "the field may be absent" —
/// and object validation only honors the latter for missing fields.
/// Created via [`SchemaExt::nilable`](crate::SchemaExt::nilable).
#[derive(Clone)]
pub struct ZNilable {
    internals: Internals,
    inner: Arc<dyn Schema>,
}

impl ZNilable {
    pub fn new(inner: Arc<dyn Schema>) -> Self {
        let mut internals = Internals::new(inner.internals().kind);
        internals.nilable = true;
        internals.optional = inner.internals().optional;
        internals.values = inner.internals().values.clone();
        Self { internals, inner }
    }

    pub fn inner(&self) -> &Arc<dyn Schema> {
        &self.inner
    }
}

impl Schema for ZNilable {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        if payload.value.is_null() {
            return;
        }
        self.inner.run(payload, ctx);
    }
}
