use std::sync::Arc;

use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};

/// Null (or absent) input becomes a successful null result; everything else
/// delegates to the inner schema. Reports itself optional, which is how
/// object validation detects that a missing field is tolerable. Created via
/// [`SchemaExt::optional`](crate::SchemaExt::optional).
#[derive(Clone)]
pub struct ZOptional {
    internals: Internals,
    inner: Arc<dyn Schema>,
}

impl ZOptional {
    pub fn new(inner: Arc<dyn Schema>) -> Self {
        let mut internals = Internals::new(inner.internals().kind);
        internals.optional = true;
        internals.nilable = inner.internals().nilable;
        internals.values = inner.internals().values.clone();
        Self { internals, inner }
    }

    pub fn inner(&self) -> &Arc<dyn Schema> {
        &self.inner
    }
}

impl Schema for ZOptional {
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
