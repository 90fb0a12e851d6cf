use std::sync::Arc;

use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};

/// Optional and nilable combined: both absent and null succeed with null.
/// Created via [`SchemaExt::nullish`](crate::SchemaExt::nullish).
#[derive(Clone)]
pub struct ZNullish {
    internals: Internals,
    inner: Arc<dyn Schema>,
}

impl ZNullish {
    pub fn new(inner: Arc<dyn Schema>) -> Self {
        let mut internals = Internals::new(inner.internals().kind);
        internals.optional = true;
        internals.nilable = true;
        internals.values = inner.internals().values.clone();
        Self { internals, inner }
    }

    pub fn inner(&self) -> &Arc<dyn Schema> {
        &self.inner
    }
}

impl Schema for ZNullish {
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
