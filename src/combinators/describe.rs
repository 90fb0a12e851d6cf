use std::sync::Arc;

use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};

/// Attaches a human-readable description; validation is untouched. Created
/// via [`SchemaExt::describe`](crate::SchemaExt::describe).
#[derive(Clone)]
pub struct ZDescribe {
    internals: Internals,
    inner: Arc<dyn Schema>,
}

impl ZDescribe {
    pub fn new(inner: Arc<dyn Schema>, text: impl Into<String>) -> Self {
        let mut internals = Internals::new(inner.internals().kind);
        internals.optional = inner.internals().optional;
        internals.nilable = inner.internals().nilable;
        internals.values = inner.internals().values.clone();
        internals.description = Some(text.into());
        Self { internals, inner }
    }

    pub fn description(&self) -> Option<&str> {
        self.internals.description.as_deref()
    }
}

impl Schema for ZDescribe {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        self.inner.run(payload, ctx);
    }
}
