use std::sync::Arc;

use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};

/// Chains two schemas: the first's output becomes the second's input.
/// Either side failing fails the pipe with that side's issues unchanged.
/// Created via [`SchemaExt::pipe`](crate::SchemaExt::pipe).
///
/// # Example
/// ```
/// use zodic::prelude::*;
///
/// let schema = zodic::string().coerce().pipe(zodic::string().min(2));
/// assert!(schema.parse(42).is_ok());
/// ```
#[derive(Clone)]
pub struct ZPipe {
    internals: Internals,
    first: Arc<dyn Schema>,
    second: Arc<dyn Schema>,
}

impl ZPipe {
    pub fn new(first: Arc<dyn Schema>, second: Arc<dyn Schema>) -> Self {
        Self {
            internals: Internals::new("pipe"),
            first,
            second,
        }
    }
}

impl Schema for ZPipe {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();
        self.first.run(payload, ctx);
        if payload.issues.len() > start {
            return;
        }
        self.second.run(payload, ctx);
    }
}
