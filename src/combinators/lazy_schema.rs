use std::sync::{Arc, OnceLock};

use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{Internals, Schema};

/// Recursion budget for self-referential schemas. Exceeding it appends a
/// fatal `custom` issue instead of overflowing the stack.
pub const MAX_RECURSION_DEPTH: usize = 128;

/// Deferred schema for recursive shapes. Created via [`crate::lazy()`].
///
/// The factory resolves on first use and is cached; constructing the lazy
/// node itself never invokes it, which is what breaks definition cycles.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use zodic::prelude::*;
///
/// fn tree() -> Arc<dyn Schema> {
///     zodic::object()
///         .field("value", zodic::int())
///         .field("children", zodic::array(zodic::lazy(tree)).optional())
///         .into_schema()
/// }
///
/// let schema = tree();
/// let input = serde_json::json!({"value": 1, "children": [{"value": 2}]});
/// assert!(schema.parse_value(Value::from(input)).is_ok());
/// ```
#[derive(Clone)]
pub struct ZLazy {
    internals: Internals,
    factory: Arc<dyn Fn() -> Arc<dyn Schema> + Send + Sync>,
    cache: Arc<OnceLock<Arc<dyn Schema>>>,
}

impl ZLazy {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Schema> + Send + Sync + 'static,
    {
        Self {
            internals: Internals::new("lazy"),
            factory: Arc::new(factory),
            cache: Arc::new(OnceLock::new()),
        }
    }

    fn resolve(&self) -> &Arc<dyn Schema> {
        self.cache.get_or_init(|| (self.factory)())
    }
}

impl Schema for ZLazy {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        if payload.depth >= MAX_RECURSION_DEPTH {
            let raw = RawIssue::custom("Recursion limit exceeded").fatal();
            payload.push(raw);
            return;
        }
        payload.depth += 1;
        self.resolve().run(payload, ctx);
        payload.depth -= 1;
    }
}
