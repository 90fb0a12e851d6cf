use std::sync::Arc;

use crate::value::Value;

mod default_val;
mod nilable;
mod nullish;
mod optional;
mod prefault;

pub use default_val::ZDefault;
pub use nilable::ZNilable;
pub use nullish::ZNullish;
pub use optional::ZOptional;
pub use prefault::ZPrefault;

/// A fallback value: fixed, or computed per use.
#[derive(Clone)]
pub(crate) enum FallbackSource {
    Value(Value),
    Func(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl FallbackSource {
    pub(crate) fn produce(&self) -> Value {
        match self {
            FallbackSource::Value(value) => value.clone(),
            FallbackSource::Func(f) => f(),
        }
    }
}
