use crate::payload::{ParseCtx, Payload};
use crate::schema::{parse_primitive, Internals, Schema, TypeParser};
use crate::value::Value;

/// Boolean schema. Created via [`crate::boolean()`].
#[derive(Clone)]
pub struct ZBool {
    internals: Internals,
}

impl ZBool {
    pub fn new() -> Self {
        Self {
            internals: Internals::new("boolean"),
        }
    }

    /// Coerce `"true"`/`"false"` strings and 0/1 integers.
    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }
}

impl Default for ZBool {
    fn default() -> Self {
        Self::new()
    }
}

fn coerce_bool(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) if s == "true" => Some(Value::Bool(true)),
        Value::String(s) if s == "false" => Some(Value::Bool(false)),
        Value::Int(0) | Value::Uint(0) => Some(Value::Bool(false)),
        Value::Int(1) | Value::Uint(1) => Some(Value::Bool(true)),
        _ => None,
    }
}

impl Schema for ZBool {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let matches = |v: &Value| matches!(v, Value::Bool(_));
        let coerce = coerce_bool;
        parse_primitive(
            &self.internals,
            payload,
            TypeParser {
                expected: "boolean",
                matches: &matches,
                coerce: Some(&coerce),
                prepare: None,
            },
        );
    }
}
