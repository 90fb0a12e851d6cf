use crate::checks::run_checks;
use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Exact-value schema over one or more admissible literals. Created via
/// [`crate::literal()`] / [`crate::literal_of()`].
///
/// Membership uses deep equality, so composite literals work too. The
/// admissible set is recorded in the schema internals, which is what lets a
/// discriminated union index its branches. With coercion enabled the input
/// is converted toward each literal's type in declaration order and the
/// first converted match wins.
#[derive(Clone)]
pub struct ZLiteral {
    internals: Internals,
}

impl ZLiteral {
    pub fn new(value: impl Into<Value>) -> Self {
        Self::of(vec![value.into()])
    }

    pub fn of(values: Vec<Value>) -> Self {
        let mut internals = Internals::new("literal");
        internals.values = Some(values);
        Self { internals }
    }

    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    fn values(&self) -> &[Value] {
        self.internals.values.as_deref().unwrap_or(&[])
    }
}

/// Convert `input` toward the type of `target`, for coercing literal
/// comparisons. Declines rather than guessing.
fn coerce_toward(input: &Value, target: &Value) -> Option<Value> {
    match target {
        Value::String(_) => match input {
            Value::Int(i) => Some(Value::String(i.to_string())),
            Value::Uint(u) => Some(Value::String(u.to_string())),
            Value::Float(f) => Some(Value::String(f.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        Value::Int(_) | Value::Uint(_) => match input {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::Int)
                .ok()
                .or_else(|| s.parse::<u64>().ok().map(Value::Uint)),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(Value::Int(*f as i64)),
            Value::Bool(b) => Some(Value::Int(i64::from(*b))),
            _ => None,
        },
        Value::Float(_) => match input {
            Value::String(s) => s.parse::<f64>().ok().map(Value::Float),
            Value::Int(i) => Some(Value::Float(*i as f64)),
            Value::Uint(u) => Some(Value::Float(*u as f64)),
            _ => None,
        },
        Value::Bool(_) => match input {
            Value::String(s) if s == "true" => Some(Value::Bool(true)),
            Value::String(s) if s == "false" => Some(Value::Bool(false)),
            Value::Int(0) | Value::Uint(0) => Some(Value::Bool(false)),
            Value::Int(1) | Value::Uint(1) => Some(Value::Bool(true)),
            _ => None,
        },
        _ => None,
    }
}

impl Schema for ZLiteral {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let start = payload.issues.len();
        let values = self.values();

        let null_admissible = values.iter().any(Value::is_null);
        if payload.value.is_null() && !null_admissible {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("literal", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }

        let mut matched = values.iter().any(|v| payload.value.deep_eq(v));

        if !matched && self.internals.coerce {
            for literal in values {
                if let Some(coerced) = coerce_toward(payload.value.unbox(), literal) {
                    if coerced.deep_eq(literal) {
                        payload.value = coerced;
                        matched = true;
                        break;
                    }
                }
            }
        }

        if matched {
            run_checks(&self.internals.checks, payload);
        } else {
            let raw = RawIssue::invalid_value(&payload.value, values.to_vec());
            payload.push(raw);
        }
        attach_schema_error(&self.internals, payload, start);
    }
}
