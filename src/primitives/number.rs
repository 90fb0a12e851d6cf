use crate::checks::ZCheck;
use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{parse_primitive, Internals, Schema, TypeParser};
use crate::value::Value;

/// Integer schema covering the whole signed/unsigned width family. Created
/// via [`crate::int()`], [`crate::int8()`], … [`crate::uint64()`].
///
/// Admits the matching scalar (either storage tag, range permitting) or a
/// box to it; the output keeps the input's tag and identity.
#[derive(Clone)]
pub struct ZInt {
    internals: Internals,
    min: i128,
    max: i128,
}

impl ZInt {
    pub(crate) fn with_width(kind: &'static str, min: i128, max: i128) -> Self {
        Self {
            internals: Internals::new(kind),
            min,
            max,
        }
    }

    /// Coerce numeric strings, integral floats, and booleans.
    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    fn bound_check(mut self, bound: i64, inclusive: bool, lower: bool, msg: Option<String>) -> Self {
        let mut check = ZCheck::new(move |payload: &mut Payload| {
            let n = match payload.value.as_i128() {
                Some(n) => n,
                None => return,
            };
            let bound_wide = i128::from(bound);
            let fail = if lower {
                if inclusive { n < bound_wide } else { n <= bound_wide }
            } else if inclusive {
                n > bound_wide
            } else {
                n >= bound_wide
            };
            if fail {
                let raw = if lower {
                    RawIssue::too_small(&payload.value, "number", bound, inclusive)
                } else {
                    RawIssue::too_big(&payload.value, "number", bound, inclusive)
                };
                payload.push(raw);
            }
        });
        if let Some(msg) = msg {
            check = check.with_error(msg);
        }
        self.internals.push_check(check);
        self
    }

    /// Minimum value (inclusive). Alias: `gte`.
    pub fn min(self, bound: i64) -> Self {
        self.bound_check(bound, true, true, None)
    }

    pub fn min_msg(self, bound: i64, msg: impl Into<String>) -> Self {
        self.bound_check(bound, true, true, Some(msg.into()))
    }

    pub fn gte(self, bound: i64) -> Self {
        self.min(bound)
    }

    /// Maximum value (inclusive). Alias: `lte`.
    pub fn max(self, bound: i64) -> Self {
        self.bound_check(bound, true, false, None)
    }

    pub fn max_msg(self, bound: i64, msg: impl Into<String>) -> Self {
        self.bound_check(bound, true, false, Some(msg.into()))
    }

    pub fn lte(self, bound: i64) -> Self {
        self.max(bound)
    }

    /// Strictly greater than.
    pub fn gt(self, bound: i64) -> Self {
        self.bound_check(bound, false, true, None)
    }

    /// Strictly less than.
    pub fn lt(self, bound: i64) -> Self {
        self.bound_check(bound, false, false, None)
    }

    /// Must be > 0.
    pub fn positive(self) -> Self {
        self.gt(0)
    }

    /// Must be < 0.
    pub fn negative(self) -> Self {
        self.lt(0)
    }

    /// Must be >= 0.
    pub fn non_negative(self) -> Self {
        self.min(0)
    }

    /// Must be <= 0.
    pub fn non_positive(self) -> Self {
        self.max(0)
    }

    /// Must be divisible by `divisor`.
    pub fn multiple_of(mut self, divisor: i64) -> Self {
        let check = ZCheck::new(move |payload: &mut Payload| {
            let fail = payload
                .value
                .as_i128()
                .is_some_and(|n| divisor != 0 && n % i128::from(divisor) != 0);
            if fail {
                let raw = RawIssue::not_multiple_of(&payload.value, divisor);
                payload.push(raw);
            }
        });
        self.internals.push_check(check);
        self
    }

    fn fits(&self, value: &Value) -> bool {
        match value {
            Value::Int(_) | Value::Uint(_) => value
                .as_i128()
                .is_some_and(|n| n >= self.min && n <= self.max),
            _ => false,
        }
    }
}

fn coerce_int(value: &Value) -> Option<Value> {
    match value {
        Value::Float(f) if f.fract() == 0.0 && f.is_finite() => {
            if *f >= 0.0 && *f <= u64::MAX as f64 {
                Some(Value::Uint(*f as u64))
            } else if *f < 0.0 && *f >= i64::MIN as f64 {
                Some(Value::Int(*f as i64))
            } else {
                None
            }
        }
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Some(Value::Int(i))
            } else {
                s.parse::<u64>().ok().map(Value::Uint)
            }
        }
        Value::Bool(b) => Some(Value::Int(i64::from(*b))),
        _ => None,
    }
}

impl Schema for ZInt {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let matches = |v: &Value| self.fits(v);
        let coerce = coerce_int;
        parse_primitive(
            &self.internals,
            payload,
            TypeParser {
                expected: self.internals.kind,
                matches: &matches,
                coerce: Some(&coerce),
                prepare: None,
            },
        );
    }
}

/// Float schema (`float32` / `float64`). Created via [`crate::number()`],
/// [`crate::float32()`], [`crate::float64()`].
///
/// Admits any numeric tag; `float32` additionally requires the magnitude to
/// fit `f32`. Non-finite policy is opt-in through [`ZFloat::finite`].
#[derive(Clone)]
pub struct ZFloat {
    internals: Internals,
    single_precision: bool,
}

impl ZFloat {
    pub(crate) fn with_width(kind: &'static str, single_precision: bool) -> Self {
        Self {
            internals: Internals::new(kind),
            single_precision,
        }
    }

    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    fn bound_check(mut self, bound: f64, inclusive: bool, lower: bool, msg: Option<String>) -> Self {
        let mut check = ZCheck::new(move |payload: &mut Payload| {
            let n = match payload.value.as_f64() {
                Some(n) => n,
                None => return,
            };
            let fail = if lower {
                if inclusive { n < bound } else { n <= bound }
            } else if inclusive {
                n > bound
            } else {
                n >= bound
            };
            if fail {
                let raw = if lower {
                    RawIssue::too_small(&payload.value, "number", bound, inclusive)
                } else {
                    RawIssue::too_big(&payload.value, "number", bound, inclusive)
                };
                payload.push(raw);
            }
        });
        if let Some(msg) = msg {
            check = check.with_error(msg);
        }
        self.internals.push_check(check);
        self
    }

    /// Minimum value (inclusive). Alias: `gte`.
    pub fn min(self, bound: f64) -> Self {
        self.bound_check(bound, true, true, None)
    }

    pub fn min_msg(self, bound: f64, msg: impl Into<String>) -> Self {
        self.bound_check(bound, true, true, Some(msg.into()))
    }

    pub fn gte(self, bound: f64) -> Self {
        self.min(bound)
    }

    /// Maximum value (inclusive). Alias: `lte`.
    pub fn max(self, bound: f64) -> Self {
        self.bound_check(bound, true, false, None)
    }

    pub fn max_msg(self, bound: f64, msg: impl Into<String>) -> Self {
        self.bound_check(bound, true, false, Some(msg.into()))
    }

    pub fn lte(self, bound: f64) -> Self {
        self.max(bound)
    }

    pub fn gt(self, bound: f64) -> Self {
        self.bound_check(bound, false, true, None)
    }

    pub fn lt(self, bound: f64) -> Self {
        self.bound_check(bound, false, false, None)
    }

    pub fn positive(self) -> Self {
        self.gt(0.0)
    }

    pub fn negative(self) -> Self {
        self.lt(0.0)
    }

    pub fn non_negative(self) -> Self {
        self.min(0.0)
    }

    pub fn non_positive(self) -> Self {
        self.max(0.0)
    }

    /// Reject NaN and infinities.
    pub fn finite(mut self) -> Self {
        let check = ZCheck::new(|payload: &mut Payload| {
            let fail = payload.value.as_f64().is_some_and(|n| !n.is_finite());
            if fail {
                let raw = RawIssue::invalid_format(&payload.value, "finite");
                payload.push(raw);
            }
        });
        self.internals.push_check(check);
        self
    }

    /// Must be divisible by `divisor` within float tolerance.
    pub fn multiple_of(mut self, divisor: f64) -> Self {
        let check = ZCheck::new(move |payload: &mut Payload| {
            let fail = payload
                .value
                .as_f64()
                .is_some_and(|n| divisor != 0.0 && (n % divisor).abs() > f64::EPSILON);
            if fail {
                let raw = RawIssue::not_multiple_of(&payload.value, divisor);
                payload.push(raw);
            }
        });
        self.internals.push_check(check);
        self
    }

    fn fits(&self, value: &Value) -> bool {
        match value {
            Value::Int(_) | Value::Uint(_) => true,
            Value::Float(f) => {
                !self.single_precision || !f.is_finite() || f.abs() <= f64::from(f32::MAX)
            }
            _ => false,
        }
    }
}

fn coerce_float(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => s.parse::<f64>().ok().map(Value::Float),
        Value::Bool(b) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),
        _ => None,
    }
}

impl Schema for ZFloat {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let matches = |v: &Value| self.fits(v);
        let coerce = coerce_float;
        parse_primitive(
            &self.internals,
            payload,
            TypeParser {
                expected: self.internals.kind,
                matches: &matches,
                coerce: Some(&coerce),
                prepare: None,
            },
        );
    }
}
