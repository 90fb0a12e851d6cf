use num_bigint::BigInt;

use crate::checks::ZCheck;
use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{parse_primitive, Internals, Schema, TypeParser};
use crate::value::Value;

/// Arbitrary-precision integer schema. Created via [`crate::bigint()`].
///
/// Admits only [`Value::BigInt`] (boxed or direct); machine integers and
/// numeric strings are accepted with coercion enabled.
#[derive(Clone)]
pub struct ZBigInt {
    internals: Internals,
}

impl ZBigInt {
    pub fn new() -> Self {
        Self {
            internals: Internals::new("bigint"),
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

    fn bound_check(mut self, bound: BigInt, inclusive: bool, lower: bool) -> Self {
        let check = ZCheck::new(move |payload: &mut Payload| {
            let fail = match payload.value.unbox() {
                Value::BigInt(n) => {
                    if lower {
                        if inclusive { n < &bound } else { n <= &bound }
                    } else if inclusive {
                        n > &bound
                    } else {
                        n >= &bound
                    }
                }
                _ => false,
            };
            if fail {
                let raw = if lower {
                    RawIssue::too_small(&payload.value, "bigint", bound.clone(), inclusive)
                } else {
                    RawIssue::too_big(&payload.value, "bigint", bound.clone(), inclusive)
                };
                payload.push(raw);
            }
        });
        self.internals.push_check(check);
        self
    }

    /// Minimum value (inclusive).
    pub fn min(self, bound: impl Into<BigInt>) -> Self {
        self.bound_check(bound.into(), true, true)
    }

    /// Maximum value (inclusive).
    pub fn max(self, bound: impl Into<BigInt>) -> Self {
        self.bound_check(bound.into(), true, false)
    }

    pub fn gt(self, bound: impl Into<BigInt>) -> Self {
        self.bound_check(bound.into(), false, true)
    }

    pub fn lt(self, bound: impl Into<BigInt>) -> Self {
        self.bound_check(bound.into(), false, false)
    }

    pub fn positive(self) -> Self {
        self.gt(0)
    }

    pub fn negative(self) -> Self {
        self.lt(0)
    }

    pub fn non_negative(self) -> Self {
        self.min(0)
    }

    /// Must be divisible by `divisor`.
    pub fn multiple_of(mut self, divisor: impl Into<BigInt>) -> Self {
        let divisor = divisor.into();
        let check = ZCheck::new(move |payload: &mut Payload| {
            let fail = match payload.value.unbox() {
                Value::BigInt(n) => {
                    divisor != BigInt::from(0) && n % &divisor != BigInt::from(0)
                }
                _ => false,
            };
            if fail {
                let raw =
                    RawIssue::not_multiple_of(&payload.value, Value::BigInt(divisor.clone()));
                payload.push(raw);
            }
        });
        self.internals.push_check(check);
        self
    }
}

impl Default for ZBigInt {
    fn default() -> Self {
        Self::new()
    }
}

fn coerce_bigint(value: &Value) -> Option<Value> {
    match value {
        Value::Int(i) => Some(Value::BigInt(BigInt::from(*i))),
        Value::Uint(u) => Some(Value::BigInt(BigInt::from(*u))),
        Value::String(s) => s.parse::<BigInt>().ok().map(Value::BigInt),
        _ => None,
    }
}

impl Schema for ZBigInt {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let matches = |v: &Value| matches!(v, Value::BigInt(_));
        let coerce = coerce_bigint;
        parse_primitive(
            &self.internals,
            payload,
            TypeParser {
                expected: "bigint",
                matches: &matches,
                coerce: Some(&coerce),
                prepare: None,
            },
        );
    }
}
