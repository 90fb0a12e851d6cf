use crate::checks::run_checks;
use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// String-enum schema. Created via [`crate::enumeration()`].
///
/// # Example
/// ```
/// use zodic::prelude::*;
///
/// let role = zodic::enumeration(&["admin", "user", "moderator"]);
/// assert!(role.parse("admin").is_ok());
/// assert!(role.parse("hacker").is_err());
/// ```
#[derive(Clone)]
pub struct ZEnum {
    internals: Internals,
}

impl ZEnum {
    pub fn new(variants: &[&str]) -> Self {
        Self::from_strings(variants.iter().map(|s| s.to_string()).collect())
    }

    pub fn from_strings(variants: Vec<String>) -> Self {
        let mut internals = Internals::new("enum");
        internals.values = Some(variants.into_iter().map(Value::String).collect());
        Self { internals }
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    /// The admissible variant set, in declaration order.
    pub fn options(&self) -> Vec<String> {
        self.internals
            .values
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}

impl Schema for ZEnum {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let start = payload.issues.len();
        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("enum", "null");
                payload.push(raw);
            }
            attach_schema_error(&self.internals, payload, start);
            return;
        }
        let values = self.internals.values.as_deref().unwrap_or(&[]);
        let matched = values.iter().any(|v| payload.value.deep_eq(v));
        if matched {
            run_checks(&self.internals.checks, payload);
        } else {
            let raw = RawIssue::invalid_value(&payload.value, values.to_vec());
            payload.push(raw);
        }
        attach_schema_error(&self.internals, payload, start);
    }
}
