//! The degenerate primitives: `nil`, `any`, `unknown`, and `never`.

use crate::checks::run_checks;
use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};

/// Admits only the null marker. Created via [`crate::nil()`].
#[derive(Clone)]
pub struct ZNil {
    internals: Internals,
}

impl ZNil {
    pub fn new() -> Self {
        let mut internals = Internals::new("nil");
        internals.nilable = true;
        Self { internals }
    }
}

impl Default for ZNil {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for ZNil {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        if !payload.value.is_null() {
            let start = payload.issues.len();
            let raw = RawIssue::invalid_type(&payload.value, "nil");
            payload.push(raw);
            attach_schema_error(&self.internals, payload, start);
        }
    }
}

/// Admits everything non-null; null passes only through a nil-policy
/// wrapper. Created via [`crate::any()`].
#[derive(Clone)]
pub struct ZAny {
    internals: Internals,
}

impl ZAny {
    pub fn new() -> Self {
        Self {
            internals: Internals::new("any"),
        }
    }
}

impl Default for ZAny {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for ZAny {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let start = payload.issues.len();
        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("any", "null");
                payload.push(raw);
            }
        } else {
            run_checks(&self.internals.checks, payload);
        }
        attach_schema_error(&self.internals, payload, start);
    }
}

/// Identical dynamics to [`ZAny`] under a distinct type code, so
/// downstream tooling can tell "accepts anything" from "not yet narrowed".
/// Created via [`crate::unknown()`].
#[derive(Clone)]
pub struct ZUnknown {
    internals: Internals,
}

impl ZUnknown {
    pub fn new() -> Self {
        Self {
            internals: Internals::new("unknown"),
        }
    }
}

impl Default for ZUnknown {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for ZUnknown {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let start = payload.issues.len();
        if payload.value.is_null() {
            if !(self.internals.optional || self.internals.nilable) {
                let raw = RawIssue::invalid_type_received("unknown", "null");
                payload.push(raw);
            }
        } else {
            run_checks(&self.internals.checks, payload);
        }
        attach_schema_error(&self.internals, payload, start);
    }
}

/// Admits nothing. Created via [`crate::never()`].
#[derive(Clone)]
pub struct ZNever {
    internals: Internals,
}

impl ZNever {
    pub fn new() -> Self {
        Self {
            internals: Internals::new("never"),
        }
    }
}

impl Default for ZNever {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for ZNever {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let start = payload.issues.len();
        let raw = RawIssue::invalid_type(&payload.value, "never");
        payload.push(raw);
        attach_schema_error(&self.internals, payload, start);
    }
}
