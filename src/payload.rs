use crate::config::ErrorMap;
use crate::error::{PathSegment, RawIssue};
use crate::value::Value;

/// Per-parse configuration threaded alongside the payload.
#[derive(Clone)]
pub struct ParseCtx {
    /// Context-level error map; second rung of the resolution ladder.
    pub error: Option<ErrorMap>,
    /// When `false`, finalized issues omit the offending input value.
    pub report_input: bool,
}

impl Default for ParseCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseCtx {
    pub fn new() -> Self {
        Self {
            error: None,
            report_input: true,
        }
    }

    pub fn with_error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn suppress_input(mut self) -> Self {
        self.report_input = false;
        self
    }
}

/// The mutable bundle threaded by reference through one parse: the value
/// being refined, the issues discovered so far, and the path from the root
/// to the value. Owned entirely by a single `parse` invocation.
#[derive(Debug)]
pub struct Payload {
    pub value: Value,
    pub issues: Vec<RawIssue>,
    pub path: Vec<PathSegment>,
    /// Recursion budget consumed by self-referential (`lazy`) schemas.
    pub depth: usize,
}

impl Payload {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            issues: vec![],
            path: vec![],
            depth: 0,
        }
    }

    /// Fresh payload for a child value one path segment deeper.
    pub fn child(&self, value: Value, segment: PathSegment) -> Payload {
        let mut path = self.path.clone();
        path.push(segment);
        Payload {
            value,
            issues: vec![],
            path,
            depth: self.depth,
        }
    }

    /// Sibling payload at the same path, used for trial parses (unions,
    /// prefault) whose issues may be discarded.
    pub fn trial(&self, value: Value) -> Payload {
        Payload {
            value,
            issues: vec![],
            path: self.path.clone(),
            depth: self.depth,
        }
    }

    /// Append an issue, stamping the payload path as its prefix. Segments
    /// the builder appended locally (e.g. an offending key) stay at the tail.
    pub fn push(&mut self, mut raw: RawIssue) {
        let mut path = self.path.clone();
        path.append(&mut raw.path);
        raw.path = path;
        self.issues.push(raw);
    }

    /// Absorb a child payload's issues and hand back its value. Child issue
    /// paths are already fully stamped.
    pub fn adopt(&mut self, child: Payload) -> Value {
        self.issues.extend(child.issues);
        child.value
    }

    pub fn ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_fatal(&self) -> bool {
        self.issues.iter().any(|issue| issue.fatal)
    }
}
