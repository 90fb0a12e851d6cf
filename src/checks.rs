//! The check engine: ordered validators attached to a schema's internals.
//!
//! A check inspects the payload and appends issues when its condition
//! fails. Checks run in declaration order; an aborting check that emits
//! marks its issues fatal and suppresses every later check in the run.

use std::sync::Arc;

use crate::config::ErrorMap;
use crate::payload::Payload;

pub type CheckFn = Arc<dyn Fn(&mut Payload) + Send + Sync>;
pub type WhenFn = Arc<dyn Fn(&Payload) -> bool + Send + Sync>;
pub type AttachFn = Arc<dyn Fn(&mut crate::schema::Internals) + Send + Sync>;

/// A single attached check.
#[derive(Clone)]
pub struct ZCheck {
    run: CheckFn,
    /// Conditional gate; a `false` return skips the check entirely.
    when: Option<WhenFn>,
    /// Emitting while `abort` halts the remaining checks in this run.
    abort: bool,
    /// Check-level error map; applied to this check's issues ahead of the
    /// schema-level map.
    error: Option<ErrorMap>,
    /// Hooks run once against the schema internals when the check is
    /// attached (e.g. recording a compiled regex).
    on_attach: Vec<AttachFn>,
}

impl ZCheck {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut Payload) + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(run),
            when: None,
            abort: false,
            error: None,
            on_attach: vec![],
        }
    }

    pub fn when<F>(mut self, gate: F) -> Self
    where
        F: Fn(&Payload) -> bool + Send + Sync + 'static,
    {
        self.when = Some(Arc::new(gate));
        self
    }

    pub fn abort(mut self) -> Self {
        self.abort = true;
        self
    }

    pub fn with_error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn on_attach<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut crate::schema::Internals) + Send + Sync + 'static,
    {
        self.on_attach.push(Arc::new(hook));
        self
    }

    pub(crate) fn attach_hooks(&self) -> &[AttachFn] {
        &self.on_attach
    }
}

/// Run the attached checks against a payload.
///
/// The issue list is append-only. A pre-existing fatal issue suppresses
/// every check; an aborting check that emits marks its new issues fatal and
/// suppresses the rest of the run. Fatal issues emitted by a non-aborting
/// check suppress the rest of the run as well.
pub(crate) fn run_checks(checks: &[ZCheck], payload: &mut Payload) {
    let mut aborted = payload.has_fatal();
    for check in checks {
        if let Some(gate) = &check.when {
            if !gate(payload) {
                continue;
            }
        }
        if aborted {
            continue;
        }
        let before = payload.issues.len();
        (check.run)(payload);
        if payload.issues.len() > before {
            for issue in &mut payload.issues[before..] {
                if issue.error.is_none() {
                    issue.error = check.error.clone();
                }
                if check.abort {
                    issue.fatal = true;
                }
            }
            if check.abort || payload.issues[before..].iter().any(|issue| issue.fatal) {
                aborted = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RawIssue;
    use crate::value::Value;

    fn failing(tag: &'static str) -> ZCheck {
        ZCheck::new(move |payload| {
            payload.push(RawIssue::custom(tag));
        })
    }

    fn passing() -> ZCheck {
        ZCheck::new(|_| {})
    }

    #[test]
    fn checks_run_in_order_and_accumulate() {
        let checks = vec![failing("first"), passing(), failing("second")];
        let mut payload = Payload::new(Value::Int(1));
        run_checks(&checks, &mut payload);
        let messages: Vec<_> = payload
            .issues
            .iter()
            .map(|i| i.message.clone().unwrap())
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn abort_suppresses_later_checks() {
        let checks = vec![failing("stop").abort(), failing("never")];
        let mut payload = Payload::new(Value::Int(1));
        run_checks(&checks, &mut payload);
        assert_eq!(payload.issues.len(), 1);
        assert!(payload.issues[0].fatal);
    }

    #[test]
    fn aborting_check_that_passes_does_not_suppress() {
        let checks = vec![passing().abort(), failing("after")];
        let mut payload = Payload::new(Value::Int(1));
        run_checks(&checks, &mut payload);
        assert_eq!(payload.issues.len(), 1);
    }

    #[test]
    fn when_gate_skips_check() {
        let checks = vec![failing("gated").when(|_| false), failing("run")];
        let mut payload = Payload::new(Value::Int(1));
        run_checks(&checks, &mut payload);
        assert_eq!(payload.issues.len(), 1);
        assert_eq!(payload.issues[0].message.as_deref(), Some("run"));
    }

    #[test]
    fn preexisting_fatal_issue_suppresses_all() {
        let checks = vec![failing("never")];
        let mut payload = Payload::new(Value::Int(1));
        payload.push(RawIssue::custom("already").fatal());
        run_checks(&checks, &mut payload);
        assert_eq!(payload.issues.len(), 1);
    }

    #[test]
    fn fatal_issue_from_plain_check_suppresses_rest() {
        let fatal_check = ZCheck::new(|payload: &mut Payload| {
            payload.push(RawIssue::custom("fatal").fatal());
        });
        let checks = vec![fatal_check, failing("never")];
        let mut payload = Payload::new(Value::Int(1));
        run_checks(&checks, &mut payload);
        assert_eq!(payload.issues.len(), 1);
    }
}
