use regex_lite::Regex;

use crate::error::RawIssue;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{parse_primitive, Internals, Schema, TypeParser};
use crate::value::Value;
use crate::checks::ZCheck;

#[derive(Clone, Copy)]
enum StringTransform {
    Trim,
    ToLowerCase,
    ToUpperCase,
}

/// Schema for string validation. Created via [`crate::string()`].
///
/// Admits a string value or a box to one. Attached checks cover length
/// bounds, substring anchors, case, and patterns; named-format validators
/// (email and the like) are external collaborators built on
/// [`regex`](Self::regex) and `invalid_format`'s format-name tagging.
/// Transforms (`trim`, case folding) apply after recognition and before
/// any checks.
///
/// # Example
/// ```
/// use zodic::prelude::*;
///
/// let schema = zodic::string().min(3).max(20).includes("@");
/// assert!(schema.parse("user@example.com").is_ok());
/// ```
#[derive(Clone)]
pub struct ZString {
    internals: Internals,
    transforms: Vec<StringTransform>,
}

impl ZString {
    pub fn new() -> Self {
        Self {
            internals: Internals::new("string"),
            transforms: vec![],
        }
    }

    /// Trim surrounding whitespace before the checks run.
    pub fn trim(mut self) -> Self {
        self.transforms.push(StringTransform::Trim);
        self
    }

    /// Fold to lowercase before the checks run.
    pub fn to_lowercase(mut self) -> Self {
        self.transforms.push(StringTransform::ToLowerCase);
        self
    }

    /// Fold to uppercase before the checks run.
    pub fn to_uppercase(mut self) -> Self {
        self.transforms.push(StringTransform::ToUpperCase);
        self
    }

    /// Coerce numbers, booleans, and bigints to their string rendering.
    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    /// Schema-level error map, consulted for every issue this schema emits.
    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    /// Minimum length in characters (inclusive).
    pub fn min(self, min: usize) -> Self {
        self.min_check(min, None)
    }

    /// Minimum length with a custom message.
    pub fn min_msg(self, min: usize, msg: impl Into<String>) -> Self {
        self.min_check(min, Some(msg.into()))
    }

    fn min_check(mut self, min: usize, msg: Option<String>) -> Self {
        let mut check = ZCheck::new(move |payload: &mut Payload| {
            let fail = payload
                .value
                .as_str()
                .is_some_and(|s| s.chars().count() < min);
            if fail {
                let raw = RawIssue::too_small(&payload.value, "string", min, true);
                payload.push(raw);
            }
        });
        if let Some(msg) = msg {
            check = check.with_error(msg);
        }
        self.internals.push_check(check);
        self
    }

    /// Maximum length in characters (inclusive).
    pub fn max(self, max: usize) -> Self {
        self.max_check(max, None)
    }

    /// Maximum length with a custom message.
    pub fn max_msg(self, max: usize, msg: impl Into<String>) -> Self {
        self.max_check(max, Some(msg.into()))
    }

    fn max_check(mut self, max: usize, msg: Option<String>) -> Self {
        let mut check = ZCheck::new(move |payload: &mut Payload| {
            let fail = payload
                .value
                .as_str()
                .is_some_and(|s| s.chars().count() > max);
            if fail {
                let raw = RawIssue::too_big(&payload.value, "string", max, true);
                payload.push(raw);
            }
        });
        if let Some(msg) = msg {
            check = check.with_error(msg);
        }
        self.internals.push_check(check);
        self
    }

    /// Exact length in characters.
    pub fn length(mut self, len: usize) -> Self {
        let check = ZCheck::new(move |payload: &mut Payload| {
            let count = match payload.value.as_str() {
                Some(s) => s.chars().count(),
                None => return,
            };
            if count < len {
                let raw = RawIssue::too_small(&payload.value, "string", len, true);
                payload.push(raw);
            } else if count > len {
                let raw = RawIssue::too_big(&payload.value, "string", len, true);
                payload.push(raw);
            }
        });
        self.internals.push_check(check);
        self
    }

    /// Must not be empty.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    /// Must match the given regex. The compiled pattern is cached on the
    /// schema internals at attach time.
    pub fn regex(mut self, re: Regex) -> Self {
        let pattern = re.as_str().to_string();
        let cached = re.clone();
        let check = ZCheck::new(move |payload: &mut Payload| {
            let fail = payload.value.as_str().is_some_and(|s| !re.is_match(s));
            if fail {
                let raw = RawIssue::invalid_format(&payload.value, "regex")
                    .with_pattern(pattern.clone());
                payload.push(raw);
            }
        })
        .on_attach(move |internals| {
            internals.pattern = Some(cached.clone());
        });
        self.internals.push_check(check);
        self
    }

    /// Named-format hook for external format collaborators (email, URL,
    /// and the like): `valid` decides membership, and failures tag
    /// `invalid_format` with `name` so message resolution can dispatch on
    /// it. The kernel ships no format validators of its own.
    pub fn format<F>(self, name: &'static str, valid: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.format_check(name, valid, None)
    }

    /// [`format`](Self::format) with a custom message.
    pub fn format_msg<F>(self, name: &'static str, valid: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.format_check(name, valid, Some(msg.into()))
    }

    fn format_check(
        mut self,
        format: &'static str,
        valid: impl Fn(&str) -> bool + Send + Sync + 'static,
        msg: Option<String>,
    ) -> Self {
        let mut check = ZCheck::new(move |payload: &mut Payload| {
            let fail = payload.value.as_str().is_some_and(|s| !valid(s));
            if fail {
                let raw = RawIssue::invalid_format(&payload.value, format);
                payload.push(raw);
            }
        });
        if let Some(msg) = msg {
            check = check.with_error(msg);
        }
        self.internals.push_check(check);
        self
    }

    /// Must start with the given prefix.
    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let check = {
            let prefix = prefix.clone();
            ZCheck::new(move |payload: &mut Payload| {
                let fail = payload
                    .value
                    .as_str()
                    .is_some_and(|s| !s.starts_with(prefix.as_str()));
                if fail {
                    let mut raw = RawIssue::invalid_format(&payload.value, "starts_with");
                    raw.props.prefix = Some(prefix.clone());
                    payload.push(raw);
                }
            })
        };
        self.internals.push_check(check);
        self
    }

    /// Must end with the given suffix.
    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let check = {
            let suffix = suffix.clone();
            ZCheck::new(move |payload: &mut Payload| {
                let fail = payload
                    .value
                    .as_str()
                    .is_some_and(|s| !s.ends_with(suffix.as_str()));
                if fail {
                    let mut raw = RawIssue::invalid_format(&payload.value, "ends_with");
                    raw.props.suffix = Some(suffix.clone());
                    payload.push(raw);
                }
            })
        };
        self.internals.push_check(check);
        self
    }

    /// Must contain the given substring.
    pub fn includes(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        let check = {
            let needle = needle.clone();
            ZCheck::new(move |payload: &mut Payload| {
                let fail = payload
                    .value
                    .as_str()
                    .is_some_and(|s| !s.contains(needle.as_str()));
                if fail {
                    let mut raw = RawIssue::invalid_format(&payload.value, "includes");
                    raw.props.includes = Some(needle.clone());
                    payload.push(raw);
                }
            })
        };
        self.internals.push_check(check);
        self
    }

    /// No uppercase characters.
    pub fn lowercase(self) -> Self {
        self.format_check("lowercase", |s| !s.chars().any(char::is_uppercase), None)
    }

    /// No lowercase characters.
    pub fn uppercase(self) -> Self {
        self.format_check("uppercase", |s| !s.chars().any(char::is_lowercase), None)
    }
}

impl Default for ZString {
    fn default() -> Self {
        Self::new()
    }
}

fn coerce_string(value: &Value) -> Option<Value> {
    match value {
        Value::Int(i) => Some(Value::String(i.to_string())),
        Value::Uint(u) => Some(Value::String(u.to_string())),
        Value::Float(f) => Some(Value::String(f.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        Value::BigInt(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

impl Schema for ZString {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, _ctx: &ParseCtx) {
        let matches = |v: &Value| matches!(v, Value::String(_));
        let coerce = coerce_string;
        let prepare = |value: &mut Value| {
            if self.transforms.is_empty() {
                return;
            }
            let transformed = value.as_str().map(|s| {
                let mut out = s.to_string();
                for transform in &self.transforms {
                    out = match transform {
                        StringTransform::Trim => out.trim().to_string(),
                        StringTransform::ToLowerCase => out.to_lowercase(),
                        StringTransform::ToUpperCase => out.to_uppercase(),
                    };
                }
                out
            });
            if let Some(out) = transformed {
                // An untouched value keeps its box identity.
                if value.as_str() != Some(out.as_str()) {
                    *value = Value::String(out);
                }
            }
        };
        parse_primitive(
            &self.internals,
            payload,
            TypeParser {
                expected: "string",
                matches: &matches,
                coerce: Some(&coerce),
                prepare: Some(&prepare),
            },
        );
    }
}
