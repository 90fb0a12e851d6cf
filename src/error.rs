use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::{Config, ErrorMap};
use crate::locale;
use crate::payload::ParseCtx;
use crate::value::Value;

/// A segment in a validation issue path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PathSegment {
    /// Record field or map key.
    Key(String),
    /// Array, set, or tuple index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, ".{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// Issue code — what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCode {
    InvalidType,
    TooBig,
    TooSmall,
    InvalidFormat,
    NotMultipleOf,
    UnrecognizedKeys,
    InvalidUnion,
    InvalidKey,
    InvalidElement,
    InvalidValue,
    Custom,
}

impl IssueCode {
    /// Stable string key for this code. Used for i18n template lookup and
    /// serialized error payloads.
    pub fn key(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooBig => "too_big",
            IssueCode::TooSmall => "too_small",
            IssueCode::InvalidFormat => "invalid_format",
            IssueCode::NotMultipleOf => "not_multiple_of",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::InvalidKey => "invalid_key",
            IssueCode::InvalidElement => "invalid_element",
            IssueCode::InvalidValue => "invalid_value",
            IssueCode::Custom => "custom",
        }
    }
}

impl Serialize for IssueCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Code-specific properties carried by a raw issue and demultiplexed onto
/// the finalized issue.
#[derive(Debug, Clone, Default)]
pub struct IssueProps {
    pub expected: Option<String>,
    pub received: Option<String>,
    pub origin: Option<String>,
    pub minimum: Option<Value>,
    pub maximum: Option<Value>,
    pub inclusive: Option<bool>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub includes: Option<String>,
    pub algorithm: Option<String>,
    pub divisor: Option<Value>,
    pub keys: Option<Vec<String>>,
    pub values: Option<Vec<Value>>,
    pub key: Option<String>,
    pub discriminator: Option<String>,
    pub params: Option<BTreeMap<String, Value>>,
    pub union_errors: Option<Vec<Vec<RawIssue>>>,
}

/// In-flight description of a validation problem.
///
/// Builders populate the code and properties; they never resolve messages.
/// Paths are stamped when the issue is pushed onto a payload, so issues
/// created by leaf schemas carry at most their locally-appended segments.
#[derive(Debug, Clone)]
pub struct RawIssue {
    pub code: IssueCode,
    pub input: Option<Value>,
    pub path: Vec<PathSegment>,
    /// Pre-set message; wins over the whole resolution ladder.
    pub message: Option<String>,
    pub props: IssueProps,
    /// `true` halts further checks in the enclosing run (`continue=false`).
    pub fatal: bool,
    /// Error map captured from the producing check or schema; first rung of
    /// the resolution ladder.
    pub error: Option<ErrorMap>,
}

impl RawIssue {
    pub fn new(code: IssueCode) -> Self {
        Self {
            code,
            input: None,
            path: vec![],
            message: None,
            props: IssueProps::default(),
            fatal: false,
            error: None,
        }
    }

    pub fn invalid_type(input: &Value, expected: impl Into<String>) -> Self {
        let received = input.type_name().to_string();
        Self::new(IssueCode::InvalidType)
            .with_input(input.clone())
            .with_expected(expected)
            .with_received(received)
    }

    /// `invalid_type` with an explicit received name and no captured input
    /// (missing object fields report `received = "undefined"`).
    pub fn invalid_type_received(expected: impl Into<String>, received: impl Into<String>) -> Self {
        Self::new(IssueCode::InvalidType)
            .with_expected(expected)
            .with_received(received)
    }

    pub fn too_small(
        input: &Value,
        origin: impl Into<String>,
        minimum: impl Into<Value>,
        inclusive: bool,
    ) -> Self {
        let mut raw = Self::new(IssueCode::TooSmall)
            .with_input(input.clone())
            .with_origin(origin);
        raw.props.minimum = Some(minimum.into());
        raw.props.inclusive = Some(inclusive);
        raw
    }

    pub fn too_big(
        input: &Value,
        origin: impl Into<String>,
        maximum: impl Into<Value>,
        inclusive: bool,
    ) -> Self {
        let mut raw = Self::new(IssueCode::TooBig)
            .with_input(input.clone())
            .with_origin(origin);
        raw.props.maximum = Some(maximum.into());
        raw.props.inclusive = Some(inclusive);
        raw
    }

    pub fn invalid_format(input: &Value, format: impl Into<String>) -> Self {
        let mut raw = Self::new(IssueCode::InvalidFormat).with_input(input.clone());
        raw.props.format = Some(format.into());
        raw
    }

    pub fn not_multiple_of(input: &Value, divisor: impl Into<Value>) -> Self {
        let mut raw = Self::new(IssueCode::NotMultipleOf).with_input(input.clone());
        raw.props.divisor = Some(divisor.into());
        raw
    }

    pub fn invalid_value(input: &Value, values: Vec<Value>) -> Self {
        let mut raw = Self::new(IssueCode::InvalidValue).with_input(input.clone());
        raw.props.values = Some(values);
        raw
    }

    pub fn unrecognized_keys(keys: Vec<String>) -> Self {
        let mut raw = Self::new(IssueCode::UnrecognizedKeys);
        raw.props.keys = Some(keys);
        raw
    }

    pub fn invalid_union(errors: Vec<Vec<RawIssue>>) -> Self {
        let mut raw = Self::new(IssueCode::InvalidUnion);
        raw.props.union_errors = Some(errors);
        raw
    }

    pub fn invalid_key(key: impl Into<String>, input: &Value, origin: impl Into<String>) -> Self {
        let mut raw = Self::new(IssueCode::InvalidKey)
            .with_input(input.clone())
            .with_origin(origin);
        raw.props.key = Some(key.into());
        raw
    }

    pub fn invalid_element(input: &Value, origin: impl Into<String>) -> Self {
        Self::new(IssueCode::InvalidElement)
            .with_input(input.clone())
            .with_origin(origin)
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(IssueCode::Custom).with_message(message)
    }

    // -- combinators ---------------------------------------------------------

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.props.origin = Some(origin.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.props.expected = Some(expected.into());
        self
    }

    pub fn with_received(mut self, received: impl Into<String>) -> Self {
        self.props.received = Some(received.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.props.pattern = Some(pattern.into());
        self
    }

    pub fn with_error(mut self, error: ErrorMap) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_params(mut self, params: BTreeMap<String, Value>) -> Self {
        self.props.params = Some(params);
        self
    }

    /// Append a locally-known path segment (e.g. the offending key); the
    /// payload prefix is stamped at push time.
    pub fn at(mut self, segment: PathSegment) -> Self {
        self.path.push(segment);
        self
    }

    pub fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    /// Key/value parameters for `{placeholder}` interpolation in locale
    /// templates.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let p = &self.props;
        if let Some(v) = &p.expected {
            out.push(("expected", v.clone()));
        }
        if let Some(v) = &p.received {
            out.push(("received", v.clone()));
        }
        if let Some(v) = &p.origin {
            out.push(("origin", v.clone()));
        }
        if let Some(v) = &p.minimum {
            out.push(("minimum", v.display_short()));
        }
        if let Some(v) = &p.maximum {
            out.push(("maximum", v.display_short()));
        }
        if let Some(v) = &p.inclusive {
            out.push(("inclusive", v.to_string()));
        }
        if let Some(v) = &p.format {
            out.push(("format", v.clone()));
        }
        if let Some(v) = &p.pattern {
            out.push(("pattern", v.clone()));
        }
        if let Some(v) = &p.prefix {
            out.push(("prefix", v.clone()));
        }
        if let Some(v) = &p.suffix {
            out.push(("suffix", v.clone()));
        }
        if let Some(v) = &p.includes {
            out.push(("includes", v.clone()));
        }
        if let Some(v) = &p.divisor {
            out.push(("divisor", v.display_short()));
        }
        if let Some(v) = &p.keys {
            out.push(("keys", v.join(", ")));
        }
        if let Some(v) = &p.values {
            let rendered: Vec<String> = v.iter().map(Value::display_short).collect();
            out.push(("values", rendered.join("|")));
        }
        if let Some(v) = &p.key {
            out.push(("key", v.clone()));
        }
        out
    }
}

/// A finalized validation issue: resolved message, stamped path, and the
/// typed properties demultiplexed from the raw bag. The only issue form
/// exposed outside the kernel.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, Value>>,
    /// Per-option issue lists for `invalid_union`; empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Vec<Issue>>,
}

/// Resolve a raw issue's message through the four-level ladder and
/// demultiplex its properties. A pre-set `raw.message` wins outright.
pub(crate) fn finalize(raw: RawIssue, ctx: &ParseCtx, cfg: &Config) -> Issue {
    let message = match &raw.message {
        Some(msg) => msg.clone(),
        None => resolve_message(&raw, ctx, cfg),
    };

    let report_input = ctx.report_input;
    let RawIssue {
        code,
        input,
        path,
        props,
        ..
    } = raw;

    let errors = props
        .union_errors
        .unwrap_or_default()
        .into_iter()
        .map(|issues| {
            issues
                .into_iter()
                .map(|issue| finalize(issue, ctx, cfg))
                .collect()
        })
        .collect();

    Issue {
        code,
        path,
        message,
        input: if report_input { input } else { None },
        expected: props.expected,
        received: props.received,
        origin: props.origin,
        minimum: props.minimum,
        maximum: props.maximum,
        inclusive: props.inclusive,
        format: props.format,
        pattern: props.pattern,
        prefix: props.prefix,
        suffix: props.suffix,
        includes: props.includes,
        algorithm: props.algorithm,
        divisor: props.divisor,
        keys: props.keys,
        values: props.values,
        key: props.key,
        discriminator: props.discriminator,
        params: props.params,
        errors,
    }
}

fn resolve_message(raw: &RawIssue, ctx: &ParseCtx, cfg: &Config) -> String {
    let resolvers = [
        raw.error.as_ref(),
        ctx.error.as_ref(),
        cfg.custom_error.as_ref(),
        cfg.locale_error.as_ref(),
    ];
    for resolver in resolvers.into_iter().flatten() {
        if let Some(msg) = resolver.resolve(raw) {
            if !msg.is_empty() {
                return msg;
            }
        }
    }
    locale::default_message(raw)
}

/// Collection of finalized issues; the error value returned from a failed
/// parse. Issues appear in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct ZodicError {
    pub issues: Vec<Issue>,
}

impl ZodicError {
    pub(crate) fn from_raw(raw: Vec<RawIssue>, ctx: &ParseCtx, cfg: &Config) -> Self {
        Self {
            issues: raw
                .into_iter()
                .map(|issue| finalize(issue, ctx, cfg))
                .collect(),
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ZodicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if !issue.path.is_empty() {
                let path: String = issue.path.iter().map(PathSegment::to_string).collect();
                write!(f, "{}: ", path)?;
            }
            write!(f, "{}", issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ZodicError {}
