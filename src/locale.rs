//! Built-in default messages — the last rung of the resolution ladder.
//!
//! Locale message catalogs are external collaborators, not part of the
//! kernel: a locale is just an [`ErrorMap`](crate::config::ErrorMap)
//! installed via [`config::set_locale_error`](crate::config::set_locale_error),
//! typically built from [`RawIssue::params`](crate::error::RawIssue::params)
//! for `{placeholder}` interpolation:
//!
//! ```
//! use std::collections::HashMap;
//! use zodic::config::ErrorMap;
//!
//! let mut templates = HashMap::new();
//! templates.insert("too_small", "Wert muss mindestens {minimum} sein");
//! templates.insert("invalid_type", "{expected} erwartet, {received} erhalten");
//!
//! let locale = ErrorMap::func(move |raw| {
//!     templates.get(raw.code.key()).map(|template| {
//!         let mut message = template.to_string();
//!         for (key, value) in raw.params() {
//!             message = message.replace(&format!("{{{}}}", key), &value);
//!         }
//!         message
//!     })
//! });
//! zodic::config::set_locale_error(Some(locale));
//! # zodic::config::set_locale_error(None);
//! ```

use crate::error::{IssueCode, RawIssue};
use crate::value::Value;

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn origin_label(raw: &RawIssue) -> String {
    capitalize(raw.props.origin.as_deref().unwrap_or("value"))
}

/// Generate the built-in English message for a raw issue.
pub fn default_message(raw: &RawIssue) -> String {
    match raw.code {
        IssueCode::InvalidType => format!(
            "Expected {}, received {}",
            raw.props.expected.as_deref().unwrap_or("unknown"),
            raw.props.received.as_deref().unwrap_or("unknown"),
        ),
        IssueCode::TooSmall => {
            let bound = raw
                .props
                .minimum
                .as_ref()
                .map(Value::display_short)
                .unwrap_or_default();
            if raw.props.inclusive.unwrap_or(true) {
                format!("{} must be at least {}", origin_label(raw), bound)
            } else {
                format!("{} must be greater than {}", origin_label(raw), bound)
            }
        }
        IssueCode::TooBig => {
            let bound = raw
                .props
                .maximum
                .as_ref()
                .map(Value::display_short)
                .unwrap_or_default();
            if raw.props.inclusive.unwrap_or(true) {
                format!("{} must be at most {}", origin_label(raw), bound)
            } else {
                format!("{} must be less than {}", origin_label(raw), bound)
            }
        }
        IssueCode::InvalidFormat => match raw.props.format.as_deref() {
            // Common names external format collaborators tag with.
            Some("email") => "Invalid email address".to_string(),
            Some("url") => "Invalid URL".to_string(),
            Some("uuid") => "Invalid UUID".to_string(),
            Some("regex") => match &raw.props.pattern {
                Some(pattern) => format!("String must match pattern {}", pattern),
                None => "String does not match pattern".to_string(),
            },
            Some("starts_with") => format!(
                "String must start with \"{}\"",
                raw.props.prefix.as_deref().unwrap_or_default()
            ),
            Some("ends_with") => format!(
                "String must end with \"{}\"",
                raw.props.suffix.as_deref().unwrap_or_default()
            ),
            Some("includes") => format!(
                "String must include \"{}\"",
                raw.props.includes.as_deref().unwrap_or_default()
            ),
            Some("lowercase") => "String must be lowercase".to_string(),
            Some("uppercase") => "String must be uppercase".to_string(),
            Some(other) => format!("Invalid {}", other),
            None => "Invalid format".to_string(),
        },
        IssueCode::NotMultipleOf => format!(
            "Number must be a multiple of {}",
            raw.props
                .divisor
                .as_ref()
                .map(Value::display_short)
                .unwrap_or_default(),
        ),
        IssueCode::UnrecognizedKeys => {
            let keys = raw.props.keys.clone().unwrap_or_default();
            let rendered: Vec<String> = keys.iter().map(|k| format!("\"{}\"", k)).collect();
            format!("Unrecognized key(s): {}", rendered.join(", "))
        }
        IssueCode::InvalidUnion => "Invalid input: no union variant matched".to_string(),
        IssueCode::InvalidKey => format!(
            "Invalid key \"{}\" in {}",
            raw.props.key.as_deref().unwrap_or_default(),
            raw.props.origin.as_deref().unwrap_or("map"),
        ),
        IssueCode::InvalidElement => format!(
            "Invalid value in {}",
            raw.props.origin.as_deref().unwrap_or("collection"),
        ),
        IssueCode::InvalidValue => {
            let values = raw.props.values.clone().unwrap_or_default();
            let rendered: Vec<String> = values.iter().map(Value::display_short).collect();
            format!("Invalid value: expected one of {}", rendered.join("|"))
        }
        IssueCode::Custom => "Invalid input".to_string(),
    }
}
