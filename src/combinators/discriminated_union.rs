use std::sync::Arc;

use crate::error::RawIssue;
use crate::object::ZObject;
use crate::payload::{ParseCtx, Payload};
use crate::schema::{attach_schema_error, Internals, Schema};
use crate::value::Value;

/// Union of object schemas dispatched by a discriminator key. Created via
/// [`crate::discriminated_union()`].
///
/// At construction each option is indexed by the literal value(s) its
/// discriminator field admits (read from that field schema's internals).
/// Parsing a record whose discriminator matches dispatches straight to the
/// single associated branch; anything else emits `invalid_union`.
///
/// # Panics
///
/// Construction panics when an option has no discriminator field or its
/// field schema exposes no admissible value set — that is a schema
/// definition error, not a runtime condition.
#[derive(Clone)]
pub struct ZDiscriminatedUnion {
    internals: Internals,
    discriminator: String,
    options: Vec<Arc<dyn Schema>>,
    index: Vec<(Value, usize)>,
}

impl ZDiscriminatedUnion {
    pub fn new(discriminator: impl Into<String>, options: Vec<ZObject>) -> Self {
        let discriminator = discriminator.into();
        let mut index: Vec<(Value, usize)> = Vec::new();

        for (position, option) in options.iter().enumerate() {
            let field = option.field_schema(&discriminator).unwrap_or_else(|| {
                panic!(
                    "discriminated union option {} has no \"{}\" field",
                    position, discriminator
                )
            });
            let values = field.internals().values.clone().unwrap_or_default();
            if values.is_empty() {
                panic!(
                    "discriminated union option {}: field \"{}\" admits no literal values",
                    position, discriminator
                );
            }
            for value in values {
                index.push((value, position));
            }
        }

        Self {
            internals: Internals::new("discriminated_union"),
            discriminator,
            options: options
                .into_iter()
                .map(|option| Arc::new(option) as Arc<dyn Schema>)
                .collect(),
            index,
        }
    }

    pub fn error(mut self, error: impl Into<crate::config::ErrorMap>) -> Self {
        self.internals.error = Some(error.into());
        self
    }

    fn fallback(&self) -> RawIssue {
        let mut raw = RawIssue::invalid_union(vec![]);
        raw.props.discriminator = Some(self.discriminator.clone());
        raw.props.values = Some(self.index.iter().map(|(value, _)| value.clone()).collect());
        raw
    }
}

impl Schema for ZDiscriminatedUnion {
    fn internals(&self) -> &Internals {
        &self.internals
    }

    fn run(&self, payload: &mut Payload, ctx: &ParseCtx) {
        let start = payload.issues.len();

        let branch = payload.value.as_record().and_then(|record| {
            let tag = record.get(&self.discriminator)?;
            self.index
                .iter()
                .find(|(value, _)| value.deep_eq(tag))
                .map(|(_, position)| *position)
        });

        match branch.and_then(|position| self.options.get(position)) {
            Some(option) => option.run(payload, ctx),
            None => {
                let raw = self.fallback().with_input(payload.value.clone());
                payload.push(raw);
            }
        }
        attach_schema_error(&self.internals, payload, start);
    }
}
