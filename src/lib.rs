//! # zodic — composable runtime validation for dynamic values
//!
//! `zodic` is a validation kernel inspired by [Zod](https://zod.dev/).
//! Schemas are immutable, shareable values describing a permitted shape;
//! parsing an arbitrary [`Value`](value::Value) yields either the validated
//! (possibly transformed) value or a structured error listing every
//! detected problem.
//!
//! ## Quick start
//!
//! ```rust
//! use zodic::prelude::*;
//!
//! let user = zodic::object()
//!     .field("name", zodic::string().min(2).max(50))
//!     .field("email", zodic::string().includes("@"))
//!     .field("age", zodic::int().min(18).optional());
//!
//! let input = Value::from(serde_json::json!({
//!     "name": "Alex",
//!     "email": "alex@example.com",
//! }));
//! let parsed = user.parse_value(input).unwrap();
//! assert!(parsed.as_record().unwrap().contains_key("name"));
//! ```
//!
//! Failures accumulate rather than short-circuit: one parse reports every
//! problem it found, each issue carrying a code, a path, and a message
//! resolved through schema-, context-, and process-level error maps.

pub mod checks;
pub mod collections;
pub mod combinators;
pub mod config;
pub mod error;
pub mod format;
pub mod locale;
mod macros;
pub mod modifiers;
pub mod object;
pub mod payload;
pub mod primitives;
pub mod schema;
pub mod value;

// Re-export serde_json so doc examples and downstream macros can build
// inputs without importing it themselves.
#[doc(hidden)]
pub use serde_json;

// Re-exported so callers can construct `Regex` and `BigInt` values against
// the same versions the crate links.
pub use num_bigint;
pub use regex_lite;

use std::sync::Arc;

pub use crate::error::ZodicError;
pub use crate::schema::{Schema, SchemaExt};
pub use crate::value::Value;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// String schema.
pub fn string() -> primitives::ZString {
    primitives::ZString::new()
}

/// 64-bit signed integer schema.
pub fn int() -> primitives::ZInt {
    primitives::ZInt::with_width("int", i64::MIN as i128, i64::MAX as i128)
}

pub fn int8() -> primitives::ZInt {
    primitives::ZInt::with_width("int8", i8::MIN as i128, i8::MAX as i128)
}

pub fn int16() -> primitives::ZInt {
    primitives::ZInt::with_width("int16", i16::MIN as i128, i16::MAX as i128)
}

pub fn int32() -> primitives::ZInt {
    primitives::ZInt::with_width("int32", i32::MIN as i128, i32::MAX as i128)
}

pub fn int64() -> primitives::ZInt {
    primitives::ZInt::with_width("int64", i64::MIN as i128, i64::MAX as i128)
}

/// 64-bit unsigned integer schema.
pub fn uint() -> primitives::ZInt {
    primitives::ZInt::with_width("uint", 0, u64::MAX as i128)
}

pub fn uint8() -> primitives::ZInt {
    primitives::ZInt::with_width("uint8", 0, u8::MAX as i128)
}

pub fn uint16() -> primitives::ZInt {
    primitives::ZInt::with_width("uint16", 0, u16::MAX as i128)
}

pub fn uint32() -> primitives::ZInt {
    primitives::ZInt::with_width("uint32", 0, u32::MAX as i128)
}

pub fn uint64() -> primitives::ZInt {
    primitives::ZInt::with_width("uint64", 0, u64::MAX as i128)
}

/// Double-precision float schema. Alias: [`float64()`].
pub fn number() -> primitives::ZFloat {
    float64()
}

pub fn float32() -> primitives::ZFloat {
    primitives::ZFloat::with_width("float32", true)
}

pub fn float64() -> primitives::ZFloat {
    primitives::ZFloat::with_width("float64", false)
}

/// Arbitrary-precision integer schema.
pub fn bigint() -> primitives::ZBigInt {
    primitives::ZBigInt::new()
}

/// Boolean schema.
pub fn boolean() -> primitives::ZBool {
    primitives::ZBool::new()
}

/// Admits only the null marker.
pub fn nil() -> primitives::ZNil {
    primitives::ZNil::new()
}

/// Admits everything non-null.
pub fn any() -> primitives::ZAny {
    primitives::ZAny::new()
}

/// Like [`any()`] under a distinct type code.
pub fn unknown() -> primitives::ZUnknown {
    primitives::ZUnknown::new()
}

/// Admits nothing.
pub fn never() -> primitives::ZNever {
    primitives::ZNever::new()
}

/// Exact-match schema for a single literal value.
///
/// ```
/// use zodic::prelude::*;
/// assert!(zodic::literal("admin").parse("admin").is_ok());
/// assert!(zodic::literal(42i64).parse(7).is_err());
/// ```
pub fn literal(value: impl Into<Value>) -> primitives::ZLiteral {
    primitives::ZLiteral::new(value)
}

/// Exact-match schema over several admissible literals.
pub fn literal_of(values: Vec<Value>) -> primitives::ZLiteral {
    primitives::ZLiteral::of(values)
}

/// String-enum schema over a fixed variant set.
pub fn enumeration(variants: &[&str]) -> primitives::ZEnum {
    primitives::ZEnum::new(variants)
}

/// Object schema with an empty shape; add fields with
/// [`field`](object::ZObject::field) or use [`zobject!`].
pub fn object() -> object::ZObject {
    object::ZObject::new()
}

/// Homogeneous record schema.
pub fn record(
    key_schema: impl Schema + 'static,
    value_schema: impl Schema + 'static,
) -> collections::ZRecord {
    collections::ZRecord::new(key_schema, value_schema)
}

/// Record schema that passes entries with unrecognized keys through
/// unchanged.
pub fn loose_record(
    key_schema: impl Schema + 'static,
    value_schema: impl Schema + 'static,
) -> collections::ZRecord {
    collections::ZRecord::new(key_schema, value_schema).loose()
}

/// Map schema over arbitrary keys.
pub fn map(
    key_schema: impl Schema + 'static,
    value_schema: impl Schema + 'static,
) -> collections::ZMap {
    collections::ZMap::new(key_schema, value_schema)
}

/// Set schema; output members are unique by deep equality.
pub fn set(element: impl Schema + 'static) -> collections::ZSet {
    collections::ZSet::new(element)
}

/// Array schema.
pub fn array(element: impl Schema + 'static) -> collections::ZArray {
    collections::ZArray::new(element)
}

/// Fixed-arity tuple schema.
pub fn tuple(items: Vec<Arc<dyn Schema>>) -> collections::ZTuple {
    collections::ZTuple::new(items)
}

/// Union over options tried in declaration order; first success wins.
pub fn union(options: Vec<Arc<dyn Schema>>) -> combinators::ZUnion {
    combinators::ZUnion::new(options)
}

/// Union of object schemas dispatched by a discriminator key.
pub fn discriminated_union(
    discriminator: impl Into<String>,
    options: Vec<object::ZObject>,
) -> combinators::ZDiscriminatedUnion {
    combinators::ZDiscriminatedUnion::new(discriminator, options)
}

/// Intersection of two schemas; outputs are merged.
pub fn intersection(
    left: impl Schema + 'static,
    right: impl Schema + 'static,
) -> combinators::ZIntersection {
    combinators::ZIntersection::new(left.into_schema(), right.into_schema())
}

/// Deferred schema for recursive shapes; the factory resolves on first use.
pub fn lazy<F>(factory: F) -> combinators::ZLazy
where
    F: Fn() -> Arc<dyn Schema> + Send + Sync + 'static,
{
    combinators::ZLazy::new(factory)
}

/// Schema from a fallible closure.
pub fn custom<F>(check: F) -> combinators::ZCustom
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
{
    combinators::ZCustom::new(check)
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `zodic`.
pub mod prelude {
    pub use crate::checks::ZCheck;
    pub use crate::collections::{ZArray, ZMap, ZRecord, ZSet, ZTuple};
    pub use crate::combinators::{
        RefineParams, TransformCtx, ZCheckSchema, ZCustom, ZDescribe, ZDiscriminatedUnion,
        ZIntersection, ZLazy, ZPipe, ZRefine, ZTransform, ZUnion,
    };
    pub use crate::config::{Config, ErrorMap};
    pub use crate::error::{Issue, IssueCode, PathSegment, RawIssue, ZodicError};
    pub use crate::format::{flatten_error, prettify_error, treeify_error};
    pub use crate::modifiers::{ZDefault, ZNilable, ZNullish, ZOptional, ZPrefault};
    pub use crate::object::ZObject;
    pub use crate::payload::{ParseCtx, Payload};
    pub use crate::primitives::{
        ZAny, ZBigInt, ZBool, ZEnum, ZFloat, ZInt, ZLiteral, ZNever, ZNil, ZString, ZUnknown,
    };
    pub use crate::schema::{Internals, Schema, SchemaExt};
    pub use crate::value::Value;
}
