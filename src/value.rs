use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// The dynamic value universe every schema consumes and produces.
///
/// Scalars keep their natural Rust representation; whole numbers are stored
/// as [`Value::Int`] / [`Value::Uint`] and floats as [`Value::Float`].
/// [`Value::Boxed`] is an identity-preserving reference: schemas recognize
/// the boxed inner value but return the same box, observable through
/// [`Arc::ptr_eq`]. [`Value::Opaque`] is the escape hatch for host values
/// the kernel passes through untouched.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    BigInt(BigInt),
    String(String),
    Array(Vec<Value>),
    /// Unique elements, uniqueness by [`Value::deep_eq`].
    Set(Vec<Value>),
    /// Arbitrary keys, insertion order preserved.
    Map(Vec<(Value, Value)>),
    /// String-keyed record (JSON object analog).
    Record(BTreeMap<String, Value>),
    Boxed(Arc<Value>),
    Opaque {
        tag: &'static str,
        value: Arc<dyn Any + Send + Sync>,
    },
}

impl Value {
    /// JSON-flavored type name used in `invalid_type` issues.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Uint(_) | Value::Float(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Record(_) => "object",
            Value::Boxed(inner) => inner.type_name(),
            Value::Opaque { tag, .. } => tag,
        }
    }

    /// Read access through any number of box layers.
    pub fn unbox(&self) -> &Value {
        let mut v = self;
        while let Value::Boxed(inner) = v {
            v = inner;
        }
        v
    }

    /// Wrap a value in an identity-preserving box.
    pub fn boxed(value: Value) -> Value {
        Value::Boxed(Arc::new(value))
    }

    /// Wrap an arbitrary host value the kernel will pass through untouched.
    pub fn opaque<T: Any + Send + Sync>(tag: &'static str, value: T) -> Value {
        Value::Opaque {
            tag,
            value: Arc::new(value),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.unbox(), Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.unbox() {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.unbox() {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.unbox() {
            Value::Int(i) => Some(*i),
            Value::Uint(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.unbox() {
            Value::Uint(u) => Some(*u),
            Value::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Any numeric tag widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self.unbox() {
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer reading across both storage tags, widened to `i128`.
    pub fn as_i128(&self) -> Option<i128> {
        match self.unbox() {
            Value::Int(i) => Some(i128::from(*i)),
            Value::Uint(u) => Some(i128::from(*u)),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self.unbox() {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self.unbox() {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Structural equality. Boxes compare through; `Int`/`Uint`/`BigInt`
    /// compare by mathematical value; floats compare by `==` (NaN unequal);
    /// opaque values compare by allocation identity.
    pub fn deep_eq(&self, other: &Value) -> bool {
        match (self.unbox(), other.unbox()) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (a @ (Value::Int(_) | Value::Uint(_)), b @ (Value::Int(_) | Value::Uint(_))) => {
                a.as_i128() == b.as_i128()
            }
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::BigInt(a), b @ (Value::Int(_) | Value::Uint(_)))
            | (b @ (Value::Int(_) | Value::Uint(_)), Value::BigInt(a)) => {
                b.as_i128().map(BigInt::from).as_ref() == Some(a)
            }
            (Value::Array(a), Value::Array(b)) | (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka.deep_eq(kb) && va.deep_eq(vb))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.deep_eq(vb))
            }
            (Value::Opaque { value: a, .. }, Value::Opaque { value: b, .. }) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Short display form for error messages: strings quoted and truncated,
    /// containers summarized by size.
    pub fn display_short(&self) -> String {
        match self.unbox() {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Uint(u) => u.to_string(),
            Value::Float(f) => f.to_string(),
            Value::BigInt(b) => b.to_string(),
            Value::String(s) => {
                if s.chars().count() > 50 {
                    let head: String = s.chars().take(47).collect();
                    format!("\"{}...\"", head)
                } else {
                    format!("\"{}\"", s)
                }
            }
            Value::Array(items) => format!("Array(len={})", items.len()),
            Value::Set(items) => format!("Set(len={})", items.len()),
            Value::Map(entries) => format!("Map(len={})", entries.len()),
            Value::Record(map) => format!("Object(keys={})", map.len()),
            Value::Opaque { tag, .. } => format!("Opaque({})", tag),
            Value::Boxed(_) => unreachable!("unbox follows boxes"),
        }
    }

    /// Convert to a `serde_json::Value` where representable. Sets render as
    /// arrays, maps as `[key, value]` pair arrays, bigints as decimal
    /// strings. Opaque values are not representable.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self.unbox() {
            Value::Null => Some(serde_json::Value::Null),
            Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Value::Int(i) => Some(serde_json::json!(i)),
            Value::Uint(u) => Some(serde_json::json!(u)),
            Value::Float(f) => serde_json::Number::from_f64(*f).map(serde_json::Value::Number),
            Value::BigInt(b) => Some(serde_json::Value::String(b.to_string())),
            Value::String(s) => Some(serde_json::Value::String(s.clone())),
            Value::Array(items) | Value::Set(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Option<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| Some(serde_json::Value::Array(vec![k.to_json()?, v.to_json()?])))
                .collect::<Option<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Record(map) => map
                .iter()
                .map(|(k, v)| Some((k.clone(), v.to_json()?)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
            Value::Opaque { .. } => None,
            Value::Boxed(_) => unreachable!("unbox follows boxes"),
        }
    }

    /// Build a set value, deduplicating by [`Value::deep_eq`].
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.iter().any(|existing| existing.deep_eq(&item)) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Build a map value from key/value pairs, insertion order preserved.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
        Value::Map(entries.into_iter().collect())
    }

    /// Build a record value from string-keyed pairs.
    pub fn record(entries: impl IntoIterator<Item = (String, Value)>) -> Value {
        Value::Record(entries.into_iter().collect())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Uint(u) => write!(f, "Uint({})", u),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::BigInt(b) => write!(f, "BigInt({})", b),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Set(items) => f.debug_tuple("Set").field(items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Record(map) => f.debug_tuple("Record").field(map).finish(),
            Value::Boxed(inner) => f.debug_tuple("Boxed").field(inner).finish(),
            Value::Opaque { tag, .. } => write!(f, "Opaque({})", tag),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.unbox() {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::BigInt(b) => serializer.serialize_str(&b.to_string()),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for (k, v) in entries {
                    seq.serialize_element(&[k, v])?;
                }
                seq.end()
            }
            Value::Record(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Opaque { tag, .. } => serializer.serialize_str(tag),
            Value::Boxed(_) => unreachable!("unbox follows boxes"),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

macro_rules! from_signed {
    ($($t:ty),+) => {$(
        impl From<$t> for Value {
            fn from(i: $t) -> Value {
                Value::Int(i64::from(i))
            }
        }
    )+};
}
from_signed!(i8, i16, i32, i64);

macro_rules! from_unsigned {
    ($($t:ty),+) => {$(
        impl From<$t> for Value {
            fn from(u: $t) -> Value {
                Value::Uint(u64::from(u))
            }
        }
    )+};
}
from_unsigned!(u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(u: usize) -> Value {
        Value::Uint(u as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Value {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Value {
        Value::BigInt(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Value {
        Value::Record(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Value {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Record(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
