use super::mapping::Mapping;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Semantic category used to pick a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Null,
    Boolean,
    Numeric,
    String,
    Temporal,
    Sequence,
    Mapping,
    /// Anything else; rendered through its default textual form.
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Null => "null",
            Category::Boolean => "boolean",
            Category::Numeric => "numeric",
            Category::String => "string",
            Category::Temporal => "temporal",
            Category::Sequence => "sequence",
            Category::Mapping => "mapping",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A renderable value.
///
/// Every input is classified into exactly one of these variants before
/// rendering; renderers dispatch on the variant rather than on Rust types.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Temporal(Temporal),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Opaque(Opaque),
}

impl Value {
    pub fn category(&self) -> Category {
        match self {
            Value::Null => Category::Null,
            Value::Bool(_) => Category::Boolean,
            Value::Number(_) => Category::Numeric,
            Value::Text(_) => Category::String,
            Value::Temporal(_) => Category::Temporal,
            Value::Sequence(_) => Category::Sequence,
            Value::Mapping(_) => Category::Mapping,
            Value::Opaque(_) => Category::Other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for everything except sequences and mappings.
    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Number of direct children of a container, zero otherwise.
    pub fn item_count(&self) -> usize {
        match self {
            Value::Sequence(items) => items.len(),
            Value::Mapping(map) => map.len(),
            _ => 0,
        }
    }

    /// Unescaped default textual form.
    pub fn plain_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::Temporal(t) => t.to_string(),
            Value::Sequence(_) | Value::Mapping(_) => format!("[{} items]", self.item_count()),
            Value::Opaque(o) => o.text().to_string(),
        }
    }

    /// Wraps any displayable user type as an [`Opaque`] value.
    pub fn opaque<T: Any + Send + Sync + fmt::Display>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Numeric value of any width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
    Float32(f32),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::UInt(n) => write!(f, "{n}"),
            Number::Float(n) => write_float(f, n.to_string(), n.is_finite()),
            Number::Float32(n) => write_float(f, n.to_string(), n.is_finite()),
        }
    }
}

// Display of a whole float drops the fraction ("2"); keep "2.0" so the
// value still reads as a float.
fn write_float(f: &mut fmt::Formatter<'_>, text: String, finite: bool) -> fmt::Result {
    if finite && !text.contains('.') {
        write!(f, "{text}.0")
    } else {
        f.write_str(&text)
    }
}

/// Date and/or time value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl Temporal {
    /// Reads back the ISO-8601 forms chrono serializes to: RFC 3339 with an
    /// offset, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD` and `HH:MM:SS[.f]`.
    pub fn parse_iso(text: &str) -> Option<Self> {
        if !text.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Temporal::Zoned(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Temporal::DateTime(dt));
        }
        if text.len() == 10 {
            if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Some(Temporal::Date(d));
            }
        }
        NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .ok()
            .map(Temporal::Time)
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write!(f, "{d}"),
            Temporal::Time(t) => write!(f, "{t}"),
            Temporal::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Temporal::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

/// A user-defined value with no built-in category.
///
/// Keeps the Rust type identity (used for type-targeted renderers), the
/// value's `Display` text and the value itself for downcasting.
#[derive(Clone)]
pub struct Opaque {
    type_id: TypeId,
    type_name: &'static str,
    text: String,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync + fmt::Display>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            text: value.to_string(),
            payload: Arc::new(value),
        }
    }

    /// `TypeId` of the wrapped value.
    pub fn payload_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Diagnostic name of the wrapped type; not guaranteed unique.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("type_name", &self.type_name)
            .field("text", &self.text)
            .finish()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.text == other.text
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(Number::Int(n as i64))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::UInt(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::UInt(n as u64))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(Number::Float32(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl From<Temporal> for Value {
    fn from(t: Temporal) -> Self {
        Value::Temporal(t)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Temporal(Temporal::Date(d))
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Temporal(Temporal::Time(t))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::Temporal(Temporal::DateTime(dt))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        Value::Temporal(Temporal::Zoned(dt.fixed_offset()))
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::Sequence(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Mapping(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        Value::Mapping(map.into_iter().collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::UInt(u))
                } else {
                    Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => items.into_iter().collect(),
            serde_json::Value::Object(map) => Value::Mapping(map.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_classification() {
        assert_eq!(Value::Null.category(), Category::Null);
        assert_eq!(Value::from(true).category(), Category::Boolean);
        assert_eq!(Value::from(3u8).category(), Category::Numeric);
        assert_eq!(Value::from("x").category(), Category::String);
        assert_eq!(Value::from(vec![1, 2]).category(), Category::Sequence);
        assert_eq!(Value::from(Mapping::new()).category(), Category::Mapping);
        assert_eq!(Value::opaque(42u128).category(), Category::Other);
    }

    #[test]
    fn test_number_display_is_canonical() {
        assert_eq!(Number::Int(42).to_string(), "42");
        assert_eq!(Number::Int(1234567890123456789).to_string(), "1234567890123456789");
        assert_eq!(Number::Float(3.14159).to_string(), "3.14159");
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Float32(2.718).to_string(), "2.718");
        assert_eq!(Number::UInt(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_option_none_is_null() {
        let v: Value = Option::<i32>::None.into();
        assert!(v.is_null());
    }

    #[test]
    fn test_json_classification_keeps_number_kinds() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"i": -3, "u": 18446744073709551615, "f": 1.5}"#)
                .expect("valid json");
        let value = Value::from(json);
        let map = value.as_mapping().expect("object maps to mapping");
        assert_eq!(map.get("i"), Some(&Value::Number(Number::Int(-3))));
        assert_eq!(map.get("u"), Some(&Value::Number(Number::UInt(u64::MAX))));
        assert_eq!(map.get("f"), Some(&Value::Number(Number::Float(1.5))));
    }

    #[test]
    fn test_opaque_keeps_type_and_payload() {
        #[derive(Debug)]
        struct Point(i32, i32);
        impl fmt::Display for Point {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}, {})", self.0, self.1)
            }
        }

        let opaque = Opaque::new(Point(1, 2));
        assert!(opaque.type_name().ends_with("Point"));
        assert_eq!(opaque.text(), "(1, 2)");
        assert_eq!(opaque.downcast_ref::<Point>().map(|p| p.0), Some(1));
        assert!(!opaque.is::<String>());
    }
}
