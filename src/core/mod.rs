//! Value model: the closed set of shapes the engine knows how to render.

mod mapping;
mod value;

pub use mapping::Mapping;
pub use value::{Category, Number, Opaque, Temporal, Value};

use crate::Result;
use serde::Serialize;

/// Classifies any serializable type into a [`Value`].
///
/// Structs become mappings in field order, sequences stay sequences.
/// serde flattens chrono types to ISO-8601 strings; those are read back as
/// [`Temporal`] so they honour `date_format`. Other string-like types (paths,
/// enums) arrive as text.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(recover_temporal(Value::from(serde_json::to_value(value)?)))
}

fn recover_temporal(value: Value) -> Value {
    match value {
        Value::Text(text) => match Temporal::parse_iso(&text) {
            Some(temporal) => Value::Temporal(temporal),
            None => Value::Text(text),
        },
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(recover_temporal).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, recover_temporal(v)))
                .collect(),
        ),
        other => other,
    }
}
