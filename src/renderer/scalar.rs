use super::{ObjectRenderer, RenderContext};
use crate::core::Value;

/// Renders `null` as nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl ObjectRenderer for NullRenderer {
    fn name(&self) -> &str {
        "NullRenderer"
    }

    fn render(&self, _value: &Value, _context: &mut RenderContext<'_>) -> String {
        String::new()
    }

    fn supports(&self, value: &Value) -> bool {
        value.is_null()
    }

    fn description(&self) -> String {
        "Renders null values as empty text".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRenderer;

impl ObjectRenderer for BooleanRenderer {
    fn name(&self) -> &str {
        "BooleanRenderer"
    }

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String {
        match value {
            Value::Bool(flag) => flag.to_string(),
            other => context.escape(&other.plain_text()),
        }
    }

    fn supports(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn priority(&self) -> i32 {
        55
    }

    fn description(&self) -> String {
        "Renders booleans as true or false".to_string()
    }
}

/// Canonical decimal text; no grouping, no rounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRenderer;

impl ObjectRenderer for NumberRenderer {
    fn name(&self) -> &str {
        "NumberRenderer"
    }

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String {
        match value {
            Value::Number(number) => number.to_string(),
            other => context.escape(&other.plain_text()),
        }
    }

    fn supports(&self, value: &Value) -> bool {
        matches!(value, Value::Number(_))
    }

    fn priority(&self) -> i32 {
        60
    }

    fn description(&self) -> String {
        "Renders numbers in canonical decimal form".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringRenderer;

impl ObjectRenderer for StringRenderer {
    fn name(&self) -> &str {
        "StringRenderer"
    }

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String {
        match value {
            Value::Text(text) => context.escape(text),
            other => context.escape(&other.plain_text()),
        }
    }

    fn supports(&self, value: &Value) -> bool {
        matches!(value, Value::Text(_))
    }

    fn priority(&self) -> i32 {
        50
    }

    fn description(&self) -> String {
        "Renders strings as escaped Markdown text".to_string()
    }
}

/// Fallback for everything else: the display text, escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueRenderer;

impl ObjectRenderer for OpaqueRenderer {
    fn name(&self) -> &str {
        "OpaqueRenderer"
    }

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String {
        match value {
            Value::Opaque(opaque) => context.escape(opaque.text()),
            other => context.escape(&other.plain_text()),
        }
    }

    fn priority(&self) -> i32 {
        10
    }

    fn description(&self) -> String {
        "Renders any other value through its display text".to_string()
    }
}
