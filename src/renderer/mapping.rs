use super::{ObjectRenderer, RenderContext};
use crate::core::{Mapping, Value};

/// Keyed mappings as a table or a definition list.
///
/// A table is chosen only when tables are enabled and every value is a
/// non-null scalar. Anything else becomes `key: value` lines where nested
/// containers collapse to `[N items]` and null entries are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingRenderer;

impl MappingRenderer {
    /// Whether `map` renders as a table under `include_tables`.
    pub fn renders_as_table(map: &Mapping, include_tables: bool) -> bool {
        include_tables && map.values().all(|v| v.is_scalar() && !v.is_null())
    }

    fn table(map: &Mapping, context: &mut RenderContext<'_>) -> String {
        let entries = map.ordered_entries(context.config().sort_map_keys());
        let headers: Vec<String> = entries.iter().map(|(k, _)| context.escape(k)).collect();
        let row: Vec<String> = entries.iter().map(|(_, v)| context.render_value(v)).collect();
        context.builder().table(&headers, &[row])
    }

    fn definition_list(map: &Mapping, context: &mut RenderContext<'_>) -> String {
        let entries = map.ordered_entries(context.config().sort_map_keys());
        let mut out = String::new();
        for (key, value) in entries {
            let rendered = match value {
                Value::Null => continue,
                v if v.is_container() => format!("[{} items]", v.item_count()),
                v => context.render_value(v),
            };
            out.push_str(&context.escape(key));
            out.push_str(": ");
            out.push_str(&rendered);
            out.push('\n');
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

impl ObjectRenderer for MappingRenderer {
    fn name(&self) -> &str {
        "MappingRenderer"
    }

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String {
        let Value::Mapping(map) = value else {
            return context.escape(&value.plain_text());
        };
        if map.is_empty() {
            return String::new();
        }

        if Self::renders_as_table(map, context.config().include_tables()) {
            Self::table(map, context)
        } else {
            Self::definition_list(map, context)
        }
    }

    fn supports(&self, value: &Value) -> bool {
        matches!(value, Value::Mapping(_))
    }

    fn priority(&self) -> i32 {
        70
    }

    fn description(&self) -> String {
        "Renders mappings as tables or definition lists".to_string()
    }
}
