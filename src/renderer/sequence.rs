use super::{ObjectRenderer, RenderContext};
use crate::core::Value;
use crate::render::MarkdownBuilder;

/// Ordered collections as unordered lists.
///
/// Nested sequences become indented sub-lists under the preceding plain item,
/// or under a `[N items]` placeholder when there is none. Nested mappings
/// become multi-line items. Once the depth reaches `max_list_depth`, a
/// collection is summarised as `[N items]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRenderer;

impl ObjectRenderer for SequenceRenderer {
    fn name(&self) -> &str {
        "SequenceRenderer"
    }

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String {
        let Value::Sequence(items) = value else {
            return context.escape(&value.plain_text());
        };
        if items.is_empty() {
            return String::new();
        }
        if context.at_depth_limit() {
            tracing::trace!(depth = context.depth(), items = items.len(), "List depth limit reached");
            return format!("[{} items]", items.len());
        }

        let level = context.depth();
        let collapse_children = level + 1 >= context.config().max_list_depth();
        let builder = context.builder();

        let mut out = String::new();
        let mut run: Vec<String> = Vec::new();
        // Whether the last pending item is a plain line a sub-list can hang off.
        let mut has_parent = false;
        for item in items {
            if item.is_container() && collapse_children {
                run.push(format!("[{} items]", item.item_count()));
                has_parent = true;
                continue;
            }

            let rendered = context.nested(|c| c.render_value(item));
            if rendered.trim().is_empty() {
                continue;
            }
            match item {
                Value::Sequence(children) => {
                    if !has_parent {
                        run.push(format!("[{} items]", children.len()));
                    }
                    flush_run(&builder, level, &mut run, &mut out);
                    out.push_str(rendered.trim_end());
                    out.push('\n');
                    has_parent = false;
                }
                Value::Mapping(_) => {
                    run.push(rendered);
                    has_parent = false;
                }
                _ => {
                    run.push(rendered);
                    has_parent = true;
                }
            }
        }
        flush_run(&builder, level, &mut run, &mut out);

        if out.is_empty() {
            return out;
        }
        if level == 0 {
            out.push('\n');
        }
        out
    }

    fn supports(&self, value: &Value) -> bool {
        matches!(value, Value::Sequence(_))
    }

    fn priority(&self) -> i32 {
        60
    }

    fn description(&self) -> String {
        "Renders sequences as unordered lists".to_string()
    }
}

// Emits the pending items as one list without the builder's trailing blank
// line; the caller decides where the list ends.
fn flush_run(builder: &MarkdownBuilder<'_>, level: usize, run: &mut Vec<String>, out: &mut String) {
    if run.is_empty() {
        return;
    }
    let list = builder.unordered_list(level, run);
    out.push_str(list.trim_end_matches('\n'));
    if !list.is_empty() {
        out.push('\n');
    }
    run.clear();
}
