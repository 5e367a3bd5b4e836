//! Renderers turning [`Value`]s into Markdown.
//!
//! Dispatch happens on the value's [`Category`]. Custom renderers registered
//! in a [`RendererRegistry`] are consulted first; the built-in renderer for
//! the category handles everything else. The `Other` built-in accepts any
//! value, so every value renders to something.

mod context;
mod mapping;
mod registry;
mod scalar;
mod sequence;
mod temporal;

pub use context::{DepthGuard, RenderContext};
pub use mapping::MappingRenderer;
pub use registry::{RendererRegistry, RendererTarget};
pub use scalar::{BooleanRenderer, NullRenderer, NumberRenderer, OpaqueRenderer, StringRenderer};
pub use sequence::SequenceRenderer;
pub use temporal::{format_temporal, TemporalRenderer};

use crate::core::{Category, Value};

/// A strategy that renders values to Markdown.
///
/// Implementations must not render `value` itself through
/// [`RenderContext::render_value`], only its children.
pub trait ObjectRenderer: Send + Sync {
    /// Unique name, used for removal and diagnostics.
    fn name(&self) -> &str;

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String;

    /// Narrows which values of the target this renderer accepts.
    fn supports(&self, _value: &Value) -> bool {
        true
    }

    /// Higher priority wins among renderers that support a value.
    fn priority(&self) -> i32 {
        0
    }

    fn description(&self) -> String {
        format!("Renders values with {}", self.name())
    }
}

/// Built-in renderer for a category.
///
/// The fallback is chosen by category alone, so the built-ins' `priority`
/// and `supports` only take part in ranking when an instance is registered
/// in a [`RendererRegistry`] like any custom renderer.
pub fn builtin_renderer(category: Category) -> &'static dyn ObjectRenderer {
    match category {
        Category::Null => &NullRenderer,
        Category::Boolean => &BooleanRenderer,
        Category::Numeric => &NumberRenderer,
        Category::String => &StringRenderer,
        Category::Temporal => &TemporalRenderer,
        Category::Sequence => &SequenceRenderer,
        Category::Mapping => &MappingRenderer,
        Category::Other => &OpaqueRenderer,
    }
}
