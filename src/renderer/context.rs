use super::builtin_renderer;
use super::registry::{select_renderer, Registration};
use crate::config::MarkdownConfig;
use crate::core::{Mapping, Value};
use crate::render::{escape_markdown, MarkdownBuilder};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Per-conversion rendering state.
///
/// Holds the shared configuration, the document metadata (null values
/// dropped), an output buffer, the current nesting depth and a snapshot of
/// the custom renderers. One context serves one conversion.
pub struct RenderContext<'a> {
    config: &'a MarkdownConfig,
    metadata: Mapping,
    output: String,
    depth: usize,
    renderers: Arc<Vec<Registration>>,
}

impl<'a> RenderContext<'a> {
    /// Context without custom renderers; only built-ins apply.
    pub fn new(config: &'a MarkdownConfig, metadata: &Mapping) -> Self {
        Self::with_renderers(config, metadata, Arc::default())
    }

    pub(crate) fn with_renderers(
        config: &'a MarkdownConfig,
        metadata: &Mapping,
        renderers: Arc<Vec<Registration>>,
    ) -> Self {
        Self {
            config,
            metadata: metadata.without_nulls(),
            output: String::new(),
            depth: 0,
            renderers,
        }
    }

    pub fn config(&self) -> &'a MarkdownConfig {
        self.config
    }

    pub fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    /// Current container nesting depth; 0 at the top level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True once the depth has reached `max_list_depth`.
    pub fn at_depth_limit(&self) -> bool {
        self.depth >= self.config.max_list_depth()
    }

    /// Enters one nesting level; the level is left when the guard drops.
    pub fn descend(&mut self) -> DepthGuard<'_, 'a> {
        self.depth += 1;
        DepthGuard { context: self }
    }

    /// Runs `f` one nesting level deeper.
    pub fn nested<R>(&mut self, f: impl FnOnce(&mut RenderContext<'a>) -> R) -> R {
        let mut guard = self.descend();
        f(&mut *guard)
    }

    /// Renders `value` through the custom renderers, then the built-ins.
    pub fn render_value(&mut self, value: &Value) -> String {
        let renderers = Arc::clone(&self.renderers);
        match select_renderer(&renderers, value) {
            Some(renderer) => {
                tracing::trace!(renderer = renderer.name(), "Using custom renderer");
                renderer.render(value, self)
            }
            None => builtin_renderer(value.category()).render(value, self),
        }
    }

    /// Escapes literal text with the configured HTML setting.
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text, self.config.escape_html())
    }

    pub fn builder(&self) -> MarkdownBuilder<'a> {
        MarkdownBuilder::new(self.config)
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.output.push_str(text);
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Clears the output and the depth counter.
    pub fn reset(&mut self) {
        self.output.clear();
        self.depth = 0;
    }
}

/// Scope guard returned by [`RenderContext::descend`].
pub struct DepthGuard<'c, 'a> {
    context: &'c mut RenderContext<'a>,
}

impl<'a> Deref for DepthGuard<'_, 'a> {
    type Target = RenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl<'a> DerefMut for DepthGuard<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for DepthGuard<'_, '_> {
    fn drop(&mut self) {
        self.context.depth -= 1;
    }
}
