//! Engine facade: configuration, renderer registry and metadata assembly.

use crate::config::MarkdownConfig;
use crate::core::{to_value, Mapping, Value};
use crate::render::{self, MarkdownBuilder};
use crate::renderer::{ObjectRenderer, RenderContext, RendererRegistry, RendererTarget};
use crate::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

const FEATURES: &[&str] = &[
    "headings",
    "paragraphs",
    "lists",
    "tables",
    "code",
    "links",
    "images",
    "metadata",
    "extensible",
    "configurable",
    "thread-safe",
];

const LANGUAGES: &[&str] = &[
    "bash", "css", "html", "java", "javascript", "json", "markdown", "powershell", "properties",
    "python", "rust", "sql", "text", "toml", "xml", "yaml",
];

/// Describes the engine and what it can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub features: BTreeSet<String>,
    pub languages: BTreeSet<String>,
}

impl EngineInfo {
    pub fn supports_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Whether `language` is a known code-block language tag.
    pub fn supports_language(&self, language: &str) -> bool {
        self.languages.contains(&language.to_ascii_lowercase())
    }
}

impl Default for EngineInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Renders in-memory values as Markdown documents".to_string(),
            features: FEATURES.iter().map(|s| s.to_string()).collect(),
            languages: LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Converts values to Markdown.
///
/// Owns a default configuration and a registry of custom renderers. The
/// engine is `Send + Sync`; share it behind an `Arc` to serve concurrent
/// conversions.
///
/// ```
/// use objmd::{Mapping, MarkdownEngine, Value};
///
/// let engine = MarkdownEngine::new();
/// let row = Mapping::new().with("name", "Ann").with("age", 31);
///
/// assert_eq!(
///     engine.convert(&Value::from(row)),
///     "| name | age |\n|------|-----|\n| Ann | 31 |\n\n"
/// );
/// ```
#[derive(Debug, Default)]
pub struct MarkdownEngine {
    config: MarkdownConfig,
    registry: RendererRegistry,
    info: EngineInfo,
}

impl MarkdownEngine {
    /// Engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MarkdownConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &MarkdownConfig {
        &self.config
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Renders `value` with the engine's configuration.
    pub fn convert(&self, value: &Value) -> String {
        self.convert_with(value, &self.config)
    }

    pub fn convert_with(&self, value: &Value, config: &MarkdownConfig) -> String {
        self.convert_with_metadata(value, &Mapping::new(), config)
    }

    /// Renders `value`, preceded by a document information section when
    /// `config.include_metadata()` is set and `metadata` has non-null entries.
    ///
    /// A null value renders to an empty string even when metadata is present.
    pub fn convert_with_metadata(
        &self,
        value: &Value,
        metadata: &Mapping,
        config: &MarkdownConfig,
    ) -> String {
        if value.is_null() {
            return String::new();
        }
        tracing::trace!(category = %value.category(), "Converting value");

        let mut context = self.create_context(config, metadata);
        if config.include_metadata() && !context.metadata().is_empty() {
            let section = metadata_section(&mut context);
            context.append(&section);
        }

        let body = context.render_value(value);
        context.append(&body);

        let output = context.into_output();
        tracing::trace!(len = output.len(), "Conversion finished");
        output
    }

    /// Classifies `value` through serde and renders it.
    ///
    /// chrono fields come back as temporal values (see [`to_value`]), so they
    /// follow `date_format`. Errors only when serialization itself fails.
    pub fn convert_serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(self.convert(&to_value(value)?))
    }

    /// Adds a custom renderer for `target`, ranked above the built-ins.
    pub fn register_renderer<R>(&self, target: impl Into<RendererTarget>, renderer: R) -> Result<()>
    where
        R: ObjectRenderer + 'static,
    {
        self.registry.register(target, renderer)
    }

    pub fn register_shared_renderer(
        &self,
        target: impl Into<RendererTarget>,
        renderer: Arc<dyn ObjectRenderer>,
    ) -> Result<()> {
        self.registry.register_shared(target, renderer)
    }

    pub fn unregister_renderer(&self, name: &str) -> bool {
        self.registry.unregister(name)
    }

    pub fn has_renderer(&self, name: &str) -> bool {
        self.registry.has_renderer(name)
    }

    /// Builder bound to `config`, or to the engine's configuration.
    pub fn create_builder<'a>(&'a self, config: Option<&'a MarkdownConfig>) -> MarkdownBuilder<'a> {
        MarkdownBuilder::new(config.unwrap_or(&self.config))
    }

    /// Context that dispatches through this engine's custom renderers.
    pub fn create_context<'a>(&self, config: &'a MarkdownConfig, metadata: &Mapping) -> RenderContext<'a> {
        RenderContext::with_renderers(config, metadata, self.registry.snapshot())
    }

    pub fn is_valid_markdown(&self, text: &str) -> bool {
        render::is_valid_markdown(text)
    }

    pub fn engine_info(&self) -> &EngineInfo {
        &self.info
    }
}

fn metadata_section(context: &mut RenderContext<'_>) -> String {
    let mut builder = context.builder();
    let entries: Vec<(String, Value)> = context
        .metadata()
        .ordered_entries(context.config().sort_map_keys())
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

    let lines: Vec<(&str, String)> = entries
        .iter()
        .map(|(key, value)| (key.as_str(), builder.metadata_text(value, |v| context.render_value(v))))
        .collect();

    builder.document_information(&lines).heading("Content", 2);
    builder.into_string()
}
