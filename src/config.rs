//! Rendering configuration.
//!
//! [`MarkdownConfig`] is built once through [`MarkdownConfig::builder`] (or
//! loaded from a TOML file) and is read-only afterwards. Enum-valued
//! settings accept free-form names; a name that matches no variant falls
//! back to the default variant instead of failing.

use crate::core::{Mapping, Value};
use crate::error::Error;
use crate::Result;
use serde::Deserialize;
use std::path::Path;

/// Default `strftime` pattern for dates and times.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default ceiling for nested list rendering.
pub const DEFAULT_MAX_LIST_DEPTH: usize = 10;

/// Separator style for tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Github,
    Markdown,
    /// Left-aligned `:---` separators.
    Pipe,
}

/// Marker for unordered list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    #[default]
    Dash,
    Asterisk,
    Plus,
}

/// Heading syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// `# Title`
    #[default]
    Atx,
    /// Underlined with `=` or `-`; only levels 1 and 2.
    Setext,
}

impl ListStyle {
    pub fn marker(&self) -> &'static str {
        match self {
            ListStyle::Dash => "-",
            ListStyle::Asterisk => "*",
            ListStyle::Plus => "+",
        }
    }
}

macro_rules! lenient_enum {
    ($ty:ident, $field:literal, { $($name:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            /// Parses a variant name, falling back to the default on anything unknown.
            pub fn parse_lenient(name: &str) -> Self {
                match name.trim().to_ascii_lowercase().as_str() {
                    $($name => $ty::$variant,)+
                    _ => {
                        tracing::debug!(
                            setting = $field,
                            value = name,
                            "Unknown value, using default"
                        );
                        $ty::default()
                    }
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl From<&str> for $ty {
            fn from(name: &str) -> Self {
                Self::parse_lenient(name)
            }
        }

        impl From<String> for $ty {
            fn from(name: String) -> Self {
                Self::parse_lenient(&name)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

lenient_enum!(TableFormat, "table_format", {
    "github" => Github,
    "markdown" => Markdown,
    "pipe" => Pipe,
});

lenient_enum!(ListStyle, "list_style", {
    "dash" => Dash,
    "asterisk" => Asterisk,
    "plus" => Plus,
});

lenient_enum!(HeadingStyle, "heading_style", {
    "atx" => Atx,
    "setext" => Setext,
});

/// Options for object to Markdown rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownConfig {
    include_tables: bool,
    include_metadata: bool,
    table_format: TableFormat,
    list_style: ListStyle,
    heading_style: HeadingStyle,
    escape_html: bool,
    wrap_code_blocks: bool,
    max_list_depth: usize,
    sort_map_keys: bool,
    date_format: String,
    custom_options: Mapping,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            include_tables: true,
            include_metadata: false,
            table_format: TableFormat::default(),
            list_style: ListStyle::default(),
            heading_style: HeadingStyle::default(),
            escape_html: true,
            wrap_code_blocks: true,
            max_list_depth: DEFAULT_MAX_LIST_DEPTH,
            sort_map_keys: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            custom_options: Mapping::new(),
        }
    }
}

impl MarkdownConfig {
    pub fn builder() -> MarkdownConfigBuilder {
        MarkdownConfigBuilder::default()
    }

    /// Starts a builder seeded with this configuration.
    pub fn to_builder(&self) -> MarkdownConfigBuilder {
        MarkdownConfigBuilder {
            config: self.clone(),
        }
    }

    /// Tables with GitHub separators and sorted keys.
    pub fn table_optimized() -> Self {
        Self::builder()
            .include_tables(true)
            .table_format(TableFormat::Github)
            .sort_map_keys(true)
            .build()
    }

    /// Plain definition lists, no tables or metadata.
    pub fn simple_text() -> Self {
        Self::builder()
            .include_tables(false)
            .include_metadata(false)
            .escape_html(true)
            .list_style(ListStyle::Dash)
            .build()
    }

    pub fn rich_formatting() -> Self {
        Self::builder()
            .include_tables(true)
            .table_format(TableFormat::Github)
            .list_style(ListStyle::Dash)
            .heading_style(HeadingStyle::Atx)
            .wrap_code_blocks(true)
            .custom_option("use_emoji", true)
            .build()
    }

    /// Tables, metadata header and date-only timestamps.
    pub fn api_doc() -> Self {
        Self::builder()
            .include_tables(true)
            .table_format(TableFormat::Github)
            .include_metadata(true)
            .wrap_code_blocks(true)
            .sort_map_keys(true)
            .date_format("%Y-%m-%d")
            .build()
    }

    /// Parses a TOML document whose keys mirror the setting names.
    ///
    /// ```
    /// use objmd::{MarkdownConfig, ListStyle};
    ///
    /// let config = MarkdownConfig::from_toml_str("list_style = \"plus\"").unwrap();
    /// assert_eq!(config.list_style(), ListStyle::Plus);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        Ok(file.into_config())
    }

    /// Loads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading render configuration");
        Self::from_toml_str(&source)
    }

    pub fn include_tables(&self) -> bool {
        self.include_tables
    }

    pub fn include_metadata(&self) -> bool {
        self.include_metadata
    }

    pub fn table_format(&self) -> TableFormat {
        self.table_format
    }

    pub fn list_style(&self) -> ListStyle {
        self.list_style
    }

    pub fn heading_style(&self) -> HeadingStyle {
        self.heading_style
    }

    pub fn escape_html(&self) -> bool {
        self.escape_html
    }

    pub fn wrap_code_blocks(&self) -> bool {
        self.wrap_code_blocks
    }

    pub fn max_list_depth(&self) -> usize {
        self.max_list_depth
    }

    pub fn sort_map_keys(&self) -> bool {
        self.sort_map_keys
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn custom_options(&self) -> &Mapping {
        &self.custom_options
    }

    pub fn custom_option(&self, key: &str) -> Option<&Value> {
        self.custom_options.get(key)
    }
}

/// Builder for [`MarkdownConfig`].
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfigBuilder {
    config: MarkdownConfig,
}

impl MarkdownConfigBuilder {
    pub fn include_tables(mut self, include_tables: bool) -> Self {
        self.config.include_tables = include_tables;
        self
    }

    pub fn include_metadata(mut self, include_metadata: bool) -> Self {
        self.config.include_metadata = include_metadata;
        self
    }

    /// Accepts a [`TableFormat`] or its name; unknown names fall back to `github`.
    pub fn table_format(mut self, format: impl Into<TableFormat>) -> Self {
        self.config.table_format = format.into();
        self
    }

    /// Accepts a [`ListStyle`] or its name; unknown names fall back to `dash`.
    pub fn list_style(mut self, style: impl Into<ListStyle>) -> Self {
        self.config.list_style = style.into();
        self
    }

    /// Accepts a [`HeadingStyle`] or its name; unknown names fall back to `atx`.
    pub fn heading_style(mut self, style: impl Into<HeadingStyle>) -> Self {
        self.config.heading_style = style.into();
        self
    }

    pub fn escape_html(mut self, escape_html: bool) -> Self {
        self.config.escape_html = escape_html;
        self
    }

    pub fn wrap_code_blocks(mut self, wrap: bool) -> Self {
        self.config.wrap_code_blocks = wrap;
        self
    }

    /// Clamped to at least 1.
    pub fn max_list_depth(mut self, depth: usize) -> Self {
        self.config.max_list_depth = depth.max(1);
        self
    }

    pub fn sort_map_keys(mut self, sort: bool) -> Self {
        self.config.sort_map_keys = sort;
        self
    }

    /// `strftime` pattern; blank patterns reset to [`DEFAULT_DATE_FORMAT`].
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.config.date_format = if pattern.trim().is_empty() {
            DEFAULT_DATE_FORMAT.to_string()
        } else {
            pattern
        };
        self
    }

    pub fn custom_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.custom_options.insert(key, value);
        self
    }

    /// Returns an independent copy; the builder stays usable.
    pub fn build(&self) -> MarkdownConfig {
        self.config.clone()
    }
}

/// Raw configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    include_tables: Option<bool>,
    include_metadata: Option<bool>,
    table_format: Option<String>,
    list_style: Option<String>,
    heading_style: Option<String>,
    escape_html: Option<bool>,
    wrap_code_blocks: Option<bool>,
    max_list_depth: Option<i64>,
    sort_map_keys: Option<bool>,
    date_format: Option<String>,
    custom: serde_json::Map<String, serde_json::Value>,
}

impl ConfigFile {
    fn into_config(self) -> MarkdownConfig {
        let mut builder = MarkdownConfig::builder();
        if let Some(v) = self.include_tables {
            builder = builder.include_tables(v);
        }
        if let Some(v) = self.include_metadata {
            builder = builder.include_metadata(v);
        }
        if let Some(v) = self.table_format {
            builder = builder.table_format(v);
        }
        if let Some(v) = self.list_style {
            builder = builder.list_style(v);
        }
        if let Some(v) = self.heading_style {
            builder = builder.heading_style(v);
        }
        if let Some(v) = self.escape_html {
            builder = builder.escape_html(v);
        }
        if let Some(v) = self.wrap_code_blocks {
            builder = builder.wrap_code_blocks(v);
        }
        if let Some(v) = self.max_list_depth {
            builder = builder.max_list_depth(usize::try_from(v).unwrap_or(1));
        }
        if let Some(v) = self.sort_map_keys {
            builder = builder.sort_map_keys(v);
        }
        if let Some(v) = self.date_format {
            builder = builder.date_format(v);
        }
        for (key, value) in self.custom {
            builder = builder.custom_option(key, value);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = MarkdownConfig::default();
        assert!(config.include_tables());
        assert!(!config.include_metadata());
        assert_eq!(config.table_format(), TableFormat::Github);
        assert_eq!(config.list_style(), ListStyle::Dash);
        assert_eq!(config.heading_style(), HeadingStyle::Atx);
        assert!(config.escape_html());
        assert!(config.wrap_code_blocks());
        assert_eq!(config.max_list_depth(), 10);
        assert!(!config.sort_map_keys());
        assert_eq!(config.date_format(), "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_invalid_enum_names_fall_back_to_default() {
        let config = MarkdownConfig::builder()
            .table_format("fancy")
            .list_style("bullet")
            .heading_style("underline")
            .build();
        assert_eq!(config.table_format(), TableFormat::Github);
        assert_eq!(config.list_style(), ListStyle::Dash);
        assert_eq!(config.heading_style(), HeadingStyle::Atx);
    }

    #[test]
    fn test_enum_names_are_case_insensitive() {
        let config = MarkdownConfig::builder()
            .table_format("PIPE")
            .list_style(" Asterisk ")
            .heading_style("Setext")
            .build();
        assert_eq!(config.table_format(), TableFormat::Pipe);
        assert_eq!(config.list_style(), ListStyle::Asterisk);
        assert_eq!(config.heading_style(), HeadingStyle::Setext);
    }

    #[test]
    fn test_max_list_depth_is_clamped() {
        let config = MarkdownConfig::builder().max_list_depth(0).build();
        assert_eq!(config.max_list_depth(), 1);
    }

    #[test]
    fn test_blank_date_format_resets() {
        let config = MarkdownConfig::builder().date_format("  ").build();
        assert_eq!(config.date_format(), DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_build_returns_independent_copy() {
        let builder = MarkdownConfig::builder().custom_option("a", 1);
        let first = builder.build();
        let second = builder.custom_option("b", 2).build();
        assert_eq!(first.custom_options().len(), 1);
        assert_eq!(second.custom_options().len(), 2);
    }

    #[test]
    fn test_presets() {
        assert!(MarkdownConfig::table_optimized().sort_map_keys());
        assert!(!MarkdownConfig::simple_text().include_tables());
        assert_eq!(
            MarkdownConfig::rich_formatting().custom_option("use_emoji"),
            Some(&Value::Bool(true))
        );
        let api = MarkdownConfig::api_doc();
        assert!(api.include_metadata());
        assert_eq!(api.date_format(), "%Y-%m-%d");
    }

    #[test]
    fn test_from_toml_str() {
        let config = MarkdownConfig::from_toml_str(
            r#"
include_tables = false
table_format = "pipe"
list_style = "nonsense"
max_list_depth = -4
date_format = "%d/%m/%Y"

[custom]
theme = "dark"
"#,
        )
        .expect("valid toml");

        assert!(!config.include_tables());
        assert_eq!(config.table_format(), TableFormat::Pipe);
        assert_eq!(config.list_style(), ListStyle::Dash);
        assert_eq!(config.max_list_depth(), 1);
        assert_eq!(config.date_format(), "%d/%m/%Y");
        assert_eq!(config.custom_option("theme"), Some(&Value::from("dark")));
    }

    #[test]
    fn test_from_toml_str_rejects_malformed_input() {
        let err = MarkdownConfig::from_toml_str("include_tables = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("objmd.toml");
        std::fs::write(&path, "sort_map_keys = true\n").expect("write config");

        let config = MarkdownConfig::load(&path).expect("load config");
        assert!(config.sort_map_keys());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = MarkdownConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
