//! # objmd
//!
//! Renders in-memory values (scalars, sequences, keyed mappings, dates and
//! user-defined types) as Markdown.
//!
//! ## Example
//!
//! ```
//! use objmd::{Mapping, MarkdownConfig, MarkdownEngine, Value};
//!
//! let config = MarkdownConfig::builder().include_tables(false).build();
//! let engine = MarkdownEngine::with_config(config);
//!
//! let doc = Mapping::new()
//!     .with("name", "objmd")
//!     .with("tags", vec!["markdown", "render"]);
//!
//! assert_eq!(engine.convert(&Value::from(doc)), "name: objmd\ntags: [2 items]\n\n");
//! ```
//!
//! Any `serde::Serialize` type can be rendered through
//! [`MarkdownEngine::convert_serialize`].

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod render;
pub mod renderer;

pub use crate::config::{HeadingStyle, ListStyle, MarkdownConfig, MarkdownConfigBuilder, TableFormat};
pub use crate::core::{to_value, Category, Mapping, Number, Opaque, Temporal, Value};
pub use engine::{EngineInfo, MarkdownEngine};
pub use error::{Error, Result};
pub use render::{escape_markdown, is_valid_markdown, MarkdownBuilder};
pub use renderer::{ObjectRenderer, RenderContext, RendererRegistry, RendererTarget};

// Python bindings (only when 'python' feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use pyo3::prelude::*;

    /// Renders a JSON document as Markdown with the default configuration.
    #[pyfunction]
    fn render_json(json: &str) -> PyResult<String> {
        let parsed: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
        Ok(MarkdownEngine::new().convert(&Value::from(parsed)))
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    pub fn objmd(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(render_json, m)?)?;
        Ok(())
    }
}
