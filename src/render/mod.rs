//! Markdown text assembly: escaping, the document builder and the validity screen.

mod builder;
mod escape;
mod validate;

pub use builder::MarkdownBuilder;
pub use escape::{escape_inline_code, escape_markdown, escape_table_cell};
pub use validate::is_valid_markdown;
