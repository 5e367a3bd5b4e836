//! Fluent Markdown document builder.

use super::escape::{escape_inline_code, escape_markdown, escape_table_cell};
use super::validate::is_valid_markdown;
use crate::config::{HeadingStyle, MarkdownConfig, TableFormat};
use crate::core::{Mapping, Value};
use crate::renderer::format_temporal;

/// Assembles Markdown text step by step.
///
/// Block methods such as [`heading`](Self::heading) append to the buffer and
/// return `&mut Self` for chaining. Fragment methods such as
/// [`table`](Self::table) or [`bold`](Self::bold) return a `String` and leave
/// the buffer alone; pass the fragment to [`raw`](Self::raw) to append it.
///
/// ```
/// use objmd::{MarkdownBuilder, MarkdownConfig};
///
/// let config = MarkdownConfig::default();
/// let mut builder = MarkdownBuilder::new(&config);
/// let list = builder.unordered_list(0, &["one", "two"]);
/// builder.heading("Title", 1).paragraph("Intro").raw(&list);
///
/// assert_eq!(builder.build(), "# Title\n\nIntro\n\n- one\n- two\n\n");
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownBuilder<'a> {
    config: &'a MarkdownConfig,
    content: String,
}

impl<'a> MarkdownBuilder<'a> {
    pub fn new(config: &'a MarkdownConfig) -> Self {
        Self {
            config,
            content: String::new(),
        }
    }

    pub fn config(&self) -> &'a MarkdownConfig {
        self.config
    }

    /// Escapes literal text with this builder's HTML setting.
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text, self.config.escape_html())
    }

    /// Adds a heading; blank text is ignored and the level is clamped to 1..=6.
    pub fn heading(&mut self, text: &str, level: usize) -> &mut Self {
        let text = text.trim();
        if text.is_empty() {
            return self;
        }

        let level = level.clamp(1, 6);
        match self.config.heading_style() {
            HeadingStyle::Setext if level <= 2 => {
                let underline = if level == 1 { "=" } else { "-" };
                let width = text.chars().count();
                self.content.push_str(text);
                self.content.push('\n');
                self.content.push_str(&underline.repeat(width));
            }
            _ => {
                self.content.push_str(&"#".repeat(level));
                self.content.push(' ');
                self.content.push_str(text);
            }
        }
        self.content.push_str("\n\n");
        self
    }

    pub fn paragraph(&mut self, text: &str) -> &mut Self {
        let text = text.trim();
        if !text.is_empty() {
            let escaped = self.escape(text);
            self.content.push_str(&escaped);
            self.content.push_str("\n\n");
        }
        self
    }

    /// Appends escaped text.
    pub fn text(&mut self, text: &str) -> &mut Self {
        let escaped = self.escape(text);
        self.content.push_str(&escaped);
        self
    }

    /// Appends text verbatim.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.content.push_str(text);
        self
    }

    /// Appends a fragment produced by one of the fragment methods.
    pub fn append(&mut self, fragment: impl AsRef<str>) -> &mut Self {
        self.raw(fragment.as_ref())
    }

    /// Appends `[text](url)`. The URL is never escaped.
    pub fn link(&mut self, text: &str, url: &str) -> &mut Self {
        let text = self.escape(text);
        self.content.push('[');
        self.content.push_str(&text);
        self.content.push_str("](");
        self.content.push_str(url);
        self.content.push(')');
        self
    }

    /// Appends `![alt](url "title")`. The URL is never escaped.
    pub fn image(&mut self, alt: &str, url: &str, title: Option<&str>) -> &mut Self {
        let alt = self.escape(alt);
        self.content.push_str("![");
        self.content.push_str(&alt);
        self.content.push_str("](");
        self.content.push_str(url);
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            let title = self.escape(title);
            self.content.push_str(" \"");
            self.content.push_str(&title);
            self.content.push('"');
        }
        self.content.push(')');
        self
    }

    pub fn horizontal_rule(&mut self) -> &mut Self {
        self.content.push_str("---\n\n");
        self
    }

    /// Hard line break (two trailing spaces).
    pub fn line_break(&mut self) -> &mut Self {
        self.content.push_str("  \n");
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.content.push('\n');
        self
    }

    pub fn h1(&mut self, text: &str) -> &mut Self {
        self.heading(text, 1)
    }

    pub fn h2(&mut self, text: &str) -> &mut Self {
        self.heading(text, 2)
    }

    pub fn h3(&mut self, text: &str) -> &mut Self {
        self.heading(text, 3)
    }

    pub fn h4(&mut self, text: &str) -> &mut Self {
        self.heading(text, 4)
    }

    pub fn h5(&mut self, text: &str) -> &mut Self {
        self.heading(text, 5)
    }

    pub fn h6(&mut self, text: &str) -> &mut Self {
        self.heading(text, 6)
    }

    /// Appends a `Document Information` section: a level 2 heading, one
    /// `- **key:** value` line per entry and a blank line.
    ///
    /// Keys are humanized (`authorName` reads as `author name`) and escaped;
    /// values are Markdown already. Nothing is written for an empty slice.
    pub fn document_information<K: AsRef<str>, V: AsRef<str>>(&mut self, entries: &[(K, V)]) -> &mut Self {
        if entries.is_empty() {
            return self;
        }
        self.heading("Document Information", 2);
        for (key, value) in entries {
            let label = self.bold(&format!("{}:", humanize_key(key.as_ref())));
            self.content.push_str("- ");
            self.content.push_str(&label);
            self.content.push(' ');
            self.content.push_str(value.as_ref());
            self.content.push('\n');
        }
        self.newline()
    }

    /// Appends a complete document: a level 1 `title`, the non-null
    /// `metadata` entries as a document information section, then `content`
    /// verbatim under a `Content` heading. Blank parts are left out.
    pub fn document(&mut self, title: &str, metadata: &Mapping, content: &str) -> &mut Self {
        self.heading(title, 1);

        let entries: Vec<(&str, String)> = metadata
            .ordered_entries(self.config.sort_map_keys())
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key, self.metadata_text(value, |v| self.escape(&v.plain_text()))))
            .collect();
        self.document_information(&entries);

        if !content.trim().is_empty() {
            self.heading("Content", 2).raw(content).newline();
        }
        self
    }

    /// Text of one metadata value: temporal values through `date_format`,
    /// sequences as `[a, b]`, mappings as `N items`. Other values go through
    /// `scalar`.
    pub(crate) fn metadata_text(&self, value: &Value, mut scalar: impl FnMut(&Value) -> String) -> String {
        match value {
            Value::Temporal(temporal) => format_temporal(temporal, self.config.date_format()),
            Value::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|item| self.escape(&item.plain_text())).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Mapping(map) => format!("{} items", map.len()),
            other => scalar(other),
        }
    }

    pub fn bold(&self, text: &str) -> String {
        format!("**{}**", self.escape(text))
    }

    pub fn italic(&self, text: &str) -> String {
        format!("*{}*", self.escape(text))
    }

    pub fn strikethrough(&self, text: &str) -> String {
        format!("~~{}~~", self.escape(text))
    }

    pub fn inline_code(&self, text: &str) -> String {
        format!("`{}`", escape_inline_code(text))
    }

    /// Code block, fenced only when `wrap_code_blocks` is enabled.
    ///
    /// The fence grows past any backtick run inside `code`.
    pub fn code_block(&self, code: &str, language: Option<&str>) -> String {
        let mut out = String::with_capacity(code.len() + 16);
        if self.config.wrap_code_blocks() {
            let fence = "`".repeat(fence_length(code));
            out.push_str(&fence);
            if let Some(lang) = language.map(str::trim) {
                out.push_str(lang);
            }
            out.push('\n');
            out.push_str(code);
            if !code.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
        } else {
            out.push_str(code.trim_end_matches('\n'));
        }
        out.push_str("\n\n");
        out
    }

    /// Pipe table. Cells are used as given (escape them first); missing
    /// trailing cells render empty and surplus cells are dropped.
    pub fn table<H: AsRef<str>, C: AsRef<str>>(&self, headers: &[H], rows: &[Vec<C>]) -> String {
        if headers.is_empty() {
            return String::new();
        }

        let headers: Vec<String> = headers
            .iter()
            .map(|h| escape_table_cell(h.as_ref()))
            .collect();

        let mut out = String::new();
        push_table_row(&mut out, headers.iter().map(String::as_str));

        out.push('|');
        for header in &headers {
            let width = header.chars().count() + 2;
            match self.config.table_format() {
                TableFormat::Github | TableFormat::Markdown => {
                    out.push_str(&"-".repeat(width.max(3)));
                }
                TableFormat::Pipe => {
                    out.push(':');
                    out.push_str(&"-".repeat((width - 1).max(3)));
                }
            }
            out.push('|');
        }
        out.push('\n');

        for row in rows {
            let cells: Vec<String> = (0..headers.len())
                .map(|i| {
                    row.get(i)
                        .map(|c| escape_table_cell(c.as_ref()))
                        .unwrap_or_default()
                })
                .collect();
            push_table_row(&mut out, cells.iter().map(String::as_str));
        }

        out.push('\n');
        out
    }

    /// Prefixes every line with `> `.
    pub fn blockquote(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        for line in text.lines() {
            out.push_str("> ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out
    }

    /// Unordered list indented by `2 * level` spaces.
    ///
    /// Items are Markdown already; blank items are skipped. Multi-line items
    /// keep their continuation lines aligned under the item text.
    pub fn unordered_list<S: AsRef<str>>(&self, level: usize, items: &[S]) -> String {
        let marker = self.config.list_style().marker();
        let indent = "  ".repeat(level);
        let mut out = String::new();
        for item in items {
            push_list_item(&mut out, &indent, marker, item.as_ref());
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Ordered list numbered from `start`, indented by `2 * level` spaces.
    pub fn ordered_list<S: AsRef<str>>(&self, level: usize, start: usize, items: &[S]) -> String {
        let indent = "  ".repeat(level);
        let mut out = String::new();
        let mut number = start;
        for item in items {
            if item.as_ref().trim().is_empty() {
                continue;
            }
            push_list_item(&mut out, &indent, &format!("{number}."), item.as_ref());
            number = number.saturating_add(1);
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn build(&self) -> String {
        self.content.clone()
    }

    pub fn into_string(self) -> String {
        self.content
    }

    pub fn clear(&mut self) -> &mut Self {
        self.content.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Runs [`is_valid_markdown`] over the buffer.
    pub fn is_valid_content(&self) -> bool {
        is_valid_markdown(&self.content)
    }
}

/// `authorName` reads as `author name`; plain keys are only lowercased.
pub(crate) fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = ch.is_lowercase();
        out.extend(ch.to_lowercase());
    }
    out
}

fn push_table_row<'s>(out: &mut String, cells: impl Iterator<Item = &'s str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(cell);
        out.push_str(" |");
    }
    out.push('\n');
}

fn push_list_item(out: &mut String, indent: &str, marker: &str, item: &str) {
    let item = item.trim();
    if item.is_empty() {
        return;
    }

    let continuation = format!("{indent}{}", " ".repeat(marker.len() + 1));
    for (i, line) in item.lines().enumerate() {
        if i == 0 {
            out.push_str(indent);
            out.push_str(marker);
            out.push(' ');
            out.push_str(line);
        } else if !line.is_empty() {
            out.push_str(&continuation);
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn fence_length(code: &str) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;
    for c in code.chars() {
        if c == '`' {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_run.max(2) + 1
}
