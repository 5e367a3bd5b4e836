/// Characters that get a backslash prefix in literal text.
const MARKDOWN_SPECIALS: &[char] = &[
    '\\', '*', '_', '`', '[', ']', '(', ')', '#', '+', '-', '.', '!',
];

/// Escapes literal text for Markdown.
///
/// With `escape_html`, `<` and `>` become entities first. Every Markdown
/// special character then gets a backslash prefix. The pass is single and
/// left-to-right, so entity text is never escaped again.
///
/// ```
/// use objmd::escape_markdown;
///
/// assert_eq!(escape_markdown("a*b", true), "a\\*b");
/// assert_eq!(escape_markdown("<b>", true), "&lt;b&gt;");
/// ```
pub fn escape_markdown(text: &str, escape_html: bool) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        match ch {
            '<' if escape_html => escaped.push_str("&lt;"),
            '>' if escape_html => escaped.push_str("&gt;"),
            c if MARKDOWN_SPECIALS.contains(&c) => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn escape_inline_code(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '`' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Keeps a cell on one line and its pipes out of the column structure.
pub fn escape_table_cell(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '|' => escaped.push_str("\\|"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push(' ');
            }
            '\n' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}
