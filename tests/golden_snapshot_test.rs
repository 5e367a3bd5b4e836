use objmd::{Mapping, MarkdownBuilder, MarkdownConfig, MarkdownEngine, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn golden_snapshot_builder_document() {
    let config = MarkdownConfig::default();
    let mut builder = MarkdownBuilder::new(&config);

    let table = builder.table(
        &["Crate", "Version"],
        &[vec!["objmd", "0.3.2"], vec!["serde", "1.0"]],
    );
    let code = builder.code_block("cargo add objmd", Some("bash"));
    let quote = builder.blockquote("Rendering never fails.\nUnsupported input degrades to text.");
    let features = builder.unordered_list(0, &["tables", "lists"]);
    let steps = builder.ordered_list(0, 1, &["install", "render"]);

    builder
        .heading("Release Notes", 1)
        .paragraph("Version 0.3.2 adds TOML configuration.")
        .append(&table)
        .append(&code)
        .append(&quote)
        .append(&features)
        .append(&steps)
        .link("Docs", "https://docs.rs/objmd")
        .newline()
        .newline()
        .horizontal_rule()
        .image("logo", "logo.png", Some("objmd logo"));

    let markdown = builder.build();
    assert!(objmd::is_valid_markdown(&markdown));

    let expected = include_str!("golden/builder_document_expected.md");
    assert_eq!(markdown.trim_end(), expected.trim_end());
}

#[test]
fn golden_snapshot_metadata_document() {
    let engine = MarkdownEngine::new();
    let config = MarkdownConfig::builder()
        .include_tables(false)
        .include_metadata(true)
        .build();

    let content = Value::from(json!([
        {"name": "parse", "ok": true},
        {"name": "render", "ok": false},
        ["nested", "list"],
        "tail_item"
    ]));
    let metadata = Mapping::new()
        .with("title", "Pipeline")
        .with("owner", Value::Null)
        .with("stages", vec!["parse", "render"]);

    let markdown = engine.convert_with_metadata(&content, &metadata, &config);

    let expected = include_str!("golden/metadata_document_expected.md");
    assert_eq!(markdown.trim_end(), expected.trim_end());
}

#[test]
fn golden_snapshot_setext_pipe_table_document() {
    let config = MarkdownConfig::builder()
        .heading_style("setext")
        .table_format("pipe")
        .build();
    let engine = MarkdownEngine::with_config(config.clone());

    let mut builder = engine.create_builder(Some(&config));
    builder.heading("Report", 1);

    let row = json!({"metric": "latency", "value": 12.5, "unit": "ms"});
    builder.append(engine.convert(&Value::from(row)));
    builder.append(engine.convert(&Value::from(vec!["* starred", "plain"])));

    let expected = include_str!("golden/table_document_expected.md");
    assert_eq!(builder.build().trim_end(), expected.trim_end());
}
