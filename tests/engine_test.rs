use chrono::NaiveDate;
use objmd::{
    escape_markdown, Category, Mapping, MarkdownConfig, MarkdownEngine, ObjectRenderer,
    RenderContext, RendererTarget, Value,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

struct Tagged {
    name: &'static str,
    priority: i32,
}

impl ObjectRenderer for Tagged {
    fn name(&self) -> &str {
        self.name
    }

    fn render(&self, value: &Value, _context: &mut RenderContext<'_>) -> String {
        format!("<{}:{}>", self.name, value.plain_text())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[test]
fn escaping_doubles_exactly_once() {
    let once = escape_markdown("a*b", true);
    assert_eq!(once, "a\\*b");
    assert_eq!(escape_markdown(&once, true), "a\\\\\\*b");
}

#[test]
fn scalar_mapping_renders_table_with_one_data_row() {
    let engine = MarkdownEngine::new();
    let value = Value::from(Mapping::new().with("a", 1).with("b", 2));
    let output = engine.convert(&value);

    let lines: Vec<&str> = output.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines, vec!["| a | b |", "|---|---|", "| 1 | 2 |"]);
}

#[test]
fn mixed_mapping_renders_definition_list() {
    let engine = MarkdownEngine::new();
    let value = Value::from(Mapping::new().with("a", 1).with("b", vec![1, 2]));
    let output = engine.convert(&value);

    assert!(!output.contains('|'));
    assert!(output.contains("a: 1"));
    assert!(output.contains("b: [2 items]"));
}

#[test]
fn scalars_keep_their_literal_text() {
    let engine = MarkdownEngine::new();
    assert_eq!(engine.convert(&Value::from(42)), "42");
    assert_eq!(engine.convert(&Value::from(3.14159)), "3.14159");
    assert_eq!(engine.convert(&Value::from(true)), "true");
    assert_eq!(engine.convert(&Value::from(false)), "false");
}

#[test]
fn list_items_use_configured_marker_in_order() {
    for (style, marker) in [("dash", "-"), ("asterisk", "*"), ("plus", "+")] {
        let config = MarkdownConfig::builder().list_style(style).build();
        let engine = MarkdownEngine::with_config(config);
        let output = engine.convert(&Value::from(vec!["x", "y"]));

        let lines: Vec<&str> = output.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec![format!("{marker} x"), format!("{marker} y")]);
    }
}

#[test]
fn metadata_section_is_toggled_by_config() {
    let engine = MarkdownEngine::new();
    let metadata = Mapping::new().with("title", "T");
    let body = Value::from("body");

    let on = MarkdownConfig::builder().include_metadata(true).build();
    let output = engine.convert_with_metadata(&body, &metadata, &on);
    assert!(output.contains("Document Information"));
    assert!(output.contains("**title:** T"));

    let off = MarkdownConfig::builder().include_metadata(false).build();
    assert_eq!(engine.convert_with_metadata(&body, &metadata, &off), "body");
}

#[test]
fn null_metadata_values_are_dropped() {
    let engine = MarkdownEngine::new();
    let config = MarkdownConfig::builder().include_metadata(true).build();
    let metadata = Mapping::new().with("title", "T").with("author", Value::Null);

    let output = engine.convert_with_metadata(&Value::from("body"), &metadata, &config);
    assert!(output.contains("**title:** T"));
    assert!(!output.contains("author"));
}

#[test]
fn metadata_with_only_nulls_renders_plain_body() {
    let engine = MarkdownEngine::new();
    let config = MarkdownConfig::builder().include_metadata(true).build();
    let metadata = Mapping::new().with("author", Value::Null);

    assert_eq!(
        engine.convert_with_metadata(&Value::from("body"), &metadata, &config),
        "body"
    );
}

#[test]
fn metadata_dates_use_date_format() {
    let engine = MarkdownEngine::new();
    let config = MarkdownConfig::builder()
        .include_metadata(true)
        .date_format("%Y/%m/%d")
        .build();
    let created = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date");
    let metadata = Mapping::new().with("created", created);

    let output = engine.convert_with_metadata(&Value::from("x"), &metadata, &config);
    assert!(output.contains("- **created:** 2024/05/01\n"));
}

#[test]
fn higher_priority_renderer_wins() {
    let engine = MarkdownEngine::new();
    engine
        .register_renderer(Category::String, Tagged { name: "low", priority: 50 })
        .expect("register low");
    engine
        .register_renderer(Category::String, Tagged { name: "high", priority: 100 })
        .expect("register high");

    let output = engine.convert(&Value::from("v"));
    assert_eq!(output, "<high:v>");
    assert!(!output.contains("low"));
}

#[test]
fn unregistering_restores_builtin() {
    let engine = MarkdownEngine::new();
    engine
        .register_renderer(Category::Numeric, Tagged { name: "num", priority: 1 })
        .expect("register");
    assert!(engine.has_renderer("num"));
    assert_eq!(engine.convert(&Value::from(7)), "<num:7>");

    assert!(engine.unregister_renderer("num"));
    assert!(!engine.has_renderer("num"));
    assert_eq!(engine.convert(&Value::from(7)), "7");
}

#[test]
fn custom_renderers_apply_to_nested_values() {
    let engine = MarkdownEngine::new();
    engine
        .register_renderer(Category::Boolean, Tagged { name: "flag", priority: 1 })
        .expect("register");

    let value = Value::from(vec![true, false]);
    assert_eq!(engine.convert(&value), "- <flag:true>\n- <flag:false>\n\n");
}

#[test]
fn type_targeted_renderer_handles_opaque_values() {
    struct Money(i64);
    impl fmt::Display for Money {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    struct MoneyRenderer;
    impl ObjectRenderer for MoneyRenderer {
        fn name(&self) -> &str {
            "MoneyRenderer"
        }

        fn render(&self, value: &Value, _context: &mut RenderContext<'_>) -> String {
            match value {
                Value::Opaque(o) => match o.downcast_ref::<Money>() {
                    Some(m) => format!("${}.{:02}", m.0 / 100, m.0 % 100),
                    None => String::new(),
                },
                _ => String::new(),
            }
        }
    }

    let engine = MarkdownEngine::new();
    assert_eq!(engine.convert(&Value::opaque(Money(1234))), "1234");

    engine
        .register_renderer(RendererTarget::type_of::<Money>(), MoneyRenderer)
        .expect("register");
    assert_eq!(engine.convert(&Value::opaque(Money(1234))), "$12.34");
}

#[test]
fn blank_renderer_name_is_rejected() {
    let engine = MarkdownEngine::new();
    let result = engine.register_renderer(Category::Null, Tagged { name: "", priority: 0 });
    assert!(matches!(result, Err(objmd::Error::InvalidRenderer(_))));
}

#[test]
fn deeply_nested_mappings_terminate() {
    let mut value = Value::from(Mapping::new().with("leaf", 1));
    for i in 0..500 {
        value = Value::from(Mapping::new().with(format!("level{i}"), value));
    }
    let config = MarkdownConfig::builder().max_list_depth(3).build();
    let output = MarkdownEngine::new().convert_with(&value, &config);
    assert_eq!(output, "level499: [1 items]\n\n");
}

#[test]
fn deeply_nested_sequences_terminate() {
    let mut value = Value::from(vec![1, 2]);
    for _ in 0..500 {
        value = Value::Sequence(vec![Value::from("x"), value]);
    }
    let config = MarkdownConfig::builder().max_list_depth(3).build();
    let output = MarkdownEngine::new().convert_with(&value, &config);
    assert_eq!(output, "- x\n  - x\n    - x\n    - [2 items]\n\n");
}

#[test]
fn serialize_types_render_through_serde() {
    #[derive(Serialize)]
    struct Package {
        name: &'static str,
        downloads: u64,
        yanked: bool,
    }

    let engine = MarkdownEngine::new();
    let output = engine
        .convert_serialize(&Package {
            name: "objmd",
            downloads: 1200,
            yanked: false,
        })
        .expect("serializable");
    assert_eq!(
        output,
        "| name | downloads | yanked |\n|------|-----------|--------|\n| objmd | 1200 | false |\n\n"
    );
}

#[test]
fn serialized_dates_follow_date_format() {
    #[derive(Serialize)]
    struct Milestone {
        name: &'static str,
        due: NaiveDate,
    }

    let config = MarkdownConfig::builder().date_format("%d/%m/%Y").build();
    let engine = MarkdownEngine::with_config(config);
    let output = engine
        .convert_serialize(&Milestone {
            name: "beta",
            due: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
        })
        .expect("serializable");
    assert_eq!(
        output,
        "| name | due |\n|------|-----|\n| beta | 01/05/2024 |\n\n"
    );
}

#[test]
fn null_renders_empty() {
    assert_eq!(MarkdownEngine::new().convert(&Value::Null), "");
}

#[test]
fn engine_serves_concurrent_conversions() {
    let engine = Arc::new(MarkdownEngine::new());
    let value = Value::from(vec!["a", "b"]);

    std::thread::scope(|scope| {
        for i in 0..4 {
            let engine = Arc::clone(&engine);
            let value = value.clone();
            scope.spawn(move || {
                if i == 0 {
                    engine
                        .register_renderer(Category::Numeric, Tagged { name: "n", priority: 0 })
                        .expect("register");
                }
                for _ in 0..50 {
                    assert_eq!(engine.convert(&value), "- a\n- b\n\n");
                }
            });
        }
    });
    assert!(engine.has_renderer("n"));
}

#[test]
fn validity_check_is_exposed_on_engine() {
    let engine = MarkdownEngine::new();
    assert!(engine.is_valid_markdown("[ok](https://example.com)"));
    assert!(!engine.is_valid_markdown("[](https://example.com)"));
}
