use super::{ObjectRenderer, RenderContext};
use crate::config::DEFAULT_DATE_FORMAT;
use crate::core::{Temporal, Value};
use std::fmt::Write;

/// Formats `temporal` with a strftime-style `pattern`.
///
/// Patterns that do not apply to the value (a time field on a plain date,
/// an offset on a naive date-time) or are malformed fall back to the
/// ISO-8601 form instead of failing.
///
/// ```
/// use chrono::NaiveDate;
/// use objmd::Temporal;
/// use objmd::renderer::format_temporal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let stamp = Temporal::DateTime(date.and_hms_opt(10, 30, 0).unwrap());
/// assert_eq!(format_temporal(&stamp, "%d/%m/%Y"), "15/01/2024");
/// assert_eq!(format_temporal(&Temporal::Date(date), "%H:%M"), "2024-01-15");
/// ```
pub fn format_temporal(temporal: &Temporal, pattern: &str) -> String {
    let pattern = if pattern.trim().is_empty() {
        DEFAULT_DATE_FORMAT
    } else {
        pattern
    };

    let mut out = String::new();
    let formatted = match temporal {
        Temporal::Date(d) => write!(out, "{}", d.format(pattern)),
        Temporal::Time(t) => write!(out, "{}", t.format(pattern)),
        Temporal::DateTime(dt) => write!(out, "{}", dt.format(pattern)),
        Temporal::Zoned(dt) => write!(out, "{}", dt.format(pattern)),
    };

    match formatted {
        Ok(()) => out,
        Err(_) => {
            tracing::trace!(pattern, "Date format does not apply, using ISO-8601");
            temporal.to_string()
        }
    }
}

/// Dates and times, formatted with the configured `date_format`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalRenderer;

impl ObjectRenderer for TemporalRenderer {
    fn name(&self) -> &str {
        "TemporalRenderer"
    }

    fn render(&self, value: &Value, context: &mut RenderContext<'_>) -> String {
        match value {
            Value::Temporal(temporal) => format_temporal(temporal, context.config().date_format()),
            other => context.escape(&other.plain_text()),
        }
    }

    fn supports(&self, value: &Value) -> bool {
        matches!(value, Value::Temporal(_))
    }

    fn priority(&self) -> i32 {
        65
    }

    fn description(&self) -> String {
        "Renders dates and times with the configured date format".to_string()
    }
}
