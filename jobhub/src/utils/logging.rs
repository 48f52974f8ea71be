use std::collections::HashMap;

use chrono::Utc;
use color_eyre::eyre::WrapErr;
use jobhub_utils::env_utils::get_env_var_or_default;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Span fields shown in their own columns rather than in the field list.
const COLUMN_FIELDS: &[&str] = &["role", "action"];

#[derive(Debug, Clone, Default)]
pub struct CustomSpanFields {
    pub filtered_display: String,
    pub raw_fields: HashMap<String, String>,
}

impl CustomSpanFields {
    fn add_field(&mut self, name: &str, value: String) {
        if !COLUMN_FIELDS.contains(&name) {
            if !self.filtered_display.is_empty() {
                self.filtered_display.push_str(", ");
            }
            self.filtered_display.push_str(&format!("{}={}", name, value));
        }
        self.raw_fields.insert(name.to_string(), value);
    }

    /// Value of `name` on this span, `-` when absent.
    fn column(&self, name: &str) -> &str {
        self.raw_fields.get(name).map(String::as_str).unwrap_or("-")
    }
}

#[derive(Default)]
struct SpanFieldCollector {
    fields: CustomSpanFields,
}

impl Visit for SpanFieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let formatted_value = format!("{:?}", value).trim_matches('"').to_string();
        self.fields.add_field(field.name(), formatted_value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.add_field(field.name(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.add_field(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.add_field(field.name(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.add_field(field.name(), value.to_string());
    }
}

/// Stores each span's fields in its extensions so the formatters can print them.
pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };

        let mut collector = SpanFieldCollector::default();
        attrs.record(&mut collector);
        span.extensions_mut().insert(collector.fields);
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };

        let mut extensions = span.extensions_mut();
        let existing_fields = extensions.remove::<CustomSpanFields>().unwrap_or_default();

        let mut collector = SpanFieldCollector { fields: existing_fields };
        values.record(&mut collector);
        extensions.insert(collector.fields);
    }
}

/// Walks from the current span to the root and returns the innermost value of each column field.
fn span_columns<S, N>(ctx: &FmtContext<'_, S, N>) -> (String, String)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    let mut role = None;
    let mut action = None;
    if let Some(scope) = ctx.event_scope() {
        for span in scope {
            if let Some(fields) = span.extensions().get::<CustomSpanFields>() {
                if role.is_none() && fields.raw_fields.contains_key("role") {
                    role = Some(fields.column("role").to_string());
                }
                if action.is_none() && fields.raw_fields.contains_key("action") {
                    action = Some(fields.column("action").to_string());
                }
            }
        }
    }
    (role.unwrap_or_else(|| "-".to_string()), action.unwrap_or_else(|| "-".to_string()))
}

// Pretty formatter is formatted for console readability
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Utc::now().format("%y-%m-%d %H:%M:%S").to_string();

        let ts_color = "\x1b[96m";
        let level_color = match *meta.level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };
        let msg_color = "\x1b[97m";
        let column_color = "\x1b[92m";
        let reset = "\x1b[0m";
        let dim_color = "\x1b[90m";

        let (role, action) = span_columns(ctx);

        let mut visitor = FieldExtractor::default();
        event.record(&mut visitor);

        // Timestamp | Level | Role | Action | Service | Message and fields
        write!(writer, "{}{}{} ", ts_color, now, reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<5}{} ", level_color, *meta.level(), reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<6}{} ", column_color, role, reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<7}{} ", column_color, action, reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;
        write!(writer, "{}{:<8}{} ", column_color, extract_service_name(meta.target()), reset)?;
        write!(writer, "{}|{} ", dim_color, reset)?;

        write!(writer, "{}{}{}", msg_color, visitor.message, reset)?;

        if !visitor.meta.is_empty() || !visitor.fields.is_empty() {
            write!(writer, " (")?;
            if !visitor.meta.is_empty() {
                write!(writer, "{}{}{}", msg_color, visitor.meta, reset)?;
                if !visitor.fields.is_empty() {
                    write!(writer, ", ")?;
                }
            }
            if !visitor.fields.is_empty() {
                write!(writer, "{}{}{}", msg_color, visitor.fields, reset)?;
            }
            write!(writer, ")")?;
        }

        writeln!(writer)
    }
}

#[derive(Default)]
struct FieldExtractor {
    message: String,
    fields: String,
    meta: String,
}

impl Visit for FieldExtractor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let fixed_field_color = "\x1b[90m";
        let reset = "\x1b[0m";

        if field.name() == "message" {
            self.message = format!("{:?}", value).trim_matches('"').to_string();
            return;
        }

        let formatted_value = format!("{:?}", value).trim_matches('"').to_string();
        let formatted_field = format!("{}{}={}{}", fixed_field_color, field.name(), formatted_value, reset);

        // job ids lead the field list
        let target = if field.name() == "job_id" { &mut self.meta } else { &mut self.fields };
        if !target.is_empty() {
            target.push_str(", ");
        }
        target.push_str(&formatted_field);
    }
}

// JSON formatter, one object per line
pub struct JsonEventFormatter;

#[derive(Default)]
struct JsonFieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for JsonFieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let v = format!("{:?}", value).trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = Some(v);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(v));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let ts = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut visitor = JsonFieldVisitor::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert("timestamp".to_string(), Value::String(ts));
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        root.insert("service".to_string(), Value::String(extract_service_name(meta.target()).to_string()));
        if let Some(file) = meta.file() {
            root.insert("filename".to_string(), Value::String(file.to_string()));
        }
        if let Some(line) = meta.line() {
            root.insert("line_number".to_string(), Value::from(line));
        }
        if let Some(message) = visitor.message.take() {
            root.insert("message".to_string(), Value::String(message));
        }

        // span fields first so event fields win on name clashes
        let mut all_fields = Map::new();
        if let Some(span) = ctx.lookup_current() {
            all_fields.insert("span_name".to_string(), Value::String(span.metadata().name().to_string()));
            if let Some(custom_fields) = span.extensions().get::<CustomSpanFields>() {
                for (key, value) in &custom_fields.raw_fields {
                    all_fields.insert(key.clone(), Value::String(value.clone()));
                }
            }
        }
        all_fields.extend(visitor.fields);

        if !all_fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(all_fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Initialize the tracing subscriber with
/// - PrettyFormatter for console readability (when LOG_FORMAT != "json")
/// - JsonEventFormatter for json logging (when LOG_FORMAT = "json")
///
/// Logs go to stderr; stdout carries command output. color_eyre is installed for panic reports.
pub fn init_logging() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse("jobhub=info")
            .wrap_err("Invalid default log filter")?,
    };

    let log_format = get_env_var_or_default("LOG_FORMAT", "pretty");

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true).with_file(true).with_line_number(true);
    let fmt_layer = if log_format == "json" {
        fmt_layer.event_format(JsonEventFormatter).boxed()
    } else {
        fmt_layer.event_format(PrettyFormatter).boxed()
    };

    let subscriber =
        Registry::default().with(env_filter).with(FieldCollectorLayer).with(fmt_layer).with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).wrap_err("Failed to set global default subscriber")?;
    Ok(())
}

/// Maps crate names to short display names for the service column
fn extract_service_name(target: &str) -> &'static str {
    if target.starts_with("jobhub_utils") {
        "UTILS"
    } else if target.starts_with("jobhub::board") {
        "BOARD"
    } else if target.starts_with("jobhub::core") {
        "API"
    } else if target.starts_with("jobhub") {
        "-"
    } else {
        "EXTERNAL"
    }
}
