//! Jinja-backed [`TemplateEngine`]
//!
//! Output is source code, not HTML, so auto-escaping is disabled. Block tags
//! are trimmed the way hand-written code templates expect: a line holding only
//! `{% if %}` or `{% endfor %}` leaves no blank line behind.

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use super::{RenderError, TemplateEngine};
use crate::naming::{display_label, to_camel, to_pascal, to_persistence_snake};

/// Audit columns in their camelCase form, skipped by form templates
const AUDIT_FIELDS: &[&str] = &["createBy", "createTime", "delFlag", "updateBy", "updateTime"];

/// Template engine built on minijinja
///
/// Registers the helper filters every template may use:
///
/// | Name | Kind | Result |
/// |------|------|--------|
/// | `camel` | filter | camelCase |
/// | `pascal` | filter | `PascalCase` |
/// | `snake` | filter | persistence `snake_case` |
/// | `label` | filter | comment cut at the first `（` |
/// | `ts_type` | filter | TypeScript type for a backend type |
/// | `is_date(column)` | function | column holds a date or time |
/// | `is_audit_field(name)` | function | camelCase audit column |
#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Create an engine
    ///
    /// With `strict_undefined`, referencing a missing context key is a render
    /// error instead of an empty string.
    #[must_use]
    pub fn new(strict_undefined: bool) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        if strict_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }

        env.add_filter("camel", |value: Value| to_camel(&text(&value)));
        env.add_filter("pascal", |value: Value| to_pascal(&text(&value)));
        env.add_filter("snake", |value: Value| to_persistence_snake(&text(&value)));
        env.add_filter("label", |value: Value, fallback: Option<Value>| {
            let fallback = fallback.map(|v| text(&v)).unwrap_or_default();
            display_label(&text(&value), &fallback)
        });
        env.add_filter("ts_type", |value: Value| ts_type(&text(&value)).to_string());
        env.add_function("is_date", |column: Value| is_date(&column));
        env.add_function("is_audit_field", |name: Value| {
            AUDIT_FIELDS.contains(&text(&name).as_str())
        });

        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn check(&self, name: &str, body: &str) -> Result<(), RenderError> {
        // Compiled templates borrow their source, so parse in a scratch
        // environment rather than in the long-lived one.
        let scratch = Environment::new();
        scratch.template_from_named_str(name, body)?;
        Ok(())
    }

    fn render(
        &self,
        name: &str,
        body: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError> {
        Ok(self.env.render_named_str(name, body, context)?)
    }
}

/// String form of a template value; undefined and none become empty
fn text(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        String::new()
    } else if let Some(s) = value.as_str() {
        s.to_string()
    } else {
        value.to_string()
    }
}

/// TypeScript type used by generated models for a backend column type
fn ts_type(data_type: &str) -> &'static str {
    match data_type {
        "bool" => "boolean",
        "file" => "blob",
        "number" => "number",
        "json" => "any",
        _ => "string",
    }
}

/// Whether a serialized field describes a date or time column
fn is_date(column: &Value) -> bool {
    let attr = |key: &str| {
        column
            .get_attr(key)
            .map(|v| text(&v).to_lowercase())
            .unwrap_or_default()
    };

    let data_type = attr("dataType");
    matches!(data_type.as_str(), "autodate" | "datetime") || attr("htmlType") == "datetime"
}
