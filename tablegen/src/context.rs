//! Rendering context
//!
//! Every template is evaluated against the same JSON object, built once per
//! request. Besides the request itself the context carries:
//!
//! - `columns`: alias of `fields`
//! - `primaryColumn` / `primaryKey`: the detected primary field and its name
//! - `permissionPrefix`: `"{module}:{business}"` in persistence snake case
//! - naming variants of the module, business, function, popup and form names
//! - `tree_code`, `tree_parent_code`, `tree_name`, `parentMenuId` lifted out of
//!   `options`
//! - `tableLabel`: the table comment as a display label
//! - `constants`: the widget, query and category vocabularies
//!
//! | Source | camel | Pascal | passthrough | snake |
//! |--------|-------|--------|-------------|-------|
//! | `module_name` | `moduleName` | `ModuleName` | `_moduleName` | `module_name` |
//! | `business_name` | `businessName` | `BusinessName` | `_businessName` | `business_name` |
//! | `function_name` | `functionName` | `FunctionName` | `_functionName` | |
//! | `options.popup_type` | `popupComponent` | `PopupComponent` | `_popupComponent` | `popup_component` |
//! | `options.form_type` | `formComponent` | `FormComponent` | `_formComponent` | `form_component` |
//!
//! The snake column uses [`to_persistence_snake`], so `module_name` and
//! `business_name` in the context are the persistence identifiers, not the raw
//! request values (those stay available as `_moduleName` / `_businessName`).
//!
//! Construction is pure: identical requests yield identical contexts, and the
//! object's keys are sorted.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::metadata::{Category, FieldMetadata, HtmlType, QueryType};
use crate::naming::{capitalize, display_label, to_camel, to_persistence_snake};
use crate::request::GenerationRequest;

/// Context object passed to every template of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(Value);

impl RenderContext {
    /// Build the context for a request
    #[must_use]
    pub fn build(request: &GenerationRequest) -> Self {
        let mut ctx = match json!(request) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let primary = primary_column(&request.fields);
        let options = &request.options;

        ctx.insert("columns".into(), json!(request.fields));
        ctx.insert("primaryColumn".into(), json!(primary));
        ctx.insert(
            "primaryKey".into(),
            json!(primary.map_or("id", |field| field.name.as_str())),
        );
        ctx.insert(
            "permissionPrefix".into(),
            json!(format!(
                "{}:{}",
                to_persistence_snake(&request.module_name),
                to_persistence_snake(&request.business_name)
            )),
        );
        ctx.insert(
            "tableLabel".into(),
            json!(display_label(&request.comment, &request.name)),
        );

        insert_variants(&mut ctx, "moduleName", &request.module_name, Some("module_name"));
        insert_variants(&mut ctx, "businessName", &request.business_name, Some("business_name"));
        insert_variants(&mut ctx, "functionName", &request.function_name, None);
        insert_variants(
            &mut ctx,
            "popupComponent",
            options.popup_type.as_deref().unwrap_or_default(),
            Some("popup_component"),
        );
        insert_variants(
            &mut ctx,
            "formComponent",
            options.form_type.as_deref().unwrap_or_default(),
            Some("form_component"),
        );

        ctx.insert("tree_code".into(), json!(options.tree_code));
        ctx.insert("tree_parent_code".into(), json!(options.tree_parent_code));
        ctx.insert("tree_name".into(), json!(options.tree_name));
        ctx.insert("parentMenuId".into(), json!(options.parent_menu_id));
        ctx.insert("constants".into(), constants());

        Self(Value::Object(ctx))
    }

    /// Context as a JSON value
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// String value of a top-level key
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Consume the context, returning the JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// First flagged primary key, else the column literally named `id`
fn primary_column(fields: &[FieldMetadata]) -> Option<&FieldMetadata> {
    fields
        .iter()
        .find(|field| field.is_primary_key)
        .or_else(|| fields.iter().find(|field| field.name == "id"))
}

fn insert_variants(ctx: &mut Map<String, Value>, key: &str, raw: &str, snake_key: Option<&str>) {
    let camel = to_camel(raw);
    ctx.insert(capitalize(key), json!(capitalize(&camel)));
    ctx.insert(format!("_{key}"), json!(raw));
    ctx.insert(key.to_string(), json!(camel));
    if let Some(snake_key) = snake_key {
        ctx.insert(snake_key.to_string(), json!(to_persistence_snake(raw)));
    }
}

fn constants() -> Value {
    json!({
        "htmlTypes": HtmlType::ALL,
        "queryTypes": QueryType::ALL,
        "categories": Category::ALL,
    })
}
