//! Field inference rules
//!
//! Classifies a raw column into UI, query and persistence behaviour from naming
//! conventions alone. The rules never fail: any column, however malformed,
//! yields a [`FieldMetadata`]. Templates depend on the exact classification,
//! so the substring checks and their precedence are part of the contract.

use serde::{Deserialize, Serialize};

use super::{Category, FieldMetadata, HtmlType, QueryType, RawColumn, RawTable};
use crate::naming::{display_label, to_camel};
use crate::request::{GenerationOptions, GenerationRequest};

/// Columns maintained by the platform itself
const SYSTEM_FIELDS: &[&str] = &[
    "collectionId",
    "collectionName",
    "create_by",
    "create_dept",
    "create_time",
    "created",
    "del_flag",
    "id",
    "tenant_id",
    "update_by",
    "update_time",
    "updated",
];

/// Tree bookkeeping columns, system-maintained for tree tables only
const TREE_SYSTEM_FIELDS: &[&str] = &["ancestors", "children"];

/// Free-text columns that never make sense as query conditions
const LONG_TEXT_FIELDS: &[&str] = &["remark", "content", "description"];

/// Name fragments that switch the query to a fuzzy match
const LIKE_MARKERS: &[&str] = &["name", "title", "nickname"];

/// Name/type fragments that mark a date or time column
const DATE_MARKERS: &[&str] = &["_date", "_time"];

/// Values applied when importing a raw table as a new request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportDefaults {
    /// Module name assigned to imported tables
    pub module_name: String,
    /// Category assigned to imported tables
    pub category: Category,
    /// Popup component kind
    pub popup_type: String,
    /// Form component kind
    pub form_type: String,
    /// Parent menu id
    pub parent_menu_id: u64,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            module_name: "system".to_string(),
            category: Category::Crud,
            popup_type: "modal".to_string(),
            form_type: "useForm".to_string(),
            parent_menu_id: 0,
        }
    }
}

fn is_system(name: &str, category: Category) -> bool {
    SYSTEM_FIELDS.contains(&name)
        || (category == Category::Tree && TREE_SYSTEM_FIELDS.contains(&name))
}

fn is_hidden(name: &str, category: Category) -> bool {
    (is_system(name, category) && name != "id") || name == "remark"
}

fn is_long_text(name: &str) -> bool {
    LONG_TEXT_FIELDS.contains(&name)
}

fn is_date_marked(name: &str, data_type: &str) -> bool {
    DATE_MARKERS
        .iter()
        .any(|marker| data_type.contains(marker) || name.contains(marker))
}

fn infer_query_type(name: &str, data_type: &str) -> QueryType {
    if LIKE_MARKERS.iter().any(|marker| name.contains(marker)) {
        QueryType::Like
    } else if is_date_marked(name, data_type) {
        QueryType::Between
    } else {
        QueryType::Eq
    }
}

fn infer_html_type(name: &str, data_type: &str) -> HtmlType {
    if is_long_text(name) {
        HtmlType::Textarea
    } else if is_date_marked(name, data_type) {
        HtmlType::Datetime
    } else if data_type.contains("number") || data_type.contains("int") {
        HtmlType::Input
    } else if data_type.contains("bool") {
        HtmlType::Radio
    } else {
        HtmlType::Input
    }
}

/// Normalize one raw column
///
/// `index` is the column's position in the table and becomes its sort index.
/// Primary keys are always editable and listed, whatever their name. A column
/// without a name is treated like a system column: nothing may edit, list or
/// query it.
#[must_use]
pub fn normalize_column(raw: &RawColumn, index: usize, category: Category) -> FieldMetadata {
    let name = raw.name.as_str();
    let data_type = raw.data_type.as_str();
    let is_primary_key = raw.primary_key.unwrap_or(false);
    let unnamed = name.trim().is_empty();
    let system = unnamed || is_system(name, category);

    FieldMetadata {
        name: raw.name.clone(),
        comment: display_label(raw.comment.as_deref().unwrap_or_default(), name),
        data_type: raw.data_type.clone(),
        html_type: infer_html_type(name, data_type),
        query_type: infer_query_type(name, data_type),
        editable: is_primary_key || !system,
        insertable: !system,
        list_visible: is_primary_key || !(unnamed || is_hidden(name, category)),
        queryable: !system && !is_long_text(name),
        // Never guessed; adjusted by hand in the configuration editor.
        required: false,
        is_primary_key,
        sort_index: index,
    }
}

/// Normalize every column of a table, preserving column order
#[must_use]
pub fn normalize_fields(columns: &[RawColumn], category: Category) -> Vec<FieldMetadata> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| normalize_column(column, index, category))
        .collect()
}

/// Turn an introspected table into an editable generation request
///
/// The business name is the camelCase table name and the function name the
/// raw table name; module, category and component kinds come from `defaults`.
#[must_use]
pub fn import_table(table: &RawTable, defaults: &ImportDefaults) -> GenerationRequest {
    let fields = normalize_fields(&table.fields, defaults.category);
    tracing::debug!(
        table = %table.name,
        columns = fields.len(),
        category = %defaults.category,
        "imported table"
    );

    GenerationRequest {
        name: table.name.clone(),
        comment: table.comment.clone(),
        fields,
        category: defaults.category,
        module_name: defaults.module_name.clone(),
        business_name: to_camel(&table.name),
        function_name: table.name.clone(),
        options: GenerationOptions {
            popup_type: Some(defaults.popup_type.clone()),
            form_type: Some(defaults.form_type.clone()),
            parent_menu_id: Some(defaults.parent_menu_id.into()),
            ..GenerationOptions::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn crud(column: &RawColumn) -> FieldMetadata {
        normalize_column(column, 0, Category::Crud)
    }

    #[test]
    fn test_plain_column() {
        let field = crud(&RawColumn::new("status", "text").with_comment("状态（0正常 1停用）"));
        assert_eq!(field.comment, "状态");
        assert!(field.editable);
        assert!(field.insertable);
        assert!(field.list_visible);
        assert!(field.queryable);
        assert!(!field.required);
        assert!(!field.is_primary_key);
        assert_eq!(field.query_type, QueryType::Eq);
        assert_eq!(field.html_type, HtmlType::Input);
    }

    #[test]
    fn test_comment_falls_back_to_name() {
        assert_eq!(crud(&RawColumn::new("title", "text")).comment, "title");
    }

    #[test]
    fn test_system_field() {
        let field = crud(&RawColumn::new("create_time", "datetime"));
        assert!(!field.editable);
        assert!(!field.insertable);
        assert!(!field.list_visible);
        assert!(!field.queryable);
        assert_eq!(field.html_type, HtmlType::Datetime);
        assert_eq!(field.query_type, QueryType::Between);
    }

    #[test]
    fn test_id_without_primary_flag_stays_listed() {
        let field = crud(&RawColumn::new("id", "text"));
        assert!(!field.editable);
        assert!(!field.queryable);
        assert!(field.list_visible);
        assert!(!field.is_primary_key);
    }

    #[test]
    fn test_primary_key_override() {
        let field = crud(&RawColumn::new("id", "text").primary());
        assert!(field.is_primary_key);
        assert!(field.editable);
        assert!(field.list_visible);
        assert!(!field.insertable);
        assert!(!field.queryable);
    }

    #[test]
    fn test_remark_is_hidden_textarea() {
        let field = crud(&RawColumn::new("remark", "text"));
        assert!(field.editable);
        assert!(!field.list_visible);
        assert!(!field.queryable);
        assert_eq!(field.html_type, HtmlType::Textarea);
    }

    #[test]
    fn test_long_text_not_queryable() {
        for name in ["content", "description"] {
            let field = crud(&RawColumn::new(name, "editor"));
            assert!(!field.queryable, "{name}");
            assert!(field.list_visible, "{name}");
            assert_eq!(field.html_type, HtmlType::Textarea, "{name}");
        }
    }

    #[test]
    fn test_like_beats_date_marker() {
        let field = crud(&RawColumn::new("name_time", "text"));
        assert_eq!(field.query_type, QueryType::Like);
        assert_eq!(field.html_type, HtmlType::Datetime);
    }

    #[test]
    fn test_date_marker_in_type() {
        let field = crud(&RawColumn::new("deadline", "custom_date"));
        assert_eq!(field.query_type, QueryType::Between);
        assert_eq!(field.html_type, HtmlType::Datetime);
    }

    #[test]
    fn test_plain_date_type_is_not_marked() {
        let field = crud(&RawColumn::new("published", "datetime"));
        assert_eq!(field.query_type, QueryType::Eq);
        assert_eq!(field.html_type, HtmlType::Input);
    }

    #[test]
    fn test_number_checked_before_bool() {
        assert_eq!(crud(&RawColumn::new("enabled", "bool")).html_type, HtmlType::Radio);
        assert_eq!(crud(&RawColumn::new("sort", "number")).html_type, HtmlType::Input);
        assert_eq!(crud(&RawColumn::new("flag", "int_bool")).html_type, HtmlType::Input);
    }

    #[test]
    fn test_malformed_column_yields_inert_field() {
        let field = crud(&RawColumn::default());
        assert_eq!(field.name, "");
        assert_eq!(field.comment, "");
        assert_eq!(field.html_type, HtmlType::Input);
        assert_eq!(field.query_type, QueryType::Eq);
        assert!(!field.required);
        assert!(!field.is_primary_key);
        assert!(!field.editable);
        assert!(!field.insertable);
        assert!(!field.list_visible);
        assert!(!field.queryable);
    }

    #[test]
    fn test_blank_name_is_inert_unless_primary() {
        let blank = crud(&RawColumn::new("  ", "text"));
        assert!(!blank.editable);
        assert!(!blank.insertable);
        assert!(!blank.list_visible);
        assert!(!blank.queryable);

        let key = crud(&RawColumn::new("", "text").primary());
        assert!(key.editable);
        assert!(key.list_visible);
        assert!(!key.insertable);
        assert!(!key.queryable);
    }

    #[test]
    fn test_tree_bookkeeping_columns() {
        let column = RawColumn::new("ancestors", "text");
        let in_tree = normalize_column(&column, 0, Category::Tree);
        assert!(!in_tree.editable);
        assert!(!in_tree.list_visible);
        assert!(!in_tree.queryable);

        let in_crud = normalize_column(&column, 0, Category::Crud);
        assert!(in_crud.editable);
        assert!(in_crud.list_visible);
    }

    #[test]
    fn test_sort_index_follows_column_order() {
        let columns = vec![
            RawColumn::new("id", "text").primary(),
            RawColumn::new("title", "text"),
            RawColumn::new("create_time", "datetime"),
        ];
        let fields = normalize_fields(&columns, Category::Crud);
        let order: Vec<_> = fields.iter().map(|f| (f.name.as_str(), f.sort_index)).collect();
        assert_eq!(order, vec![("id", 0), ("title", 1), ("create_time", 2)]);
    }

    #[test]
    fn test_import_table_defaults() {
        let table = RawTable {
            name: "sys_oper_log".to_string(),
            comment: "操作日志（审计）".to_string(),
            fields: vec![RawColumn::new("id", "text").primary()],
        };
        let request = import_table(&table, &ImportDefaults::default());

        assert_eq!(request.business_name, "sysOperLog");
        assert_eq!(request.function_name, "sys_oper_log");
        assert_eq!(request.module_name, "system");
        assert_eq!(request.comment, "操作日志（审计）");
        assert_eq!(request.category, Category::Crud);
        assert_eq!(request.options.popup_type.as_deref(), Some("modal"));
        assert_eq!(request.options.form_type.as_deref(), Some("useForm"));
        assert_eq!(request.options.parent_menu_id, Some(serde_json::json!(0)));
        assert_eq!(request.fields.len(), 1);
    }

    fn system_name() -> impl Strategy<Value = String> {
        prop::sample::select(SYSTEM_FIELDS).prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn system_fields_are_locked(name in system_name(), data_type in "[a-z_]{0,10}") {
            let field = crud(&RawColumn::new(name, data_type));
            prop_assert!(!field.editable);
            prop_assert!(!field.insertable);
            prop_assert!(!field.queryable);
        }

        #[test]
        fn primary_keys_are_editable_and_listed(
            name in "[a-zA-Z_]{0,16}",
            data_type in "[a-z_]{0,10}",
            tree in any::<bool>(),
        ) {
            let category = if tree { Category::Tree } else { Category::Crud };
            let field = normalize_column(&RawColumn::new(name, data_type).primary(), 0, category);
            prop_assert!(field.is_primary_key);
            prop_assert!(field.editable);
            prop_assert!(field.list_visible);
        }

        #[test]
        fn name_like_columns_use_fuzzy_query(
            prefix in "[a-z_]{0,6}",
            marker in prop::sample::select(LIKE_MARKERS),
            suffix in "[a-z_]{0,6}",
            data_type in "[a-z_]{0,10}",
        ) {
            let name = format!("{prefix}{marker}{suffix}");
            prop_assume!(!SYSTEM_FIELDS.contains(&name.as_str()));
            let field = crud(&RawColumn::new(name, data_type));
            prop_assert_eq!(field.query_type, QueryType::Like);
        }

        #[test]
        fn normalization_never_requires(name in ".{0,20}", data_type in ".{0,20}") {
            let field = crud(&RawColumn::new(name, data_type));
            prop_assert!(!field.required);
        }
    }
}
