//! Table and field metadata
//!
//! Raw table descriptions arrive from a data-source introspection call and are
//! normalized into [`FieldMetadata`] records that drive every template. The
//! inference rules live in [`normalize`].
//!
//! # Wire format
//!
//! ```json
//! {
//!   "name": "article",
//!   "comment": "文章（内容）",
//!   "fields": [
//!     { "name": "id", "type": "string", "primaryKey": true },
//!     { "name": "title", "type": "string", "comment": "标题" }
//!   ]
//! }
//! ```

pub mod normalize;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use normalize::{import_table, normalize_column, normalize_fields, ImportDefaults};

/// Generation shape of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Flat list with create/read/update/delete pages
    #[default]
    Crud,
    /// Hierarchical table rendered as a tree
    Tree,
}

impl Category {
    /// Every supported category
    pub const ALL: [Self; 2] = [Self::Crud, Self::Tree];

    /// Lowercase tag used in template file names and payloads
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crud => "crud",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crud" => Ok(Self::Crud),
            "tree" => Ok(Self::Tree),
            other => Err(format!("unknown category '{other}', expected crud or tree")),
        }
    }
}

/// Input widget used for a field in generated forms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HtmlType {
    /// Single-line text input
    #[default]
    Input,
    /// Multi-line text area
    Textarea,
    /// Date/time picker
    Datetime,
    /// Radio group
    Radio,
    /// Drop-down select
    Select,
    /// Checkbox group
    Checkbox,
    /// Rich text editor
    Editor,
    /// Image upload
    ImageUpload,
    /// File upload
    FileUpload,
}

impl HtmlType {
    /// Every widget, in editor order
    pub const ALL: [Self; 9] = [
        Self::Input,
        Self::Textarea,
        Self::Datetime,
        Self::Radio,
        Self::Select,
        Self::Checkbox,
        Self::Editor,
        Self::ImageUpload,
        Self::FileUpload,
    ];
}

/// Comparison used when a field is a query condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryType {
    /// Equal
    #[default]
    Eq,
    /// Not equal
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Fuzzy match
    Like,
    /// Inclusive range
    Between,
}

impl QueryType {
    /// Every comparison, in editor order
    pub const ALL: [Self; 8] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
        Self::Between,
    ];
}

/// A column as reported by data-source introspection
///
/// Every property is optional on the wire so that malformed payloads still
/// normalize into some field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawColumn {
    /// Column name
    pub name: String,
    /// Backend-native type string
    #[serde(rename = "type")]
    pub data_type: String,
    /// Column comment, may carry a full-width parenthetical
    pub comment: Option<String>,
    /// Whether the column is the primary key
    pub primary_key: Option<bool>,
}

impl RawColumn {
    /// Create a column with a name and type
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    /// Set the column comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark the column as primary key
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.primary_key = Some(true);
        self
    }
}

/// A table as reported by data-source introspection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTable {
    /// Table (collection) name
    pub name: String,
    /// Table comment
    pub comment: String,
    /// Columns in declaration order
    pub fields: Vec<RawColumn>,
}

impl RawTable {
    /// Parse a table description from JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object of the table shape.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Canonical per-column metadata consumed by templates
///
/// Serialized in camelCase; the short keys persisted by the configuration
/// editor (`type`, `edit`, `insert`, `list`, `query`, `pk`, `sort`) are
/// accepted when reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldMetadata {
    /// Column name
    pub name: String,
    /// Display label
    pub comment: String,
    /// Backend-native type
    #[serde(alias = "type")]
    pub data_type: String,
    /// Input widget
    pub html_type: HtmlType,
    /// Query comparison
    pub query_type: QueryType,
    /// Shown in the edit form
    #[serde(alias = "edit")]
    pub editable: bool,
    /// Shown in the create form
    #[serde(alias = "insert")]
    pub insertable: bool,
    /// Shown as a list column
    #[serde(alias = "list")]
    pub list_visible: bool,
    /// Offered as a query condition
    #[serde(alias = "query")]
    pub queryable: bool,
    /// Validation requires a value
    pub required: bool,
    /// Primary key column
    #[serde(alias = "pk")]
    pub is_primary_key: bool,
    /// Original column position
    #[serde(alias = "sort")]
    pub sort_index: usize,
}
