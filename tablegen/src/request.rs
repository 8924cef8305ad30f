//! Generation request payload
//!
//! A [`GenerationRequest`] is the complete, request-scoped input of one
//! generation run: the table, its normalized fields, the category and the
//! naming/option choices made in the configuration editor.

use serde::{Deserialize, Serialize};

use crate::metadata::{Category, FieldMetadata};

/// Per-request generation options
///
/// Tree options are only meaningful for [`Category::Tree`]; they are passed to
/// templates verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Column used as the tree node key (e.g. `dept_id`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_code: Option<String>,
    /// Column holding the parent key (e.g. `parent_id`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_parent_code: Option<String>,
    /// Column displayed as the node label (e.g. `dept_name`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_name: Option<String>,
    /// Popup component kind (`modal` or `drawer`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_type: Option<String>,
    /// Form component kind (`useForm` or `native`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
    /// Menu under which the generated page is registered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_menu_id: Option<serde_json::Value>,
}

/// Input of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    /// Table name
    pub name: String,
    /// Table comment
    pub comment: String,
    /// Normalized fields in column order
    pub fields: Vec<FieldMetadata>,
    /// Generation shape
    #[serde(rename = "tpl_category")]
    pub category: Category,
    /// Module (subsystem) name, e.g. `system`
    pub module_name: String,
    /// Business name, e.g. `sysUser`
    pub business_name: String,
    /// Function name, used in class and page descriptions
    pub function_name: String,
    /// Optional generation options
    pub options: GenerationOptions,
}

impl GenerationRequest {
    /// Parse a request from JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object of the request shape
    /// or carries an unknown category.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the request as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
