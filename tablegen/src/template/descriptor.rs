//! Template descriptors and category detection
//!
//! Category tags are encoded in file names (`crud_index.vue.jinja`). The
//! detection rule is confined to [`detect_category`] and [`strip_marker`];
//! everything downstream reads the explicit [`TemplateDescriptor::category`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::metadata::Category;

/// `<tag>_index.` / `<tag>_popup.` at the start of a file name
static CATEGORY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)_(index|popup)\.").expect("Invalid regex"));

/// Which path a generated file set is keyed by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Final output path, template suffix stripped
    #[default]
    Output,
    /// Source-style path that keeps the template suffix, used for previews
    Source,
}

/// One template as known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    source: String,
    output_path: String,
    preview_path: String,
    category: Option<Category>,
    body: String,
}

impl TemplateDescriptor {
    /// Build a descriptor from a template's relative source path and body
    ///
    /// `extension` is the template suffix stripped from the output path
    /// (`jinja` turns `index.ts.jinja` into `index.ts`); an empty extension
    /// strips nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnknownCategoryTag`] if the file name carries a
    /// category marker that is not a known category.
    pub fn new(source: &str, body: impl Into<String>, extension: &str) -> Result<Self> {
        let source = normalize_source(source);
        let category = detect_category(&source)?;
        let preview_path = strip_marker(&source);
        let output_path = strip_extension(&preview_path, extension).to_string();

        Ok(Self {
            source,
            output_path,
            preview_path,
            category,
            body: body.into(),
        })
    }

    /// Relative source path, `/`-separated
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Logical output path, may contain `{placeholder}` tokens
    #[must_use]
    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    /// Path pattern for the requested style
    #[must_use]
    pub fn path(&self, style: PathStyle) -> &str {
        match style {
            PathStyle::Output => &self.output_path,
            PathStyle::Source => &self.preview_path,
        }
    }

    /// Category restriction, `None` for templates shared by every category
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// Whether this template takes part in a run for `category`
    #[must_use]
    pub fn applies_to(&self, category: Category) -> bool {
        self.category.is_none_or(|tag| tag == category)
    }

    /// Raw template body
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

fn normalize_source(source: &str) -> String {
    source.replace('\\', "/").trim_start_matches('/').to_string()
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Category tag encoded in a template path
///
/// # Errors
///
/// Returns [`GenError::UnknownCategoryTag`] for a marker naming an unknown
/// category.
pub fn detect_category(source: &str) -> Result<Option<Category>> {
    let Some(captures) = CATEGORY_MARKER.captures(file_name(source)) else {
        return Ok(None);
    };

    let tag = &captures[1];
    tag.parse()
        .map(Some)
        .map_err(|_| GenError::UnknownCategoryTag {
            template: source.to_string(),
            tag: tag.to_string(),
        })
}

/// Drop the category tag from a template path
///
/// `views/tree_index.vue.jinja` becomes `views/index.vue.jinja`; paths
/// without a marker are returned unchanged.
#[must_use]
pub fn strip_marker(source: &str) -> String {
    let name = file_name(source);
    let Some(captures) = CATEGORY_MARKER.captures(name) else {
        return source.to_string();
    };

    let dir = &source[..source.len() - name.len()];
    let rest = &name[captures[1].len() + 1..];
    format!("{dir}{rest}")
}

fn strip_extension<'a>(path: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return path;
    }
    path.strip_suffix(extension)
        .and_then(|head| head.strip_suffix('.'))
        .unwrap_or(path)
}
