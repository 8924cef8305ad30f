//! Process-wide template registry
//!
//! The registry is built once at start-up and never mutated. It is cheap to
//! clone and can be shared between concurrent generation requests without
//! locking.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use super::descriptor::TemplateDescriptor;
use super::DEFAULT_EXTENSION;
use crate::error::{GenError, Result};
use crate::metadata::Category;

macro_rules! builtin {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../../templates/", $path)))),*]
    };
}

/// Template set compiled into the library, in discovery order
const BUILTIN_TEMPLATES: &[(&str, &str)] = builtin![
    "sql/{business_name}_menu.sql.jinja",
    "vue/api/{module_name}/{businessName}/index.ts.jinja",
    "vue/api/{module_name}/{businessName}/model.d.ts.jinja",
    "vue/views/{module_name}/{businessName}/crud_index.vue.jinja",
    "vue/views/{module_name}/{businessName}/crud_popup.vue.jinja",
    "vue/views/{module_name}/{businessName}/data.ts.jinja",
    "vue/views/{module_name}/{businessName}/tree_index.vue.jinja",
    "vue/views/{module_name}/{businessName}/tree_popup.vue.jinja",
];

/// Immutable, ordered set of template descriptors
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Arc<[TemplateDescriptor]>,
}

impl TemplateRegistry {
    /// Registry holding the built-in template set
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the built-in set is inconsistent.
    pub fn builtin() -> Result<Self> {
        Self::from_sources(BUILTIN_TEMPLATES.iter().copied(), DEFAULT_EXTENSION)
    }

    /// Load every template below `dir`
    ///
    /// Files are discovered in file-name order; only files ending in
    /// `.{extension}` are loaded unless `extension` is empty. Source paths are
    /// taken relative to `dir`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the directory is missing, a template
    /// cannot be read, a file name carries an unknown category tag, or two
    /// templates produce the same output path for one category.
    pub fn from_dir(dir: &Path, extension: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Err(GenError::TemplateDirMissing(dir.to_path_buf()));
        }

        let suffix = format!(".{extension}");
        let mut sources = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path
                .strip_prefix(dir)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");
            if !extension.is_empty() && !relative.ends_with(&suffix) {
                tracing::debug!(file = %relative, "skipping non-template file");
                continue;
            }

            let body = std::fs::read_to_string(path).map_err(|source| GenError::TemplateRead {
                path: path.to_path_buf(),
                source,
            })?;
            sources.push((relative, body));
        }

        tracing::info!(dir = %dir.display(), count = sources.len(), "loaded templates");
        Self::from_sources(sources, extension)
    }

    /// Build a registry from `(source path, body)` pairs in discovery order
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source path carries an unknown
    /// category tag or two templates produce the same output path for one
    /// category.
    pub fn from_sources<I, S, B>(sources: I, extension: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (S, B)>,
        S: AsRef<str>,
        B: Into<String>,
    {
        let templates = sources
            .into_iter()
            .map(|(source, body)| {
                let descriptor = TemplateDescriptor::new(source.as_ref(), body, extension)?;
                tracing::debug!(
                    source = descriptor.source(),
                    output = descriptor.output_path(),
                    category = ?descriptor.category(),
                    "discovered template"
                );
                Ok(descriptor)
            })
            .collect::<Result<Vec<_>>>()?;

        check_unique_outputs(&templates)?;

        Ok(Self {
            templates: templates.into(),
        })
    }

    /// Templates that take part in a run for `category`, in discovery order
    ///
    /// Untagged templates are returned for every category.
    pub fn select(&self, category: Category) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates
            .iter()
            .filter(move |descriptor| descriptor.applies_to(category))
    }

    /// Every template, in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter()
    }

    /// Number of templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry holds no template
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// No two templates selected for one category may share an output path
fn check_unique_outputs(templates: &[TemplateDescriptor]) -> Result<()> {
    for category in Category::ALL {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for descriptor in templates.iter().filter(|d| d.applies_to(category)) {
            if let Some(first) = seen.insert(descriptor.output_path(), descriptor.source()) {
                return Err(GenError::DuplicateOutputPath {
                    category,
                    path: descriptor.output_path().to_string(),
                    first: first.to_string(),
                    second: descriptor.source().to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(sources: &[&str]) -> Result<TemplateRegistry> {
        TemplateRegistry::from_sources(sources.iter().map(|s| (*s, "")), "jinja")
    }

    #[test]
    fn test_builtin_registry_loads() {
        let registry = TemplateRegistry::builtin().unwrap();
        assert_eq!(registry.len(), BUILTIN_TEMPLATES.len());
        assert!(registry.iter().all(|d| !d.body().is_empty()));
    }

    #[test]
    fn test_builtin_selection_per_category() {
        let registry = TemplateRegistry::builtin().unwrap();
        for category in Category::ALL {
            let selected: Vec<_> = registry.select(category).collect();
            assert_eq!(selected.len(), 6, "{category}");
            assert!(selected.iter().all(|d| d.applies_to(category)));
        }
    }

    #[test]
    fn test_selection_is_category_pure_and_ordered() {
        let registry = registry(&[
            "a/crud_index.vue.jinja",
            "a/data.ts.jinja",
            "a/tree_index.vue.jinja",
            "a/tree_popup.vue.jinja",
            "b.sql.jinja",
        ])
        .unwrap();

        let crud: Vec<_> = registry.select(Category::Crud).map(|d| d.source()).collect();
        assert_eq!(crud, ["a/crud_index.vue.jinja", "a/data.ts.jinja", "b.sql.jinja"]);

        let tree: Vec<_> = registry.select(Category::Tree).map(|d| d.source()).collect();
        assert_eq!(
            tree,
            ["a/data.ts.jinja", "a/tree_index.vue.jinja", "a/tree_popup.vue.jinja", "b.sql.jinja"]
        );
    }

    #[test]
    fn test_duplicate_output_is_fatal() {
        let err = registry(&["a/crud_index.vue.jinja", "a/index.vue.jinja"]).unwrap_err();
        match err {
            GenError::DuplicateOutputPath { category, path, first, second } => {
                assert_eq!(category, Category::Crud);
                assert_eq!(path, "a/index.vue");
                assert_eq!(first, "a/crud_index.vue.jinja");
                assert_eq!(second, "a/index.vue.jinja");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_output_in_different_categories_is_fine() {
        assert!(registry(&["a/crud_index.vue.jinja", "a/tree_index.vue.jinja"]).is_ok());
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let err = registry(&["a/sub_index.vue.jinja"]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_dir() {
        let err = TemplateRegistry::from_dir(Path::new("/definitely/not/here"), "jinja")
            .unwrap_err();
        assert!(matches!(err, GenError::TemplateDirMissing(_)));
    }

    #[test]
    fn test_from_dir_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("views")).unwrap();
        std::fs::write(dir.path().join("views/tree_index.vue.jinja"), "tree").unwrap();
        std::fs::write(dir.path().join("views/crud_index.vue.jinja"), "crud").unwrap();
        std::fs::write(dir.path().join("api.ts.jinja"), "api").unwrap();
        std::fs::write(dir.path().join("README.md"), "docs").unwrap();

        let registry = TemplateRegistry::from_dir(dir.path(), "jinja").unwrap();
        let sources: Vec<_> = registry.iter().map(|d| d.source()).collect();
        assert_eq!(
            sources,
            ["api.ts.jinja", "views/crud_index.vue.jinja", "views/tree_index.vue.jinja"]
        );
        assert_eq!(registry.iter().nth(1).unwrap().body(), "crud");
    }

    #[test]
    fn test_clones_share_descriptors() {
        let registry = TemplateRegistry::builtin().unwrap();
        let clone = registry.clone();
        assert!(Arc::ptr_eq(&registry.templates, &clone.templates));
    }
}
