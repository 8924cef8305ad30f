//! Template rendering orchestrator
//!
//! The [`Generator`] ties the pipeline together: it builds the
//! [`RenderContext`] for a request, selects the templates of the request's
//! category, resolves each output path and renders each body. Rendering is
//! fail-fast: the first template error aborts the request and no partial file
//! set is returned.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::GeneratorConfig;
use crate::context::RenderContext;
use crate::error::{GenError, Result};
use crate::file_set::GeneratedFileSet;
use crate::request::GenerationRequest;
use crate::template::{MiniJinjaEngine, PathStyle, TemplateEngine, TemplateRegistry};

/// `{key}` tokens in output path patterns
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("Invalid regex"));

/// Replace `{key}` tokens with non-empty string values from the context
///
/// Tokens whose key is missing, empty or not a string are left verbatim.
///
/// # Example
///
/// ```rust
/// use tablegen::{resolve_placeholders, GenerationRequest, RenderContext};
///
/// let request = GenerationRequest {
///     business_name: "sysUser".to_string(),
///     ..GenerationRequest::default()
/// };
/// let ctx = RenderContext::build(&request);
/// assert_eq!(
///     resolve_placeholders("views/{businessName}/{unknown}.vue", &ctx),
///     "views/sysUser/{unknown}.vue"
/// );
/// ```
#[must_use]
pub fn resolve_placeholders(pattern: &str, ctx: &RenderContext) -> String {
    PLACEHOLDER
        .replace_all(pattern, |caps: &Captures<'_>| {
            ctx.get_str(&caps[1])
                .filter(|value| !value.is_empty())
                .unwrap_or(&caps[0])
                .to_string()
        })
        .into_owned()
}

/// Code generator bound to one template registry and engine
///
/// Cheap to clone; clones share the registry and the engine. Safe to use from
/// concurrent requests.
#[derive(Clone)]
pub struct Generator {
    registry: TemplateRegistry,
    engine: Arc<dyn TemplateEngine>,
    path_style: PathStyle,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("registry", &self.registry)
            .field("path_style", &self.path_style)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Create a generator, checking that every template compiles
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TemplateSyntax`] for the first template whose body
    /// does not compile.
    pub fn new(registry: TemplateRegistry, engine: impl TemplateEngine + 'static) -> Result<Self> {
        for descriptor in registry.iter() {
            engine
                .check(descriptor.source(), descriptor.body())
                .map_err(|source| GenError::TemplateSyntax {
                    template: descriptor.source().to_string(),
                    source,
                })?;
        }

        Ok(Self {
            registry,
            engine: Arc::new(engine),
            path_style: PathStyle::Output,
        })
    }

    /// Generator over the built-in template set with the default engine
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the built-in set fails to load.
    pub fn builtin() -> Result<Self> {
        Self::new(TemplateRegistry::builtin()?, MiniJinjaEngine::default())
    }

    /// Generator described by a configuration
    ///
    /// Uses the configured template directory if set, the built-in set
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the templates fail to load or compile.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let settings = &config.templates;
        let registry = match &settings.dir {
            Some(dir) => TemplateRegistry::from_dir(dir, &settings.extension)?,
            None => TemplateRegistry::builtin()?,
        };
        let engine = MiniJinjaEngine::new(settings.strict_undefined);

        Ok(Self::new(registry, engine)?.with_path_style(settings.path_style))
    }

    /// Key generated files by `style`
    #[must_use]
    pub const fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Template registry in use
    #[must_use]
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Render every template selected for the request's category
    ///
    /// Files are keyed by resolved output path in template discovery order. If
    /// two templates still resolve to the same path after placeholder
    /// resolution, the later one replaces the earlier content in place and a
    /// warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Render`] for the first template that fails.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedFileSet> {
        self.render_with_style(request, self.path_style)
    }

    /// Render with preview names (template suffix kept)
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Render`] for the first template that fails.
    pub fn preview(&self, request: &GenerationRequest) -> Result<GeneratedFileSet> {
        self.render_with_style(request, PathStyle::Source)
    }

    fn render_with_style(
        &self,
        request: &GenerationRequest,
        style: PathStyle,
    ) -> Result<GeneratedFileSet> {
        let ctx = RenderContext::build(request);
        let mut files = GeneratedFileSet::new();

        for descriptor in self.registry.select(request.category) {
            let path = resolve_placeholders(descriptor.path(style), &ctx);
            let content = self
                .engine
                .render(descriptor.source(), descriptor.body(), ctx.as_value())
                .map_err(|source| GenError::Render {
                    template: descriptor.source().to_string(),
                    source,
                })?;

            tracing::debug!(template = descriptor.source(), path = %path, "rendered template");
            if files.insert(path.clone(), content).is_some() {
                tracing::warn!(
                    template = descriptor.source(),
                    path = %path,
                    "output path rendered twice, keeping the later content"
                );
            }
        }

        tracing::info!(
            table = %request.name,
            category = %request.category,
            files = files.len(),
            "generated code"
        );
        Ok(files)
    }
}
