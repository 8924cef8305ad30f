//! Error types for the generation pipeline
//!
//! Configuration errors are raised while the template registry or the
//! generator is being built and are fatal for the process. Render and
//! archive errors abort a single request and never leave a partial file set.

use std::path::PathBuf;
use thiserror::Error;

use crate::metadata::Category;
use crate::template::RenderError;

/// Result alias used across the library
pub type Result<T, E = GenError> = std::result::Result<T, E>;

/// Errors produced by the generation pipeline
#[derive(Debug, Error)]
pub enum GenError {
    /// Template file could not be read
    #[error("failed to read template '{path}': {source}", path = .path.display())]
    TemplateRead {
        /// Path of the template that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configured template directory does not exist
    #[error("template directory not found: {}", .0.display())]
    TemplateDirMissing(PathBuf),

    /// Template file name carries a category marker that is not a known category
    #[error("template '{template}' is tagged with unknown category '{tag}'")]
    UnknownCategoryTag {
        /// Template source path
        template: String,
        /// The unrecognised tag
        tag: String,
    },

    /// Two templates resolve to the same output path for one category
    #[error(
        "templates '{first}' and '{second}' both produce '{path}' for category '{category}'"
    )]
    DuplicateOutputPath {
        /// Category in which the collision happens
        category: Category,
        /// Logical output path both templates produce
        path: String,
        /// Template discovered first
        first: String,
        /// Template discovered second
        second: String,
    },

    /// Template body does not compile
    #[error("template '{template}' has invalid syntax: {source}")]
    TemplateSyntax {
        /// Template source path
        template: String,
        /// Engine error
        #[source]
        source: RenderError,
    },

    /// Rendering one template failed
    #[error("failed to render template '{template}': {source}")]
    Render {
        /// Template source path
        template: String,
        /// Engine error
        #[source]
        source: RenderError,
    },

    /// Archive could not be written or read
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input payload is not valid JSON for the expected shape
    #[error("invalid request payload: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

impl GenError {
    /// Whether this error is a start-up configuration error
    ///
    /// Configuration errors are not recoverable per request; the registry or
    /// generator that raised them must not be used.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::TemplateRead { .. }
                | Self::TemplateDirMissing(_)
                | Self::UnknownCategoryTag { .. }
                | Self::DuplicateOutputPath { .. }
                | Self::TemplateSyntax { .. }
        )
    }
}
