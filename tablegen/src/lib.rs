//! tablegen: table-metadata-driven code generation
//!
//! Given the description of a data table (name, comment, typed columns),
//! tablegen infers UI and persistence behaviour for every column, builds a
//! rendering context with the naming variants generated code needs, renders
//! the templates that apply to the table's category and optionally bundles the
//! result into a zip archive.
//!
//! # Pipeline
//!
//! 1. [`metadata`]: raw columns become [`FieldMetadata`] through fixed
//!    inference rules ([`import_table`] builds a whole [`GenerationRequest`])
//! 2. [`context`]: the request becomes a deterministic [`RenderContext`]
//! 3. [`template`]: the [`TemplateRegistry`] selects the templates of the
//!    request's [`Category`]
//! 4. [`render`]: the [`Generator`] renders them into a [`GeneratedFileSet`]
//! 5. [`archive`]: the file set is packed into a zip archive
//!
//! # Quick Start
//!
//! ```rust
//! use tablegen::{archive, import_table, Generator, ImportDefaults, RawTable};
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = RawTable::from_json(
//!     r#"{"name": "article", "comment": "文章", "fields": [
//!         {"name": "id", "type": "string", "primaryKey": true},
//!         {"name": "title", "type": "string"}
//!     ]}"#,
//! )?;
//! let request = import_table(&table, &ImportDefaults::default());
//!
//! let generator = Generator::builtin()?;
//! let files = generator.generate(&request)?;
//! assert!(files.contains("vue/api/system/article/index.ts"));
//!
//! let zip = archive::pack(&files)?;
//! assert_eq!(archive::unpack(&zip)?, files);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod config;
pub mod context;
pub mod error;
pub mod file_set;
pub mod metadata;
pub mod naming;
pub mod observability;
pub mod render;
pub mod request;
pub mod template;

pub use archive::{ArchivePackager, Compression, ARCHIVE_MIME_TYPE};
pub use config::GeneratorConfig;
pub use context::RenderContext;
pub use error::{GenError, Result};
pub use file_set::GeneratedFileSet;
pub use metadata::{
    import_table, Category, FieldMetadata, HtmlType, ImportDefaults, QueryType, RawColumn,
    RawTable,
};
pub use render::{resolve_placeholders, Generator};
pub use request::{GenerationOptions, GenerationRequest};
pub use template::{
    MiniJinjaEngine, PathStyle, RenderError, TemplateDescriptor, TemplateEngine, TemplateRegistry,
};
