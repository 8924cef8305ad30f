//! CLI command implementations

pub mod context;
pub mod download;
pub mod generate;
pub mod import;
pub mod inspect;
pub mod preview;
pub mod templates;

pub use context::ContextCommand;
pub use download::DownloadCommand;
pub use generate::GenerateCommand;
pub use import::ImportCommand;
pub use inspect::InspectCommand;
pub use preview::{PreviewCommand, PreviewOutput};
pub use templates::TemplatesCommand;
