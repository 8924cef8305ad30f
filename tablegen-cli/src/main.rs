//! tablegen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tablegen::{observability, Category, Compression};
use tablegen_cli_lib::{
    ContextCommand, DownloadCommand, GenerateCommand, GeneratorOptions, ImportCommand,
    InspectCommand, PreviewCommand, PreviewOutput, TemplatesCommand,
};

#[derive(Parser)]
#[command(name = "tablegen")]
#[command(version)]
#[command(about = "Generate admin CRUD and tree pages from table metadata", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the standard search path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Template directory overriding the configured one
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Enable trace logging for tablegen
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a table description into a generation request
    Import {
        /// Table description JSON (`{ name, comment, fields }`)
        table: PathBuf,
        /// Write the request here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Module name (e.g. `system`)
        #[arg(short, long)]
        module: Option<String>,
        /// Generation category (`crud` or `tree`)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Render a request and print the generated paths
    Preview {
        /// Generation request JSON
        request: PathBuf,
        /// Key files by template name instead of output path
        #[arg(long)]
        source_names: bool,
        /// Print the content of one generated path
        #[arg(long, conflicts_with = "json")]
        show: Option<String>,
        /// Print every file as a JSON object
        #[arg(long)]
        json: bool,
    },
    /// Render a request into a directory
    Generate {
        /// Generation request JSON
        request: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
    /// Render a request into a zip archive
    Download {
        /// Generation request JSON
        request: PathBuf,
        /// Archive path (defaults to `<table>.zip`)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Entry compression (`deflated` or `stored`)
        #[arg(long)]
        compression: Option<Compression>,
    },
    /// List the loaded templates
    Templates {
        /// Only list templates selected for this category
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// List the entries of a generated archive
    Inspect {
        /// Zip archive written by `download`
        archive: PathBuf,
    },
    /// Print the render context of a request
    Context {
        /// Generation request JSON
        request: PathBuf,
        /// Resolve this path pattern instead of printing the context
        #[arg(short, long)]
        pattern: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        observability::verbose_filter()
    } else {
        observability::default_filter()
    };
    observability::init_with_default(filter)?;

    let options = GeneratorOptions {
        config: cli.config,
        templates: cli.templates,
    };

    match cli.command {
        Commands::Import {
            table,
            output,
            module,
            category,
        } => ImportCommand::new(table, output, options)
            .with_module(module)
            .with_category(category)
            .execute()?,
        Commands::Preview {
            request,
            source_names,
            show,
            json,
        } => {
            let output = match (show, json) {
                (Some(path), _) => PreviewOutput::Show(path),
                (None, true) => PreviewOutput::Json,
                (None, false) => PreviewOutput::Paths,
            };
            PreviewCommand::new(request, output, source_names, options).execute()?;
        }
        Commands::Generate {
            request,
            output,
            force,
        } => {
            GenerateCommand::new(request, output, force, options).execute()?;
        }
        Commands::Download {
            request,
            output,
            compression,
        } => {
            DownloadCommand::new(request, output, options)
                .with_compression(compression)
                .execute()
                .await?;
        }
        Commands::Templates { category } => TemplatesCommand::new(category, options).execute()?,
        Commands::Inspect { archive } => InspectCommand::new(archive).execute()?,
        Commands::Context { request, pattern } => ContextCommand::new(request, pattern).execute()?,
    }

    Ok(())
}
