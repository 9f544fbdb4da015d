pub mod completions;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{GlyphError, Result};
use crate::manifest::{Manifest, MANIFEST_FILENAME};

/// glyphrom - 1-bit character set editor and ROM exporter
#[derive(Parser, Debug)]
#[command(name = "glyphrom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Manifest to use instead of ./glyphrom.yaml
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a glyphrom project (generates glyphrom.yaml)
    Init(init::InitArgs),

    /// Import a character ROM dump or a PNG into the project
    Import(import::ImportArgs),

    /// Export packed sprite data as binary or assembly source
    Export(export::ExportArgs),

    /// Edit sprites in the project
    Edit(edit::EditArgs),

    /// Print sprites as text art
    Show(show::ShowArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Project file from the command line, falling back to the manifest.
pub(crate) fn project_path(arg: Option<PathBuf>, manifest: &Manifest) -> Result<PathBuf> {
    arg.or_else(|| manifest.project.clone())
        .ok_or_else(|| GlyphError::Argument {
            message: "No project file given".to_string(),
            help: Some(format!(
                "Pass --project or set `project` in {}",
                MANIFEST_FILENAME
            )),
        })
}
