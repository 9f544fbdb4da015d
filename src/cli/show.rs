//! Show command implementation.
//!
//! Prints sprites as `#`/`.` text art to stdout.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::error::{GlyphError, Result};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::project;
use crate::types::{PixelGrid, SpriteSet};

/// Print sprites as text art
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project file (default: from glyphrom.yaml)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Only show the sprite at this position
    #[arg(long)]
    pub sprite: Option<usize>,
}

fn header(position: usize, sprite: &PixelGrid) -> String {
    let index = match sprite.index() {
        Some(code) => match char::from_u32(code) {
            Some(c) if code >= 32 && !c.is_control() => format!("index {} '{}'", code, c),
            _ => format!("index {}", code),
        },
        None => "unmapped".to_string(),
    };
    format!("#{} {}x{} {}", position, sprite.width(), sprite.height(), index)
}

/// Text art for one sprite or the whole set.
pub fn render_text(set: &SpriteSet, only: Option<usize>) -> Result<String> {
    let mut out = String::new();
    for (position, sprite) in set.iter().enumerate() {
        if only.is_some_and(|p| p != position) {
            continue;
        }
        out.push_str(&header(position, sprite));
        out.push('\n');
        for row in sprite.rows() {
            out.push_str(&row);
            out.push('\n');
        }
        out.push('\n');
    }

    if let Some(position) = only {
        if position >= set.len() {
            return Err(GlyphError::NotFound {
                message: format!("No sprite at position {} (project has {})", position, set.len()),
            });
        }
    }
    Ok(out)
}

pub fn run(args: ShowArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let project_path = super::project_path(args.project, manifest)?;
    let set = project::load(&project_path)?;

    printer.info(
        "Showing",
        &format!(
            "{} ({}, {} mapped)",
            display_path(&project_path),
            plural(set.len(), "sprite", "sprites"),
            set.mapped().count()
        ),
    );
    std::io::stdout().write_all(render_text(&set, args.sprite)?.as_bytes())?;
    Ok(())
}
