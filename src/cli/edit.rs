//! Edit command implementation.
//!
//! Applies sprite and sequence operations to a project file. Sprite
//! operations target `--sprite N`, or the sprite created by `--add` when
//! no position is given. Operations run in a fixed order: add, per-sprite
//! edits, moves, crop-all, deletions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use crate::error::{GlyphError, Result};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::project;
use crate::types::{PixelGrid, SpriteId, SpriteSet};

/// A `WxH` size argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// An `X,Y` pixel coordinate argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// An inclusive `A..B` range of sprite positions; `A..` runs to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRange {
    pub start: usize,
    pub end: Option<usize>,
}

fn parse_number(text: &str, what: &str) -> Result<usize> {
    text.trim().parse().map_err(|_| GlyphError::Parse {
        message: format!("Invalid {} '{}'", what, text),
        help: None,
    })
}

fn split_pair<'a>(s: &'a str, sep: &str, form: &str) -> Result<(&'a str, &'a str)> {
    s.split_once(sep).ok_or_else(|| GlyphError::Parse {
        message: format!("Expected {}, got '{}'", form, s),
        help: None,
    })
}

impl FromStr for Size {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        let (w, h) = split_pair(&lower, "x", "WxH")?;
        Ok(Self {
            width: parse_number(w, "width")?,
            height: parse_number(h, "height")?,
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Point {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = split_pair(s, ",", "X,Y")?;
        Ok(Self {
            x: parse_number(x, "x coordinate")?,
            y: parse_number(y, "y coordinate")?,
        })
    }
}

impl FromStr for SpriteRange {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = split_pair(s, "..", "A..B")?;
        let end = if end.trim().is_empty() {
            None
        } else {
            Some(parse_number(end, "range end")?)
        };
        Ok(Self {
            start: parse_number(start, "range start")?,
            end,
        })
    }
}

/// Edit sprites in the project
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Project file (default: from glyphrom.yaml)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Position of the sprite to edit
    #[arg(long)]
    pub sprite: Option<usize>,

    /// Append a blank sprite of this size (WxH)
    #[arg(long)]
    pub add: Option<Size>,

    /// Assign a character index
    #[arg(long, conflicts_with = "clear_index")]
    pub index: Option<u32>,

    /// Remove the character index
    #[arg(long)]
    pub clear_index: bool,

    /// Clear every pixel
    #[arg(long)]
    pub clear: bool,

    /// Invert every pixel
    #[arg(long)]
    pub invert: bool,

    /// Set the pixel at X,Y
    #[arg(long = "set", value_name = "X,Y")]
    pub set_pixels: Vec<Point>,

    /// Clear the pixel at X,Y
    #[arg(long = "unset", value_name = "X,Y")]
    pub unset_pixels: Vec<Point>,

    /// Toggle the pixel at X,Y
    #[arg(long = "toggle", value_name = "X,Y")]
    pub toggle_pixels: Vec<Point>,

    /// Resize to WxH
    #[arg(long)]
    pub resize: Option<Size>,

    /// Scale the image when resizing instead of keeping the top-left corner
    #[arg(long, requires = "resize")]
    pub scale: bool,

    /// Shrink the sprite to its set pixels
    #[arg(long)]
    pub crop: bool,

    /// Shrink every sprite to its set pixels
    #[arg(long)]
    pub crop_all: bool,

    /// Move the sprite one position later
    #[arg(long, conflicts_with = "backward")]
    pub forward: bool,

    /// Move the sprite one position earlier
    #[arg(long)]
    pub backward: bool,

    /// Delete the sprite
    #[arg(long)]
    pub delete: bool,

    /// Delete sprites A through B (A.. deletes to the end)
    #[arg(long, value_name = "A..B")]
    pub delete_range: Option<SpriteRange>,
}

impl EditArgs {
    fn has_sprite_edits(&self) -> bool {
        self.index.is_some()
            || self.clear_index
            || self.clear
            || self.invert
            || !self.set_pixels.is_empty()
            || !self.unset_pixels.is_empty()
            || !self.toggle_pixels.is_empty()
            || self.resize.is_some()
            || self.crop
            || self.forward
            || self.backward
            || self.delete
    }
}

fn edit_sprite(sprite: &mut PixelGrid, args: &EditArgs) -> Result<usize> {
    let mut changes = 0;
    if let Some(index) = args.index {
        sprite.set_index(index);
        changes += 1;
    }
    if args.clear_index {
        sprite.clear_index();
        changes += 1;
    }
    if args.clear {
        sprite.clear();
        changes += 1;
    }
    if args.invert {
        sprite.invert();
        changes += 1;
    }
    for p in &args.set_pixels {
        sprite.set(p.x, p.y)?;
        changes += 1;
    }
    for p in &args.unset_pixels {
        sprite.clear_pixel(p.x, p.y)?;
        changes += 1;
    }
    for p in &args.toggle_pixels {
        sprite.toggle(p.x, p.y)?;
        changes += 1;
    }
    if let Some(size) = args.resize {
        sprite.resize(size.width, size.height, args.scale)?;
        changes += 1;
    }
    if args.crop {
        sprite.crop_to_size();
        changes += 1;
    }
    Ok(changes)
}

/// Apply the requested edits to `set`, returning how many were made.
pub fn apply(set: &mut SpriteSet, args: &EditArgs) -> Result<usize> {
    let mut changes = 0;
    let mut target: Option<SpriteId> = match args.sprite {
        Some(position) => Some(set.id_at(position).ok_or_else(|| GlyphError::NotFound {
            message: format!("No sprite at position {} (project has {})", position, set.len()),
        })?),
        None => None,
    };

    if let Some(size) = args.add {
        let id = set.append(PixelGrid::new(size.width, size.height)?);
        target.get_or_insert(id);
        changes += 1;
    }

    if args.has_sprite_edits() {
        let id = target.ok_or_else(|| GlyphError::Argument {
            message: "No sprite selected".to_string(),
            help: Some("Pass --sprite N".to_string()),
        })?;

        changes += edit_sprite(set.sprite_mut(id)?, args)?;

        if args.forward {
            set.move_forward(id)?;
            changes += 1;
        }
        if args.backward {
            set.move_backward(id)?;
            changes += 1;
        }
    }

    if args.crop_all {
        set.iter_mut().for_each(PixelGrid::crop_to_size);
        changes += 1;
    }

    if args.delete {
        if let Some(id) = target {
            set.delete(id);
            changes += 1;
        }
    }

    if let Some(range) = args.delete_range {
        match range.end {
            Some(end) => set.delete_range(range.start, end)?,
            None => set.delete_to_end(range.start)?,
        }
        changes += 1;
    }

    Ok(changes)
}

pub fn run(args: EditArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let project_path = super::project_path(args.project.clone(), manifest)?;
    let mut set = project::load(&project_path)?;

    let changes = apply(&mut set, &args)?;
    if changes == 0 {
        printer.warning("Unchanged", "no edits requested");
        return Ok(());
    }

    project::save(&set, &project_path)?;
    printer.success(
        "Edited",
        &format!(
            "{} ({}, {} now)",
            display_path(&project_path),
            plural(changes, "change", "changes"),
            plural(set.len(), "sprite", "sprites")
        ),
    );
    Ok(())
}
