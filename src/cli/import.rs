//! Import command implementation.
//!
//! Decodes a character ROM dump into a new project file, or appends a
//! PNG-imported sprite to an existing one.

use std::path::PathBuf;

use clap::Args;

use crate::error::{GlyphError, Result};
use crate::import::{load_image, load_rom, RomOptions};
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::output::{display_path, plural, Printer};
use crate::project;
use crate::types::SpriteSet;

/// Import a character ROM dump or a PNG into the project
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Project file to write (default: from glyphrom.yaml)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Character ROM dump (default: from glyphrom.yaml)
    #[arg(long, conflicts_with = "png")]
    pub rom: Option<PathBuf>,

    /// Number of 8x8 glyphs to read from the dump
    #[arg(long)]
    pub glyphs: Option<usize>,

    /// Give glyph N the character index N
    #[arg(long)]
    pub map: bool,

    /// Append a sprite imported from a PNG instead
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Character index for the PNG sprite
    #[arg(long, requires = "png")]
    pub index: Option<u32>,
}

pub fn run(args: ImportArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let project_path = super::project_path(args.project.clone(), manifest)?;

    if let Some(png) = &args.png {
        let mut set = if project_path.exists() {
            project::load(&project_path)?
        } else {
            SpriteSet::new()
        };

        let mut sprite = load_image(png)?;
        if let Some(index) = args.index {
            sprite.set_index(index);
        }
        let (width, height) = sprite.size();
        set.append(sprite);

        printer.status(
            "Importing",
            &format!("{} ({}x{})", display_path(png), width, height),
        );
        project::save(&set, &project_path)?;
        printer.success(
            "Saved",
            &format!(
                "{} ({})",
                display_path(&project_path),
                plural(set.len(), "sprite", "sprites")
            ),
        );
        return Ok(());
    }

    let rom = args
        .rom
        .or_else(|| manifest.rom.clone())
        .ok_or_else(|| GlyphError::Argument {
            message: "No ROM dump given".to_string(),
            help: Some(format!("Pass --rom or set `rom` in {}", MANIFEST_FILENAME)),
        })?;
    let options = RomOptions {
        glyphs: args.glyphs.unwrap_or(manifest.glyphs),
        map_indices: args.map,
    };

    printer.status(
        "Importing",
        &format!(
            "{} ({})",
            display_path(&rom),
            plural(options.glyphs, "glyph", "glyphs")
        ),
    );
    let set = load_rom(&rom, options)?;
    project::save(&set, &project_path)?;
    printer.success("Saved", &display_path(&project_path));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn rom_args(project: PathBuf, rom: PathBuf, glyphs: usize, map: bool) -> ImportArgs {
        ImportArgs {
            project: Some(project),
            rom: Some(rom),
            glyphs: Some(glyphs),
            map,
            png: None,
            index: None,
        }
    }

    #[test]
    fn test_import_rom_writes_project() {
        let dir = tempdir().unwrap();
        let rom = dir.path().join("character.rom");
        let project_file = dir.path().join("charset.glyphs.json");
        fs::write(&rom, vec![0x81u8; 4 * 8]).unwrap();

        run(
            rom_args(project_file.clone(), rom, 4, true),
            &Manifest::default(),
            &Printer::new(),
        )
        .unwrap();

        let set = project::load(&project_file).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.get(3).unwrap().index(), Some(3));
        assert_eq!(set.get(0).unwrap().rows()[0], "#......#");
    }

    #[test]
    fn test_import_uses_manifest_rom() {
        let dir = tempdir().unwrap();
        let rom = dir.path().join("character.rom");
        let project_file = dir.path().join("p.json");
        fs::write(&rom, vec![0u8; 2 * 8]).unwrap();

        let manifest = Manifest {
            rom: Some(rom),
            glyphs: 2,
            project: Some(project_file.clone()),
            ..Default::default()
        };
        let args = ImportArgs {
            project: None,
            rom: None,
            glyphs: None,
            map: false,
            png: None,
            index: None,
        };
        run(args, &manifest, &Printer::new()).unwrap();

        assert_eq!(project::load(&project_file).unwrap().len(), 2);
    }

    #[test]
    fn test_import_without_rom_fails() {
        let dir = tempdir().unwrap();
        let args = ImportArgs {
            project: Some(dir.path().join("p.json")),
            rom: None,
            glyphs: None,
            map: false,
            png: None,
            index: None,
        };
        assert!(matches!(
            run(args, &Manifest::default(), &Printer::new()),
            Err(GlyphError::Argument { .. })
        ));
    }

    #[test]
    fn test_import_png_appends_sprite() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("smiley.png");
        let project_file = dir.path().join("p.json");

        let mut img = image::GrayImage::new(3, 3);
        img.put_pixel(1, 1, image::Luma([255]));
        img.save(&png).unwrap();

        for _ in 0..2 {
            let args = ImportArgs {
                project: Some(project_file.clone()),
                rom: None,
                glyphs: None,
                map: false,
                png: Some(png.clone()),
                index: Some(65),
            };
            run(args, &Manifest::default(), &Printer::new()).unwrap();
        }

        let set = project::load(&project_file).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().rows(), vec!["...", ".#.", "..."]);
        assert_eq!(set.get(1).unwrap().index(), Some(65));
    }
}
