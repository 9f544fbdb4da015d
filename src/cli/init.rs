//! Init command implementation.
//!
//! Writes a `glyphrom.yaml` manifest with default export settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{GlyphError, Result};
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::output::{display_path, Printer};
use crate::project::PROJECT_EXTENSION;

/// Initialize a glyphrom project by generating a glyphrom.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Character ROM dump to import from
    #[arg(long)]
    pub rom: Option<PathBuf>,

    /// Project file name
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Overwrite existing glyphrom.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(GlyphError::Argument {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest {
        rom: args.rom,
        project: Some(
            args.project
                .unwrap_or_else(|| PathBuf::from(format!("charset.{}", PROJECT_EXTENSION))),
        ),
        ..Default::default()
    };

    fs::write(&manifest_path, manifest.to_yaml()?).map_err(|e| GlyphError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if let Some(rom) = &manifest.rom {
        printer.info("ROM", &display_path(rom));
    }
    printer.success("Created", &display_path(&manifest_path));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(path: PathBuf, force: bool) -> InitArgs {
        InitArgs {
            path,
            rom: None,
            project: None,
            force,
        }
    }

    #[test]
    fn test_init_creates_manifest() {
        let dir = tempdir().unwrap();

        run(args(dir.path().to_path_buf(), false), &Printer::new()).unwrap();

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(manifest.output, PathBuf::from("dist"));
        assert_eq!(manifest.project, Some(PathBuf::from("charset.glyphs.json")));
        assert_eq!(manifest.rom, None);
    }

    #[test]
    fn test_init_records_rom() {
        let dir = tempdir().unwrap();
        let mut init = args(dir.path().to_path_buf(), false);
        init.rom = Some(PathBuf::from("roms/character.rom"));

        run(init, &Printer::new()).unwrap();

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(manifest.rom, Some(PathBuf::from("roms/character.rom")));
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "output: build").unwrap();

        let result = run(args(dir.path().to_path_buf(), false), &Printer::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "output: build").unwrap();

        run(args(dir.path().to_path_buf(), true), &Printer::new()).unwrap();

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(manifest.output, PathBuf::from("dist"));
    }
}
