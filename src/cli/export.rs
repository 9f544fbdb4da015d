//! Export command implementation.
//!
//! Packs the project's sprites and writes them either as raw bytes or as
//! an assembly listing with the character mapping table.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::error::{GlyphError, Result};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::pack::LayoutKind;
use crate::project;
use crate::render::{export_document, MappingTable};
use crate::types::Flip;

/// Output format for `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Raw packed bytes
    Bin,
    /// Assembly source with data directives
    #[default]
    Asm,
}

/// Export packed sprite data as binary or assembly source
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project file (default: from glyphrom.yaml)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Asm)]
    pub format: ExportFormat,

    /// Byte layout
    #[arg(long, value_enum)]
    pub layout: Option<LayoutKind>,

    /// Flip applied before packing (none, x, y, xy)
    #[arg(long)]
    pub flip: Option<Flip>,

    /// Group height for the column-groups layout
    #[arg(long)]
    pub bits: Option<usize>,

    /// Include sprites without a character index
    #[arg(long)]
    pub all: bool,

    /// Also write the binary mapping table to this file
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Output file (default: stdout for asm, <output>/charset.bin for bin)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Manifest settings with command line overrides applied.
fn settings(args: &ExportArgs, manifest: &Manifest) -> Manifest {
    let mut settings = manifest.clone();
    if let Some(layout) = args.layout {
        settings.layout = layout;
    }
    if let Some(flip) = args.flip {
        settings.flip = flip;
    }
    if let Some(bits) = args.bits {
        settings.bits_per_column = bits;
    }
    settings.all |= args.all;
    settings
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| GlyphError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }
    fs::write(path, contents).map_err(|e| GlyphError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write: {}", e),
    })
}

pub fn run(args: ExportArgs, manifest: &Manifest, printer: &Printer) -> Result<()> {
    let project_path = super::project_path(args.project.clone(), manifest)?;
    let settings = settings(&args, manifest);
    let packer = settings.packer();
    let options = settings.asm_options();

    let set = project::load(&project_path)?;
    let exported = if options.only_mapped {
        set.mapped().count()
    } else {
        set.len()
    };
    if exported == 0 {
        printer.warning("Empty", "no sprites to export (use --all to include unmapped sprites)");
    }
    printer.status(
        "Packing",
        &format!("{} as {}", plural(exported, "sprite", "sprites"), packer),
    );

    match args.format {
        ExportFormat::Asm => {
            let document = export_document(&set, &packer, &options)?;
            match &args.output {
                Some(path) => {
                    write_file(path, document.as_bytes())?;
                    printer.success("Wrote", &display_path(path));
                }
                None => std::io::stdout().write_all(document.as_bytes())?,
            }
        }
        ExportFormat::Bin => {
            let bytes = set.pack(options.only_mapped, &packer)?;
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| settings.output.join("charset.bin"));
            write_file(&path, &bytes)?;
            printer.success(
                "Wrote",
                &format!(
                    "{} ({})",
                    display_path(&path),
                    plural(bytes.len(), "byte", "bytes")
                ),
            );
        }
    }

    if let Some(path) = &args.mapping {
        let table = MappingTable::build(&set)?;
        write_file(path, table.bytes())?;
        printer.success(
            "Wrote",
            &format!("{} ({:?} mapping)", display_path(path), table.mode()),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PixelGrid, SpriteSet};
    use tempfile::tempdir;

    fn export_args(project: PathBuf) -> ExportArgs {
        ExportArgs {
            project: Some(project),
            format: ExportFormat::Asm,
            layout: None,
            flip: None,
            bits: None,
            all: false,
            mapping: None,
            output: None,
        }
    }

    fn write_project(dir: &Path) -> PathBuf {
        let mut a = PixelGrid::new(8, 8).unwrap();
        a.set(0, 0).unwrap();
        a.set_index(65);
        let b = PixelGrid::new(8, 8).unwrap();
        let set: SpriteSet = vec![a, b].into_iter().collect();

        let path = dir.join("p.json");
        project::save(&set, &path).unwrap();
        path
    }

    #[test]
    fn test_export_bin_mapped_only() {
        let dir = tempdir().unwrap();
        let mut args = export_args(write_project(dir.path()));
        let out = dir.path().join("out/charset.bin");
        args.format = ExportFormat::Bin;
        args.output = Some(out.clone());

        run(args, &Manifest::default(), &Printer::new()).unwrap();

        assert_eq!(fs::read(&out).unwrap(), vec![0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_export_bin_all_with_flip() {
        let dir = tempdir().unwrap();
        let mut args = export_args(write_project(dir.path()));
        let out = dir.path().join("charset.bin");
        args.format = ExportFormat::Bin;
        args.output = Some(out.clone());
        args.all = true;
        args.flip = Some(Flip::X);

        run(args, &Manifest::default(), &Printer::new()).unwrap();

        let bytes = fs::read(&out).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 0x01);
    }

    #[test]
    fn test_export_bin_defaults_to_manifest_output() {
        let dir = tempdir().unwrap();
        let mut args = export_args(write_project(dir.path()));
        args.format = ExportFormat::Bin;
        let manifest = Manifest {
            output: dir.path().join("dist"),
            ..Default::default()
        };

        run(args, &manifest, &Printer::new()).unwrap();

        assert!(dir.path().join("dist/charset.bin").exists());
    }

    #[test]
    fn test_export_asm_to_file_with_mapping() {
        let dir = tempdir().unwrap();
        let mut args = export_args(write_project(dir.path()));
        let out = dir.path().join("charset.asm");
        let mapping = dir.path().join("mapping.bin");
        args.output = Some(out.clone());
        args.mapping = Some(mapping.clone());

        run(args, &Manifest::default(), &Printer::new()).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("charset:\n; data organization: rows not flipped\n"));
        assert!(text.contains("    .db 0x80,0x00,0x00,0x00,0x00,0x00,0x00,0x00 ; 'A'"));
        assert!(text.contains("charset_mapping:"));

        let table = fs::read(&mapping).unwrap();
        assert_eq!(table.len(), 256);
        assert_eq!(table[65], 0);
    }

    #[test]
    fn test_settings_override_manifest() {
        let args = ExportArgs {
            layout: Some(LayoutKind::ColumnGroups),
            bits: Some(16),
            ..export_args(PathBuf::from("p.json"))
        };
        let manifest = Manifest {
            layout: LayoutKind::Columns,
            flip: Flip::Y,
            ..Default::default()
        };
        let merged = settings(&args, &manifest);
        assert_eq!(merged.layout, LayoutKind::ColumnGroups);
        assert_eq!(merged.bits_per_column, 16);
        assert_eq!(merged.flip, Flip::Y);
        assert!(!merged.all);
    }

    #[test]
    fn test_export_missing_project() {
        let dir = tempdir().unwrap();
        let args = export_args(dir.path().join("missing.json"));
        assert!(run(args, &Manifest::default(), &Printer::new()).is_err());
    }
}
