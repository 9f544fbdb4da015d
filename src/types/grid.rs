//! Monochrome pixel grid.
//!
//! A `PixelGrid` is a single sprite or glyph: a width x height matrix of
//! on/off pixels plus an optional character code. Packers in `crate::pack`
//! turn it into ROM bytes.
//!
//! # Example
//!
//! ```
//! use glyphrom::PixelGrid;
//!
//! let mut grid = PixelGrid::new(8, 8).unwrap();
//! grid.set(0, 0).unwrap();
//! grid.set_index(65);
//!
//! assert!(!grid.is_blank());
//! assert_eq!(grid.size_in_bytes(), 8);
//! ```

use crate::error::{GlyphError, Result};

/// Glyph used for a set pixel in textual renderings.
pub const SET_GLYPH: char = '#';

/// Glyph used for a clear pixel in textual renderings.
pub const CLEAR_GLYPH: char = '.';

/// A width x height boolean bitmap with an optional character index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,

    /// Row-major: pixels[y * width + x].
    pixels: Vec<bool>,

    /// Character code this glyph is mapped to, if any.
    index: Option<u32>,
}

/// Tight rectangle around the set pixels of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

fn check_size(width: usize, height: usize) -> Result<()> {
    if width < 1 || height < 1 {
        return Err(GlyphError::Argument {
            message: format!("Size {}x{} is too small", width, height),
            help: Some("Sprites need to be at least 1x1".to_string()),
        });
    }
    Ok(())
}

fn round_up_to_byte(n: usize) -> usize {
    n.div_ceil(8) * 8
}

impl PixelGrid {
    /// Create a blank grid. Both dimensions must be at least 1.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![false; width * height],
            index: None,
        })
    }

    /// Build a grid from `#`/`.` rows (row 0 first).
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut grid = Self::new(width, height).map_err(|_| GlyphError::Parse {
            message: format!("Pixel rows describe an empty {}x{} grid", width, height),
            help: None,
        })?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(GlyphError::Parse {
                    message: format!(
                        "Row {} has {} pixels, expected {}",
                        y,
                        row.chars().count(),
                        width
                    ),
                    help: None,
                });
            }
            for (x, c) in row.chars().enumerate() {
                match c {
                    SET_GLYPH => grid.pixels[y * width + x] = true,
                    CLEAR_GLYPH => {}
                    other => {
                        return Err(GlyphError::Parse {
                            message: format!("Unexpected pixel '{}' in row {}", other, y),
                            help: Some(format!(
                                "Use '{}' for set and '{}' for clear pixels",
                                SET_GLYPH, CLEAR_GLYPH
                            )),
                        })
                    }
                }
            }
        }

        Ok(grid)
    }

    /// Get the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn has_size(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }

    /// Character code of this glyph, `None` when unmapped.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn set_index(&mut self, index: u32) {
        self.index = Some(index);
    }

    pub fn clear_index(&mut self) {
        self.index = None;
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(GlyphError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Unchecked read for callers iterating within bounds.
    pub(crate) fn at(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    /// Get a pixel.
    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        let i = self.offset(x, y)?;
        Ok(self.pixels[i])
    }

    /// Write a pixel value.
    pub fn put(&mut self, x: usize, y: usize, value: bool) -> Result<()> {
        let i = self.offset(x, y)?;
        self.pixels[i] = value;
        Ok(())
    }

    /// Turn a pixel on.
    pub fn set(&mut self, x: usize, y: usize) -> Result<()> {
        self.put(x, y, true)
    }

    /// Turn a pixel off.
    pub fn clear_pixel(&mut self, x: usize, y: usize) -> Result<()> {
        self.put(x, y, false)
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> Result<()> {
        let i = self.offset(x, y)?;
        self.pixels[i] = !self.pixels[i];
        Ok(())
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    pub fn invert(&mut self) {
        for p in &mut self.pixels {
            *p = !*p;
        }
    }

    pub fn is_blank(&self) -> bool {
        !self.pixels.iter().any(|&p| p)
    }

    pub fn size_in_bits(&self) -> usize {
        self.width * self.height
    }

    /// Storage needed with both dimensions rounded up to a multiple of 8.
    pub fn size_in_bytes(&self) -> usize {
        round_up_to_byte(self.width) * round_up_to_byte(self.height) / 8
    }

    /// Iterate over all set pixels as (x, y).
    pub fn set_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Smallest rectangle containing every set pixel, `None` if blank.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut pixels = self.set_pixels();
        let (x, y) = pixels.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
        for (x, y) in pixels {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Change the grid size.
    ///
    /// With `allow_scale`, content that would not fit (or a non-blank grid
    /// that grows) is resampled with an area filter; any output cell that
    /// covers a set pixel becomes set. Otherwise pixels keep their
    /// coordinates and whatever falls outside the new size is dropped.
    /// The index is kept either way.
    pub fn resize(&mut self, width: usize, height: usize, allow_scale: bool) -> Result<()> {
        check_size(width, height)?;
        if self.has_size(width, height) {
            return Ok(());
        }

        let (used_width, used_height) = self
            .bounding_box()
            .map_or((0, 0), |b| (b.x + b.width, b.y + b.height));
        let downscale = used_width > width || used_height > height;
        let upscale = (used_width != 0 || used_height != 0)
            && (width > self.width || height > self.height);

        self.pixels = if allow_scale && (downscale || upscale) {
            self.resample(width, height)
        } else {
            let mut pixels = vec![false; width * height];
            for y in 0..height.min(self.height) {
                for x in 0..width.min(self.width) {
                    pixels[y * width + x] = self.at(x, y);
                }
            }
            pixels
        };
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Box-filter the grid to a new size and re-binarize.
    fn resample(&self, width: usize, height: usize) -> Vec<bool> {
        let mut pixels = vec![false; width * height];
        for oy in 0..height {
            let y0 = oy * self.height / height;
            let y1 = ((oy + 1) * self.height).div_ceil(height);
            for ox in 0..width {
                let x0 = ox * self.width / width;
                let x1 = ((ox + 1) * self.width).div_ceil(width);
                pixels[oy * width + ox] = (y0..y1).any(|sy| (x0..x1).any(|sx| self.at(sx, sy)));
            }
        }
        pixels
    }

    /// Shrink the grid to the bounding box of its set pixels.
    pub fn crop_to_size(&mut self) {
        let Some(bounds) = self.bounding_box() else {
            return;
        };
        if self.has_size(bounds.width, bounds.height) {
            return;
        }

        let mut pixels = vec![false; bounds.width * bounds.height];
        for y in 0..bounds.height {
            for x in 0..bounds.width {
                pixels[y * bounds.width + x] = self.at(bounds.x + x, bounds.y + y);
            }
        }
        self.pixels = pixels;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    /// Replace the grid content (and size) with a binarized image.
    ///
    /// A pixel is set when its luma and alpha are both non-zero.
    pub fn set_to_image(&mut self, image: &image::DynamicImage) -> Result<()> {
        let luma = image.to_luma_alpha8();
        let (width, height) = (luma.width() as usize, luma.height() as usize);
        check_size(width, height)?;

        self.resize(width, height, false)?;
        for (x, y, p) in luma.enumerate_pixels() {
            self.pixels[y as usize * width + x as usize] = p[0] != 0 && p[1] != 0;
        }
        Ok(())
    }

    /// Render each row as a string of `#` and `.`.
    pub fn rows(&self) -> Vec<String> {
        self.pixels
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|&p| if p { SET_GLYPH } else { CLEAR_GLYPH })
                    .collect()
            })
            .collect()
    }
}
