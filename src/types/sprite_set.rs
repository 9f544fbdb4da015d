//! Ordered sprite collection.
//!
//! The order of a `SpriteSet` is the order sprites appear in the ROM byte
//! stream. Sprites are addressed either by position or by the `SpriteId`
//! handed out when they were added; ids stay valid across reordering.

use crate::error::{GlyphError, Result};
use crate::pack::Packer;

use super::PixelGrid;

/// Stable handle to a sprite inside one `SpriteSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(u64);

#[derive(Debug, Clone)]
struct Entry {
    id: SpriteId,
    grid: PixelGrid,
}

/// An owned, ordered sequence of sprites.
#[derive(Debug, Clone, Default)]
pub struct SpriteSet {
    entries: Vec<Entry>,
    next_id: u64,
}

impl SpriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a sprite at the end of the sequence.
    pub fn append(&mut self, sprite: PixelGrid) -> SpriteId {
        let id = self.next_id();
        self.entries.push(Entry { id, grid: sprite });
        id
    }

    /// Add a sprite at `position`, shifting later sprites back.
    pub fn insert(&mut self, position: usize, sprite: PixelGrid) -> Result<SpriteId> {
        if position > self.entries.len() {
            return Err(GlyphError::Argument {
                message: format!(
                    "Cannot insert at position {} in a set of {} sprites",
                    position,
                    self.entries.len()
                ),
                help: None,
            });
        }
        let id = self.next_id();
        self.entries.insert(position, Entry { id, grid: sprite });
        Ok(id)
    }

    /// Remove a sprite. Returns `None` if it is not a member.
    pub fn delete(&mut self, id: SpriteId) -> Option<PixelGrid> {
        let position = self.position(id)?;
        Some(self.entries.remove(position).grid)
    }

    fn position(&self, id: SpriteId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Position of a sprite in the sequence.
    pub fn index_of(&self, id: SpriteId) -> Result<usize> {
        self.position(id).ok_or_else(|| GlyphError::NotFound {
            message: format!("sprite {:?} is not part of this set", id),
        })
    }

    /// Id of the sprite at `position`.
    pub fn id_at(&self, position: usize) -> Option<SpriteId> {
        self.entries.get(position).map(|e| e.id)
    }

    pub fn get(&self, position: usize) -> Option<&PixelGrid> {
        self.entries.get(position).map(|e| &e.grid)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut PixelGrid> {
        self.entries.get_mut(position).map(|e| &mut e.grid)
    }

    pub fn sprite(&self, id: SpriteId) -> Result<&PixelGrid> {
        let position = self.index_of(id)?;
        Ok(&self.entries[position].grid)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Result<&mut PixelGrid> {
        let position = self.index_of(id)?;
        Ok(&mut self.entries[position].grid)
    }

    /// Iterate over sprites in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &PixelGrid> + '_ {
        self.entries.iter().map(|e| &e.grid)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PixelGrid> + '_ {
        self.entries.iter_mut().map(|e| &mut e.grid)
    }

    /// Iterate over sprites that carry a character index, in sequence order.
    pub fn mapped(&self) -> impl Iterator<Item = &PixelGrid> + '_ {
        self.iter().filter(|s| s.has_index())
    }

    /// Exchange the positions of two sprites.
    pub fn swap(&mut self, a: SpriteId, b: SpriteId) -> Result<()> {
        let first = self.index_of(a)?;
        let second = self.index_of(b)?;
        self.entries.swap(first, second);
        Ok(())
    }

    /// Move a sprite one step towards the start. No-op at the start.
    pub fn move_backward(&mut self, id: SpriteId) -> Result<()> {
        let position = self.index_of(id)?;
        if position > 0 {
            self.entries.swap(position, position - 1);
        }
        Ok(())
    }

    /// Move a sprite one step towards the end. No-op at the end.
    pub fn move_forward(&mut self, id: SpriteId) -> Result<()> {
        let position = self.index_of(id)?;
        if position + 1 < self.entries.len() {
            self.entries.swap(position, position + 1);
        }
        Ok(())
    }

    /// Delete positions `start..=end`.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<()> {
        if end < start || end >= self.entries.len() {
            return Err(GlyphError::Argument {
                message: format!(
                    "Invalid range {}..={} for a set of {} sprites",
                    start,
                    end,
                    self.entries.len()
                ),
                help: Some(
                    "The end must not be before the start or past the last sprite".to_string(),
                ),
            });
        }
        self.entries.drain(start..=end);
        Ok(())
    }

    /// Delete every sprite from `start` on.
    pub fn delete_to_end(&mut self, start: usize) -> Result<()> {
        if start >= self.entries.len() {
            return Ok(());
        }
        self.delete_range(start, self.entries.len() - 1)
    }

    /// Concatenate the bytes `pack_fn` produces for each sprite.
    ///
    /// Sprites are visited in sequence order; with `only_mapped` sprites
    /// without an index are skipped.
    pub fn accumulate<F>(&self, only_mapped: bool, mut pack_fn: F) -> Result<Vec<u8>>
    where
        F: FnMut(&PixelGrid) -> Result<Vec<u8>>,
    {
        let mut out = Vec::new();
        for sprite in self.iter().filter(|s| !only_mapped || s.has_index()) {
            out.extend(pack_fn(sprite)?);
        }
        Ok(out)
    }

    /// Pack every (mapped) sprite with the given packer.
    pub fn pack(&self, only_mapped: bool, packer: &Packer) -> Result<Vec<u8>> {
        self.accumulate(only_mapped, |sprite| packer.pack(sprite))
    }

    /// Smallest width and height over sprites matching `pred`.
    pub fn min_size<P>(&self, pred: P) -> Option<(usize, usize)>
    where
        P: Fn(&PixelGrid) -> bool,
    {
        self.iter()
            .filter(|s| pred(*s))
            .map(PixelGrid::size)
            .reduce(|(w, h), (sw, sh)| (w.min(sw), h.min(sh)))
    }

    /// Largest width and height over sprites matching `pred`.
    pub fn max_size<P>(&self, pred: P) -> Option<(usize, usize)>
    where
        P: Fn(&PixelGrid) -> bool,
    {
        self.iter()
            .filter(|s| pred(*s))
            .map(PixelGrid::size)
            .reduce(|(w, h), (sw, sh)| (w.max(sw), h.max(sh)))
    }

    pub fn all_same_size_in_pixels(&self) -> bool {
        let mut sizes = self.iter().map(PixelGrid::size);
        match sizes.next() {
            Some(first) => sizes.all(|s| s == first),
            None => true,
        }
    }

    /// True if every sprite matching `pred` packs to the same byte count.
    pub fn all_same_size_in_bytes<P>(&self, pred: P) -> bool
    where
        P: Fn(&PixelGrid) -> bool,
    {
        let mut sizes = self.iter().filter(|s| pred(*s)).map(PixelGrid::size_in_bytes);
        match sizes.next() {
            Some(first) => sizes.all(|s| s == first),
            None => true,
        }
    }
}

impl FromIterator<PixelGrid> for SpriteSet {
    fn from_iter<I: IntoIterator<Item = PixelGrid>>(iter: I) -> Self {
        let mut set = SpriteSet::new();
        for sprite in iter {
            set.append(sprite);
        }
        set
    }
}
