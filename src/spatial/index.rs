//! Gid flag handling and gid to tileset lookup.

use crate::error::MapError;
use crate::tileset::TilesetDescriptor;

/// A gid as stored in a layer, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

/// Horizontal flip flag, bit 31.
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip flag, bit 30.
pub const FLIP_V: u32 = 0x4000_0000;
/// Diagonal flip flag, bit 29.
pub const FLIP_D: u32 = 0x2000_0000;
/// Bits left after the flip flags are cleared.
pub const GID_MASK: u32 = 0x1FFF_FFFF;

impl TileId {
    /// Value as stored.
    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// Gid with the flip flags cleared.
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    /// Flipped horizontally.
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    /// Flipped vertically.
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    /// Flipped diagonally.
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }
    /// Gid 0, an empty cell.
    #[inline] pub fn is_empty(self) -> bool { self.clean() == 0 }
}

/// Sorted `first_gid -> tileset` table, built once per map.
///
/// A tileset owns `[first_gid, next.first_gid)`; the highest one is open-ended.
#[derive(Debug, Clone, Default)]
pub struct GidIndex {
    starts: Vec<(u32, usize)>,
}

impl GidIndex {
    /// Index over `tilesets`, in any order.
    pub fn build(tilesets: &[TilesetDescriptor]) -> Self {
        let mut starts: Vec<(u32, usize)> = tilesets
            .iter()
            .enumerate()
            .map(|(i, t)| (t.first_gid, i))
            .collect();
        starts.sort_by_key(|&(first_gid, _)| first_gid);
        GidIndex { starts }
    }

    /// Index into the tileset slice the index was built from.
    #[inline]
    pub fn lookup(&self, gid: TileId) -> Result<usize, MapError> {
        let clean = gid.clean();
        let above = self.starts.partition_point(|&(first_gid, _)| first_gid <= clean);
        if above == 0 {
            return Err(MapError::UnresolvedGid(clean));
        }
        Ok(self.starts[above - 1].1)
    }

    /// Number of tilesets.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// True when there are no tilesets.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}
