//! Tileset geometry and tile resolution.

use crate::error::MapError;
use crate::geom::{Point, Rect};
use crate::ir_map::Properties;

/// One atlas image sliced into a uniform grid of tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetDescriptor {
    /// First gid this tileset owns.
    pub first_gid: u32,
    /// Also the name the atlas is registered under in the asset store.
    pub name: String,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Pixels between tiles.
    pub spacing: u32,
    /// Pixels around the tile block.
    pub margin: u32,
    /// Locator of the atlas image.
    pub atlas_source: String,
    /// Atlas width in pixels.
    pub atlas_width: u32,
    /// Atlas height in pixels.
    pub atlas_height: u32,
    /// Tiles per atlas row.
    pub columns: u32,
    /// Tile rows in the atlas.
    pub rows: u32,
    /// Custom properties.
    pub properties: Properties,
}

impl TilesetDescriptor {
    /// Fails on a zero tile size or an atlas narrower than one tile.
    pub fn new(
        first_gid: u32,
        name: impl Into<String>,
        (tile_width, tile_height): (u32, u32),
        atlas_source: impl Into<String>,
        (atlas_width, atlas_height): (u32, u32),
    ) -> Result<Self, MapError> {
        let name = name.into();
        if tile_width == 0 || tile_height == 0 {
            return Err(MapError::InvalidMap(format!("tileset '{name}' has a zero tile size")));
        }
        let columns = atlas_width / tile_width;
        if columns == 0 {
            return Err(MapError::InvalidMap(format!(
                "tileset '{name}' atlas ({atlas_width}px) is narrower than one tile ({tile_width}px)"
            )));
        }
        Ok(TilesetDescriptor {
            first_gid,
            name,
            tile_width,
            tile_height,
            spacing: 0,
            margin: 0,
            atlas_source: atlas_source.into(),
            atlas_width,
            atlas_height,
            columns,
            rows: atlas_height / tile_height,
            properties: Properties::new(),
        })
    }

    /// Sets spacing and margin.
    pub fn with_spacing(mut self, spacing: u32, margin: u32) -> Self {
        self.spacing = spacing;
        self.margin = margin;
        self
    }

    /// Atlas region of `gid`. Fails if `gid` lies below this tileset's range.
    pub fn source_rect(&self, gid: u32) -> Result<Rect, MapError> {
        let local = gid.checked_sub(self.first_gid).ok_or(MapError::NegativeTileIndex {
            gid,
            first_gid: self.first_gid,
        })?;
        let col = u64::from(local % self.columns);
        let row = u64::from(local / self.columns);
        // u64 holds any u32 * u32 step, so far-off gids cannot wrap
        let sx = u64::from(self.margin) + col * (u64::from(self.tile_width) + u64::from(self.spacing));
        let sy = u64::from(self.margin) + row * (u64::from(self.tile_height) + u64::from(self.spacing));
        Ok(Rect::new(
            sx as f32,
            sy as f32,
            self.tile_width as f32,
            self.tile_height as f32,
        ))
    }

    /// World rectangle of the grid cell `cell`, sized by this tileset's tiles.
    pub fn dest_rect(&self, cell: Point) -> Rect {
        Rect::new(
            cell.x as f32 * self.tile_width as f32,
            cell.y as f32 * self.tile_height as f32,
            self.tile_width as f32,
            self.tile_height as f32,
        )
    }
}

/// A resolved tile: which atlas, which region of it, and where it lands in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableTile {
    /// Atlas the tile comes from.
    pub atlas_name: String,
    /// Region of the atlas.
    pub src: Rect,
    /// World rectangle.
    pub dest: Rect,
}

impl DrawableTile {
    /// Resolves `gid` of `tileset` at `cell`.
    pub fn resolve(gid: u32, tileset: &TilesetDescriptor, cell: Point) -> Result<Self, MapError> {
        Ok(DrawableTile {
            atlas_name: tileset.name.clone(),
            src: tileset.source_rect(gid)?,
            dest: tileset.dest_rect(cell),
        })
    }
}
