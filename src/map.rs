//! Loaded maps: resolved layers, spawned actors, culled drawing.

use std::time::Duration;

use crate::error::MapError;
use crate::factory::{spawn_actors, SpawnDefaults};
use crate::geom::{Point, Rect, Size};
use crate::grid::Grid;
use crate::input::InputSource;
use crate::ir_map::*;
use crate::loader::json_loader::decode_map_to_ir;
use crate::loader::source::DocumentSource;
use crate::player::Player;
use crate::render::cull::{covering_tile_range, Camera};
use crate::spatial::index::{GidIndex, TileId};
use crate::surface::{AssetStore, Surface};
use crate::tileset::{DrawableTile, TilesetDescriptor};

/// Position of a layer in draw order.
pub type LayerId = usize;

/// Object records of a group plus the actors spawned from them.
#[derive(Debug, Clone, Default)]
pub struct ObjectLayer {
    /// Records in document order.
    pub objects: Vec<ObjectRecord>,
    /// Players spawned from the records.
    pub actors: Vec<Player>,
}

/// What a layer holds.
#[derive(Debug, Clone)]
pub enum LayerContent {
    /// Resolved tiles, `None` for empty cells.
    Tiles(Grid<Option<DrawableTile>>),
    /// Object records and actors.
    Objects(ObjectLayer),
}

/// One drawable layer.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name, may be empty.
    pub name: String,
    /// Hidden layers are not drawn.
    pub visible: bool,
    /// Layer properties.
    pub properties: Properties,
    /// Tiles or objects.
    pub content: LayerContent,
}

/// A loaded level: resolved tile layers and live object layers, drawn in
/// document order.
#[derive(Debug, Clone)]
pub struct Map {
    /// Map properties.
    pub properties: Properties,
    tilesets: Vec<TilesetDescriptor>,
    gid_index: GidIndex,
    layers: Vec<Layer>,
    width: u32,
    height: u32,
    tile_w: u32,
    tile_h: u32,
    // smallest and largest cell strides over the map and its tilesets
    cell_min: Size,
    cell_max: Size,
}

impl Map {
    /// Fetches, parses and resolves the map at `locator`, registering every
    /// tileset atlas with `assets`.
    pub fn load(
        source: &impl DocumentSource,
        assets: &mut impl AssetStore,
        locator: &str,
    ) -> Result<Self, MapError> {
        Self::load_with(source, assets, locator, &SpawnDefaults::default())
    }

    /// As [`Map::load`], with speeds for players that leave them out.
    pub fn load_with(
        source: &impl DocumentSource,
        assets: &mut impl AssetStore,
        locator: &str,
        defaults: &SpawnDefaults,
    ) -> Result<Self, MapError> {
        let ir = decode_map_to_ir(source, locator)?;
        Self::from_ir(ir, assets, defaults)
    }

    /// Builds a map from an already decoded document.
    pub fn from_ir(
        ir: IrMap,
        assets: &mut impl AssetStore,
        defaults: &SpawnDefaults,
    ) -> Result<Self, MapError> {
        for ts in &ir.tilesets {
            assets.register(&ts.name, &ts.atlas_source)?;
        }
        let gid_index = GidIndex::build(&ir.tilesets);
        let map_tile = Size::new(ir.tile_w as f32, ir.tile_h as f32);
        let (cell_min, cell_max) = ir.tilesets.iter().fold((map_tile, map_tile), |(lo, hi), ts| {
            let s = Size::new(ts.tile_width as f32, ts.tile_height as f32);
            (
                Size::new(lo.w.min(s.w), lo.h.min(s.h)),
                Size::new(hi.w.max(s.w), hi.h.max(s.h)),
            )
        });

        let mut layers = Vec::with_capacity(ir.layers.len());
        let mut actor_count = 0;
        for layer in ir.layers {
            let content = match layer.kind {
                IrLayerKind::Tiles(gids) => {
                    LayerContent::Tiles(resolve_grid(&gids, &ir.tilesets, &gid_index)?)
                }
                IrLayerKind::Objects(objects) => {
                    let actors = spawn_actors(&objects, defaults)?;
                    actor_count += actors.len();
                    LayerContent::Objects(ObjectLayer { objects, actors })
                }
                IrLayerKind::Unsupported(_) => continue,
            };
            layers.push(Layer {
                name: layer.name,
                visible: layer.visible,
                properties: layer.properties,
                content,
            });
        }

        log::info!(
            "map ready: {}x{} tiles of {}x{}px, {} tilesets, {} layers, {} actors",
            ir.width,
            ir.height,
            ir.tile_w,
            ir.tile_h,
            ir.tilesets.len(),
            layers.len(),
            actor_count
        );

        Ok(Map {
            properties: ir.properties,
            tilesets: ir.tilesets,
            gid_index,
            layers,
            width: ir.width,
            height: ir.height,
            tile_w: ir.tile_w,
            tile_h: ir.tile_h,
            cell_min,
            cell_max,
        })
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map tile size in pixels.
    pub fn tile_size(&self) -> Size {
        Size::new(self.tile_w as f32, self.tile_h as f32)
    }

    /// The whole map in world pixels.
    pub fn world_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width as f32 * self.tile_w as f32,
            self.height as f32 * self.tile_h as f32,
        )
    }

    /// Tilesets in document order.
    pub fn tilesets(&self) -> &[TilesetDescriptor] {
        &self.tilesets
    }

    /// Tileset owning `gid`.
    pub fn tileset_for_gid(&self, gid: u32) -> Result<&TilesetDescriptor, MapError> {
        let idx = self.gid_index.lookup(TileId(gid))?;
        Ok(&self.tilesets[idx])
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable layers, e.g. to toggle visibility.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Layer at `id`.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// First layer named `name`.
    pub fn layer_by_name(&self, name: &str) -> Option<(LayerId, &Layer)> {
        self.layers.iter().enumerate().find(|(_, l)| l.name == name)
    }

    /// Resolved tile at `cell` of a tile layer; `None` for empty cells and
    /// for object layers.
    pub fn tile_at(&self, id: LayerId, cell: Point) -> Result<Option<&DrawableTile>, MapError> {
        match self.layers.get(id).map(|l| &l.content) {
            Some(LayerContent::Tiles(grid)) => Ok(grid.get(cell)?.as_ref()),
            _ => Ok(None),
        }
    }

    /// Object layers with their ids.
    pub fn object_layers(&self) -> impl Iterator<Item = (LayerId, &ObjectLayer)> {
        self.layers.iter().enumerate().filter_map(|(i, l)| match &l.content {
            LayerContent::Objects(o) => Some((i, o)),
            LayerContent::Tiles(_) => None,
        })
    }

    /// Every object record in layer order.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.object_layers().flat_map(|(_, o)| o.objects.iter())
    }

    /// Every actor in layer order.
    pub fn actors(&self) -> impl Iterator<Item = &Player> {
        self.object_layers().flat_map(|(_, o)| o.actors.iter())
    }

    /// Mutable actors.
    pub fn actors_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.layers
            .iter_mut()
            .filter_map(|l| match &mut l.content {
                LayerContent::Objects(o) => Some(o),
                LayerContent::Tiles(_) => None,
            })
            .flat_map(|o| o.actors.iter_mut())
    }

    /// Updates every actor.
    pub fn update(&mut self, input: &impl InputSource, dt: Duration) {
        for actor in self.actors_mut() {
            actor.update(input, dt);
        }
    }

    /// Draws the visible layers through `camera`. Only tiles whose world
    /// rectangle overlaps the camera are drawn, shifted by the camera offset.
    /// Tilesets whose tiles differ from the map's widen the candidate cells.
    pub fn draw(
        &self,
        surface: &mut impl Surface,
        assets: &impl AssetStore,
        camera: &Camera,
    ) -> Result<(), MapError> {
        let view = camera.rect();
        let offset = camera.offset();
        let candidates = if self.cell_min == camera.tile_size() && self.cell_max == camera.tile_size() {
            camera.tile_range()
        } else {
            covering_tile_range(&view, self.cell_min, self.cell_max)
        };

        for layer in self.layers.iter().filter(|l| l.visible) {
            match &layer.content {
                LayerContent::Tiles(grid) => {
                    let range = candidates.clamped(grid.width(), grid.height());
                    for cell in range.cells() {
                        let Some(tile) = grid.get(cell)? else {
                            continue;
                        };
                        if !tile.dest.intersects(&view) {
                            continue;
                        }
                        let atlas = assets.handle(&tile.atlas_name)?;
                        surface.draw_image_region(atlas, tile.src, tile.dest.translated(offset));
                    }
                }
                LayerContent::Objects(objects) => {
                    for actor in &objects.actors {
                        actor.draw(surface, assets, offset)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Outlines every object record, for debugging spawn positions.
    pub fn draw_objects_debug(&self, surface: &mut impl Surface, camera: &Camera) {
        let offset = camera.offset();
        for object in self.objects().filter(|o| o.visible) {
            surface.stroke_rect(object.rect().translated(offset));
        }
    }
}

fn resolve_grid(
    gids: &Grid<u32>,
    tilesets: &[TilesetDescriptor],
    index: &GidIndex,
) -> Result<Grid<Option<DrawableTile>>, MapError> {
    gids.try_map(|&raw, cell| {
        let id = TileId(raw);
        if id.is_empty() {
            return Ok(None);
        }
        let ts = &tilesets[index.lookup(id)?];
        DrawableTile::resolve(id.clean(), ts, cell).map(Some)
    })
}
