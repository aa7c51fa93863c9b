#![warn(missing_docs)]

//! Tile maps, a scrolling viewport and input-driven sprite animation for
//! Macroquad.
//!
//! Maps are Tiled JSON documents. Drawing, images, input and document access
//! go through small traits ([`Surface`], [`AssetStore`], [`InputSource`],
//! [`DocumentSource`]) so everything except [`backend`] also runs headless.

pub mod anim;
pub mod backend;
pub mod button;
pub mod command;
pub mod config;
pub mod error;
pub mod factory;
pub mod geom;
pub mod grid;
pub mod input;
pub mod ir_map;
/// Document sources and the Tiled JSON decoder.
pub mod loader {
    pub mod json_loader;
    pub mod source;
}
pub mod map;
pub mod player;
/// Viewport culling.
pub mod render {
    pub mod cull;
}
/// Gid lookup.
pub mod spatial {
    pub mod index;
}
pub mod sprite;
pub mod surface;
pub mod tileset;

pub use anim::{AnimMap, ControlledSpriteObject, PointerTrigger, Trigger};
pub use button::ButtonObject;
pub use command::{CommandBuffer, DrawCommand};
pub use config::EngineConfig;
pub use error::{ErrorKind, MapError};
pub use geom::{Point, Rect, Size, Vector};
pub use grid::Grid;
pub use input::{InputSource, InputState, MouseButton};
pub use ir_map::{ObjectRecord, Properties, PropertyValue};
pub use loader::source::{DocumentSource, FileSource, MemorySource};
pub use map::{Layer, LayerContent, LayerId, Map, ObjectLayer};
pub use player::Player;
pub use render::cull::Camera;
pub use sprite::{FrameTimer, ImageObject, SpriteObject};
pub use surface::{AssetStore, AtlasHandle, HeadlessAssets, Surface};
pub use tileset::{DrawableTile, TilesetDescriptor};
