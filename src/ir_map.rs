//! Intermediate map representation between the loader and [`crate::map::Map`].

use std::collections::HashMap;

use crate::error::MapError;
use crate::geom::Rect;
use crate::grid::Grid;
use crate::tileset::TilesetDescriptor;

/// Canonical, format-agnostic map as produced by the loader.
#[derive(Debug, Clone)]
pub struct IrMap {
    /// Document version, as text.
    pub version: String,
    /// Always `orthogonal` for maps this crate draws.
    pub orientation: String,
    /// Tiled render order, informational.
    pub render_order: String,
    /// World size in tiles.
    pub width: u32,
    /// World height in tiles.
    pub height: u32,
    /// Tile size in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Next free object id.
    pub next_object_id: u32,
    /// Map properties.
    pub properties: Properties,
    /// Tilesets in document order.
    pub tilesets: Vec<TilesetDescriptor>,
    /// Layers in draw order.
    pub layers: Vec<IrLayer>,
}

/// Payload of a layer.
#[derive(Debug, Clone)]
pub enum IrLayerKind {
    /// Raw gids, 0 meaning an empty cell.
    Tiles(Grid<u32>),
    /// Object records of an object group.
    Objects(Vec<ObjectRecord>),
    /// Layer types we parse past but do not render (image layers, groups).
    Unsupported(String),
}

/// One layer of the document.
#[derive(Debug, Clone)]
pub struct IrLayer {
    /// Layer name, may be empty.
    pub name: String,
    /// Hidden layers are kept but not drawn.
    pub visible: bool,
    /// Layer properties.
    pub properties: Properties,
    /// Tiles, objects or unsupported.
    pub kind: IrLayerKind,
}

/// One entry of an object group.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    /// Object id.
    pub id: u32,
    /// Object name; for players, the image name.
    pub name: String,
    /// The object's `type` (or `class` in newer documents).
    pub kind: String,
    /// Left edge in world pixels.
    pub x: f32,
    /// Top edge in world pixels.
    pub y: f32,
    /// Width in world pixels.
    pub width: f32,
    /// Height in world pixels.
    pub height: f32,
    /// Hidden objects are skipped by debug drawing.
    pub visible: bool,
    /// Object properties.
    pub properties: Properties,
}

impl ObjectRecord {
    /// Object bounds in world pixels.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `bool`.
    Bool(bool),
    /// `int`, also undeclared integer strings.
    I64(i64),
    /// `float`.
    F32(f32),
    /// Any other text.
    String(String),
}

/// Custom properties attached to maps, layers, tilesets and objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(HashMap<String, PropertyValue>);

impl Properties {
    /// No properties.
    pub fn new() -> Self {
        Properties(HashMap::new())
    }

    /// Adds or replaces a property.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.0.insert(name.into(), value);
    }

    /// Raw value of `name`.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `name` if it is a bool.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// `name` if it is an integer.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            PropertyValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// `name` if it is an integer that fits `i32`.
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_i64(name).and_then(|v| i32::try_from(v).ok())
    }

    /// `name` if it is numeric.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            PropertyValue::F32(v) => Some(*v),
            PropertyValue::I64(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// `name` if it is text.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer property; strings are parsed, anything else is an error.
    pub fn require_i64(&self, name: &str) -> Result<i64, MapError> {
        let invalid = |value: String| MapError::InvalidNumber { name: name.to_owned(), value };
        match self.get(name).ok_or_else(|| MapError::MissingProperty(name.to_owned()))? {
            PropertyValue::I64(v) => Ok(*v),
            PropertyValue::F32(v) if v.fract() == 0.0 => Ok(*v as i64),
            PropertyValue::F32(v) => Err(invalid(v.to_string())),
            PropertyValue::String(s) => s.trim().parse().map_err(|_| invalid(s.clone())),
            PropertyValue::Bool(b) => Err(invalid(b.to_string())),
        }
    }

    /// Real-valued property; integers widen, strings are parsed.
    pub fn require_f32(&self, name: &str) -> Result<f32, MapError> {
        let invalid = |value: String| MapError::InvalidNumber { name: name.to_owned(), value };
        match self.get(name).ok_or_else(|| MapError::MissingProperty(name.to_owned()))? {
            PropertyValue::I64(v) => Ok(*v as f32),
            PropertyValue::F32(v) => Ok(*v),
            PropertyValue::String(s) => s.trim().parse().map_err(|_| invalid(s.clone())),
            PropertyValue::Bool(b) => Err(invalid(b.to_string())),
        }
    }

    /// Text property; absent or non-text is `MissingProperty`.
    pub fn require_str(&self, name: &str) -> Result<&str, MapError> {
        self.get_string(name)
            .ok_or_else(|| MapError::MissingProperty(name.to_owned()))
    }
}
