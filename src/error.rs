//! Error type shared by loading, resolution and drawing.

use std::fmt;
use std::io;

/// Broad classes of failure, used by callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A document or asset could not be fetched.
    Io,
    /// A document was malformed or missed a required attribute.
    Parse,
    /// A name or gid did not refer to anything known.
    Reference,
    /// A grid coordinate was out of range.
    Index,
    /// A value was structurally valid but semantically wrong.
    Value,
}

/// Error type for map loading, tile resolution and drawing.
#[derive(Debug)]
pub enum MapError {
    /// Fetching a document or image failed.
    Io {
        /// Locator that was being read.
        locator: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A document was not valid JSON for the expected schema.
    Json {
        /// Locator of the document.
        locator: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// A document parsed but does not describe a usable map.
    InvalidMap(String),
    /// A layer's data length does not match width * height.
    InvalidLayerSize {
        /// Layer name.
        layer: String,
        /// Expected number of cells.
        expected: usize,
        /// Number of cells found.
        found: usize,
    },
    /// A property declared with a type this crate does not know.
    UnsupportedPropertyType {
        /// Property name.
        name: String,
        /// Declared type.
        kind: String,
    },
    /// A required property was absent.
    MissingProperty(String),
    /// A numeric property or attribute could not be coerced.
    InvalidNumber {
        /// Property name.
        name: String,
        /// Offending text.
        value: String,
    },
    /// No tileset owns this gid.
    UnresolvedGid(u32),
    /// The gid lies below the first gid of the tileset it was resolved against.
    NegativeTileIndex {
        /// The gid being resolved.
        gid: u32,
        /// First gid of the tileset.
        first_gid: u32,
    },
    /// No asset was registered under this name.
    UnknownAsset(String),
    /// A grid coordinate outside `[0, width) x [0, height)`.
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}

impl MapError {
    /// The taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::Io { .. } => ErrorKind::Io,
            MapError::Json { .. }
            | MapError::InvalidMap(_)
            | MapError::InvalidLayerSize { .. }
            | MapError::UnsupportedPropertyType { .. }
            | MapError::MissingProperty(_) => ErrorKind::Parse,
            MapError::UnresolvedGid(_) | MapError::UnknownAsset(_) => ErrorKind::Reference,
            MapError::OutOfBounds { .. } => ErrorKind::Index,
            MapError::NegativeTileIndex { .. } | MapError::InvalidNumber { .. } => ErrorKind::Value,
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { locator, source } => write!(f, "I/O error reading {}: {}", locator, source),
            MapError::Json { locator, source } => {
                write!(f, "Failed to parse JSON in {}: {}", locator, source)
            }
            MapError::InvalidMap(msg) => write!(f, "Invalid map: {}", msg),
            MapError::InvalidLayerSize { layer, expected, found } => write!(
                f,
                "Invalid layer size for layer '{}': expected {} cells, found {}",
                layer, expected, found
            ),
            MapError::UnsupportedPropertyType { name, kind } => {
                write!(f, "Property '{}' has unsupported type '{}'", name, kind)
            }
            MapError::MissingProperty(name) => write!(f, "Missing required property '{}'", name),
            MapError::InvalidNumber { name, value } => {
                write!(f, "Property '{}' is not a valid number: '{}'", name, value)
            }
            MapError::UnresolvedGid(gid) => write!(f, "Unresolved gid {}: no tileset owns it", gid),
            MapError::NegativeTileIndex { gid, first_gid } => write!(
                f,
                "Negative tile index: gid {} is below first gid {}",
                gid, first_gid
            ),
            MapError::UnknownAsset(name) => write!(f, "No asset registered under '{}'", name),
            MapError::OutOfBounds { x, y, width, height } => write!(
                f,
                "Grid coordinate ({}, {}) out of bounds for {}x{} grid",
                x, y, width, height
            ),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
