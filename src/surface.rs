//! Drawing and asset-store seams. The macroquad implementations live in
//! `backend`; the headless ones here and in `command` back tests and tools.

use std::collections::HashMap;

use crate::error::MapError;
use crate::geom::Rect;

/// Opaque reference to a registered atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasHandle(pub u32);

/// A 2d drawing context.
pub trait Surface {
    /// Copies `src` of the atlas into `dest`.
    fn draw_image_region(&mut self, atlas: AtlasHandle, src: Rect, dest: Rect);
    /// Fills `rect` with the surface's fill colour.
    fn fill_rect(&mut self, rect: Rect);
    /// Outlines `rect`.
    fn stroke_rect(&mut self, rect: Rect);
    /// Clears `rect` to the background.
    fn clear_rect(&mut self, rect: Rect);
}

/// Images stored by name.
pub trait AssetStore {
    /// Loads the image at `locator` under `name`. Registering a name twice
    /// returns the handle from the first registration.
    fn register(&mut self, name: &str, locator: &str) -> Result<AtlasHandle, MapError>;
    /// Natural size of the image, positioned at the origin.
    fn rect_of(&self, name: &str) -> Result<Rect, MapError>;
    /// Handle of a registered image.
    fn handle(&self, name: &str) -> Result<AtlasHandle, MapError>;

    /// True when `name` is registered.
    fn contains(&self, name: &str) -> bool {
        self.handle(name).is_ok()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    handle: AtlasHandle,
    locator: String,
    rect: Rect,
}

/// An asset store that records registrations without decoding any images.
#[derive(Debug, Clone, Default)]
pub struct HeadlessAssets {
    entries: HashMap<String, Entry>,
}

impl HeadlessAssets {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size reported by `rect_of`; images default to 0x0.
    pub fn set_size(&mut self, name: &str, w: f32, h: f32) -> Result<(), MapError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| MapError::UnknownAsset(name.to_owned()))?;
        entry.rect = Rect::new(0.0, 0.0, w, h);
        Ok(())
    }

    /// Locator `name` was registered with.
    pub fn locator(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.locator.as_str())
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetStore for HeadlessAssets {
    fn register(&mut self, name: &str, locator: &str) -> Result<AtlasHandle, MapError> {
        if let Some(existing) = self.entries.get(name) {
            return Ok(existing.handle);
        }
        let handle = AtlasHandle(self.entries.len() as u32);
        self.entries.insert(
            name.to_owned(),
            Entry { handle, locator: locator.to_owned(), rect: Rect::default() },
        );
        Ok(handle)
    }

    fn rect_of(&self, name: &str) -> Result<Rect, MapError> {
        self.entries
            .get(name)
            .map(|e| e.rect)
            .ok_or_else(|| MapError::UnknownAsset(name.to_owned()))
    }

    fn handle(&self, name: &str) -> Result<AtlasHandle, MapError> {
        self.entries
            .get(name)
            .map(|e| e.handle)
            .ok_or_else(|| MapError::UnknownAsset(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn register_is_idempotent_per_name() {
        let mut assets = HeadlessAssets::new();
        let a = assets.register("terrain", "terrain.png").unwrap();
        let b = assets.register("terrain", "other.png").unwrap();
        let c = assets.register("hero", "hero.png").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(assets.locator("terrain"), Some("terrain.png"));
    }

    #[test]
    fn unknown_names_are_reference_errors() {
        let assets = HeadlessAssets::new();
        assert_eq!(assets.handle("ghost").unwrap_err().kind(), ErrorKind::Reference);
        assert_eq!(assets.rect_of("ghost").unwrap_err().kind(), ErrorKind::Reference);
    }

    #[test]
    fn rect_of_reports_natural_size_at_origin() {
        let mut assets = HeadlessAssets::new();
        assets.register("hero", "hero.png").unwrap();
        assets.set_size("hero", 96.0, 128.0).unwrap();
        assert_eq!(assets.rect_of("hero").unwrap(), Rect::new(0.0, 0.0, 96.0, 128.0));
    }
}
