//! Macroquad implementations of the drawing, asset and input seams.
//!
//! Only this module and the demo binary touch macroquad; everything else runs
//! headless.

use std::collections::HashMap;
use std::path::PathBuf;

use macroquad::color::{Color, BLACK, WHITE};
use macroquad::input::{get_keys_down, is_mouse_button_down, mouse_position};
use macroquad::math::{vec2, Rect as MqRect};
use macroquad::shapes::{draw_rectangle, draw_rectangle_lines};
use macroquad::texture::{draw_texture_ex, DrawTextureParams, FilterMode, Image, Texture2D};

use crate::error::MapError;
use crate::geom::{Rect, Vector};
use crate::input::{InputState, MouseButton};
use crate::surface::{AssetStore, AtlasHandle, Surface};

fn to_mq(rect: Rect) -> MqRect {
    MqRect::new(rect.x, rect.y, rect.w, rect.h)
}

/// GPU textures keyed by name. Images are read from disk relative to `root`
/// and sampled with nearest filtering.
#[derive(Default)]
pub struct TextureStore {
    root: PathBuf,
    names: HashMap<String, usize>,
    textures: Vec<Texture2D>,
}

impl TextureStore {
    /// An empty store reading images relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TextureStore {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Texture behind `atlas`, if it was registered here.
    pub fn texture(&self, atlas: AtlasHandle) -> Option<&Texture2D> {
        self.textures.get(atlas.0 as usize)
    }

    fn index(&self, name: &str) -> Result<usize, MapError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| MapError::UnknownAsset(name.to_owned()))
    }
}

impl AssetStore for TextureStore {
    fn register(&mut self, name: &str, locator: &str) -> Result<AtlasHandle, MapError> {
        if let Some(&i) = self.names.get(name) {
            return Ok(AtlasHandle(i as u32));
        }
        let io_err = |source: std::io::Error| MapError::Io {
            locator: locator.to_owned(),
            source,
        };
        let bytes = std::fs::read(self.root.join(locator)).map_err(io_err)?;
        let image = Image::from_file_with_format(&bytes, None).map_err(|e| {
            io_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
        })?;
        let tex = Texture2D::from_image(&image);
        tex.set_filter(FilterMode::Nearest);

        let i = self.textures.len();
        self.textures.push(tex);
        self.names.insert(name.to_owned(), i);
        log::debug!("registered atlas '{}' from {} ({}x{})", name, locator, image.width, image.height);
        Ok(AtlasHandle(i as u32))
    }

    fn rect_of(&self, name: &str) -> Result<Rect, MapError> {
        let tex = &self.textures[self.index(name)?];
        Ok(Rect::new(0.0, 0.0, tex.width(), tex.height()))
    }

    fn handle(&self, name: &str) -> Result<AtlasHandle, MapError> {
        self.index(name).map(|i| AtlasHandle(i as u32))
    }
}

/// Draws straight to the current macroquad render target.
pub struct MacroquadSurface<'a> {
    store: &'a TextureStore,
    /// Colour for `stroke_rect`.
    pub stroke_color: Color,
    /// Colour for `fill_rect`.
    pub fill_color: Color,
    /// Colour for `clear_rect`.
    pub clear_color: Color,
}

impl<'a> MacroquadSurface<'a> {
    /// White strokes and fills, black clears.
    pub fn new(store: &'a TextureStore) -> Self {
        MacroquadSurface {
            store,
            stroke_color: WHITE,
            fill_color: WHITE,
            clear_color: BLACK,
        }
    }
}

impl Surface for MacroquadSurface<'_> {
    fn draw_image_region(&mut self, atlas: AtlasHandle, src: Rect, dest: Rect) {
        let Some(tex) = self.store.texture(atlas) else {
            log::warn!("draw with unknown atlas handle {}", atlas.0);
            return;
        };
        draw_texture_ex(
            tex,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                source: Some(to_mq(src)),
                dest_size: Some(vec2(dest.w, dest.h)),
                ..Default::default()
            },
        );
    }

    fn fill_rect(&mut self, rect: Rect) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, self.fill_color);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, self.stroke_color);
    }

    fn clear_rect(&mut self, rect: Rect) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, self.clear_color);
    }
}

impl InputState {
    /// Snapshot of the window's keyboard and mouse. Key names are the
    /// lowercased macroquad key codes (`left`, `a`, `space`).
    pub fn capture() -> Self {
        let mut state = InputState::new();
        for key in get_keys_down() {
            state.press_key(&format!("{:?}", key));
        }
        for (button, mq) in [
            (MouseButton::Left, macroquad::input::MouseButton::Left),
            (MouseButton::Middle, macroquad::input::MouseButton::Middle),
            (MouseButton::Right, macroquad::input::MouseButton::Right),
        ] {
            if is_mouse_button_down(mq) {
                state.press_button(button);
            }
        }
        let (x, y) = mouse_position();
        state.move_pointer(Vector::new(x, y));
        state
    }
}
