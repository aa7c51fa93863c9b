//! Clickable three-frame images.

use crate::error::MapError;
use crate::geom::{Rect, Vector};
use crate::input::{InputSource, MouseButton};
use crate::sprite::ImageObject;
use crate::surface::{AssetStore, Surface};

/// Frame shown while the pointer is elsewhere.
pub const FRAME_IDLE: u32 = 0;
/// Frame shown while the pointer is over the button.
pub const FRAME_HOVER: u32 = 1;
/// Frame shown while pressed inside the button.
pub const FRAME_PRESSED: u32 = 2;

/// A three-frame image (idle, hover, pressed laid out left to right) that
/// calls back with its image name when clicked.
///
/// A click is a left press that starts inside the button followed by a
/// release while the pointer is still inside.
pub struct ButtonObject {
    image: ImageObject,
    callback: Box<dyn FnMut(&str)>,
    base_src_x: f32,
    pressed: bool,
    was_down: bool,
    current_frame: u32,
}

impl ButtonObject {
    /// `image.src` is the idle frame; the other two follow it horizontally.
    pub fn new(image: ImageObject, callback: impl FnMut(&str) + 'static) -> Self {
        let base_src_x = image.src.x;
        ButtonObject {
            image,
            callback: Box::new(callback),
            base_src_x,
            pressed: false,
            was_down: false,
            current_frame: FRAME_IDLE,
        }
    }

    /// Frame currently shown.
    pub fn frame(&self) -> u32 {
        self.current_frame
    }

    /// True between a press inside and its release.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Atlas region of the current frame.
    pub fn src(&self) -> Rect {
        self.image.src
    }

    /// Where the button is drawn.
    pub fn dest(&self) -> Rect {
        self.image.dest
    }

    /// Updates the frame and fires the callback on a completed click.
    pub fn update(&mut self, input: &impl InputSource) {
        let inside = input.pointer_position().inside(&self.image.dest);
        let down = input.is_mouse_button_down(MouseButton::Left);

        self.current_frame = FRAME_IDLE;
        if inside {
            self.current_frame = FRAME_HOVER;
            if down {
                if !self.was_down {
                    self.pressed = true;
                }
                self.current_frame = FRAME_PRESSED;
            } else if self.pressed {
                self.pressed = false;
                log::debug!("button '{}' clicked", self.image.name);
                (self.callback)(&self.image.name);
            }
        }
        if !down {
            self.pressed = false;
        }
        self.was_down = down;

        let w = self.image.src.w;
        self.image.src.set_left(self.base_src_x + w * self.current_frame as f32);
    }

    /// Draws the current frame shifted by `offset`.
    pub fn draw(
        &self,
        surface: &mut impl Surface,
        assets: &impl AssetStore,
        offset: Vector,
    ) -> Result<(), MapError> {
        self.image.draw(surface, assets, offset)
    }
}
