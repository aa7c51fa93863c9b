//! Images, frame timing and sprite-sheet animation.

use std::time::Duration;

use crate::error::MapError;
use crate::geom::{Rect, Vector};
use crate::surface::{AssetStore, Surface};

/// A named atlas image plus the region to copy and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageObject {
    /// Registered image name.
    pub name: String,
    /// Region of the image.
    pub src: Rect,
    /// World rectangle.
    pub dest: Rect,
}

impl ImageObject {
    /// An image drawing `src` into `dest`.
    pub fn new(name: impl Into<String>, src: Rect, dest: Rect) -> Self {
        ImageObject { name: name.into(), src, dest }
    }

    /// Uses the atlas' natural size for both rectangles.
    pub fn whole(name: &str, assets: &impl AssetStore) -> Result<Self, MapError> {
        let rect = assets.rect_of(name)?;
        Ok(ImageObject::new(name, rect, rect))
    }

    /// Draws with the destination shifted by `offset` (camera scroll).
    pub fn draw(
        &self,
        surface: &mut impl Surface,
        assets: &impl AssetStore,
        offset: Vector,
    ) -> Result<(), MapError> {
        let atlas = assets.handle(&self.name)?;
        surface.draw_image_region(atlas, self.src, self.dest.translated(offset));
        Ok(())
    }
}

/// Fires once every time more than `interval` has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTimer {
    interval: Duration,
    elapsed: Duration,
}

impl FrameTimer {
    /// A timer firing every `ms` milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        FrameTimer { interval: Duration::from_millis(ms), elapsed: Duration::ZERO }
    }

    /// Time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the interval, keeping elapsed time.
    pub fn set_interval(&mut self, interval: Duration) -> &mut Self {
        self.interval = interval;
        self
    }

    /// Adds `dt`; true when the interval was exceeded, which resets the timer.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }
}

/// A sprite-sheet image that steps through the frames of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteObject {
    image: ImageObject,
    /// Top-left of frame 0, row 0 inside the atlas.
    offset: Vector,
    frame_count: u32,
    columns: u32,
    current_frame: u32,
    current_row: u32,
    updating: bool,
    timer: FrameTimer,
}

impl SpriteObject {
    /// `image.src` must be the size of a single frame.
    pub fn new(image: ImageObject, frame_count: u32, columns: u32, anim_speed_ms: u64) -> Self {
        let offset = image.src.top_left();
        SpriteObject {
            image,
            offset,
            frame_count: frame_count.max(1),
            columns,
            current_frame: 0,
            current_row: 0,
            updating: true,
            timer: FrameTimer::from_millis(anim_speed_ms),
        }
    }

    /// Image currently drawn from.
    pub fn image_name(&self) -> &str {
        &self.image.name
    }

    /// Switches image.
    pub fn set_image_name(&mut self, name: &str) -> &mut Self {
        self.image.name = name.to_owned();
        self
    }

    /// Current frame within the clip.
    pub fn frame(&self) -> u32 {
        self.current_frame
    }

    /// Jumps to `frame`.
    pub fn set_frame(&mut self, frame: u32) -> &mut Self {
        self.current_frame = frame;
        self
    }

    /// Frames in the clip.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Sets the clip length; zero counts as one.
    pub fn set_frame_count(&mut self, count: u32) -> &mut Self {
        self.frame_count = count.max(1);
        self
    }

    /// Frames per sheet row.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Current sheet row.
    pub fn row(&self) -> u32 {
        self.current_row
    }

    /// Switches sheet row.
    pub fn set_row(&mut self, row: u32) -> &mut Self {
        self.current_row = row;
        self
    }

    /// True while frames advance.
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Pauses or resumes frame stepping.
    pub fn set_updating(&mut self, updating: bool) -> &mut Self {
        self.updating = updating;
        self
    }

    /// Region of the current frame.
    pub fn src(&self) -> Rect {
        self.image.src
    }

    /// Where the sprite is drawn.
    pub fn dest(&self) -> Rect {
        self.image.dest
    }

    /// Mutable destination.
    pub fn dest_mut(&mut self) -> &mut Rect {
        &mut self.image.dest
    }

    /// Frame timer.
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Mutable frame timer.
    pub fn timer_mut(&mut self) -> &mut FrameTimer {
        &mut self.timer
    }

    /// Points the source rect at the current frame and row.
    pub fn sync_source(&mut self) {
        let src = self.image.src;
        let at = self.offset
            + Vector::new(self.current_frame as f32 * src.w, self.current_row as f32 * src.h);
        self.image.src.set_top_left(at);
    }

    /// Advances one frame when the timer fires.
    pub fn update(&mut self, dt: Duration) {
        if self.updating && self.timer.tick(dt) {
            self.current_frame = (self.current_frame + 1) % self.frame_count;
            self.sync_source();
        }
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
