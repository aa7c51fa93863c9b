//! Recorded draw calls, for tests and tools.

use crate::geom::Rect;
use crate::surface::{AtlasHandle, Surface};

/// One call made against a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// `Surface::draw_image_region`.
    Image {
        /// Atlas drawn from.
        atlas: AtlasHandle,
        /// Region of the atlas.
        src: Rect,
        /// Screen rectangle.
        dest: Rect,
    },
    /// `Surface::fill_rect`.
    Fill(Rect),
    /// `Surface::stroke_rect`.
    Stroke(Rect),
    /// `Surface::clear_rect`.
    Clear(Rect),
}

/// A surface that records what would have been drawn.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    /// Calls in the order they were made.
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every recorded call.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Destination rects of the image draws, in order.
    pub fn image_dests(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { dest, .. } => Some(*dest),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandBuffer {
    fn draw_image_region(&mut self, atlas: AtlasHandle, src: Rect, dest: Rect) {
        self.commands.push(DrawCommand::Image { atlas, src, dest });
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Fill(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Stroke(rect));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }
}
