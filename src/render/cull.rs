//! Camera and visible-cell computation.

use crate::geom::{Point, Rect, Size, Vector};

/// Half-open range of grid cells, `min..max` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileRange {
    /// First cell, inclusive.
    pub min: Point,
    /// Last cell, exclusive.
    pub max: Point,
}

impl TileRange {
    /// True when the range holds no cells.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (self.min.y..self.max.y).flat_map(move |y| (self.min.x..self.max.x).map(move |x| Point::new(x, y)))
    }

    /// Intersection with a `width` x `height` grid anchored at the origin.
    pub fn clamped(&self, width: usize, height: usize) -> TileRange {
        let w = width.min(i32::MAX as usize) as i32;
        let h = height.min(i32::MAX as usize) as i32;
        TileRange {
            min: Point::new(self.min.x.clamp(0, w), self.min.y.clamp(0, h)),
            max: Point::new(self.max.x.clamp(0, w), self.max.y.clamp(0, h)),
        }
    }
}

/// Cells touched by `view` on a grid of `tile`-sized cells. The start is
/// floored and the end ceiled, so partly visible edge tiles are included.
pub fn visible_tile_range(view: &Rect, tile: Size) -> TileRange {
    covering_tile_range(view, tile, tile)
}

/// Cells whose tile may touch `view` when cell `c` is drawn at `c * s` for
/// some tile size `s` between `smallest` and `largest`.
pub fn covering_tile_range(view: &Rect, smallest: Size, largest: Size) -> TileRange {
    if smallest.w <= 0.0 || smallest.h <= 0.0 || view.is_empty() || view.is_inverted() {
        return TileRange::default();
    }
    TileRange {
        min: Point::new(
            (view.left() / largest.w).floor() as i32,
            (view.top() / largest.h).floor() as i32,
        ),
        max: Point::new(
            (view.right() / smallest.w).ceil() as i32,
            (view.bottom() / smallest.h).ceil() as i32,
        ),
    }
}

/// The visible part of the world. Drawing subtracts `top_left` from every
/// destination, so moving the camera by `d` shifts the picture by `-d`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    rect: Rect,
    tile_size: Size,
    range: TileRange,
}

impl Camera {
    /// A camera over `rect` on a grid of `tile_size` cells.
    pub fn new(rect: Rect, tile_size: Size) -> Self {
        let range = visible_tile_range(&rect, tile_size);
        Camera { rect, tile_size, range }
    }

    /// World rectangle in view.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// World position of the top-left corner.
    pub fn top_left(&self) -> Vector {
        self.rect.top_left()
    }

    /// Cell size the range hint is computed with.
    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// Unclamped range of cells under the camera.
    pub fn tile_range(&self) -> TileRange {
        self.range
    }

    /// Moves the top-left corner to `pos`.
    pub fn set_position(&mut self, pos: Vector) -> &mut Self {
        self.rect.set_top_left(pos);
        self.range = visible_tile_range(&self.rect, self.tile_size);
        self
    }

    /// Moves by `delta`.
    pub fn scroll_by(&mut self, delta: Vector) -> &mut Self {
        let pos = self.top_left() + delta;
        self.set_position(pos)
    }

    /// Changes the view size, keeping the top-left corner.
    pub fn resize(&mut self, size: Size) -> &mut Self {
        self.rect.set_size(size);
        self.range = visible_tile_range(&self.rect, self.tile_size);
        self
    }

    /// Keeps the camera inside `bounds` where it fits; a camera larger than
    /// the bounds is pinned to their top-left.
    pub fn clamp_to(&mut self, bounds: &Rect) -> &mut Self {
        let max_x = (bounds.right() - self.rect.w).max(bounds.left());
        let max_y = (bounds.bottom() - self.rect.h).max(bounds.top());
        let pos = Vector::new(
            self.rect.x.clamp(bounds.left(), max_x),
            self.rect.y.clamp(bounds.top(), max_y),
        );
        self.set_position(pos)
    }

    /// Offset to add to world coordinates to get screen coordinates.
    pub fn offset(&self) -> Vector {
        Vector::ZERO - self.top_left()
    }
}
