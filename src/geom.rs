//! Value algebra for positions, dimensions and rectangles.
//!
//! Binary operators accept either a value of the same type or a plain `f32`,
//! which is broadcast to both axes. The `*_eq` methods mutate in place and
//! hand back `&mut Self` so calls can be chained.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use macroquad::math::Vec2;

/// A position in 2d space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

/// An integer cell coordinate, used to address grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// An axis-aligned rectangle: a position plus a size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl From<f32> for Vector {
    fn from(v: f32) -> Self {
        Vector { x: v, y: v }
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Vector { x: v.x, y: v.y }
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<f32> for Size {
    fn from(v: f32) -> Self {
        Size { w: v, h: v }
    }
}

macro_rules! impl_binary_ops {
    ($ty:ident, $a:ident, $b:ident) => {
        impl<T: Into<$ty>> Add<T> for $ty {
            type Output = $ty;
            fn add(self, rhs: T) -> $ty {
                let rhs = rhs.into();
                $ty { $a: self.$a + rhs.$a, $b: self.$b + rhs.$b }
            }
        }
        impl<T: Into<$ty>> Sub<T> for $ty {
            type Output = $ty;
            fn sub(self, rhs: T) -> $ty {
                let rhs = rhs.into();
                $ty { $a: self.$a - rhs.$a, $b: self.$b - rhs.$b }
            }
        }
        impl<T: Into<$ty>> Mul<T> for $ty {
            type Output = $ty;
            fn mul(self, rhs: T) -> $ty {
                let rhs = rhs.into();
                $ty { $a: self.$a * rhs.$a, $b: self.$b * rhs.$b }
            }
        }
        impl<T: Into<$ty>> Div<T> for $ty {
            type Output = $ty;
            fn div(self, rhs: T) -> $ty {
                let rhs = rhs.into();
                $ty { $a: self.$a / rhs.$a, $b: self.$b / rhs.$b }
            }
        }
        impl<T: Into<$ty>> AddAssign<T> for $ty {
            fn add_assign(&mut self, rhs: T) {
                *self = *self + rhs;
            }
        }
        impl<T: Into<$ty>> SubAssign<T> for $ty {
            fn sub_assign(&mut self, rhs: T) {
                *self = *self - rhs;
            }
        }
        impl<T: Into<$ty>> MulAssign<T> for $ty {
            fn mul_assign(&mut self, rhs: T) {
                *self = *self * rhs;
            }
        }
        impl<T: Into<$ty>> DivAssign<T> for $ty {
            fn div_assign(&mut self, rhs: T) {
                *self = *self / rhs;
            }
        }

        impl $ty {
            /// Adds `rhs` in place.
            pub fn plus_eq(&mut self, rhs: impl Into<$ty>) -> &mut Self {
                *self += rhs;
                self
            }
            /// Subtracts `rhs` in place.
            pub fn minus_eq(&mut self, rhs: impl Into<$ty>) -> &mut Self {
                *self -= rhs;
                self
            }
            /// Multiplies by `rhs` in place.
            pub fn multiply_eq(&mut self, rhs: impl Into<$ty>) -> &mut Self {
                *self *= rhs;
                self
            }
            /// Divides by `rhs` in place.
            pub fn divide_eq(&mut self, rhs: impl Into<$ty>) -> &mut Self {
                *self /= rhs;
                self
            }
        }
    };
}

impl_binary_ops!(Vector, x, y);
impl_binary_ops!(Size, w, h);

impl Vector {
    /// The origin.
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    /// A vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Vector { x, y }
    }

    /// Copies `other` into `self`.
    pub fn set(&mut self, other: Vector) -> &mut Self {
        *self = other;
        self
    }

    /// True when the point lies inside `rect`, edges included.
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self)
    }

    /// Euclidean length.
    pub fn length(&self) -> f32 {
        Vec2::from(*self).length()
    }

    /// Distance to `other`.
    pub fn distance(&self, other: Vector) -> f32 {
        Vec2::from(*self).distance(other.into())
    }

    /// Scales to unit length. A zero vector is left unchanged.
    pub fn normalize(&mut self) -> &mut Self {
        *self = Vec2::from(*self).normalize_or_zero().into();
        self
    }

    /// Angle in degrees of the direction from `origin` to `self`.
    pub fn to_angle(&self, origin: Vector) -> f32 {
        self.to_radian(origin).to_degrees()
    }

    /// Angle in radians of the direction from `origin` to `self`.
    pub fn to_radian(&self, origin: Vector) -> f32 {
        Vec2::from(*self - origin).to_angle()
    }

    /// Rotates in place by `degrees` around `origin`.
    pub fn rotate(&mut self, degrees: f32, origin: Vector) -> &mut Self {
        let turned = Vec2::from_angle(degrees.to_radians()).rotate((*self - origin).into());
        *self = Vector::from(turned) + origin;
        self
    }

    /// Floors both components.
    pub fn floor(&mut self) -> &mut Self {
        self.x = self.x.floor();
        self.y = self.y.floor();
        self
    }

    /// Ceils both components.
    pub fn ceil(&mut self) -> &mut Self {
        self.x = self.x.ceil();
        self.y = self.y.ceil();
        self
    }

    /// Rounds both components.
    pub fn round(&mut self) -> &mut Self {
        self.x = self.x.round();
        self.y = self.y.round();
        self
    }

    /// Whichever of the two has the smaller x.
    pub fn min_x(self, other: Vector) -> Vector {
        if self.x <= other.x { self } else { other }
    }

    /// Whichever of the two has the larger x.
    pub fn max_x(self, other: Vector) -> Vector {
        if self.x >= other.x { self } else { other }
    }

    /// Whichever of the two has the smaller y.
    pub fn min_y(self, other: Vector) -> Vector {
        if self.y <= other.y { self } else { other }
    }

    /// Whichever of the two has the larger y.
    pub fn max_y(self, other: Vector) -> Vector {
        if self.y >= other.y { self } else { other }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Size {
    /// A size from width and height.
    pub const fn new(w: f32, h: f32) -> Self {
        Size { w, h }
    }

    /// Copies `other` into `self`.
    pub fn set(&mut self, other: Size) -> &mut Self {
        *self = other;
        self
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0.0 || self.h == 0.0
    }

    /// Whichever of the two is narrower.
    pub fn min_w(self, other: Size) -> Size {
        if self.w <= other.w { self } else { other }
    }

    /// Whichever of the two is wider.
    pub fn max_w(self, other: Size) -> Size {
        if self.w >= other.w { self } else { other }
    }

    /// Whichever of the two is shorter.
    pub fn min_h(self, other: Size) -> Size {
        if self.h <= other.h { self } else { other }
    }

    /// Whichever of the two is taller.
    pub fn max_h(self, other: Size) -> Size {
        if self.h >= other.h { self } else { other }
    }
}

impl Point {
    /// A cell coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

/// Things a [`Rect`] can contain: points, sizes and other rects.
pub trait Within {
    /// True when `self` lies inside `rect`.
    fn within(&self, rect: &Rect) -> bool;
}

impl Within for Vector {
    fn within(&self, r: &Rect) -> bool {
        r.x <= self.x && r.y <= self.y && r.x + r.w >= self.x && r.y + r.h >= self.y
    }
}

impl Within for Size {
    fn within(&self, r: &Rect) -> bool {
        r.w >= self.w && r.h >= self.h
    }
}

impl Within for Rect {
    fn within(&self, r: &Rect) -> bool {
        r.x <= self.x && r.y <= self.y && r.right() >= self.right() && r.bottom() >= self.bottom()
    }
}

impl Rect {
    /// A rect from position and size.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// A rect at `pos` of `size`.
    pub fn from_parts(pos: Vector, size: Size) -> Self {
        Rect { x: pos.x, y: pos.y, w: size.w, h: size.h }
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Width.
    pub fn width(&self) -> f32 {
        self.w
    }

    /// Height.
    pub fn height(&self) -> f32 {
        self.h
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Vector {
        Vector::new(self.right(), self.y)
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Vector {
        Vector::new(self.x, self.bottom())
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Vector {
        Vector::new(self.right(), self.bottom())
    }

    /// Centre point.
    pub fn center(&self) -> Vector {
        Vector::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Moves the left edge, keeping the width.
    pub fn set_left(&mut self, x: f32) -> &mut Self {
        self.x = x;
        self
    }

    /// Moves the top edge, keeping the height.
    pub fn set_top(&mut self, y: f32) -> &mut Self {
        self.y = y;
        self
    }

    /// Moves the rect so its right edge sits at `right`; width is kept.
    pub fn set_right(&mut self, right: f32) -> &mut Self {
        self.x = right - self.w;
        self
    }

    /// Moves the rect so its bottom edge sits at `bottom`; height is kept.
    pub fn set_bottom(&mut self, bottom: f32) -> &mut Self {
        self.y = bottom - self.h;
        self
    }

    /// Sets the width.
    pub fn set_width(&mut self, w: f32) -> &mut Self {
        self.w = w;
        self
    }

    /// Sets the height.
    pub fn set_height(&mut self, h: f32) -> &mut Self {
        self.h = h;
        self
    }

    /// Moves so the top-left corner is at `v`.
    pub fn set_top_left(&mut self, v: Vector) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self
    }

    /// Moves so the top-right corner is at `v`.
    pub fn set_top_right(&mut self, v: Vector) -> &mut Self {
        self.x = v.x - self.w;
        self.y = v.y;
        self
    }

    /// Moves so the bottom-left corner is at `v`.
    pub fn set_bottom_left(&mut self, v: Vector) -> &mut Self {
        self.x = v.x;
        self.y = v.y - self.h;
        self
    }

    /// Moves so the bottom-right corner is at `v`.
    pub fn set_bottom_right(&mut self, v: Vector) -> &mut Self {
        self.x = v.x - self.w;
        self.y = v.y - self.h;
        self
    }

    /// Moves so the centre is at `v`.
    pub fn set_center(&mut self, v: Vector) -> &mut Self {
        self.x = v.x - self.w / 2.0;
        self.y = v.y - self.h / 2.0;
        self
    }

    /// Sets width and height.
    pub fn set_size(&mut self, size: Size) -> &mut Self {
        self.w = size.w;
        self.h = size.h;
        self
    }

    /// True when width or height is zero.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// True when width or height is negative.
    pub fn is_inverted(&self) -> bool {
        self.w < 0.0 || self.h < 0.0
    }

    /// Point-in-rect, size-fits or rect-inside test, depending on `other`.
    pub fn contains<T: Within + ?Sized>(&self, other: &T) -> bool {
        other.within(self)
    }

    /// True when the two rects share some area; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// A copy moved by `offset`.
    pub fn translated(&self, offset: Vector) -> Rect {
        Rect { x: self.x + offset.x, y: self.y + offset.y, ..*self }
    }

    /// Floors position and size.
    pub fn floor(&mut self) -> &mut Self {
        self.x = self.x.floor();
        self.y = self.y.floor();
        self.w = self.w.floor();
        self.h = self.h.floor();
        self
    }

    /// Ceils position and size.
    pub fn ceil(&mut self) -> &mut Self {
        self.x = self.x.ceil();
        self.y = self.y.ceil();
        self.w = self.w.ceil();
        self.h = self.h.ceil();
        self
    }

    /// Rounds position and size.
    pub fn round(&mut self) -> &mut Self {
        self.x = self.x.round();
        self.y = self.y.round();
        self.w = self.w.round();
        self.h = self.h.round();
        self
    }
}
