//! Keyboard-driven actors.

use std::time::Duration;

use crate::anim::ControlledSpriteObject;
use crate::error::MapError;
use crate::geom::{Rect, Vector};
use crate::input::InputSource;
use crate::surface::{AssetStore, Surface};

/// Unit step for each movement key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directions {
    /// Step for `left`.
    pub left: Vector,
    /// Step for `up`.
    pub up: Vector,
    /// Step for `right`.
    pub right: Vector,
    /// Step for `down`.
    pub down: Vector,
}

impl Default for Directions {
    fn default() -> Self {
        Directions {
            left: Vector::new(-1.0, 0.0),
            up: Vector::new(0.0, -1.0),
            right: Vector::new(1.0, 0.0),
            down: Vector::new(0.0, 1.0),
        }
    }
}

impl Directions {
    /// Step for a movement key, if `key` is one.
    pub fn for_key(&self, key: &str) -> Option<Vector> {
        match key {
            "left" => Some(self.left),
            "up" => Some(self.up),
            "right" => Some(self.right),
            "down" => Some(self.down),
            _ => None,
        }
    }
}

/// A controlled sprite moved directly by the arrow keys. Movement carries no
/// inertia: velocity is rebuilt from the held keys every tick.
#[derive(Debug, Clone)]
pub struct Player {
    sprite: ControlledSpriteObject,
    move_speed: f32,
    directions: Directions,
    velocity: Vector,
    acceleration: Vector,
}

impl Player {
    /// A player moving `move_speed` pixels per tick.
    pub fn new(sprite: ControlledSpriteObject, move_speed: f32) -> Self {
        Player {
            sprite,
            move_speed,
            directions: Directions::default(),
            velocity: Vector::ZERO,
            acceleration: Vector::ZERO,
        }
    }

    /// Pixels per tick.
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Constant per-tick drift added on top of key movement.
    pub fn set_acceleration(&mut self, acceleration: Vector) -> &mut Self {
        self.acceleration = acceleration;
        self
    }

    /// The animated sprite.
    pub fn sprite(&self) -> &ControlledSpriteObject {
        &self.sprite
    }

    /// Where the player is drawn.
    pub fn dest(&self) -> Rect {
        self.sprite.dest()
    }

    /// Mutable destination.
    pub fn dest_mut(&mut self) -> &mut Rect {
        self.sprite.dest_mut()
    }

    /// Moves by the held keys, then updates the animation.
    pub fn update(&mut self, input: &impl InputSource, dt: Duration) {
        for key in input.pressed_keys() {
            if let Some(step) = self.directions.for_key(key) {
                self.velocity += step;
            }
        }
        self.velocity *= self.move_speed;
        self.velocity += self.acceleration;

        let moved = self.sprite.dest().top_left() + self.velocity;
        self.sprite.dest_mut().set_top_left(moved);
        self.sprite.update(input, dt);
        self.velocity = Vector::ZERO;
    }

    /// Draws the current frame shifted by `offset`.
    pub fn draw(
        &self,
        surface: &mut impl Surface,
        assets: &impl AssetStore,
        offset: Vector,
    ) -> Result<(), MapError> {
        self.sprite.draw(surface, assets, offset)
    }
}
