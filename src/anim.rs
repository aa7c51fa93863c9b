//! Input-triggered animation clips.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::error::MapError;
use crate::geom::{Rect, Vector};
use crate::input::{InputSource, MouseButton};
use crate::sprite::SpriteObject;
use crate::surface::{AssetStore, Surface};

/// Custom pointer test, given the sprite and the pointer position.
pub type PointerPredicate = Rc<dyn Fn(&SpriteObject, Vector) -> bool>;

/// How a [`Trigger::MouseMove`] tests the pointer.
#[derive(Clone)]
pub enum PointerTrigger {
    /// Pointer inside a fixed rect.
    Inside(Rect),
    /// Caller-supplied test.
    Predicate(PointerPredicate),
}

impl fmt::Debug for PointerTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerTrigger::Inside(r) => f.debug_tuple("Inside").field(r).finish(),
            PointerTrigger::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// The input condition that activates a clip.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Any of these keys is held.
    Key(Vec<String>),
    /// Any of these buttons is held.
    MouseButton(Vec<MouseButton>),
    /// Any of these pointer tests passes.
    MouseMove(Vec<PointerTrigger>),
}

impl Trigger {
    /// Key trigger over `names`, lowercased.
    pub fn keys<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Trigger::Key(names.into_iter().map(|s| s.as_ref().to_lowercase()).collect())
    }

    /// True when the trigger's condition holds for this input.
    pub fn is_active(&self, input: &impl InputSource, sprite: &SpriteObject) -> bool {
        match self {
            Trigger::Key(names) => names.iter().any(|n| input.is_key_down(n)),
            Trigger::MouseButton(buttons) => {
                buttons.iter().any(|&b| input.is_mouse_button_down(b))
            }
            Trigger::MouseMove(tests) => {
                let pointer = input.pointer_position();
                tests.iter().any(|t| match t {
                    PointerTrigger::Inside(rect) => pointer.inside(rect),
                    PointerTrigger::Predicate(pred) => pred(sprite, pointer),
                })
            }
        }
    }
}

/// One animation clip and the trigger that selects it.
#[derive(Debug, Clone)]
pub struct AnimMap {
    /// Atlas the clip plays from.
    pub image_name: String,
    /// Sheet row of the clip.
    pub row: u32,
    /// Frame the clip starts on.
    pub start_frame: u32,
    /// Frames in the clip.
    pub frame_count: u32,
    /// Condition that selects the clip.
    pub trigger: Trigger,
}

impl AnimMap {
    /// A clip on `row` of `image_name`.
    pub fn new(
        image_name: impl Into<String>,
        row: u32,
        start_frame: u32,
        frame_count: u32,
        trigger: Trigger,
    ) -> Self {
        AnimMap { image_name: image_name.into(), row, start_frame, frame_count, trigger }
    }
}

/// A sprite whose clip is chosen each tick by the first matching [`AnimMap`].
#[derive(Debug, Clone)]
pub struct ControlledSpriteObject {
    sprite: SpriteObject,
    anim_maps: Vec<AnimMap>,
    current: Option<usize>,
    updating: bool,
}

impl ControlledSpriteObject {
    /// Starts with no clip active.
    pub fn new(sprite: SpriteObject, anim_maps: Vec<AnimMap>) -> Self {
        ControlledSpriteObject { sprite, anim_maps, current: None, updating: true }
    }

    /// Index of the clip currently playing, if any has been triggered yet.
    pub fn active_animation(&self) -> Option<usize> {
        self.current
    }

    /// The animated sprite.
    pub fn sprite(&self) -> &SpriteObject {
        &self.sprite
    }

    /// Mutable access to the animated sprite.
    pub fn sprite_mut(&mut self) -> &mut SpriteObject {
        &mut self.sprite
    }

    /// Clips in priority order.
    pub fn anim_maps(&self) -> &[AnimMap] {
        &self.anim_maps
    }

    /// Pauses or resumes frame stepping.
    pub fn set_updating(&mut self, updating: bool) -> &mut Self {
        self.updating = updating;
        self
    }

    /// Where the sprite is drawn.
    pub fn dest(&self) -> Rect {
        self.sprite.dest()
    }

    /// Mutable destination, for movement.
    pub fn dest_mut(&mut self) -> &mut Rect {
        self.sprite.dest_mut()
    }

    /// Switches to the first clip whose trigger holds, then steps the sprite.
    pub fn update(&mut self, input: &impl InputSource, dt: Duration) {
        if !self.updating {
            return;
        }
        let sprite = &self.sprite;
        let triggered = self
            .anim_maps
            .iter()
            .position(|m| m.trigger.is_active(input, sprite));

        if let Some(i) = triggered {
            if self.current != Some(i) {
                let clip = &self.anim_maps[i];
                log::debug!(
                    "sprite '{}' switches to clip {} (row {})",
                    self.sprite.image_name(),
                    i,
                    clip.row
                );
                self.current = Some(i);
                self.sprite
                    .set_image_name(&clip.image_name)
                    .set_frame(clip.start_frame)
                    .set_row(clip.row)
                    .set_frame_count(clip.frame_count)
                    .sync_source();
            }
        }
        self.sprite.update(dt);
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
