//! Keyboard and pointer state, read once per tick.

use std::collections::BTreeSet;

use crate::geom::Vector;

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

impl MouseButton {
    /// Parses `left`, `middle` or `right`, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Some(MouseButton::Left),
            "middle" => Some(MouseButton::Middle),
            "right" => Some(MouseButton::Right),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Read-only view of the current input state. Key names are lowercase.
pub trait InputSource {
    /// True while the key is held.
    fn is_key_down(&self, name: &str) -> bool;
    /// Every held key, sorted.
    fn pressed_keys(&self) -> Vec<&str>;
    /// True while the button is held.
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;
    /// Pointer position relative to the drawing surface.
    fn pointer_position(&self) -> Vector;
}

/// A snapshot of input, either captured from the window each frame or
/// assembled by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    keys: BTreeSet<String>,
    buttons: [bool; 3],
    pointer: Vector,
}

impl InputState {
    /// Nothing held, pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as held.
    pub fn press_key(&mut self, name: &str) -> &mut Self {
        self.keys.insert(name.to_lowercase());
        self
    }

    /// Marks a key as released.
    pub fn release_key(&mut self, name: &str) -> &mut Self {
        self.keys.remove(&name.to_lowercase());
        self
    }

    /// Marks a button as held.
    pub fn press_button(&mut self, button: MouseButton) -> &mut Self {
        self.buttons[button.slot()] = true;
        self
    }

    /// Marks a button as released.
    pub fn release_button(&mut self, button: MouseButton) -> &mut Self {
        self.buttons[button.slot()] = false;
        self
    }

    /// Moves the pointer.
    pub fn move_pointer(&mut self, to: Vector) -> &mut Self {
        self.pointer = to;
        self
    }
}

impl InputSource for InputState {
    fn is_key_down(&self, name: &str) -> bool {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.keys.contains(&name.to_lowercase())
        } else {
            self.keys.contains(name)
        }
    }

    fn pressed_keys(&self) -> Vec<&str> {
        self.keys.iter().map(String::as_str).collect()
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.slot()]
    }

    fn pointer_position(&self) -> Vector {
        self.pointer
    }
}
