//! Held-key input state
//!
//! Key events arrive asynchronously from the browser and only flip booleans
//! here; the player reads the resulting state synchronously once per tick.

use serde::{Deserialize, Serialize};

/// Every key the game reacts to (two bindings per direction, plus fire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    Space,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::ArrowUp,
        Key::ArrowLeft,
        Key::ArrowDown,
        Key::ArrowRight,
        Key::Space,
    ];

    /// Map a DOM `KeyboardEvent` (`key`, `code`) to a bound key
    ///
    /// Space is matched on `code` so it works regardless of layout; the rest
    /// match on `key`. Anything else is ignored.
    pub fn from_dom(key: &str, code: &str) -> Option<Self> {
        if code == "Space" {
            return Some(Key::Space);
        }
        match key {
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowRight" => Some(Key::ArrowRight),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held/released state of every bound key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; 9],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        self.held[key.index()] = pressed;
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Apply a DOM key event. Returns true when the key is bound, meaning the
    /// browser's default action (page scrolling) should be suppressed.
    pub fn handle_dom_key(&mut self, key: &str, code: &str, pressed: bool) -> bool {
        match Key::from_dom(key, code) {
            Some(k) => {
                self.set(k, pressed);
                true
            }
            None => false,
        }
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        self.held = [false; 9];
    }

    pub fn up(&self) -> bool {
        self.is_held(Key::W) || self.is_held(Key::ArrowUp)
    }

    pub fn down(&self) -> bool {
        self.is_held(Key::S) || self.is_held(Key::ArrowDown)
    }

    pub fn left(&self) -> bool {
        self.is_held(Key::A) || self.is_held(Key::ArrowLeft)
    }

    pub fn right(&self) -> bool {
        self.is_held(Key::D) || self.is_held(Key::ArrowRight)
    }

    pub fn fire(&self) -> bool {
        self.is_held(Key::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_mapping() {
        assert_eq!(Key::from_dom(" ", "Space"), Some(Key::Space));
        assert_eq!(Key::from_dom("w", "KeyW"), Some(Key::W));
        assert_eq!(Key::from_dom("W", "KeyW"), Some(Key::W));
        assert_eq!(Key::from_dom("ArrowLeft", "ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_dom("q", "KeyQ"), None);
        assert_eq!(Key::from_dom("Enter", "Enter"), None);
    }

    #[test]
    fn test_unknown_keys_change_nothing() {
        let mut input = InputState::new();
        assert!(!input.handle_dom_key("x", "KeyX", true));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_two_bindings_per_direction() {
        let mut input = InputState::new();
        assert!(input.handle_dom_key("w", "KeyW", true));
        assert!(input.handle_dom_key("ArrowUp", "ArrowUp", true));
        assert!(input.up());

        // Releasing one binding keeps the other held
        input.handle_dom_key("ArrowUp", "ArrowUp", false);
        assert!(input.up());
        input.handle_dom_key("w", "KeyW", false);
        assert!(!input.up());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        for key in Key::ALL {
            input.press(key);
        }
        assert!(input.fire() && input.left() && input.right() && input.down());
        input.release_all();
        assert!(Key::ALL.iter().all(|k| !input.is_held(*k)));
    }
}
