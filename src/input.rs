//! Keyboard state
//!
//! The platform layer feeds raw press/release events in; the simulation only
//! asks "is this key held right now".

use std::collections::HashSet;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` / `code` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Space" | "Spacebar" => Some(Key::Fire),
            _ => None,
        }
    }

    /// Map a legacy `keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Key::Left),
            39 => Some(Key::Right),
            32 => Some(Key::Fire),
            _ => None,
        }
    }

    /// Map a browser key event, preferring `key` and falling back to `keyCode`
    pub fn from_event(name: &str, key_code: u32) -> Option<Self> {
        Self::from_key_name(name).or_else(|| Self::from_key_code(key_code))
    }
}

/// Read-only, level-triggered key query
pub trait KeyQuery {
    fn is_down(&self, key: Key) -> bool;
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forget everything (focus lost, so release events may never arrive)
    pub fn clear(&mut self) {
        if self.any_held() {
            log::debug!("Releasing {} held keys", self.held.len());
        }
        self.held.clear();
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }
}

impl KeyQuery for KeyState {
    fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
