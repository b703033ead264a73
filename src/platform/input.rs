//! Keyboard state
//!
//! The host forwards raw key names from its key events; the simulation polls
//! a [`TickInput`] snapshot once per frame.

use std::collections::HashSet;

use crate::sim::{PaddleInput, TickInput};

/// One-shot commands triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Escape
    Pause,
    /// Enter
    Confirm,
}

/// Keys currently held down (lowercased key names)
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns the command bound to it, if any
    pub fn key_down(&mut self, key: &str) -> Option<KeyCommand> {
        let key = key.to_lowercase();
        let command = match key.as_str() {
            "escape" => Some(KeyCommand::Pause),
            "enter" => Some(KeyCommand::Confirm),
            _ => None,
        };
        self.pressed.insert(key);
        command
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(&key.to_lowercase());
    }

    /// Drop everything held (e.g. the window lost focus)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// W/S drive the left paddle, I/K the right one
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: PaddleInput {
                up: self.is_pressed("w"),
                down: self.is_pressed("s"),
            },
            right: PaddleInput {
                up: self.is_pressed("i"),
                down: self.is_pressed("k"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping_is_case_insensitive() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.key_down("W"), None);
        assert_eq!(keys.key_down("k"), None);

        let input = keys.tick_input();
        assert!(input.left.up && !input.left.down);
        assert!(!input.right.up && input.right.down);

        keys.key_up("w");
        assert!(!keys.tick_input().left.up);
    }

    #[test]
    fn test_commands() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.key_down("Escape"), Some(KeyCommand::Pause));
        assert_eq!(keys.key_down("Enter"), Some(KeyCommand::Confirm));
        keys.clear();
        assert_eq!(keys.tick_input(), TickInput::default());
    }
}
