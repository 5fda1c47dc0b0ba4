//! Input state management
//!
//! The host forwards key press/release notifications; the game reads the
//! set of held keys once at the start of each update.

use std::collections::HashSet;

use super::{Action, Key};

/// Keys currently held down
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forget every held key (stale after a pause)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Check if action is currently held down through any of its keys
    pub fn action_down(&self, action: Action) -> bool {
        action.keys().iter().any(|key| self.is_held(*key))
    }

    /// Raw movement delta: `step` per held direction. Opposite directions
    /// cancel out.
    pub fn movement_intent(&self, step: f32) -> (f32, f32) {
        Action::ALL
            .iter()
            .filter(|action| self.action_down(**action))
            .fold((0.0, 0.0), |(dx, dy), action| {
                let (ux, uy) = action.unit();
                (dx + ux * step, dy + uy * step)
            })
    }
}
