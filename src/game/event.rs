//! Event System
//!
//! The runtime records what happened during a tick as events instead of
//! calling into the host. The host drains the queue after each frame to log
//! or display them.

/// A queue for events of a single type.
/// Events are collected during the frame and drained by the host.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// Player asked for it
    Requested,
    /// The window was hidden or minimized
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player touched a slime; its death animation started
    SlimeKilled { index: usize },
    /// Every slime has finished dying. Sent once per game.
    Won,
    Paused(PauseReason),
    Resumed,
}
