//! Keyboard input
//!
//! Arrow keys and WASD drive the four movement actions. Key state is fed
//! in by the host from press/release notifications, so the game never
//! polls the platform directly.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
