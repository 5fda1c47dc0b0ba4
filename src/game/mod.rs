//! Game Module
//!
//! A small sprite engine and the mining game built on it.
//!
//! Key concepts:
//! - Bounds/Collider: axis-aligned boxes, overlap and proximity tests
//! - AnimatedSprite: body + sheet layout + frame counter + per-type pose
//! - World: every entity on the map and the rules between them
//! - GameRuntime: ticks the world, tracks pause and the win
//! - DrawSurface: where the renderer blits, so drawing can be recorded

pub mod geometry;
pub mod collision;
pub mod sprite;
pub mod entities;
pub mod movement;
pub mod spawn;
pub mod world;
pub mod event;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use event::{EventQueue, GameEvent, PauseReason};
pub use renderer::{render, DrawSurface, ScreenSurface};
pub use runtime::{GameRuntime, RunState};
pub use world::{SpriteAssets, World};
