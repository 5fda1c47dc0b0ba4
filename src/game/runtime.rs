//! Game Runtime
//!
//! Owns the world and drives it one tick at a time: read held keys, move
//! the player, resolve mining and kills, animate, draw, check for the win.
//! The host calls `tick` once per displayed frame with the current time.

use super::event::{EventQueue, GameEvent, PauseReason};
use super::renderer::{render, DrawSurface};
use super::world::World;
use crate::config::GameConfig;
use crate::input::{InputState, Key};

/// Notice shown after the window was hidden
pub const FOCUS_LOST_NOTICE: &str = "Paused due to loss of focus";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

pub struct GameRuntime {
    world: World,
    input: InputState,
    events: EventQueue<GameEvent>,
    run_state: RunState,
    won: bool,
    /// Duration of the last tick (ms)
    latency: f64,
    /// Time of the last tick, or of the last resume (ms)
    last_update: f64,
    notice: Option<&'static str>,
    move_step: f32,
    reference_interval_ms: f64,
}

impl GameRuntime {
    pub fn new(config: &GameConfig, world: World, now_ms: f64) -> Self {
        Self {
            world,
            input: InputState::new(),
            events: EventQueue::new(),
            run_state: RunState::Running,
            won: false,
            latency: 0.0,
            last_update: now_ms,
            notice: None,
            move_step: config.move_step,
            reference_interval_ms: config.reference_interval_ms,
        }
    }

    /// Run one tick. Does nothing and returns false while paused.
    pub fn tick(&mut self, now_ms: f64, surface: &mut impl DrawSurface) -> bool {
        if self.run_state == RunState::Paused {
            return false;
        }

        let delta = (now_ms - self.last_update).max(0.0);
        self.update(delta);
        self.world.animate();
        render(&self.world, surface);

        if !self.won && self.world.all_dead() {
            self.won = true;
            self.events.send(GameEvent::Won);
        }

        self.latency = delta;
        self.last_update = now_ms;
        true
    }

    /// Movement and interactions for a tick lasting `delta_ms`
    fn update(&mut self, delta_ms: f64) {
        let scale = (delta_ms / self.reference_interval_ms) as f32;
        let (dx, dy) = self.input.movement_intent(self.move_step);
        self.world.move_player(dx * scale, dy * scale);
        self.world.resolve_interactions(&mut self.events);
    }

    /// Draw the world as it is, without advancing anything
    pub fn redraw(&self, surface: &mut impl DrawSurface) {
        render(&self.world, surface);
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.release(key);
    }

    pub fn pause(&mut self) {
        self.notice = None;
        self.enter_pause(PauseReason::Requested);
    }

    fn enter_pause(&mut self, reason: PauseReason) {
        if self.run_state == RunState::Paused {
            return;
        }
        self.run_state = RunState::Paused;
        self.events.send(GameEvent::Paused(reason));
    }

    /// Continue from `now_ms`. Keys held before the pause are forgotten
    /// and the paused time does not count as latency.
    pub fn resume(&mut self, now_ms: f64) {
        self.notice = None;
        if self.run_state == RunState::Running {
            return;
        }
        self.run_state = RunState::Running;
        self.input.clear();
        self.last_update = now_ms;
        self.events.send(GameEvent::Resumed);
    }

    pub fn toggle_pause(&mut self, now_ms: f64) {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(now_ms),
        }
    }

    /// The window was hidden. Pauses a running game; never resumes.
    pub fn visibility_lost(&mut self) {
        if self.run_state == RunState::Running {
            self.notice = Some(FOCUS_LOST_NOTICE);
            self.enter_pause(PauseReason::FocusLost);
        }
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain()
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn latency(&self) -> f64 {
        self.latency
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
