//! Entity Variants
//!
//! The four kinds of things on the map:
//! - Player: animated, walks in four directions, switches to the mining
//!   columns when a slime is close
//! - Slime: animated enemy, wiggles in place until killed, then plays its
//!   death animation once and stays on the last frame
//! - Rock: static obstacle, only matters for spawn placement
//! - Background: floor tile repeated over the whole canvas

use macroquad::math::Vec2;

use super::collision::Collider;
use super::geometry::Bounds;
use super::sprite::{AnimatedSprite, AnimationPolicy, Body, SheetCell, SheetLayout};
use crate::assets::BitmapId;

// =============================================================================
// Player
// =============================================================================

/// Facing of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row of the player sheet holding this direction
    pub fn sheet_row(self) -> u32 {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }
}

/// Column offset of the mining animation in the player sheet
const MINING_COLUMN_OFFSET: u32 = 3;
/// Column drawn while standing still
const IDLE_COLUMN: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub direction: Direction,
    pub moving: bool,
    pub mining: bool,
    /// Nominal speed in pixels per second. Reported by the host; movement
    /// itself is driven by the configured step per reference interval.
    pub speed: f32,
}

impl AnimationPolicy for PlayerPose {
    fn sheet_cell(&self, frame: u32, sheet: &SheetLayout) -> SheetCell {
        let base = if self.mining { MINING_COLUMN_OFFSET } else { 0 };
        let step = if self.moving { sheet.step(frame) } else { IDLE_COLUMN };
        SheetCell {
            col: base + step,
            row: self.direction.sheet_row(),
        }
    }

    fn next_frame(&self, frame: u32, sheet: &SheetLayout) -> u32 {
        if self.moving {
            sheet.wrapping_next(frame)
        } else {
            0
        }
    }
}

pub type Player = AnimatedSprite<PlayerPose>;

impl Player {
    pub fn spawn(position: Vec2, bitmap: BitmapId, sheet: SheetLayout, speed: f32) -> Self {
        AnimatedSprite::new(
            position,
            bitmap,
            sheet,
            PlayerPose {
                direction: Direction::default(),
                moving: false,
                mining: false,
                speed,
            },
        )
    }
}

// =============================================================================
// Slime
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlimePhase {
    Idle,
    Moving,
    Death,
}

impl SlimePhase {
    /// First row of this phase inside one color block
    pub fn row_base(self) -> u32 {
        match self {
            SlimePhase::Idle => 0,
            SlimePhase::Moving => 2,
            SlimePhase::Death => 4,
        }
    }
}

/// Number of color variants in the slime sheet
pub const SLIME_COLORS: u32 = 4;
/// Rows used by one color variant
const ROWS_PER_COLOR: u32 = 5;
/// Frames the death animation advances per tick
const DEATH_FRAME_STEP: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlimePose {
    pub phase: SlimePhase,
    /// Color variant, `0..SLIME_COLORS`
    pub color: u32,
    /// Frame at which the death animation stops
    pub death_frame: u32,
}

impl AnimationPolicy for SlimePose {
    fn sheet_cell(&self, frame: u32, sheet: &SheetLayout) -> SheetCell {
        SheetCell {
            col: sheet.step(frame),
            row: self.phase.row_base() + self.color * ROWS_PER_COLOR,
        }
    }

    fn next_frame(&self, frame: u32, sheet: &SheetLayout) -> u32 {
        match self.phase {
            SlimePhase::Death => (frame + DEATH_FRAME_STEP).min(self.death_frame),
            SlimePhase::Idle | SlimePhase::Moving => sheet.wrapping_next(frame),
        }
    }
}

pub type Slime = AnimatedSprite<SlimePose>;

impl Slime {
    /// Create a slime wiggling in place. `frame` desynchronizes it from the
    /// other slimes and is wrapped into the animation cycle.
    pub fn spawn(
        position: Vec2,
        bitmap: BitmapId,
        sheet: SheetLayout,
        color: u32,
        frame: u32,
        death_frame: u32,
    ) -> Self {
        let mut slime = AnimatedSprite::new(
            position,
            bitmap,
            sheet,
            SlimePose {
                phase: SlimePhase::Moving,
                color: color % SLIME_COLORS,
                death_frame,
            },
        );
        slime.frame = frame % sheet.frame_period();
        slime
    }

    /// Start the death animation. Returns false if the slime was already
    /// dying, in which case nothing changes.
    pub fn kill(&mut self) -> bool {
        if self.pose.phase == SlimePhase::Death {
            return false;
        }
        self.pose.phase = SlimePhase::Death;
        self.frame = 0;
        true
    }

    /// Dying or dead
    pub fn is_killed(&self) -> bool {
        self.pose.phase == SlimePhase::Death
    }

    /// Death animation has finished
    pub fn is_dead(&self) -> bool {
        self.is_killed() && self.frame >= self.pose.death_frame
    }
}

// =============================================================================
// Rock
// =============================================================================

/// Static obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rock {
    pub body: Body,
}

impl Rock {
    pub fn new(position: Vec2, width: f32, height: f32, bitmap: BitmapId) -> Self {
        Self {
            body: Body::new(position, width, height, bitmap),
        }
    }
}

impl Collider for Rock {
    fn bounds(&self) -> Bounds {
        self.body.bounds()
    }
}

// =============================================================================
// Background
// =============================================================================

/// Floor tile repeated over the canvas, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub bitmap: BitmapId,
    tile_width: u32,
    tile_height: u32,
    tiles_x: u32,
    tiles_y: u32,
}

impl Background {
    /// Enough tiles to cover a `canvas_width × canvas_height` canvas
    pub fn covering(
        bitmap: BitmapId,
        tile_width: u32,
        tile_height: u32,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Self {
        let tiles = |canvas: f32, tile: u32| (canvas / tile.max(1) as f32).ceil().max(0.0) as u32;
        Self {
            bitmap,
            tile_width,
            tile_height,
            tiles_x: tiles(canvas_width, tile_width),
            tiles_y: tiles(canvas_height, tile_height),
        }
    }

    /// Top-left corner of every tile, row by row
    pub fn tile_origins(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.tiles_y).flat_map(move |row| {
            (0..self.tiles_x).map(move |col| {
                (
                    (col * self.tile_width) as i32,
                    (row * self.tile_height) as i32,
                )
            })
        })
    }

    pub fn tile_count(&self) -> (u32, u32) {
        (self.tiles_x, self.tiles_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_sheet() -> SheetLayout {
        SheetLayout {
            frame_width: 32,
            frame_height: 32,
            frames_per_animation: 10,
            animation_count: 3,
        }
    }

    fn slime_sheet() -> SheetLayout {
        SheetLayout {
            frame_width: 32,
            frame_height: 32,
            frames_per_animation: 10,
            animation_count: 4,
        }
    }

    fn player() -> Player {
        Player::spawn(Vec2::ZERO, BitmapId::new(0), player_sheet(), 100.0)
    }

    fn slime(frame: u32) -> Slime {
        Slime::spawn(Vec2::ZERO, BitmapId::new(1), slime_sheet(), 2, frame, 40)
    }

    #[test]
    fn test_player_idle_uses_fixed_column() {
        let mut p = player();
        p.frame = 25;
        p.pose.direction = Direction::Right;
        assert_eq!(p.sheet_cell(), SheetCell { col: 1, row: 2 });

        p.advance_frame();
        assert_eq!(p.frame, 0);
    }

    #[test]
    fn test_player_rows_follow_direction() {
        let mut p = player();
        for (direction, row) in [
            (Direction::Down, 0),
            (Direction::Left, 1),
            (Direction::Right, 2),
            (Direction::Up, 3),
        ] {
            p.pose.direction = direction;
            assert_eq!(p.sheet_cell().row, row);
        }
    }

    #[test]
    fn test_player_walk_cycle() {
        let mut p = player();
        p.pose.moving = true;
        p.advance_frame();
        assert_eq!(p.frame, 1);
        assert_eq!(p.sheet_cell().col, 0);

        p.frame = 19;
        p.advance_frame();
        assert_eq!(p.sheet_cell().col, 2);

        p.frame = 29;
        p.advance_frame();
        assert_eq!(p.frame, 0);
    }

    #[test]
    fn test_player_mining_shifts_columns() {
        let mut p = player();
        p.pose.mining = true;
        assert_eq!(p.sheet_cell().col, 4);

        p.pose.moving = true;
        p.frame = 15;
        assert_eq!(p.sheet_cell().col, 4);
        p.frame = 5;
        assert_eq!(p.sheet_cell().col, 3);
    }

    #[test]
    fn test_slime_rows_offset_by_color() {
        let mut s = slime(0);
        assert_eq!(s.sheet_cell().row, 2 + 2 * 5);
        s.pose.phase = SlimePhase::Idle;
        assert_eq!(s.sheet_cell().row, 10);
        s.kill();
        assert_eq!(s.sheet_cell().row, 14);
    }

    #[test]
    fn test_slime_spawn_wraps_initial_frame() {
        assert_eq!(slime(45).frame, 5);
        assert_eq!(Slime::spawn(Vec2::ZERO, BitmapId::new(1), slime_sheet(), 7, 0, 40).pose.color, 3);
    }

    #[test]
    fn test_moving_slime_frame_wraps() {
        let mut s = slime(13);
        for _ in 0..slime_sheet().frame_period() {
            s.advance_frame();
            assert!(s.frame < slime_sheet().frame_period());
        }
        assert_eq!(s.frame, 13);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut s = slime(17);
        assert!(s.kill());
        s.advance_frame();
        s.advance_frame();
        let (phase, frame) = (s.pose.phase, s.frame);

        assert!(!s.kill());
        assert_eq!(s.pose.phase, phase);
        assert_eq!(s.frame, frame);
    }

    #[test]
    fn test_death_frame_is_terminal() {
        let mut s = slime(0);
        s.kill();
        let mut ticks = 0;
        while !s.is_dead() {
            s.advance_frame();
            ticks += 1;
            assert!(s.frame <= 40);
        }
        assert_eq!(ticks, 20);

        for _ in 0..100 {
            s.advance_frame();
            assert_eq!(s.frame, 40);
            assert!(s.is_dead());
        }
        assert_eq!(s.sheet_cell().col, 4);
    }

    #[test]
    fn test_odd_death_frame_clamps() {
        let mut s = Slime::spawn(Vec2::ZERO, BitmapId::new(1), slime_sheet(), 0, 0, 5);
        s.kill();
        for _ in 0..10 {
            s.advance_frame();
        }
        assert_eq!(s.frame, 5);
        assert!(s.is_dead());
    }

    #[test]
    fn test_background_covers_canvas() {
        let bg = Background::covering(BitmapId::new(3), 280, 280, 840.0, 560.0);
        assert_eq!(bg.tile_count(), (3, 2));
        let origins: Vec<_> = bg.tile_origins().collect();
        assert_eq!(
            origins,
            vec![(0, 0), (280, 0), (560, 0), (0, 280), (280, 280), (560, 280)]
        );

        let partial = Background::covering(BitmapId::new(3), 280, 280, 1000.0, 720.0);
        assert_eq!(partial.tile_count(), (4, 3));
    }
}
