//! Spritesheet animation
//!
//! An animated entity is a plain record (body, sheet layout, frame counter)
//! plus a small per-type pose that decides which sheet cell to draw and how
//! the frame counter advances. The pose type is a generic parameter, so the
//! per-type policy is resolved at compile time.
//!
//! Sheets are laid out as a grid: columns are animation steps, rows are
//! directions or states, every cell is `frame_width × frame_height`.

use macroquad::math::Vec2;

use super::collision::Collider;
use super::geometry::Bounds;
use crate::assets::BitmapId;

/// Position, size and bitmap of anything drawn on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top-left corner
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub bitmap: BitmapId,
}

impl Body {
    pub fn new(position: Vec2, width: f32, height: f32, bitmap: BitmapId) -> Self {
        Self {
            position,
            width,
            height,
            bitmap,
        }
    }

    /// Destination of a blit, rounded to whole pixels
    pub fn pixel_position(&self) -> (i32, i32) {
        (self.position.x.round() as i32, self.position.y.round() as i32)
    }
}

impl Collider for Body {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.position.x, self.position.y, self.width, self.height)
    }
}

/// Geometry of a spritesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Ticks spent on each animation step before moving to the next column
    pub frames_per_animation: u32,
    /// Number of animation steps (columns) in one cycle
    pub animation_count: u32,
}

impl SheetLayout {
    /// Length of one full animation cycle, in ticks
    pub fn frame_period(&self) -> u32 {
        self.frames_per_animation * self.animation_count
    }

    /// Column reached after `frame` ticks into the cycle
    pub fn step(&self, frame: u32) -> u32 {
        frame / self.frames_per_animation
    }

    /// `frame + 1`, wrapped to the cycle
    pub fn wrapping_next(&self, frame: u32) -> u32 {
        (frame + 1) % self.frame_period()
    }
}

/// A cell of the spritesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetCell {
    pub col: u32,
    pub row: u32,
}

/// Source rectangle inside a bitmap, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Per-type animation rules
pub trait AnimationPolicy {
    /// Which cell to draw for the current state. Pure.
    fn sheet_cell(&self, frame: u32, sheet: &SheetLayout) -> SheetCell;

    /// Frame counter after one animation tick
    fn next_frame(&self, frame: u32, sheet: &SheetLayout) -> u32;
}

/// The shared record behind every animated entity
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite<P> {
    pub body: Body,
    pub sheet: SheetLayout,
    pub frame: u32,
    pub pose: P,
}

impl<P: AnimationPolicy> AnimatedSprite<P> {
    pub fn new(position: Vec2, bitmap: BitmapId, sheet: SheetLayout, pose: P) -> Self {
        Self {
            body: Body::new(
                position,
                sheet.frame_width as f32,
                sheet.frame_height as f32,
                bitmap,
            ),
            sheet,
            frame: 0,
            pose,
        }
    }

    pub fn sheet_cell(&self) -> SheetCell {
        self.pose.sheet_cell(self.frame, &self.sheet)
    }

    /// Advance the frame counter by one animation tick
    pub fn advance_frame(&mut self) {
        self.frame = self.pose.next_frame(self.frame, &self.sheet);
    }

    /// Region of the sheet to blit for the current state
    pub fn source_rect(&self) -> SourceRect {
        let cell = self.sheet_cell();
        SourceRect {
            x: (self.sheet.frame_width * cell.col) as i32,
            y: (self.sheet.frame_height * cell.row) as i32,
            w: self.sheet.frame_width as i32,
            h: self.sheet.frame_height as i32,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }
}

impl<P> Collider for AnimatedSprite<P> {
    fn bounds(&self) -> Bounds {
        self.body.bounds()
    }
}
