//! Map Renderer
//!
//! Draws the world back to front: floor tiles, rocks, slimes, then the
//! player. Anything whose bitmap has not finished loading is skipped for
//! the frame. Drawing goes through `DrawSurface` so the order can be
//! checked without a window.

use macroquad::prelude::*;

use super::world::World;
use crate::assets::{BitmapId, BitmapStore};

/// Something the map can be blitted onto
pub trait DrawSurface {
    fn is_ready(&self, bitmap: BitmapId) -> bool;

    /// Copy a `sw × sh` region at `(sx, sy)` of `bitmap` to a `dw × dh`
    /// region at `(dx, dy)`
    #[allow(clippy::too_many_arguments)]
    fn blit_region(
        &mut self,
        bitmap: BitmapId,
        sx: i32,
        sy: i32,
        sw: i32,
        sh: i32,
        dx: i32,
        dy: i32,
        dw: i32,
        dh: i32,
    );

    /// Copy a whole bitmap at its natural size
    fn blit(&mut self, bitmap: BitmapId, dx: i32, dy: i32);
}

/// Draw one frame of the world
pub fn render(world: &World, surface: &mut impl DrawSurface) {
    let floor = world.background.bitmap;
    if surface.is_ready(floor) {
        for (x, y) in world.background.tile_origins() {
            surface.blit(floor, x, y);
        }
    }

    for rock in &world.rocks {
        if surface.is_ready(rock.body.bitmap) {
            let (x, y) = rock.body.pixel_position();
            surface.blit(rock.body.bitmap, x, y);
        }
    }

    for slime in &world.slimes {
        if surface.is_ready(slime.body.bitmap) {
            let src = slime.source_rect();
            let (x, y) = slime.body.pixel_position();
            surface.blit_region(slime.body.bitmap, src.x, src.y, src.w, src.h, x, y, src.w, src.h);
        }
    }

    let player = &world.player;
    if surface.is_ready(player.body.bitmap) {
        let src = player.source_rect();
        let (x, y) = player.body.pixel_position();
        surface.blit_region(player.body.bitmap, src.x, src.y, src.w, src.h, x, y, src.w, src.h);
    }
}

/// The window, backed by the textures in a `BitmapStore`
pub struct ScreenSurface<'a> {
    bitmaps: &'a BitmapStore,
}

impl<'a> ScreenSurface<'a> {
    pub fn new(bitmaps: &'a BitmapStore) -> Self {
        Self { bitmaps }
    }
}

impl DrawSurface for ScreenSurface<'_> {
    fn is_ready(&self, bitmap: BitmapId) -> bool {
        self.bitmaps.is_ready(bitmap)
    }

    fn blit_region(
        &mut self,
        bitmap: BitmapId,
        sx: i32,
        sy: i32,
        sw: i32,
        sh: i32,
        dx: i32,
        dy: i32,
        dw: i32,
        dh: i32,
    ) {
        let Some(texture) = self.bitmaps.texture(bitmap) else {
            return;
        };
        draw_texture_ex(
            texture,
            dx as f32,
            dy as f32,
            WHITE,
            DrawTextureParams {
                source: Some(Rect::new(sx as f32, sy as f32, sw as f32, sh as f32)),
                dest_size: Some(vec2(dw as f32, dh as f32)),
                ..Default::default()
            },
        );
    }

    fn blit(&mut self, bitmap: BitmapId, dx: i32, dy: i32) {
        if let Some(texture) = self.bitmaps.texture(bitmap) {
            draw_texture(texture, dx as f32, dy as f32, WHITE);
        }
    }
}
