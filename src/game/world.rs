//! Game World
//!
//! Everything on the map: the floor, the rocks, the slimes and the player.
//! The world knows how to place them at the start of a game, how the
//! player interacts with slimes, and how every entity animates. It does not
//! know about time, input or drawing.

use rand::Rng;

use super::collision::{in_proximity, intersects, Collider};
use super::entities::{Background, Player, Rock, Slime, SLIME_COLORS};
use super::event::{EventQueue, GameEvent};
use super::geometry::Bounds;
use super::movement::MapLimits;
use super::spawn::find_free_spot;
use crate::assets::{BitmapId, BitmapStore};
use crate::config::{GameConfig, SpriteConfig};

/// Bitmaps used by each kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteAssets {
    pub player: BitmapId,
    pub slime: BitmapId,
    pub rock: BitmapId,
    pub floor: BitmapId,
}

impl SpriteAssets {
    /// Start loading every sprite listed in the config
    pub fn request(store: &mut BitmapStore, sprites: &SpriteConfig) -> Self {
        Self {
            player: store.request(&sprites.player.path),
            slime: store.request(&sprites.slime.path),
            rock: store.request(&sprites.rock.path),
            floor: store.request(&sprites.floor.path),
        }
    }

    /// Every bitmap with the size the config expects it to have
    pub fn expected_sizes(&self, sprites: &SpriteConfig) -> [(BitmapId, Option<(u32, u32)>); 4] {
        let floor = &sprites.floor;
        let rock = &sprites.rock;
        [
            (self.player, None),
            (self.slime, None),
            (self.rock, Some((rock.width, rock.height))),
            (self.floor, Some((floor.width, floor.height))),
        ]
    }
}

pub struct World {
    pub background: Background,
    pub rocks: Vec<Rock>,
    pub slimes: Vec<Slime>,
    pub player: Player,
    pub limits: MapLimits,
    /// How close the player has to be to a slime to mine it
    pub mining_margin: f32,
}

impl World {
    /// Set up a fresh map: player at its start, then rocks, then slimes,
    /// each at a random spot clear of everything placed before it.
    pub fn generate<R: Rng>(config: &GameConfig, assets: &SpriteAssets, rng: &mut R) -> Self {
        let limits = config.map_limits();
        let sprites = &config.sprites;

        let player = Player::spawn(
            config.player_start(),
            assets.player,
            sprites.player.layout(),
            config.player_speed,
        );
        let mut occupied: Vec<Bounds> = vec![player.bounds()];

        let rock_size = (sprites.rock.width as f32, sprites.rock.height as f32);
        let mut rocks = Vec::with_capacity(config.rock_count);
        for _ in 0..config.rock_count {
            let spot = find_free_spot(rng, rock_size.0, rock_size.1, &limits, &occupied, config.spawn_margin);
            let rock = Rock::new(spot, rock_size.0, rock_size.1, assets.rock);
            occupied.push(rock.bounds());
            rocks.push(rock);
        }

        let slime_sheet = sprites.slime.layout();
        let mut slimes = Vec::with_capacity(config.enemy_count);
        for _ in 0..config.enemy_count {
            let spot = find_free_spot(
                rng,
                slime_sheet.frame_width as f32,
                slime_sheet.frame_height as f32,
                &limits,
                &occupied,
                config.spawn_margin,
            );
            let slime = Slime::spawn(
                spot,
                assets.slime,
                slime_sheet,
                rng.gen_range(0..SLIME_COLORS),
                rng.gen_range(0..slime_sheet.frame_period()),
                config.death_frame,
            );
            occupied.push(slime.bounds());
            slimes.push(slime);
        }

        Self {
            background: Background::covering(
                assets.floor,
                sprites.floor.width,
                sprites.floor.height,
                config.canvas_width,
                config.canvas_height,
            ),
            rocks,
            slimes,
            player,
            limits,
            mining_margin: config.mining_margin,
        }
    }

    /// Move the player, clamped to the map. Rocks do not block movement.
    pub fn move_player(&mut self, raw_dx: f32, raw_dy: f32) -> (f32, f32) {
        self.player.apply_movement(raw_dx, raw_dy, &self.limits)
    }

    /// Recompute the mining flag and kill every slime the player touches
    pub fn resolve_interactions(&mut self, events: &mut EventQueue<GameEvent>) {
        let mining = self
            .slimes
            .iter()
            .any(|slime| in_proximity(&self.player, slime, self.mining_margin));
        self.player.pose.mining = mining;

        let player = &self.player;
        for (index, slime) in self.slimes.iter_mut().enumerate() {
            if intersects(player, &*slime) && slime.kill() {
                events.send(GameEvent::SlimeKilled { index });
            }
        }
    }

    /// Advance every animated entity by one tick
    pub fn animate(&mut self) {
        self.player.advance_frame();
        for slime in &mut self.slimes {
            slime.advance_frame();
        }
    }

    /// True once every slime has finished its death animation
    pub fn all_dead(&self) -> bool {
        self.slimes.iter().all(|slime| slime.is_dead())
    }

    /// Slimes not yet touched by the player
    pub fn remaining_slimes(&self) -> usize {
        self.slimes.iter().filter(|slime| !slime.is_killed()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use macroquad::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub(crate) fn test_assets() -> SpriteAssets {
        SpriteAssets {
            player: BitmapId::new(0),
            slime: BitmapId::new(1),
            rock: BitmapId::new(2),
            floor: BitmapId::new(3),
        }
    }

    pub(crate) fn test_world(seed: u64) -> World {
        let mut rng = StdRng::seed_from_u64(seed);
        World::generate(&GameConfig::default(), &test_assets(), &mut rng)
    }

    fn all_bounds(world: &World) -> Vec<Bounds> {
        std::iter::once(world.player.bounds())
            .chain(world.rocks.iter().map(|r| r.bounds()))
            .chain(world.slimes.iter().map(|s| s.bounds()))
            .collect()
    }

    #[test]
    fn test_expected_sizes() {
        let sizes = test_assets().expected_sizes(&SpriteConfig::default());
        assert_eq!(sizes[2], (BitmapId::new(2), Some((32, 32))));
        assert_eq!(sizes[3], (BitmapId::new(3), Some((280, 280))));
        assert_eq!(sizes[0].1, None);
    }

    #[test]
    fn test_generate_counts() {
        let world = test_world(3);
        assert_eq!(world.rocks.len(), 3);
        assert_eq!(world.slimes.len(), 10);
        assert_eq!(world.player.position(), GameConfig::default().player_start());
        assert_eq!(world.remaining_slimes(), 10);
        assert!(!world.all_dead());
        assert_eq!(world.player.pose.speed, GameConfig::default().player_speed);
    }

    #[test]
    fn test_generated_entities_are_apart_and_inside() {
        for seed in 0..8 {
            let world = test_world(seed);
            let boxes = all_bounds(&world);
            for (i, a) in boxes.iter().enumerate() {
                assert!(world.limits.contains(a));
                for b in &boxes[i + 1..] {
                    assert!(!in_proximity(a, b, 10.0), "seed {}: {:?} near {:?}", seed, a, b);
                }
            }
        }
    }

    #[test]
    fn test_slimes_start_alive_and_in_cycle() {
        let world = test_world(5);
        for slime in &world.slimes {
            assert!(!slime.is_killed());
            assert!(slime.frame < slime.sheet.frame_period());
            assert!(slime.pose.color < SLIME_COLORS);
        }
    }

    /// World with three slimes in a row along y = 100, far from the player
    fn lined_up_world() -> World {
        let mut world = test_world(1);
        let sheet = world.slimes[0].sheet;
        let bitmap = world.slimes[0].body.bitmap;
        world.slimes = [100.0, 300.0, 500.0]
            .iter()
            .map(|x| Slime::spawn(Vec2::new(*x, 100.0), bitmap, sheet, 0, 0, 40))
            .collect();
        world.player.body.position = Vec2::new(100.0, 400.0);
        world
    }

    #[test]
    fn test_mining_is_recomputed_each_tick() {
        let mut world = lined_up_world();
        let mut events = EventQueue::new();

        // 1px gap to the left of the middle slime
        world.player.body.position = Vec2::new(267.0, 100.0);
        world.resolve_interactions(&mut events);
        assert!(world.player.pose.mining);
        assert!(events.is_empty());

        world.player.body.position = Vec2::new(100.0, 400.0);
        world.resolve_interactions(&mut events);
        assert!(!world.player.pose.mining);
    }

    #[test]
    fn test_mining_counts_dead_slimes() {
        let mut world = lined_up_world();
        let mut events = EventQueue::new();
        world.slimes[1].kill();

        world.player.body.position = Vec2::new(267.0, 100.0);
        world.resolve_interactions(&mut events);
        assert!(world.player.pose.mining);
    }

    #[test]
    fn test_touching_kills_once() {
        let mut world = lined_up_world();
        let mut events = EventQueue::new();
        world.player.body.position = Vec2::new(510.0, 110.0);

        world.resolve_interactions(&mut events);
        assert!(world.slimes[2].is_killed());
        assert_eq!(world.slimes[2].frame, 0);
        assert_eq!(events.drain().collect::<Vec<_>>(), vec![GameEvent::SlimeKilled { index: 2 }]);
        assert_eq!(world.remaining_slimes(), 2);

        world.resolve_interactions(&mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_move_player_stays_in_map() {
        let mut world = lined_up_world();
        world.player.body.position = Vec2::new(50.0, 50.0);
        assert_eq!(world.move_player(-100.0, 0.0), (-40.0, 0.0));
        assert_eq!(world.player.position(), Vec2::new(10.0, 50.0));
    }

    #[test]
    fn test_dead_slimes_stay_dead() {
        let mut world = test_world(4);
        for slime in &mut world.slimes {
            slime.kill();
        }
        for _ in 0..19 {
            world.animate();
        }
        assert!(!world.all_dead());
        world.animate();
        assert!(world.all_dead());
        for _ in 0..50 {
            world.animate();
            assert!(world.all_dead());
        }
    }

    #[test]
    fn test_no_slimes_means_all_dead() {
        let mut world = test_world(0);
        world.slimes.clear();
        assert!(world.all_dead());
    }
}
