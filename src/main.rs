//! Slime Miner: walk around the cave and mine every slime
//!
//! Arrow keys or WASD move the miner. Touching a slime kills it; the game
//! is won once every slime has finished dying. P or Escape pauses.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod config;
mod game;
mod input;

use macroquad::miniquad::{self, EventHandler};
use macroquad::input::utils::{register_input_subscriber, repeat_all_miniquad_input};
use macroquad::logging::{info, warn};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use assets::BitmapStore;
use config::{ConfigError, GameConfig, CONFIG_PATH};
use game::{GameEvent, GameRuntime, ScreenSurface, SpriteAssets, World};
use input::Key;

fn window_conf() -> Conf {
    // Errors are reported again once logging is up in main
    #[cfg(not(target_arch = "wasm32"))]
    let config = GameConfig::load_or_default(CONFIG_PATH).unwrap_or_default();
    // The page sizes the canvas on the web
    #[cfg(target_arch = "wasm32")]
    let config = GameConfig::default();
    Conf {
        window_title: format!("Slime Miner v{}", VERSION),
        window_width: config.canvas_width as i32,
        window_height: config.canvas_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Load the config, falling back to the defaults on any error
async fn load_config() -> GameConfig {
    match GameConfig::load_bundled(CONFIG_PATH).await {
        Ok(config) => {
            info!("Loaded config from {}", CONFIG_PATH);
            config
        }
        Err(ConfigError::Fetch(e)) => {
            info!("No config at {} ({}), using defaults", CONFIG_PATH, e);
            GameConfig::default()
        }
        Err(e) => {
            warn!("Invalid config {}, using defaults: {}", CONFIG_PATH, e);
            GameConfig::default()
        }
    }
}

fn now_ms() -> f64 {
    get_time() * 1000.0
}

/// Collects window notifications that macroquad does not expose directly
#[derive(Default)]
struct WindowEvents {
    minimized: bool,
}

impl EventHandler for WindowEvents {
    fn update(&mut self) {}

    fn draw(&mut self) {}

    fn window_minimized_event(&mut self) {
        self.minimized = true;
    }
}

/// Forward key transitions to the game. Keys the game does not use are
/// ignored here.
fn forward_keys(runtime: &mut GameRuntime) {
    for code in get_keys_pressed() {
        if let Some(key) = Key::from_keycode(code) {
            runtime.key_down(key);
        }
    }
    for code in get_keys_released() {
        if let Some(key) = Key::from_keycode(code) {
            runtime.key_up(key);
        }
    }
}

/// Log how the sprite loads went, once none are left in flight
fn report_bitmaps(bitmaps: &BitmapStore, sprites: &SpriteAssets, config: &GameConfig) {
    for (id, expected) in sprites.expected_sizes(&config.sprites) {
        let path = bitmaps.path(id).unwrap_or("?");
        if let Some(e) = bitmaps.error(id) {
            warn!("{} will not be drawn: {}", path, e);
            continue;
        }
        if let (Some(expected), Some(actual)) = (expected, bitmaps.natural_size(id)) {
            if expected != actual {
                warn!(
                    "{} is {}x{}, config says {}x{}",
                    path, actual.0, actual.1, expected.0, expected.1
                );
            }
        }
    }
}

/// Log lines for a frame's events. `remaining` is the live slime count
/// after those events; each kill message counts down to it.
fn describe_events(events: &[GameEvent], remaining: usize) -> Vec<String> {
    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::SlimeKilled { .. }))
        .count();
    let mut left = remaining + kills;
    events
        .iter()
        .map(|event| match event {
            GameEvent::SlimeKilled { index } => {
                left -= 1;
                format!("Slime {} mined, {} left", index, left)
            }
            GameEvent::Won => "All slimes mined, you win".to_string(),
            GameEvent::Paused(reason) => format!("Game paused ({:?})", reason),
            GameEvent::Resumed => "Game resumed".to_string(),
        })
        .collect()
}

fn log_events(runtime: &mut GameRuntime) {
    let events: Vec<GameEvent> = runtime.drain_events().collect();
    for line in describe_events(&events, runtime.world().remaining_slimes()) {
        info!("{}", line);
    }
}

fn draw_hud(runtime: &GameRuntime) {
    draw_text(&format!("Latency: {:.0}ms", runtime.latency()), 10.0, 20.0, 20.0, WHITE);

    if let Some(notice) = runtime.notice() {
        draw_text(notice, 10.0, 44.0, 20.0, YELLOW);
    } else if runtime.is_paused() {
        draw_text("Paused", 10.0, 44.0, 20.0, YELLOW);
    }

    if runtime.won() {
        let message = "You win!";
        let size = measure_text(message, None, 48, 1.0);
        draw_text(
            message,
            (screen_width() - size.width) / 2.0,
            screen_height() / 2.0,
            48.0,
            GOLD,
        );
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    info!("Slime Miner v{}", VERSION);
    let config = load_config().await;

    let mut bitmaps = BitmapStore::new();
    let sprites = SpriteAssets::request(&mut bitmaps, &config.sprites);

    let seed = config
        .seed
        .unwrap_or_else(|| (miniquad::date::now() * 1000.0) as u64);
    info!("Spawn seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let world = World::generate(&config, &sprites, &mut rng);
    info!(
        "Map ready: {} rocks, {} slimes, player speed {} px/s",
        world.rocks.len(),
        world.slimes.len(),
        world.player.pose.speed
    );
    let mut runtime = GameRuntime::new(&config, world, now_ms());

    let mut loading = true;
    let subscriber = register_input_subscriber();
    let mut window_events = WindowEvents::default();

    loop {
        repeat_all_miniquad_input(&mut window_events, subscriber);
        if std::mem::take(&mut window_events.minimized) {
            runtime.visibility_lost();
        }

        if is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::Escape) {
            runtime.toggle_pause(now_ms());
        }

        bitmaps.poll();
        if loading && bitmaps.pending_count() == 0 {
            loading = false;
            report_bitmaps(&bitmaps, &sprites, &config);
        }
        clear_background(BLACK);

        forward_keys(&mut runtime);
        let mut surface = ScreenSurface::new(&bitmaps);
        if !runtime.tick(now_ms(), &mut surface) {
            runtime.redraw(&mut surface);
        }

        log_events(&mut runtime);
        draw_hud(&runtime);

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PauseReason;

    #[test]
    fn test_same_frame_kills_count_down() {
        let events = [
            GameEvent::SlimeKilled { index: 3 },
            GameEvent::SlimeKilled { index: 7 },
        ];
        assert_eq!(
            describe_events(&events, 4),
            vec!["Slime 3 mined, 5 left", "Slime 7 mined, 4 left"]
        );
    }

    #[test]
    fn test_pause_events_are_described() {
        let events = [GameEvent::Paused(PauseReason::FocusLost), GameEvent::Resumed];
        assert_eq!(
            describe_events(&events, 0),
            vec!["Game paused (FocusLost)", "Game resumed"]
        );
    }
}
