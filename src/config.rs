//! Game configuration
//!
//! All tunables live in one RON file (`assets/config.ron`). Every field has
//! a default, so the file may list only what it changes, or be absent.

use std::fmt;
use std::path::Path;

use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::geometry::Bounds;
use crate::game::movement::MapLimits;
use crate::game::sprite::SheetLayout;

/// Default location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "assets/config.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    /// The file could not be fetched through the platform file loader
    Fetch(String),
    /// The file is not UTF-8 text
    Encoding(std::string::FromUtf8Error),
    Parse(ron::error::SpannedError),
    Validation(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<std::string::FromUtf8Error> for ConfigError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ConfigError::Encoding(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Fetch(e) => write!(f, "Fetch error: {}", e),
            ConfigError::Encoding(e) => write!(f, "Encoding error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// An animated spritesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames_per_animation: u32,
    pub animation_count: u32,
}

impl SheetConfig {
    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            frames_per_animation: self.frames_per_animation,
            animation_count: self.animation_count,
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::Validation(format!("{} sprite has a zero-sized frame", name)));
        }
        if self.frames_per_animation == 0 || self.animation_count == 0 {
            return Err(ConfigError::Validation(format!("{} sheet has no animation frames", name)));
        }
        Ok(())
    }
}

/// A single still image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub player: SheetConfig,
    pub slime: SheetConfig,
    pub rock: ImageConfig,
    /// Floor tile, repeated over the canvas
    pub floor: ImageConfig,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            player: SheetConfig {
                path: "images/player_spritesheet.png".to_string(),
                frame_width: 32,
                frame_height: 32,
                frames_per_animation: 10,
                animation_count: 3,
            },
            slime: SheetConfig {
                path: "images/slime_spritesheet.png".to_string(),
                frame_width: 32,
                frame_height: 32,
                frames_per_animation: 10,
                animation_count: 4,
            },
            rock: ImageConfig {
                path: "images/rock.png".to_string(),
                width: 32,
                height: 32,
            },
            floor: ImageConfig {
                path: "images/floor_tile.png".to_string(),
                width: 280,
                height: 280,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Border kept free on every side of the canvas
    pub margin: f32,
    /// Distance moved per held key during one reference interval
    pub move_step: f32,
    pub reference_interval_ms: f64,
    /// Nominal player speed in pixels per second, reported at startup
    pub player_speed: f32,
    pub rock_count: usize,
    pub enemy_count: usize,
    /// Frame at which a slime's death animation ends
    pub death_frame: u32,
    /// Minimum spacing between spawned entities
    pub spawn_margin: f32,
    /// Reach of the player's mining
    pub mining_margin: f32,
    /// Top-left of the player at start. Centre of the map when unset.
    pub player_start: Option<(f32, f32)>,
    /// Spawn placement seed. Taken from the clock when unset.
    pub seed: Option<u64>,
    pub sprites: SpriteConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 840.0,
            canvas_height: 560.0,
            margin: 10.0,
            move_step: 10.0,
            reference_interval_ms: 100.0,
            player_speed: 100.0,
            rock_count: 3,
            enemy_count: 10,
            death_frame: 40,
            spawn_margin: 10.0,
            mining_margin: 2.0,
            player_start: None,
            seed: None,
            sprites: SpriteConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load through macroquad's file loader, which reads from disk on
    /// native targets and fetches relative to the page on the web.
    pub async fn load_bundled(path: &str) -> Result<Self, ConfigError> {
        let bytes = macroquad::file::load_file(path)
            .await
            .map_err(|e| ConfigError::Fetch(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Parse and validate the raw contents of a config file
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ConfigError> {
        let contents = String::from_utf8(bytes)?;
        Self::from_ron_str(&contents)
    }

    /// Parse and validate a RON document
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load`, but a missing file means the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }

    pub fn map_limits(&self) -> MapLimits {
        MapLimits::from_canvas(self.canvas_width, self.canvas_height, self.margin)
    }

    pub fn player_start(&self) -> Vec2 {
        if let Some((x, y)) = self.player_start {
            return Vec2::new(x, y);
        }
        let limits = self.map_limits();
        let player = &self.sprites.player;
        Vec2::new(
            limits.left + (limits.width() - player.frame_width as f32) / 2.0,
            limits.top + (limits.height() - player.frame_height as f32) / 2.0,
        )
    }

    /// Check the constants describe a playable map.
    ///
    /// Spawn placement retries until it finds a free spot, so the boxes it
    /// has to keep apart must comfortably fit in the map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.canvas_width,
            self.canvas_height,
            self.margin,
            self.move_step,
            self.player_speed,
            self.spawn_margin,
            self.mining_margin,
        ];
        if finite.iter().any(|v| !v.is_finite()) || !self.reference_interval_ms.is_finite() {
            return Err(ConfigError::Validation("all numeric settings must be finite".into()));
        }
        if self.margin < 0.0 || self.spawn_margin < 0.0 || self.mining_margin < 0.0 {
            return Err(ConfigError::Validation("margins must not be negative".into()));
        }
        if self.reference_interval_ms <= 0.0 {
            return Err(ConfigError::Validation("reference_interval_ms must be positive".into()));
        }
        if self.death_frame == 0 {
            return Err(ConfigError::Validation("death_frame must be positive".into()));
        }

        self.sprites.player.validate("player")?;
        self.sprites.slime.validate("slime")?;
        let rock = &self.sprites.rock;
        let floor = &self.sprites.floor;
        if rock.width == 0 || rock.height == 0 || floor.width == 0 || floor.height == 0 {
            return Err(ConfigError::Validation("rock and floor images need a size".into()));
        }

        let slime = &self.sprites.slime;
        let limits = self.map_limits();
        let player = &self.sprites.player;
        let sizes = [
            (player.frame_width, player.frame_height),
            (slime.frame_width, slime.frame_height),
            (rock.width, rock.height),
        ];
        for (w, h) in sizes {
            if w as f32 > limits.width() || h as f32 > limits.height() {
                return Err(ConfigError::Validation(format!(
                    "a {}x{} sprite does not fit in a {}x{} map",
                    w,
                    h,
                    limits.width(),
                    limits.height()
                )));
            }
        }

        let start = self.player_start();
        let start_bounds = Bounds::new(
            start.x,
            start.y,
            player.frame_width as f32,
            player.frame_height as f32,
        );
        if !limits.contains(&start_bounds) {
            return Err(ConfigError::Validation("player_start is outside the map".into()));
        }

        self.check_spawn_room()
    }

    /// Spawn placement samples a top-left corner uniformly and rejects it
    /// while it is within the spawn margin of anything already placed.
    ///
    /// A placed `wo × ho` box rules out a `(w + wo + 2m) × (h + ho + 2m)`
    /// region of corners for a new `w × h` box, and the corners available
    /// span `(W - w) × (H - h)`. Every placement, in order, must keep at
    /// least half of its corner space free so sampling ends quickly.
    fn check_spawn_room(&self) -> Result<(), ConfigError> {
        let limits = self.map_limits();
        let m = self.spawn_margin;
        let player = &self.sprites.player;
        let slime = &self.sprites.slime;
        let rock = &self.sprites.rock;

        let mut placed: Vec<(f32, f32)> = vec![(player.frame_width as f32, player.frame_height as f32)];
        let rocks = std::iter::repeat((rock.width as f32, rock.height as f32)).take(self.rock_count);
        let slimes = std::iter::repeat((slime.frame_width as f32, slime.frame_height as f32))
            .take(self.enemy_count);

        for (n, (w, h)) in rocks.chain(slimes).enumerate() {
            let corners = (limits.width() - w).max(0.0) * (limits.height() - h).max(0.0);
            let excluded: f32 = placed
                .iter()
                .map(|(wo, ho)| (w + wo + 2.0 * m) * (h + ho + 2.0 * m))
                .sum();
            if excluded > corners / 2.0 {
                return Err(ConfigError::Validation(format!(
                    "no room to spawn entity {} of {} rocks and {} enemies: {:.0} of {:.0} px² of positions are taken",
                    n + 1,
                    self.rock_count,
                    self.enemy_count,
                    excluded,
                    corners
                )));
            }
            placed.push((w, h));
        }
        Ok(())
    }
}
