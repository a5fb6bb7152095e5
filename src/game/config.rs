//! Level descriptors and the game config
//!
//! A game config is a RON file listing level descriptors in play order plus
//! optional setting overrides:
//!
//! ```ron
//! (
//!     settings: (control: (walk_speed: 200)),
//!     levels: ["levels/hall.ron", "levels/tower.ron"],
//! )
//! ```
//!
//! Each descriptor names its tile map, the player start and the enemies:
//!
//! ```ron
//! (
//!     name: "Hall",
//!     map: "hall.txt",
//!     player_start: (30, 70),
//!     enemies: [(kind: PinkGuy, position: (200, 68), left_bound: 150, right_bound: 300)],
//! )
//! ```
//!
//! Relative paths resolve against the directory of the file that names them.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{EnemySpawn, DEFAULT_PLAYER_START};
use super::level::Level;
use super::settings::GameSettings;
use crate::world::{MapError, TileMap};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("game config lists no levels")]
    NoLevels,
}

fn read_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `path` against `base` unless it is already absolute
fn resolve(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

fn default_player_start() -> (i32, i32) {
    DEFAULT_PLAYER_START
}

/// One level as described on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    #[serde(default)]
    pub name: String,
    /// Tile map file
    pub map: PathBuf,
    #[serde(default = "default_player_start")]
    pub player_start: (i32, i32),
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
}

impl LevelSpec {
    /// Load a descriptor; its map path is resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut spec: LevelSpec = read_ron(path)?;
        spec.map = resolve(path.parent(), &spec.map);
        if spec.name.is_empty() {
            spec.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        debug!("loaded level descriptor {:?} from {}", spec.name, path.display());
        Ok(spec)
    }

    /// Load the map and spawn everything.
    pub fn build(&self, settings: &GameSettings) -> Result<Level, ConfigError> {
        let map = TileMap::load(&self.map)?;
        Ok(Level::new(
            self.name.clone(),
            map,
            self.player_start,
            &self.enemies,
            *settings,
        ))
    }
}

/// Top-level game config as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub settings: GameSettings,
    /// Level descriptor files in play order
    pub levels: Vec<PathBuf>,
}

impl GameSettings {
    /// Load a standalone settings file, e.g. `assets/settings.ron`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings: GameSettings = read_ron(path.as_ref())?;
        settings.validate()?;
        Ok(settings)
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config: GameConfig = read_ron(path)?;
        config.settings.validate()?;
        for level in &mut config.levels {
            *level = resolve(path.parent(), level);
        }
        Ok(config)
    }
}

/// Ordered levels with a cursor. Advancing past the last wraps to the first.
#[derive(Debug, Clone)]
pub struct LevelSequence {
    levels: Vec<LevelSpec>,
    current: usize,
    settings: GameSettings,
}

impl LevelSequence {
    pub fn new(levels: Vec<LevelSpec>, settings: GameSettings) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        settings.validate()?;
        Ok(Self {
            levels,
            current: 0,
            settings,
        })
    }

    /// Load a game config and every descriptor it lists.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = GameConfig::load(path)?;
        let levels = config
            .levels
            .iter()
            .map(LevelSpec::load)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels, config.settings)
    }

    pub fn current(&self) -> &LevelSpec {
        &self.levels[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Move to the next level, wrapping around
    pub fn advance(&mut self) -> &LevelSpec {
        self.current = (self.current + 1) % self.levels.len();
        info!("advancing to level {} ({:?})", self.current, self.levels[self.current].name);
        self.current()
    }

    /// Build a fresh instance of the current level
    pub fn build_current(&self) -> Result<Level, ConfigError> {
        self.current().build(&self.settings)
    }
}
