//! Developer tasks for SPIRE
//!
//! Usage:
//!   cargo xtask check-maps assets/levels          # Parse every .txt map in a directory
//!   cargo xtask simulate assets/levels/hall.ron --ticks 300 --hold right,jump

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spire::game::{GameSettings, LevelSpec};
use spire::input::{Action, KeySnapshot};
use spire::world::TileMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Developer tasks for SPIRE")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every .txt tile map in a directory and report errors
    CheckMaps {
        /// Directory to scan (not recursive)
        dir: PathBuf,
    },
    /// Run a level headless and print the final player state
    Simulate {
        /// Level descriptor (.ron)
        level: PathBuf,
        /// Number of 60 Hz ticks to run
        #[arg(long, default_value_t = 60)]
        ticks: u32,
        /// Actions held for the whole run, comma separated (up,down,left,right,jump)
        #[arg(long, value_delimiter = ',')]
        hold: Vec<Action>,
        /// Optional RON settings overrides
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckMaps { dir } => check_maps(&dir),
        Commands::Simulate { level, ticks, hold, settings } => simulate(&level, ticks, &hold, settings.as_deref()),
    }
}

/// Parse every map, printing one line per file
fn check_maps(dir: &Path) -> Result<()> {
    let mut maps: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    maps.sort();

    let mut failures = 0;
    for path in &maps {
        match TileMap::load(path) {
            Ok(map) => println!(
                "ok    {} ({}x{} px, {} blocks)",
                path.display(),
                map.width(),
                map.height(),
                map.len()
            ),
            Err(e) => {
                failures += 1;
                println!("FAIL  {}: {}", path.display(), e);
            }
        }
    }

    println!("{} maps checked, {} failed", maps.len(), failures);
    if failures > 0 {
        anyhow::bail!("{} map(s) failed to parse", failures);
    }
    Ok(())
}

/// Run a level for a fixed number of ticks with constant input
fn simulate(path: &Path, ticks: u32, hold: &[Action], settings: Option<&Path>) -> Result<()> {
    let settings = match settings {
        Some(path) => GameSettings::load(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => GameSettings::default(),
    };

    let spec = LevelSpec::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let mut level = spec.build(&settings)?;
    let keys = KeySnapshot::holding(hold);
    let step = settings.physics.fixed_step;

    let mut cues = 0;
    let mut defeated = 0;
    for tick in 1..=ticks {
        let outcome = level.update(step, keys);
        cues += level.events.sound.drain().count();
        defeated += level.events.defeated.drain().count();

        if outcome.switch_level {
            println!("tick {}: reached the exit", tick);
            break;
        }
        if outcome.game_over {
            println!("tick {}: player died", tick);
            break;
        }
    }

    let player = &level.player;
    println!("level:    {}", level.name);
    println!("position: ({}, {})", player.body.bounds.x, player.body.bounds.y);
    println!("velocity: ({}, {})", player.body.velocity.x, player.body.velocity.y);
    println!("state:    {:?} facing {:?}", player.body.state, player.body.direction);
    println!("health:   {}/{}", player.health.current(), player.health.max());
    println!("enemies:  {} left, {} defeated", level.enemies.len(), defeated);
    println!("cues:     {}", cues);
    Ok(())
}
