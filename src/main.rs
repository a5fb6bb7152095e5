//! SPIRE host: a window that runs the simulation and draws hitboxes
//!
//! Usage: `spire [game.ron]` (defaults to `assets/levels.ron`).
//! Arrow keys / D-pad move and climb, space / South button jumps.
//! Set `RUST_LOG=debug` for simulation logging.

use macroquad::prelude::*;

use log::{debug, error, info};
use spire::game::{Level, LevelSequence, TickOutcome};
use spire::input::InputState;
use spire::world::{AxisAlignedBox, Block, BlockKind};
use spire::VERSION;

const DEFAULT_CONFIG: &str = "assets/levels.ron";

/// Longest frame fed to the simulation, in seconds
const MAX_FRAME_TIME: f64 = 0.25;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("SPIRE v{}", VERSION),
        window_width: 1000,
        window_height: 600,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Screen placement of the map: uniform scale plus letterbox offset
struct View {
    scale: f32,
    offset: Vec2,
}

impl View {
    fn fit(level: &Level) -> Self {
        let map = level.map.bounds();
        let scale = (screen_width() / map.width as f32)
            .min(screen_height() / map.height as f32)
            .max(0.01);
        let offset = vec2(
            (screen_width() - map.width as f32 * scale) * 0.5,
            (screen_height() - map.height as f32 * scale) * 0.5,
        );
        Self { scale, offset }
    }

    fn rect(&self, bounds: &AxisAlignedBox, color: Color, filled: bool) {
        let x = self.offset.x + bounds.x as f32 * self.scale;
        let y = self.offset.y + bounds.y as f32 * self.scale;
        let w = bounds.width as f32 * self.scale;
        let h = bounds.height as f32 * self.scale;
        if filled {
            draw_rectangle(x, y, w, h, color);
        } else {
            draw_rectangle_lines(x, y, w, h, 1.0, color);
        }
    }
}

fn block_color(block: &Block) -> (Color, bool) {
    match block.kind {
        BlockKind::Solid => (Color::from_rgba(90, 90, 110, 255), true),
        BlockKind::Decoration => (Color::from_rgba(50, 50, 60, 255), false),
        BlockKind::Spike => (Color::from_rgba(200, 60, 60, 255), true),
        BlockKind::Gateway => (Color::from_rgba(80, 200, 120, 255), false),
        BlockKind::Falling { .. } => (Color::from_rgba(160, 120, 70, 255), true),
        BlockKind::Moving => (Color::from_rgba(70, 140, 200, 255), true),
        BlockKind::Coin => (Color::from_rgba(240, 200, 40, 255), true),
        BlockKind::Ladder { .. } => (Color::from_rgba(150, 110, 60, 255), false),
        BlockKind::Pushable { .. } => (Color::from_rgba(130, 100, 160, 255), true),
    }
}

fn draw_level(level: &Level) {
    let view = View::fit(level);
    view.rect(&level.map.bounds(), Color::from_rgba(20, 20, 26, 255), true);

    for block in level.map.blocks() {
        let (color, filled) = block_color(block);
        view.rect(&block.bounds, color, filled);
    }
    for enemy in &level.enemies {
        view.rect(&enemy.body.bounds, Color::from_rgba(230, 120, 200, 255), true);
    }

    let player = &level.player;
    // Blink during invincibility frames
    let visible = !player.health.is_invincible() || (get_time() * 10.0) as i64 % 2 == 0;
    if visible {
        view.rect(&player.body.bounds, WHITE, true);
    }

    let status = format!(
        "{}  HP {}/{}  {:?}",
        level.name,
        player.health.current(),
        player.health.max(),
        player.body.state
    );
    draw_text(&status, 10.0, 24.0, 24.0, LIGHTGRAY);
}

fn load(path: &str) -> Result<(LevelSequence, Level), spire::game::ConfigError> {
    let sequence = LevelSequence::load(path)?;
    let level = sequence.build_current()?;
    Ok((sequence, level))
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let (mut sequence, mut level) = match load(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("failed to load {}: {}", config_path, e);
            let message = format!("failed to load {}: {}", config_path, e);
            loop {
                clear_background(Color::from_rgba(30, 30, 35, 255));
                draw_text(&message, 10.0, 30.0, 22.0, RED);
                next_frame().await;
            }
        }
    };

    info!("=== SPIRE v{} === {} levels", VERSION, sequence.len());
    let mut input = InputState::new();
    if input.has_gamepad() {
        info!("gamepad connected");
    }

    loop {
        let keys = input.poll();
        let delta = (get_frame_time() as f64).min(MAX_FRAME_TIME);
        let TickOutcome { switch_level, game_over } = level.update(delta, keys);

        // Audio playback lives outside the simulation; cues are only logged here
        for cue in level.events.sound.iter() {
            debug!("sound cue {:?}", cue);
        }
        level.events.clear_all();

        if switch_level {
            sequence.advance();
        }
        if switch_level || game_over {
            match sequence.build_current() {
                Ok(next) => level = next,
                Err(e) => error!("failed to load level {:?}: {}", sequence.current().name, e),
            }
        }

        clear_background(Color::from_rgba(30, 30, 35, 255));
        draw_level(&level);
        next_frame().await;
    }
}
