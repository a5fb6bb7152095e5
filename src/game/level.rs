//! One running level: map, player, enemies and the frame event queues
//!
//! Tick order:
//! 1. player intent, physics and bookkeeping
//! 2. each enemy: patrol, contact with the player, physics
//! 3. block pass (coins, spikes, platforms, ladders, exit)
//! 4. sound cues gathered, dead enemies removed

use log::{debug, info};

use super::entity::{Enemy, EnemySpawn, Player};
use super::event::{DefeatEvent, Events, TickOutcome};
use super::settings::GameSettings;
use crate::input::KeySnapshot;
use crate::world::TileMap;

pub struct Level {
    pub name: String,
    pub map: TileMap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub events: Events,
    settings: GameSettings,
}

impl Level {
    pub fn new(
        name: impl Into<String>,
        map: TileMap,
        player_start: (i32, i32),
        spawns: &[EnemySpawn],
        settings: GameSettings,
    ) -> Self {
        let name = name.into();
        let enemies: Vec<Enemy> = spawns.iter().map(|spawn| Enemy::new(spawn, &settings)).collect();
        debug!(
            "level {:?}: {} blocks, {} enemies, player at {:?}",
            name,
            map.len(),
            enemies.len(),
            player_start
        );

        Self {
            name,
            player: Player::new(player_start, &settings),
            map,
            enemies,
            events: Events::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Advance the level by `delta_time` seconds with the given input.
    ///
    /// Events accumulate in `self.events` until the caller drains them.
    pub fn update(&mut self, delta_time: f64, keys: KeySnapshot) -> TickOutcome {
        if self.player.is_dead() {
            return TickOutcome { switch_level: false, game_over: true };
        }

        self.player.update(delta_time, keys, &self.map);
        for enemy in &mut self.enemies {
            enemy.update(delta_time, &self.map, &mut self.player);
        }
        self.gather_sounds();

        let switch_level = self.map.update_blocks(&mut self.player, keys, &mut self.events.sound);
        self.gather_sounds();

        // Block and enemy contact can finish the player off after its own update
        self.player
            .death
            .update(&self.player.body, Some(&self.player.health), self.map.height());
        self.remove_dead_enemies();

        let game_over = self.player.is_dead();
        if game_over {
            info!("player died in level {:?}", self.name);
        } else if switch_level {
            info!("level {:?} complete", self.name);
        }

        TickOutcome { switch_level, game_over }
    }

    fn gather_sounds(&mut self) {
        self.player.sound.drain_into(&mut self.events.sound);
        for enemy in &mut self.enemies {
            enemy.drain_sounds(&mut self.events.sound);
        }
    }

    fn remove_dead_enemies(&mut self) {
        let defeated = &mut self.events.defeated;
        self.enemies.retain(|enemy| {
            if enemy.is_dead() {
                debug!("{:?} removed at ({}, {})", enemy.kind, enemy.body.bounds.x, enemy.body.bounds.y);
                defeated.send(DefeatEvent {
                    kind: enemy.kind,
                    bounds: enemy.body.bounds,
                });
                false
            } else {
                true
            }
        });
    }
}
