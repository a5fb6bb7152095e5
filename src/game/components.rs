//! Reactive components
//!
//! Components that respond to `EntityMessage`s, plus the contact rule between
//! the player and an enemy.

use log::{debug, info};

use super::entity::{Body, Player};
use super::event::EventQueue;
use super::settings::{CombatSettings, HealthSettings};
use super::state::{EntityMessage, SoundCue};

/// Something that reacts to entity messages.
pub trait MessageHandler {
    fn receive(&mut self, message: EntityMessage);
}

// =============================================================================
// Sound
// =============================================================================

/// Turns messages into audio cues. The level collects them after each tick.
#[derive(Debug, Clone, Default)]
pub struct SoundEmitter {
    queue: EventQueue<SoundCue>,
    /// Drop `Hurt` cues while the owner cannot take damage
    hurt_muted: bool,
}

impl SoundEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues emitted since the last drain
    pub fn pending(&self) -> impl Iterator<Item = &SoundCue> {
        self.queue.iter()
    }

    pub fn mute_hurt(&mut self, muted: bool) {
        self.hurt_muted = muted;
    }

    pub fn drain_into(&mut self, target: &mut EventQueue<SoundCue>) {
        target.append(&mut self.queue);
    }
}

impl MessageHandler for SoundEmitter {
    fn receive(&mut self, message: EntityMessage) {
        let cue = match message {
            EntityMessage::Jump => SoundCue::Jump,
            EntityMessage::LandOnSpike | EntityMessage::EnemyContact if self.hurt_muted => return,
            EntityMessage::LandOnSpike | EntityMessage::EnemyContact => SoundCue::Hurt,
            EntityMessage::Stomped => SoundCue::EnemyDeath,
            // The coin plays its own pickup cue
            EntityMessage::ReceiveCoin => return,
        };
        self.queue.send(cue);
    }
}

// =============================================================================
// Health
// =============================================================================

/// Health component for damageable entities
#[derive(Debug, Clone, Copy)]
pub struct Health {
    current: i32,
    settings: HealthSettings,
    /// Invincibility frames remaining (for i-frames after hit)
    invincible_frames: u8,
}

impl Health {
    pub fn new(settings: HealthSettings) -> Self {
        Self {
            current: settings.max_health,
            settings,
            invincible_frames: 0,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.settings.max_health
    }

    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(0, self.settings.max_health);
    }

    /// Apply damage and start i-frames. Returns true if this killed.
    pub fn damage(&mut self, amount: i32) -> bool {
        if self.invincible_frames > 0 || self.is_dead() {
            return false;
        }
        self.current = (self.current - amount).max(0);
        self.invincible_frames = self.settings.invincible_frames;
        debug!("took {} damage, {} left", amount, self.current);
        self.current == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.settings.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_frames > 0
    }

    /// Count down i-frames, once per tick
    pub fn tick(&mut self) {
        self.invincible_frames = self.invincible_frames.saturating_sub(1);
    }
}

impl MessageHandler for Health {
    fn receive(&mut self, message: EntityMessage) {
        match message {
            EntityMessage::LandOnSpike => {
                self.damage(self.settings.spike_damage);
            }
            EntityMessage::EnemyContact => {
                self.damage(self.settings.enemy_damage);
            }
            EntityMessage::ReceiveCoin => self.heal(self.settings.coin_heal),
            EntityMessage::Jump | EntityMessage::Stomped => {}
        }
    }
}

// =============================================================================
// Death
// =============================================================================

/// Tracks whether an entity is out of play.
#[derive(Debug, Clone, Copy, Default)]
pub struct Death {
    dead: bool,
}

impl Death {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Dead when out of health or when the box is entirely below the map
    pub fn update(&mut self, body: &Body, health: Option<&Health>, map_height: i32) {
        if self.dead {
            return;
        }

        let out_of_health = health.is_some_and(Health::is_dead);
        let fell = body.bounds.top() >= map_height;
        if out_of_health || fell {
            info!(
                "entity at ({}, {}) died: {}",
                body.bounds.x,
                body.bounds.y,
                if fell { "fell off the map" } else { "out of health" }
            );
            self.dead = true;
        }
    }
}

impl MessageHandler for Death {
    fn receive(&mut self, message: EntityMessage) {
        if message == EntityMessage::Stomped {
            self.dead = true;
        }
    }
}

// =============================================================================
// Combat
// =============================================================================

/// Contact rule between an enemy and the player.
#[derive(Debug, Clone, Copy)]
pub struct Combat {
    settings: CombatSettings,
}

impl Combat {
    pub fn new(settings: CombatSettings) -> Self {
        Self { settings }
    }

    /// A falling player whose feet are above the enemy's middle stomps it and
    /// bounces. Any other overlap hurts the player. Returns the message for
    /// the enemy, if any.
    pub fn resolve(&self, enemy: &Body, player: &mut Player) -> Option<EntityMessage> {
        if !enemy.bounds.intersects(&player.body.bounds) {
            return None;
        }

        let falling = player.body.velocity.y > 0;
        if falling && player.body.bounds.bottom() < enemy.bounds.center_y() {
            player.body.velocity.y = self.settings.stomp_bounce_velocity;
            Some(EntityMessage::Stomped)
        } else {
            player.message(EntityMessage::EnemyContact);
            None
        }
    }
}
