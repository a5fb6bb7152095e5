//! Frame events
//!
//! Things the simulation wants the host to react to but does not act on
//! itself: sounds to play, enemies removed, the level exit reached. Queues are
//! filled during a tick and drained by the host afterwards.
//!
//! The level switch is deliberately not a queued event. It comes back from
//! `Level::update` as part of `TickOutcome`, so the owner of the level decides
//! what to load next.

use super::entity::EnemyKind;
use super::state::SoundCue;
use crate::world::AxisAlignedBox;

/// A queue for events of a single type.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    /// Move every event from `other` to the back of this queue
    pub fn append(&mut self, other: &mut EventQueue<T>) {
        self.events.append(&mut other.events);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An enemy was removed from the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefeatEvent {
    pub kind: EnemyKind,
    /// Where it was when it died
    pub bounds: AxisAlignedBox,
}

/// Container for all frame event queues.
#[derive(Debug, Default)]
pub struct Events {
    /// Sounds to play, in emission order
    pub sound: EventQueue<SoundCue>,
    /// Enemies that died this frame
    pub defeated: EventQueue<DefeatEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues.
    pub fn clear_all(&mut self) {
        self.sound.clear();
        self.defeated.clear();
    }
}

/// Signals returned from one level tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The player reached the level exit
    pub switch_level: bool,
    /// The player died
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut frame: EventQueue<SoundCue> = EventQueue::new();
        let mut player = EventQueue::new();
        frame.send(SoundCue::CoinPickup);
        player.send(SoundCue::Jump);
        player.send(SoundCue::Hurt);

        frame.append(&mut player);

        assert!(player.is_empty());
        let cues: Vec<_> = frame.iter().copied().collect();
        assert_eq!(cues, vec![SoundCue::CoinPickup, SoundCue::Jump, SoundCue::Hurt]);
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();
        events.sound.send(SoundCue::EnemyDeath);
        events.defeated.send(DefeatEvent {
            kind: EnemyKind::PinkGuy,
            bounds: AxisAlignedBox::new(0, 0, 32, 32),
        });

        events.clear_all();
        assert!(events.sound.is_empty());
        assert!(events.defeated.is_empty());
    }
}
