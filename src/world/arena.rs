//! Block arena with generational handles
//!
//! Each slot remembers its generation. Removing a block bumps it, so a stale
//! `BlockId` stops resolving instead of pointing at whatever reuses the slot.
//! A block can be lent out while it updates: its slot stays live but reads as
//! empty, so the block never sees itself as terrain.

use super::block::Block;

/// A handle to a block in a `TileMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    slot: u32,
    generation: u32,
}

#[derive(Debug)]
enum Entry {
    Vacant,
    Occupied(Block),
    Lent,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Entry,
}

#[derive(Debug, Default)]
pub(crate) struct BlockArena {
    slots: Vec<Slot>,
    vacant: Vec<u32>,
    live: usize,
}

impl BlockArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub(crate) fn insert(&mut self, block: Block) -> BlockId {
        self.live += 1;
        match self.vacant.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.entry = Entry::Occupied(block);
                BlockId {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Entry::Occupied(block),
                });
                BlockId {
                    slot: self.slots.len() as u32 - 1,
                    generation: 0,
                }
            }
        }
    }

    fn slot(&self, id: BlockId) -> Option<&Slot> {
        self.slots
            .get(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: BlockId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    /// Live, whether stored or lent out
    pub(crate) fn is_live(&self, id: BlockId) -> bool {
        self.slot(id).is_some_and(|slot| !matches!(slot.entry, Entry::Vacant))
    }

    pub(crate) fn get(&self, id: BlockId) -> Option<&Block> {
        match &self.slot(id)?.entry {
            Entry::Occupied(block) => Some(block),
            Entry::Vacant | Entry::Lent => None,
        }
    }

    /// Take a block out for its update. Its slot stays reserved.
    pub(crate) fn lend(&mut self, id: BlockId) -> Option<Block> {
        let slot = self.slot_mut(id)?;
        match std::mem::replace(&mut slot.entry, Entry::Lent) {
            Entry::Occupied(block) => Some(block),
            other => {
                slot.entry = other;
                None
            }
        }
    }

    /// Put a lent block back.
    pub(crate) fn restore(&mut self, id: BlockId, block: Block) {
        if let Some(slot) = self.slot_mut(id) {
            if matches!(slot.entry, Entry::Lent) {
                slot.entry = Entry::Occupied(block);
            }
        }
    }

    /// Free a slot, stored or lent. Returns false for stale handles.
    pub(crate) fn remove(&mut self, id: BlockId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        let slot = &mut self.slots[id.slot as usize];
        slot.entry = Entry::Vacant;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(id.slot);
        self.live -= 1;
        true
    }

    /// Stored blocks in slot order
    pub(crate) fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.slots.iter().filter_map(|slot| match &slot.entry {
            Entry::Occupied(block) => Some(block),
            Entry::Vacant | Entry::Lent => None,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }
}
