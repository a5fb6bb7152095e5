//! Tile map: block arena, text format loader and per-tick block pass
//!
//! Map files are plain text, one grid row per line, cells separated by
//! whitespace. Each cell is a two-character tile code, or `--` for nothing.
//! Blank lines are skipped.
//!
//! ```text
//! l1 -- -- GW r1
//! l1 -- CN -- r1
//! bl f1 f1 f1 br
//! ```
//!
//! During the block pass each block is lent out of the arena while it updates,
//! so it sees every other block as terrain but never itself. Blocks that
//! consume themselves are queued and freed after the pass.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use thiserror::Error;

use super::aabb::AxisAlignedBox;
use super::arena::{BlockArena, BlockId};
use super::block::{Block, BlockContext, BlockOutcome};
use super::terrain::{self, BLOCK_SIZE, EMPTY_CODE};
use crate::game::{EventQueue, Player, SoundCue};
use crate::input::KeySnapshot;

/// Errors raised while building a map from text.
///
/// Row and column are zero-based grid coordinates, counting only non-blank
/// lines.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("malformed tile code {code:?} at row {row}, column {column}")]
    MalformedCode { code: String, row: usize, column: usize },

    #[error("unknown tile code {code:?} at row {row}, column {column}")]
    UnknownCode { code: String, row: usize, column: usize },
}

/// The placed blocks of one level.
#[derive(Debug)]
pub struct TileMap {
    blocks: BlockArena,
    /// Live blocks in load order
    ids: Vec<BlockId>,
    despawn_queue: Vec<BlockId>,
    columns: usize,
    rows: usize,
}

impl TileMap {
    /// An empty map of the given grid size
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            blocks: BlockArena::with_capacity(columns * rows),
            ids: Vec::new(),
            despawn_queue: Vec::new(),
            columns,
            rows,
        }
    }

    /// Parse a map from its text form.
    pub fn parse(source: &str) -> Result<Self, MapError> {
        let rows: Vec<Vec<&str>> = source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split_whitespace().collect())
            .collect();

        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let columns = first.len();

        let mut map = Self::new(columns, rows.len());
        for (row, codes) in rows.iter().enumerate() {
            if codes.len() != columns {
                return Err(MapError::RaggedRow {
                    row,
                    expected: columns,
                    found: codes.len(),
                });
            }
            for (column, code) in codes.iter().enumerate() {
                map.place(code, column, row)?;
            }
        }

        debug!("parsed {}x{} map with {} blocks", columns, map.rows, map.len());
        Ok(map)
    }

    /// Read and parse a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Place the block for `code` in a grid cell. `--` places nothing.
    pub fn place(&mut self, code: &str, column: usize, row: usize) -> Result<Option<BlockId>, MapError> {
        if code.chars().count() != 2 {
            return Err(MapError::MalformedCode {
                code: code.to_string(),
                row,
                column,
            });
        }
        if code == EMPTY_CODE {
            return Ok(None);
        }

        let (terrain, role) = terrain::lookup(code).ok_or_else(|| MapError::UnknownCode {
            code: code.to_string(),
            row,
            column,
        })?;
        let x = column as i32 * BLOCK_SIZE;
        let y = row as i32 * BLOCK_SIZE;
        Ok(Some(self.spawn(Block::new(terrain, role, x, y))))
    }

    /// Add a block at its own position
    pub fn spawn(&mut self, block: Block) -> BlockId {
        let id = self.blocks.insert(block);
        self.ids.push(id);
        id
    }

    /// Queue a block for removal at the end of the block pass
    fn despawn(&mut self, id: BlockId) {
        if self.blocks.is_live(id) {
            self.despawn_queue.push(id);
        }
    }

    fn flush_despawns(&mut self) {
        for id in std::mem::take(&mut self.despawn_queue) {
            if self.blocks.remove(id) {
                self.ids.retain(|live| *live != id);
                trace!("despawned block {:?}", id);
            }
        }
    }

    /// Live blocks in load order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.ids.iter().filter_map(|id| self.blocks.get(*id))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.columns as i32 * BLOCK_SIZE
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.rows as i32 * BLOCK_SIZE
    }

    pub fn bounds(&self) -> AxisAlignedBox {
        AxisAlignedBox::new(0, 0, self.width(), self.height())
    }

    /// Collideable terrain as seen by physics
    pub fn terrain(&self) -> Terrain<'_> {
        Terrain { blocks: &self.blocks }
    }

    /// Run every interactive block's update once, in load order. Returns true
    /// if the player reached the level exit.
    pub fn update_blocks(
        &mut self,
        player: &mut Player,
        keys: KeySnapshot,
        cues: &mut EventQueue<SoundCue>,
    ) -> bool {
        let mut switch_level = false;

        for i in 0..self.ids.len() {
            let id = self.ids[i];
            if !self.blocks.get(id).is_some_and(Block::is_interactive) {
                continue;
            }
            let Some(mut block) = self.blocks.lend(id) else {
                continue;
            };

            let mut ctx = BlockContext {
                player: &mut *player,
                keys,
                cues: &mut *cues,
            };
            let outcome = block.update(&mut ctx, &self.terrain());

            match outcome {
                BlockOutcome::Keep => self.blocks.restore(id, block),
                BlockOutcome::SwitchLevel => {
                    switch_level = true;
                    self.blocks.restore(id, block);
                }
                BlockOutcome::Consume => self.despawn(id),
            }
        }

        self.flush_despawns();
        switch_level
    }
}

/// Read-only view of the collideable blocks.
#[derive(Clone, Copy)]
pub struct Terrain<'a> {
    blocks: &'a BlockArena,
}

impl<'a> Terrain<'a> {
    /// Collideable blocks strictly overlapping `bounds`
    pub fn overlapping(&self, bounds: AxisAlignedBox) -> impl Iterator<Item = &'a Block> + 'a {
        let blocks: &'a BlockArena = self.blocks;
        blocks
            .blocks()
            .filter(move |block| block.is_collideable() && block.bounds.intersects(&bounds))
    }

    /// Hitboxes of `overlapping`, snapshotted before any snapping
    pub fn overlapping_boxes(&self, bounds: AxisAlignedBox) -> Vec<AxisAlignedBox> {
        self.overlapping(bounds).map(|block| block.bounds).collect()
    }
}
