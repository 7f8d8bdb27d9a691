//! # Undo/Redo History
//!
//! Linear history of whole-forest snapshots with a cursor.
//!
//! ## Design
//!
//! - Snapshot 0 is the initial forest and is never dropped
//! - Recording truncates everything after the cursor, then appends
//! - Undo/redo move the cursor and hand back a copy of that snapshot
//! - No branching: redo states are gone once a new edit is recorded
//!
//! ## Example
//!
//! ```rust
//! use folio_editor::{create_block, BlockType, History};
//!
//! let mut history = History::new();
//! let forest = vec![create_block(BlockType::Paragraph)];
//! history.record(&forest);
//!
//! assert_eq!(history.undo(), Some(vec![]));
//! assert_eq!(history.redo(), Some(forest));
//! ```

use crate::block::Block;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Block>>,
    index: usize,
}

impl History {
    /// History starting from an empty forest
    pub fn new() -> Self {
        Self::with_initial(Vec::new())
    }

    pub fn with_initial(initial: Vec<Block>) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// Record a new current forest, discarding any redo states
    pub fn record(&mut self, forest: &[Block]) {
        let discarded = self.snapshots.len() - (self.index + 1);
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(forest.to_vec());
        self.index = self.snapshots.len() - 1;

        if discarded > 0 {
            debug!(discarded, "Dropped redo states");
        }
    }

    /// Step back, returning the forest to restore
    pub fn undo(&mut self) -> Option<Vec<Block>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Step forward, returning the forest to restore
    pub fn redo(&mut self) -> Option<Vec<Block>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Back to a single empty snapshot
    pub fn reset(&mut self) {
        self.snapshots = vec![Vec::new()];
        self.index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> &[Block] {
        &self.snapshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of recorded snapshots; never zero, the initial one is always kept
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.index
    }

    pub fn redo_levels(&self) -> usize {
        self.snapshots.len() - 1 - self.index
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
