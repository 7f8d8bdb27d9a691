//! # Block Tree Mutations
//!
//! Structural operations on a block forest.
//!
//! ## Design Principles
//!
//! 1. **Pure**: every operation takes the current forest and returns a new one;
//!    committing it (and recording history) is the caller's job
//! 2. **Depth-agnostic**: targets are located by id at any nesting level
//! 3. **Silent on miss**: an id that isn't in the tree leaves the forest
//!    unchanged; this is not an error
//!
//! ## Mutation Semantics
//!
//! ### Delete
//! - Removes the node and its whole subtree (no re-parenting)
//!
//! ### Duplicate
//! - Deep copy placed right after the original in the same parent list
//! - The copy and all of its descendants get fresh ids
//!
//! ### Move / Reorder
//! - `MoveBlock` swaps with a sibling inside the node's own parent list
//! - `ReorderBlocks` repositions top-level blocks only

use crate::block::{Block, BreakpointStyles, Content};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Sibling direction for [`move_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Fields to merge into an existing block. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<BreakpointStyles>,
}

impl BlockPatch {
    pub fn content(content: Content) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn styles(styles: BreakpointStyles) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    fn merge_into(&self, block: &mut Block) {
        if let Some(content) = &self.content {
            // Content shape is fixed by the block type
            if content.kind() == block.block_type.content_kind() {
                block.content = Some(content.clone());
            } else {
                warn!(
                    block_id = %block.id,
                    block_type = %block.block_type,
                    "Ignoring content of the wrong shape"
                );
            }
        }

        if let Some(styles) = &self.styles {
            block.styles = styles.clone();
        }
    }
}

/// Editor operations as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert at the top level (appended when `index` is absent)
    AddBlock {
        block: Block,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Append to a container's children
    AddToContainer { parent_id: String, block: Block },

    /// Merge fields into a block at any depth
    UpdateBlock { block_id: String, patch: BlockPatch },

    /// Remove a block and its subtree
    DeleteBlock { block_id: String },

    /// Insert a fresh-id copy right after the original
    DuplicateBlock { block_id: String },

    /// Swap with the previous or next sibling
    MoveBlock { block_id: String, direction: Direction },

    /// Move a top-level block from one position to another
    ReorderBlocks { from_index: usize, to_index: usize },
}

impl Mutation {
    /// Produce the forest that results from this mutation
    pub fn apply(&self, forest: &[Block]) -> Vec<Block> {
        match self {
            Mutation::AddBlock { block, index } => add_block(forest, block.clone(), *index),
            Mutation::AddToContainer { parent_id, block } => {
                add_to_container(forest, parent_id, block.clone())
            }
            Mutation::UpdateBlock { block_id, patch } => update_block(forest, block_id, patch),
            Mutation::DeleteBlock { block_id } => delete_block(forest, block_id),
            Mutation::DuplicateBlock { block_id } => duplicate_block(forest, block_id),
            Mutation::MoveBlock {
                block_id,
                direction,
            } => move_block(forest, block_id, *direction),
            Mutation::ReorderBlocks {
                from_index,
                to_index,
            } => reorder_blocks(forest, *from_index, *to_index),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddBlock { .. } => "addBlock",
            Mutation::AddToContainer { .. } => "addToContainer",
            Mutation::UpdateBlock { .. } => "updateBlock",
            Mutation::DeleteBlock { .. } => "deleteBlock",
            Mutation::DuplicateBlock { .. } => "duplicateBlock",
            Mutation::MoveBlock { .. } => "moveBlock",
            Mutation::ReorderBlocks { .. } => "reorderBlocks",
        }
    }
}

pub fn add_block(forest: &[Block], block: Block, index: Option<usize>) -> Vec<Block> {
    let mut blocks = forest.to_vec();
    let at = index.unwrap_or(blocks.len()).min(blocks.len());
    blocks.insert(at, block);
    blocks
}

pub fn add_to_container(forest: &[Block], parent_id: &str, block: Block) -> Vec<Block> {
    let mut blocks = forest.to_vec();
    let mut pending = Some(block);

    if !insert_child(&mut blocks, parent_id, &mut pending) {
        debug!(parent_id, "addToContainer: parent not found");
    }

    blocks
}

fn insert_child(blocks: &mut [Block], parent_id: &str, pending: &mut Option<Block>) -> bool {
    for block in blocks.iter_mut() {
        if block.id == parent_id {
            if !block.is_container() {
                warn!(parent_id, block_type = %block.block_type, "addToContainer: not a container");
            } else if let Some(child) = pending.take() {
                block.children.get_or_insert_with(Vec::new).push(child);
            }
            return true;
        }

        if let Some(children) = block.children.as_mut() {
            if insert_child(children, parent_id, pending) {
                return true;
            }
        }
    }

    false
}

pub fn update_block(forest: &[Block], block_id: &str, patch: &BlockPatch) -> Vec<Block> {
    let mut blocks = forest.to_vec();

    match find_block_mut(&mut blocks, block_id) {
        Some(block) => patch.merge_into(block),
        None => debug!(block_id, "updateBlock: block not found"),
    }

    blocks
}

pub fn delete_block(forest: &[Block], block_id: &str) -> Vec<Block> {
    let mut blocks = forest.to_vec();

    if !remove_block(&mut blocks, block_id) {
        debug!(block_id, "deleteBlock: block not found");
    }

    blocks
}

fn remove_block(blocks: &mut Vec<Block>, block_id: &str) -> bool {
    if let Some(pos) = blocks.iter().position(|b| b.id == block_id) {
        blocks.remove(pos);
        return true;
    }

    blocks
        .iter_mut()
        .filter_map(|b| b.children.as_mut())
        .any(|children| remove_block(children, block_id))
}

pub fn duplicate_block(forest: &[Block], block_id: &str) -> Vec<Block> {
    let mut blocks = forest.to_vec();

    if !insert_duplicate(&mut blocks, block_id) {
        debug!(block_id, "duplicateBlock: block not found");
    }

    blocks
}

fn insert_duplicate(blocks: &mut Vec<Block>, block_id: &str) -> bool {
    if let Some(pos) = blocks.iter().position(|b| b.id == block_id) {
        let copy = blocks[pos].clone_with_new_ids();
        blocks.insert(pos + 1, copy);
        return true;
    }

    blocks
        .iter_mut()
        .filter_map(|b| b.children.as_mut())
        .any(|children| insert_duplicate(children, block_id))
}

pub fn move_block(forest: &[Block], block_id: &str, direction: Direction) -> Vec<Block> {
    let mut blocks = forest.to_vec();

    if !swap_sibling(&mut blocks, block_id, direction) {
        debug!(block_id, "moveBlock: block not found");
    }

    blocks
}

fn swap_sibling(blocks: &mut Vec<Block>, block_id: &str, direction: Direction) -> bool {
    if let Some(pos) = blocks.iter().position(|b| b.id == block_id) {
        let target = match direction {
            Direction::Up => pos.checked_sub(1),
            Direction::Down => Some(pos + 1).filter(|&t| t < blocks.len()),
        };

        match target {
            Some(target) => blocks.swap(pos, target),
            None => debug!(block_id, ?direction, "moveBlock: already at boundary"),
        }
        return true;
    }

    blocks
        .iter_mut()
        .filter_map(|b| b.children.as_mut())
        .any(|children| swap_sibling(children, block_id, direction))
}

pub fn reorder_blocks(forest: &[Block], from_index: usize, to_index: usize) -> Vec<Block> {
    let mut blocks = forest.to_vec();

    if from_index >= blocks.len() {
        debug!(from_index, len = blocks.len(), "reorderBlocks: index out of range");
        return blocks;
    }

    let moved = blocks.remove(from_index);
    let at = to_index.min(blocks.len());
    blocks.insert(at, moved);
    blocks
}

/// Locate a block by id at any depth
pub fn find_block<'a>(forest: &'a [Block], block_id: &str) -> Option<&'a Block> {
    for block in forest {
        if block.id == block_id {
            return Some(block);
        }
        if let Some(found) = find_block(block.children(), block_id) {
            return Some(found);
        }
    }
    None
}

fn find_block_mut<'a>(forest: &'a mut [Block], block_id: &str) -> Option<&'a mut Block> {
    for block in forest.iter_mut() {
        if block.id == block_id {
            return Some(block);
        }
        if let Some(children) = block.children.as_mut() {
            if let Some(found) = find_block_mut(children, block_id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn contains_block(forest: &[Block], block_id: &str) -> bool {
    find_block(forest, block_id).is_some()
}

/// Total number of blocks at every depth
pub fn count_blocks(forest: &[Block]) -> usize {
    forest
        .iter()
        .map(|block| 1 + count_blocks(block.children()))
        .sum()
}
