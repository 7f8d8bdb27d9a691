//! # Edit Session
//!
//! Client-side editor state: the live forest, selection, breakpoint, mode,
//! title and undo history, plus the id the server assigned on first save.
//!
//! Every mutating operation commits the new forest and records it in the
//! history, so each one is individually undoable. A mutation that leaves the
//! forest unchanged records nothing; one that would duplicate an id or hang
//! children on a leaf is rejected and records nothing either.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::block::{validate_forest, Block, Breakpoint, BreakpointStyles};
use crate::document::{export_json, import_json, normalize_title, Article, DEFAULT_TITLE};
use crate::errors::EditorError;
use crate::history::History;
use crate::mutations::{find_block, BlockPatch, Direction, Mutation};

/// Editing vs read-only preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Edit,
    Preview,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    blocks: Vec<Block>,
    selected_block_id: Option<String>,
    breakpoint: Breakpoint,
    mode: Mode,
    title: String,
    history: History,
    article_id: Option<String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            selected_block_id: None,
            breakpoint: Breakpoint::Desktop,
            mode: Mode::Edit,
            title: DEFAULT_TITLE.to_string(),
            history: History::new(),
            article_id: None,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected_block_id(&self) -> Option<&str> {
        self.selected_block_id.as_deref()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected_block_id
            .as_deref()
            .and_then(|id| find_block(&self.blocks, id))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Server id, once the article has been saved or loaded
    pub fn article_id(&self) -> Option<&str> {
        self.article_id.as_deref()
    }

    pub fn set_article_id(&mut self, id: impl Into<String>) {
        self.article_id = Some(id.into());
    }

    /// Apply a mutation, commit the result and record it
    pub fn apply(&mut self, mutation: Mutation) {
        let next = mutation.apply(&self.blocks);

        if next == self.blocks {
            debug!(mutation = mutation.name(), "Mutation left forest unchanged");
            return;
        }

        if let Err(issues) = validate_forest(&next) {
            warn!(mutation = mutation.name(), ?issues, "Rejecting mutation that breaks the tree");
            return;
        }

        match &mutation {
            Mutation::AddBlock { block, .. } | Mutation::AddToContainer { block, .. } => {
                self.selected_block_id = Some(block.id.clone());
            }
            Mutation::DeleteBlock { block_id } => {
                if self.selected_block_id.as_deref() == Some(block_id.as_str()) {
                    self.selected_block_id = None;
                }
            }
            _ => {}
        }

        debug!(mutation = mutation.name(), "Applied mutation");
        self.commit(next);
    }

    fn commit(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.history.record(&self.blocks);
    }

    pub fn add_block(&mut self, block: Block, index: Option<usize>) {
        self.apply(Mutation::AddBlock { block, index });
    }

    pub fn add_to_container(&mut self, parent_id: &str, block: Block) {
        self.apply(Mutation::AddToContainer {
            parent_id: parent_id.to_string(),
            block,
        });
    }

    pub fn update_block(&mut self, block_id: &str, patch: BlockPatch) {
        self.apply(Mutation::UpdateBlock {
            block_id: block_id.to_string(),
            patch,
        });
    }

    pub fn delete_block(&mut self, block_id: &str) {
        self.apply(Mutation::DeleteBlock {
            block_id: block_id.to_string(),
        });
    }

    pub fn duplicate_block(&mut self, block_id: &str) {
        self.apply(Mutation::DuplicateBlock {
            block_id: block_id.to_string(),
        });
    }

    pub fn move_block(&mut self, block_id: &str, direction: Direction) {
        self.apply(Mutation::MoveBlock {
            block_id: block_id.to_string(),
            direction,
        });
    }

    pub fn reorder_blocks(&mut self, from_index: usize, to_index: usize) {
        self.apply(Mutation::ReorderBlocks {
            from_index,
            to_index,
        });
    }

    /// Set one style property for the active breakpoint.
    ///
    /// A breakpoint without its own bag starts from a copy of the desktop bag.
    pub fn set_style(&mut self, block_id: &str, property: &str, value: &str) {
        let Some(block) = find_block(&self.blocks, block_id) else {
            debug!(block_id, "set_style: block not found");
            return;
        };

        let mut bag = block
            .styles
            .get(self.breakpoint)
            .or(block.styles.desktop.as_ref())
            .cloned()
            .unwrap_or_default();
        bag.insert(property.to_string(), value.to_string());

        let mut styles: BreakpointStyles = block.styles.clone();
        styles.set(self.breakpoint, bag);
        self.update_block(block_id, BlockPatch::styles(styles));
    }

    /// Replace the whole forest (recorded). An invalid tree is rejected.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) -> Result<(), EditorError> {
        validate_forest(&blocks).map_err(EditorError::InvalidDocument)?;
        self.commit(blocks);
        Ok(())
    }

    pub fn select_block(&mut self, block_id: Option<&str>) {
        self.selected_block_id = block_id.map(str::to_string);
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns false when there was nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(blocks) => {
                self.blocks = blocks;
                true
            }
            None => false,
        }
    }

    /// Returns false when there was nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(blocks) => {
                self.blocks = blocks;
                true
            }
            None => false,
        }
    }

    /// Remove every block and clear the selection (recorded)
    pub fn clear_all(&mut self) {
        self.selected_block_id = None;
        self.commit(Vec::new());
    }

    /// Start over: empty forest, default title, fresh history, no server id
    pub fn new_article(&mut self) {
        *self = Self {
            breakpoint: self.breakpoint,
            mode: self.mode,
            ..Self::new()
        };
        info!("Started new article");
    }

    pub fn export_json(&self) -> Result<String, EditorError> {
        export_json(&self.title, &self.blocks)
    }

    /// Replace title and blocks from exported JSON. State is untouched on error.
    pub fn import_json(&mut self, json: &str) -> Result<(), EditorError> {
        let imported = import_json(json)?;
        self.title = imported.title;
        self.commit(imported.blocks);
        info!(title = %self.title, blocks = self.blocks.len(), "Imported article");
        Ok(())
    }

    /// Adopt a server article as the current document (recorded).
    /// State is untouched when the article's tree is invalid.
    pub fn load_article(&mut self, article: Article) -> Result<(), EditorError> {
        validate_forest(&article.blocks).map_err(EditorError::InvalidDocument)?;
        self.title = normalize_title(Some(article.title));
        self.article_id = Some(article.id);
        self.commit(article.blocks);
        Ok(())
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
