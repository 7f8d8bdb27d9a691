//! # Folio Editor
//!
//! Document model and editing engine for the Folio visual article editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: block catalogue + default factory │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: forest → new forest              │
//! │  - add / add-to-container / update          │
//! │  - delete / duplicate / move / reorder      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: commit + history snapshot          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document / persistence: JSON file, backend  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use folio_editor::{create_block, BlockPatch, BlockType, Content, EditSession};
//!
//! let mut session = EditSession::new();
//! let paragraph = create_block(BlockType::Paragraph);
//! let id = paragraph.id.clone();
//!
//! session.add_block(paragraph, None);
//! session.update_block(&id, BlockPatch::content(Content::Text("Hello".into())));
//!
//! let json = session.export_json().unwrap();
//! assert!(json.contains("Hello"));
//!
//! session.undo();
//! assert_eq!(session.blocks()[0].content, Some(Content::Text(String::new())));
//! ```

mod block;
mod document;
mod errors;
mod history;
mod mutations;
mod persistence;
mod registry;
mod session;

pub use block::{
    new_block_id, validate_forest, Block, BlockType, Breakpoint, BreakpointStyles, CodeContent,
    Content, ContentKind, StyleObject,
};
pub use document::{
    export_json, import_json, normalize_title, Article, ArticleDraft, ArticleFile, ArticlePatch,
    ImportedArticle, DEFAULT_TITLE,
};
pub use errors::{BackendError, EditorError, TreeIssue};
pub use history::History;
pub use mutations::{
    add_block, add_to_container, contains_block, count_blocks, delete_block, duplicate_block,
    find_block, move_block, reorder_blocks, update_block, BlockPatch, Direction, Mutation,
};
pub use persistence::{
    load, save, ArticleBackend, Autosave, SaveNotice, SharedSession, AUTOSAVE_INTERVAL,
};
pub use registry::{
    block_types_by_category, create_block, default_content, default_styles, type_info,
    type_info_by_name, BlockTypeInfo, Category, BLOCK_TYPES, DEFAULT_CODE_LANGUAGE,
    PROGRAMMING_LANGUAGES,
};
pub use session::{EditSession, Mode};
