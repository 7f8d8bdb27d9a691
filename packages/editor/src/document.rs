//! # Article Documents
//!
//! The persisted unit (`Article`) and the exported file shape.
//!
//! ## File format
//!
//! ```text
//! {
//!   "title": "My Article",
//!   "blocks": [ ...Block ],
//!   "createdAt": "2024-01-01T00:00:00Z",
//!   "updatedAt": "2024-01-01T00:00:00Z"
//! }
//! ```
//!
//! Imports tolerate missing fields: the title falls back to
//! [`DEFAULT_TITLE`] and the blocks to an empty forest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::{validate_forest, Block};
use crate::errors::EditorError;

pub const DEFAULT_TITLE: &str = "Untitled Article";

/// Title to store for a possibly-empty input
pub fn normalize_title(title: Option<String>) -> String {
    match title {
        Some(title) if !title.is_empty() => title,
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// A stored article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub blocks: Vec<Block>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating an article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticlePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
}

/// Exported file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFile {
    pub title: String,
    pub blocks: Vec<Block>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedArticle {
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Deserialize)]
struct LenientArticleFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    blocks: Option<Vec<Block>>,
}

/// Serialize a title and forest to the file format, stamped with `now`
pub fn export_json(title: &str, blocks: &[Block]) -> Result<String, EditorError> {
    let now = Utc::now();
    let file = ArticleFile {
        title: title.to_string(),
        blocks: blocks.to_vec(),
        created_at: now,
        updated_at: now,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse and validate exported JSON. Nothing is returned unless the whole
/// document is well formed.
pub fn import_json(json: &str) -> Result<ImportedArticle, EditorError> {
    let file: LenientArticleFile = serde_json::from_str(json)?;
    let blocks = file.blocks.unwrap_or_default();

    validate_forest(&blocks).map_err(EditorError::InvalidDocument)?;

    Ok(ImportedArticle {
        title: normalize_title(file.title),
        blocks,
    })
}
