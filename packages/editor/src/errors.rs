//! Error types for the editor

use serde::Serialize;
use thiserror::Error;

use crate::block::BlockType;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Import error: {0}")]
    Import(#[from] serde_json::Error),

    #[error("Invalid document: {}", describe(.0))]
    InvalidDocument(Vec<TreeIssue>),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// A single structural violation found in a block tree
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "camelCase")]
pub enum TreeIssue {
    #[error("duplicate block id: {id}")]
    DuplicateId { id: String },

    #[error("block {id} of type {block_type} cannot have children")]
    #[serde(rename_all = "camelCase")]
    ChildrenOnLeaf { id: String, block_type: BlockType },
}

/// Failures reported by an article backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Invalid article data: {0}")]
    Invalid(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected backend response: {0}")]
    Unexpected(String),
}

fn describe(issues: &[TreeIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
