//! # Block Tree Model
//!
//! A document is a forest of [`Block`]s. Container blocks (`section`, `flex`)
//! own an ordered list of children; every other block is a leaf.
//!
//! ## Invariants
//!
//! - Block ids are unique across the whole tree, at every nesting level
//! - Only container types carry a `children` list
//! - A block's `type` never changes after creation, so neither does the
//!   shape of its `content`

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use crate::errors::TreeIssue;

/// Style property bag for one breakpoint (camelCase CSS property → value)
pub type StyleObject = BTreeMap<String, String>;

/// Responsive design context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }
}

/// Per-breakpoint styles. `desktop` is the base; the others are sparse overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakpointStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<StyleObject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<StyleObject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<StyleObject>,
}

impl BreakpointStyles {
    /// Styles with only the desktop bag populated
    pub fn desktop(styles: StyleObject) -> Self {
        Self {
            desktop: Some(styles),
            ..Self::default()
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Option<&StyleObject> {
        match breakpoint {
            Breakpoint::Mobile => self.mobile.as_ref(),
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Desktop => self.desktop.as_ref(),
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, styles: StyleObject) {
        let slot = match breakpoint {
            Breakpoint::Mobile => &mut self.mobile,
            Breakpoint::Tablet => &mut self.tablet,
            Breakpoint::Desktop => &mut self.desktop,
        };
        *slot = Some(styles);
    }
}

/// Every kind of block the editor knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Paragraph,
    Caption,
    Quote,
    List,
    NumberedList,
    Code,
    Divider,
    Image,
    Video,
    Pdf,
    File,
    Section,
    Flex,
}

impl BlockType {
    /// Container blocks hold child blocks instead of content
    pub fn is_container(&self) -> bool {
        matches!(self, BlockType::Section | BlockType::Flex)
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            BlockType::H1
                | BlockType::H2
                | BlockType::H3
                | BlockType::H4
                | BlockType::H5
                | BlockType::H6
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::H1 => "h1",
            BlockType::H2 => "h2",
            BlockType::H3 => "h3",
            BlockType::H4 => "h4",
            BlockType::H5 => "h5",
            BlockType::H6 => "h6",
            BlockType::Paragraph => "paragraph",
            BlockType::Caption => "caption",
            BlockType::Quote => "quote",
            BlockType::List => "list",
            BlockType::NumberedList => "numbered-list",
            BlockType::Code => "code",
            BlockType::Divider => "divider",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Pdf => "pdf",
            BlockType::File => "file",
            BlockType::Section => "section",
            BlockType::Flex => "flex",
        }
    }

    /// The content shape this type carries
    pub fn content_kind(&self) -> ContentKind {
        match self {
            t if t.is_heading() => ContentKind::Text,
            BlockType::Paragraph | BlockType::Caption | BlockType::Quote => ContentKind::Text,
            BlockType::List | BlockType::NumberedList => ContentKind::List,
            BlockType::Code => ContentKind::Code,
            _ => ContentKind::None,
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unknown block type: {}", s))
    }
}

/// Source code plus its highlighting language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContent {
    pub code: String,
    pub language: String,
}

/// Block payload. Absent content is serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    List(Vec<String>),
    Code(CodeContent),
}

/// Shape discriminant for [`Content`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    List,
    Code,
    None,
}

impl Content {
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Text(_) => ContentKind::Text,
            Content::List(_) => ContentKind::List,
            Content::Code(_) => ContentKind::Code,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default)]
    pub styles: BreakpointStyles,

    /// Present only on container blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl Block {
    pub fn is_container(&self) -> bool {
        self.block_type.is_container()
    }

    /// Child blocks, or an empty slice for leaves
    pub fn children(&self) -> &[Block] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Desktop styles with the breakpoint's overrides merged on top
    pub fn resolved_styles(&self, breakpoint: Breakpoint) -> StyleObject {
        let mut resolved = self.styles.desktop.clone().unwrap_or_default();

        if breakpoint != Breakpoint::Desktop {
            if let Some(overrides) = self.styles.get(breakpoint) {
                resolved.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        resolved
    }

    /// Deep copy with a fresh id on this block and every descendant
    pub fn clone_with_new_ids(&self) -> Block {
        Block {
            id: new_block_id(),
            block_type: self.block_type,
            content: self.content.clone(),
            styles: self.styles.clone(),
            children: self
                .children
                .as_ref()
                .map(|children| children.iter().map(Block::clone_with_new_ids).collect()),
        }
    }
}

/// Generate a block id that has never been handed out before
pub fn new_block_id() -> String {
    Uuid::new_v4().to_string()
}

/// Check tree invariants across the whole forest, reporting every violation
pub fn validate_forest(forest: &[Block]) -> Result<(), Vec<TreeIssue>> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();
    collect_issues(forest, &mut seen, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn collect_issues<'a>(
    blocks: &'a [Block],
    seen: &mut HashSet<&'a str>,
    issues: &mut Vec<TreeIssue>,
) {
    for block in blocks {
        if !seen.insert(block.id.as_str()) {
            issues.push(TreeIssue::DuplicateId {
                id: block.id.clone(),
            });
        }

        if let Some(children) = &block.children {
            if !block.is_container() {
                issues.push(TreeIssue::ChildrenOnLeaf {
                    id: block.id.clone(),
                    block_type: block.block_type,
                });
            }
            collect_issues(children, seen, issues);
        }
    }
}
