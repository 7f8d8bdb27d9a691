//! # Block Type Registry
//!
//! Static catalogue of block kinds and the factory that builds fresh blocks
//! with their default content and desktop styles.

use crate::block::{
    new_block_id, Block, BlockType, BreakpointStyles, CodeContent, Content, ContentKind,
    StyleObject,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Palette grouping for block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Text,
    Media,
    Code,
    Layout,
}

/// Display metadata for a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeInfo {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub label: &'static str,
    pub category: Category,
    pub icon_hint: &'static str,
}

const fn info(
    block_type: BlockType,
    label: &'static str,
    category: Category,
    icon_hint: &'static str,
) -> BlockTypeInfo {
    BlockTypeInfo {
        block_type,
        label,
        category,
        icon_hint,
    }
}

/// Every block type, in palette order. The first entry doubles as the fallback.
pub static BLOCK_TYPES: &[BlockTypeInfo] = &[
    info(BlockType::Paragraph, "Paragraph", Category::Text, "pilcrow"),
    info(BlockType::H1, "Heading 1", Category::Text, "heading-1"),
    info(BlockType::H2, "Heading 2", Category::Text, "heading-2"),
    info(BlockType::H3, "Heading 3", Category::Text, "heading-3"),
    info(BlockType::H4, "Heading 4", Category::Text, "heading-4"),
    info(BlockType::H5, "Heading 5", Category::Text, "heading-5"),
    info(BlockType::H6, "Heading 6", Category::Text, "heading-6"),
    info(BlockType::Caption, "Caption", Category::Text, "type"),
    info(BlockType::Quote, "Quote", Category::Text, "quote"),
    info(BlockType::List, "Bullet List", Category::Text, "list"),
    info(BlockType::NumberedList, "Numbered List", Category::Text, "list-ordered"),
    info(BlockType::Code, "Code Block", Category::Code, "code"),
    info(BlockType::Image, "Image", Category::Media, "image"),
    info(BlockType::Video, "Video", Category::Media, "video"),
    info(BlockType::Pdf, "PDF", Category::Media, "file-text"),
    info(BlockType::File, "File", Category::Media, "file"),
    info(BlockType::Divider, "Divider", Category::Layout, "minus"),
    info(BlockType::Section, "Section", Category::Layout, "layout-grid"),
    info(BlockType::Flex, "Flex Container", Category::Layout, "columns"),
];

/// Languages offered for code blocks, as (value, label)
pub const PROGRAMMING_LANGUAGES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("python", "Python"),
    ("java", "Java"),
    ("cpp", "C++"),
    ("csharp", "C#"),
    ("go", "Go"),
    ("rust", "Rust"),
    ("php", "PHP"),
    ("ruby", "Ruby"),
    ("swift", "Swift"),
    ("kotlin", "Kotlin"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("scss", "SCSS"),
    ("sql", "SQL"),
    ("bash", "Bash"),
    ("json", "JSON"),
    ("yaml", "YAML"),
    ("markdown", "Markdown"),
    ("jsx", "JSX"),
    ("tsx", "TSX"),
];

pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

pub fn type_info(block_type: BlockType) -> &'static BlockTypeInfo {
    BLOCK_TYPES
        .iter()
        .find(|entry| entry.block_type == block_type)
        .unwrap_or(&BLOCK_TYPES[0])
}

/// Lookup by wire name, falling back to the default entry for unknown names
pub fn type_info_by_name(name: &str) -> &'static BlockTypeInfo {
    match name.parse::<BlockType>() {
        Ok(block_type) => type_info(block_type),
        Err(_) => &BLOCK_TYPES[0],
    }
}

/// Catalogue grouped by category, preserving palette order within a group
pub fn block_types_by_category() -> BTreeMap<Category, Vec<&'static BlockTypeInfo>> {
    let mut grouped: BTreeMap<Category, Vec<&'static BlockTypeInfo>> = BTreeMap::new();
    for entry in BLOCK_TYPES {
        grouped.entry(entry.category).or_default().push(entry);
    }
    grouped
}

fn bag(pairs: &[(&str, &str)]) -> StyleObject {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn base_styles() -> StyleObject {
    bag(&[
        ("width", "auto"),
        ("maxWidth", "100%"),
        ("minWidth", "0"),
        ("height", "auto"),
        ("maxHeight", "none"),
        ("minHeight", "0"),
        ("marginTop", "0"),
        ("marginBottom", "1rem"),
        ("marginLeft", "0"),
        ("marginRight", "0"),
        ("paddingTop", "1rem"),
        ("paddingBottom", "1rem"),
        ("paddingLeft", "1rem"),
        ("paddingRight", "1rem"),
        ("display", "flex"),
        ("flexDirection", "row"),
        ("gap", "1rem"),
        ("alignItems", "flex-start"),
        ("justifyContent", "flex-start"),
        ("flexWrap", "nowrap"),
        ("backgroundColor", "transparent"),
        ("borderRadius", "0.5rem"),
        ("border", "1px solid #e5e7eb"),
    ])
}

fn heading_styles(font_size: &str, margin_bottom: &str) -> StyleObject {
    bag(&[
        ("display", "block"),
        ("fontSize", font_size),
        ("fontWeight", "700"),
        ("lineHeight", "1.2"),
        ("marginBottom", margin_bottom),
    ])
}

fn type_specific_styles(block_type: BlockType) -> StyleObject {
    match block_type {
        BlockType::H1 => heading_styles("2.5rem", "1.5rem"),
        BlockType::H2 => heading_styles("2rem", "1.25rem"),
        BlockType::H3 => heading_styles("1.75rem", "1rem"),
        BlockType::H4 => heading_styles("1.5rem", "1rem"),
        BlockType::H5 => heading_styles("1.25rem", "0.75rem"),
        BlockType::H6 => heading_styles("1rem", "0.75rem"),
        BlockType::Paragraph => bag(&[
            ("display", "block"),
            ("fontSize", "1rem"),
            ("lineHeight", "1.75"),
        ]),
        BlockType::Caption => bag(&[
            ("display", "block"),
            ("fontSize", "0.875rem"),
            ("color", "#6b7280"),
            ("fontStyle", "italic"),
        ]),
        BlockType::Quote => bag(&[
            ("display", "block"),
            ("fontSize", "1.125rem"),
            ("fontStyle", "italic"),
            ("borderLeft", "4px solid #d1d5db"),
            ("paddingLeft", "1.5rem"),
        ]),
        BlockType::List | BlockType::NumberedList => bag(&[
            ("display", "block"),
            ("paddingLeft", "2rem"),
            ("lineHeight", "1.75"),
        ]),
        BlockType::Code => bag(&[
            ("display", "block"),
            ("fontFamily", "'Fira Code', monospace"),
            ("fontSize", "0.875rem"),
            ("backgroundColor", "#1f2937"),
            ("color", "#f9fafb"),
            ("overflowX", "auto"),
        ]),
        BlockType::Divider => bag(&[
            ("display", "block"),
            ("border", "none"),
            ("borderTop", "1px solid #e5e7eb"),
            ("paddingTop", "0"),
            ("paddingBottom", "0"),
        ]),
        BlockType::Image | BlockType::Video | BlockType::Pdf | BlockType::File => bag(&[
            ("display", "block"),
            ("width", "100%"),
        ]),
        BlockType::Flex => bag(&[
            ("display", "flex"),
            ("flexDirection", "row"),
            ("gap", "1rem"),
            ("padding", "1.5rem"),
            ("backgroundColor", "#f9fafb"),
            ("borderRadius", "0.5rem"),
            ("border", "2px dashed #d1d5db"),
            ("minHeight", "120px"),
        ]),
        BlockType::Section => bag(&[
            ("display", "block"),
            ("padding", "2rem"),
            ("backgroundColor", "#fefce8"),
            ("borderRadius", "0.5rem"),
            ("border", "2px solid #fde047"),
            ("marginBottom", "1.5rem"),
            ("minHeight", "120px"),
        ]),
    }
}

/// Base style bag with the type's deltas applied on top
pub fn default_styles(block_type: BlockType) -> StyleObject {
    let mut styles = base_styles();
    styles.extend(type_specific_styles(block_type));
    styles
}

pub fn default_content(block_type: BlockType) -> Option<Content> {
    match block_type.content_kind() {
        ContentKind::Text => Some(Content::Text(String::new())),
        ContentKind::List => Some(Content::List(vec![
            "Item 1".to_string(),
            "Item 2".to_string(),
            "Item 3".to_string(),
        ])),
        ContentKind::Code => Some(Content::Code(CodeContent {
            code: "// Write your code here".to_string(),
            language: DEFAULT_CODE_LANGUAGE.to_string(),
        })),
        ContentKind::None => None,
    }
}

/// Build a fresh block of the given type with a never-before-used id
pub fn create_block(block_type: BlockType) -> Block {
    Block {
        id: new_block_id(),
        block_type,
        content: default_content(block_type),
        styles: BreakpointStyles::desktop(default_styles(block_type)),
        children: block_type.is_container().then(Vec::new),
    }
}
