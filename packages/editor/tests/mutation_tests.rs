//! Tree mutation tests at arbitrary depth

use folio_editor::{
    add_to_container, contains_block, count_blocks, create_block, delete_block, duplicate_block,
    find_block, move_block, update_block, Block, BlockPatch, BlockType, Breakpoint,
    BreakpointStyles, Content, Direction,
};

/// section
///   ├─ paragraph
///   └─ flex
///        ├─ h2
///        └─ image
/// quote
fn nested_forest() -> (Vec<Block>, Ids) {
    let mut section = create_block(BlockType::Section);
    let paragraph = create_block(BlockType::Paragraph);
    let mut flex = create_block(BlockType::Flex);
    let h2 = create_block(BlockType::H2);
    let image = create_block(BlockType::Image);
    let quote = create_block(BlockType::Quote);

    let ids = Ids {
        section: section.id.clone(),
        paragraph: paragraph.id.clone(),
        flex: flex.id.clone(),
        h2: h2.id.clone(),
        image: image.id.clone(),
        quote: quote.id.clone(),
    };

    flex.children = Some(vec![h2, image]);
    section.children = Some(vec![paragraph, flex]);

    (vec![section, quote], ids)
}

struct Ids {
    section: String,
    paragraph: String,
    flex: String,
    h2: String,
    image: String,
    quote: String,
}

#[test]
fn test_update_nested_block_touches_only_target() {
    let (forest, ids) = nested_forest();

    let patch = BlockPatch::content(Content::Text("Deep heading".to_string()));
    let updated = update_block(&forest, &ids.h2, &patch);

    let h2 = find_block(&updated, &ids.h2).unwrap();
    assert_eq!(h2.content, Some(Content::Text("Deep heading".to_string())));
    assert_eq!(h2.styles, find_block(&forest, &ids.h2).unwrap().styles);

    for other in [&ids.section, &ids.paragraph, &ids.image, &ids.quote] {
        let before = find_block(&forest, other).unwrap();
        let after = find_block(&updated, other).unwrap();
        assert_eq!(before.content, after.content);
        assert_eq!(before.styles, after.styles);
        assert_eq!(before.block_type, after.block_type);
    }

    // Original forest is untouched
    assert_eq!(
        find_block(&forest, &ids.h2).unwrap().content,
        Some(Content::Text(String::new()))
    );
}

#[test]
fn test_update_styles_replaces_breakpoint_map() {
    let (forest, ids) = nested_forest();

    let mut styles = find_block(&forest, &ids.image).unwrap().styles.clone();
    styles.set(
        Breakpoint::Tablet,
        [("width".to_string(), "50%".to_string())].into(),
    );
    let updated = update_block(&forest, &ids.image, &BlockPatch::styles(styles.clone()));

    assert_eq!(find_block(&updated, &ids.image).unwrap().styles, styles);
    assert_eq!(
        find_block(&updated, &ids.image)
            .unwrap()
            .resolved_styles(Breakpoint::Tablet)["width"],
        "50%"
    );
}

#[test]
fn test_delete_nested_container_removes_subtree() {
    let (forest, ids) = nested_forest();
    assert_eq!(count_blocks(&forest), 6);

    let result = delete_block(&forest, &ids.flex);

    assert!(!contains_block(&result, &ids.flex));
    assert!(!contains_block(&result, &ids.h2));
    assert!(!contains_block(&result, &ids.image));
    assert!(contains_block(&result, &ids.paragraph));
    assert_eq!(count_blocks(&result), 3);
}

#[test]
fn test_delete_missing_id_is_noop() {
    let (forest, _) = nested_forest();
    assert_eq!(delete_block(&forest, "does-not-exist"), forest);
}

#[test]
fn test_duplicate_nested_places_copy_after_original() {
    let (forest, ids) = nested_forest();

    let result = duplicate_block(&forest, &ids.h2);
    let flex = find_block(&result, &ids.flex).unwrap();

    assert_eq!(flex.children().len(), 3);
    assert_eq!(flex.children()[0].id, ids.h2);
    assert_ne!(flex.children()[1].id, ids.h2);
    assert_eq!(flex.children()[1].block_type, BlockType::H2);
    assert_eq!(flex.children()[2].id, ids.image);

    // Top level is unchanged
    assert_eq!(result.len(), 2);
}

#[test]
fn test_duplicate_container_gets_fresh_descendant_ids() {
    let (forest, ids) = nested_forest();

    let result = duplicate_block(&forest, &ids.section);
    assert_eq!(result.len(), 3);
    assert_eq!(result[0].id, ids.section);

    let copy = &result[1];
    assert_ne!(copy.id, ids.section);
    assert_eq!(count_blocks(std::slice::from_ref(copy)), 5);

    assert!(folio_editor::validate_forest(&result).is_ok());
}

#[test]
fn test_move_within_nested_parent_only() {
    let (forest, ids) = nested_forest();

    let result = move_block(&forest, &ids.image, Direction::Up);
    let flex = find_block(&result, &ids.flex).unwrap();
    assert_eq!(flex.children()[0].id, ids.image);
    assert_eq!(flex.children()[1].id, ids.h2);

    // First child moving up stays put, and never leaves its container
    let result = move_block(&forest, &ids.paragraph, Direction::Up);
    assert_eq!(result, forest);

    let result = move_block(&forest, &ids.quote, Direction::Down);
    assert_eq!(result, forest);
}

#[test]
fn test_add_to_nested_container() {
    let (forest, ids) = nested_forest();
    let caption = create_block(BlockType::Caption);
    let caption_id = caption.id.clone();

    let result = add_to_container(&forest, &ids.flex, caption);
    let flex = find_block(&result, &ids.flex).unwrap();
    assert_eq!(flex.children().last().unwrap().id, caption_id);
}

#[test]
fn test_styles_default_when_missing_in_json() {
    let json = r#"{"id": "x", "type": "divider"}"#;
    let block: Block = serde_json::from_str(json).unwrap();
    assert_eq!(block.styles, BreakpointStyles::default());
    assert!(block.content.is_none());
    assert!(block.children.is_none());
}
