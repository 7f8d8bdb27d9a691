use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_editor::{
    create_block, delete_block, duplicate_block, find_block, update_block, Block, BlockPatch,
    BlockType, Content, History,
};

/// Nested sections `depth` levels deep, each holding `width` paragraphs.
/// Returns the forest and the id of the deepest paragraph.
fn deep_forest(depth: usize, width: usize) -> (Vec<Block>, String) {
    let mut leaf_id = String::new();
    let mut inner: Option<Block> = None;

    for _ in 0..depth {
        let mut section = create_block(BlockType::Section);
        let mut children: Vec<Block> = (0..width)
            .map(|_| create_block(BlockType::Paragraph))
            .collect();
        if leaf_id.is_empty() {
            leaf_id = children[width - 1].id.clone();
        }
        if let Some(child) = inner.take() {
            children.push(child);
        }
        section.children = Some(children);
        inner = Some(section);
    }

    (inner.into_iter().collect(), leaf_id)
}

fn find_deep_block(c: &mut Criterion) {
    let (forest, id) = deep_forest(50, 10);

    c.bench_function("find_deep_block", |b| {
        b.iter(|| find_block(black_box(&forest), black_box(&id)))
    });
}

fn update_deep_block(c: &mut Criterion) {
    let (forest, id) = deep_forest(50, 10);
    let patch = BlockPatch::content(Content::Text("Updated".to_string()));

    c.bench_function("update_deep_block", |b| {
        b.iter(|| update_block(black_box(&forest), black_box(&id), &patch))
    });
}

fn delete_and_duplicate(c: &mut Criterion) {
    let (forest, id) = deep_forest(50, 10);

    c.bench_function("delete_deep_block", |b| {
        b.iter(|| delete_block(black_box(&forest), black_box(&id)))
    });

    c.bench_function("duplicate_deep_block", |b| {
        b.iter(|| duplicate_block(black_box(&forest), black_box(&id)))
    });
}

fn record_history(c: &mut Criterion) {
    let (forest, _) = deep_forest(20, 10);

    c.bench_function("record_100_snapshots", |b| {
        b.iter(|| {
            let mut history = History::new();
            for _ in 0..100 {
                history.record(black_box(&forest));
            }
            history
        })
    });
}

criterion_group!(
    benches,
    find_deep_block,
    update_deep_block,
    delete_and_duplicate,
    record_history
);
criterion_main!(benches);
