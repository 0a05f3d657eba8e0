//! Benchmarks for Markdown rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notion_typewriter::{
    content_hash, render_blocks, Annotations, Block, BlockCommon, BulletedListItemBlock,
    Heading2Block, ParagraphBlock, RichTextItem, TableBlock, TableRowBlock, TextBlockContent,
};

fn styled_text(label: &str) -> TextBlockContent {
    TextBlockContent::new(vec![
        RichTextItem::plain_text(label),
        RichTextItem::plain_text(" bold").with_annotations(Annotations {
            bold: true,
            ..Default::default()
        }),
        RichTextItem::plain_text(" link").with_href("https://example.com"),
    ])
}

/// A list nested `depth` levels deep with `breadth` items per level.
fn nested_list(level: usize, depth: usize, breadth: usize) -> Vec<Block> {
    (0..breadth)
        .map(|i| {
            let children = if level < depth {
                nested_list(level + 1, depth, breadth)
            } else {
                vec![]
            };
            Block::BulletedListItem(BulletedListItemBlock {
                common: BlockCommon::new(format!("item-{}-{}", level, i)).with_children(children),
                content: styled_text("item"),
            })
        })
        .collect()
}

fn document(sections: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    for s in 0..sections {
        blocks.push(Block::Heading2(Heading2Block {
            common: BlockCommon::new(format!("h-{}", s)),
            content: styled_text("Section"),
        }));
        blocks.push(Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new(format!("p-{}", s)),
            content: styled_text("Body text"),
        }));
        blocks.extend(nested_list(0, 2, 3));
        let rows = (0..5)
            .map(|r| {
                Block::TableRow(TableRowBlock {
                    common: BlockCommon::new(format!("r-{}-{}", s, r)),
                    cells: vec![vec![RichTextItem::plain_text("cell")]; 4],
                })
            })
            .collect();
        blocks.push(Block::Table(TableBlock {
            common: BlockCommon::new(format!("t-{}", s)).with_children(rows),
            table_width: 4,
            has_column_header: true,
            has_row_header: false,
        }));
    }
    blocks
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_blocks");
    for sections in [1, 10, 100] {
        let blocks = document(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &blocks, |b, blocks| {
            b.iter(|| render_blocks(black_box(blocks)))
        });
    }
    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let markdown = render_blocks(&document(100));
    c.bench_function("content_hash", |b| b.iter(|| content_hash(black_box(&markdown))));
}

criterion_group!(benches, bench_render, bench_hash);
criterion_main!(benches);
