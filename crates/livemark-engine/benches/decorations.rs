use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use livemark_config::PreviewConfig;
use livemark_engine::{Document, Edit, LivePreview, NullResolver, Transaction};

fn generate_note(sections: usize) -> String {
    let base = "# Section\n\nParagraph with **bold**, *italic*, `code` and a [[wiki-link|link]].\n\n- [ ] open task #todo\n- [x] done task\n\n> [!note] Remember\n> callout body\n\nInline $e = mc^2$ math and ==highlight== ~~gone~~.\n\n```rust\nfn example() {}\n```\n\n";
    base.repeat(sections)
}

fn bench_rebuild_vs_cursor_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("decorations");
    group.sample_size(20);

    let content = generate_note(100);

    group.bench_function("rebuild_on_edit", |b| {
        b.iter_batched(
            || {
                let mut doc = Document::from_text(&content);
                let mut preview = LivePreview::new(NullResolver, PreviewConfig::default());
                preview.update(&doc, &Transaction::user(0));
                doc.apply(Edit::InsertText {
                    at: 0,
                    text: "x".to_string(),
                })
                .unwrap();
                (doc, preview)
            },
            |(doc, mut preview)| {
                std::hint::black_box(preview.update(&doc, &Transaction::user(1)).len());
            },
            BatchSize::SmallInput,
        );
    });

    let doc = Document::from_text(&content);
    let mut preview = LivePreview::new(NullResolver, PreviewConfig::default());
    preview.update(&doc, &Transaction::user(0));
    let mut cursor = 0;
    group.bench_function("cursor_replay", |b| {
        b.iter(|| {
            cursor = (cursor + 97) % doc.len();
            let inline = preview.update(&doc, &Transaction::user(cursor)).len();
            std::hint::black_box((inline, preview.take_follow_up()));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rebuild_vs_cursor_replay);
criterion_main!(benches);
