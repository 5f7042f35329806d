use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use dom::Document;
use render::{Hyperscript, Node, Props, Renderer};

const ROWS: usize = 2_000;

fn row_children(i: usize) -> Vec<Node> {
    vec![
        Node::element("span", Props::new().with("class", "label"), vec![Node::text("row")]),
        Node::Number(i as f64),
    ]
}

fn bench_build_from_templates(c: &mut Criterion) {
    c.bench_function("bench_build_from_templates", |b| {
        b.iter_batched(
            || (Document::new(), Hyperscript::new(Renderer::new())),
            |(mut doc, mut h)| {
                for i in 0..ROWS {
                    let built = h
                        .html(&mut doc, 0, "li.row", None, row_children(i))
                        .expect("build row");
                    black_box(built.element());
                }
                doc
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_materialize_from_scratch(c: &mut Criterion) {
    c.bench_function("bench_materialize_from_scratch", |b| {
        b.iter_batched(
            || (Document::new(), Renderer::new()),
            |(mut doc, renderer)| {
                for i in 0..ROWS {
                    let row = Node::element("li", Props::new().with("class", "row"), row_children(i));
                    let rendered = renderer.materialize(&mut doc, row, None).expect("render row");
                    black_box(rendered.first_node());
                }
                doc
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_build_from_templates,
    bench_materialize_from_scratch
);
criterion_main!(benches);
