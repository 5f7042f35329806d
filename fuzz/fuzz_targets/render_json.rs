#![no_main]

use dom::Document;
use libfuzzer_sys::fuzz_target;
use render::{CustomTags, Node, Renderer};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let renderer = Renderer::new().with_tags(CustomTags::with_await("await"));
    let mut doc = Document::new();
    let body = doc.body();
    // Any JSON value is renderable: malformed data degrades to text.
    let rendered = renderer
        .render_into(&mut doc, Node::from_json(value), body)
        .expect("JSON input always renders");
    for key in rendered.nodes() {
        assert_eq!(doc.parent(key), Some(body));
    }
    rendered.unmount(&mut doc).expect("rendered nodes unmount");
    assert!(doc.children(body).is_empty());
});
