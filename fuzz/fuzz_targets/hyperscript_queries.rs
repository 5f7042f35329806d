#![no_main]

use dom::Document;
use libfuzzer_sys::fuzz_target;
use render::{Hyperscript, Renderer};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut h = Hyperscript::new(Renderer::new());
    let mut doc = Document::new();
    for query in text.split_whitespace().take(64) {
        let first = h
            .html(&mut doc, 0, query, None, Vec::new())
            .expect("query builds")
            .element();
        let second = h
            .html(&mut doc, 0, query, None, Vec::new())
            .expect("query builds")
            .element();
        assert_ne!(first, second);
    }
    assert!(h.templates().len() <= 64);
});
