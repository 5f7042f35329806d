use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn element(doc: &mut Document, name: &str) -> NodeKey {
    doc.create_element(name)
}

#[test]
fn new_document_has_head_and_body_under_html() {
    let doc = Document::new();
    let html = doc.children(doc.root())[0];
    assert_eq!(doc.name(html), Some("html"));
    assert_eq!(doc.children(html), &[doc.head(), doc.body()]);
    assert!(doc.is_connected(doc.body()));
    assert_ne!(doc.root(), NodeKey::INVALID);
}

#[test]
fn documents_get_distinct_ids() {
    assert_ne!(Document::new().id(), Document::new().id());
}

#[test]
fn create_element_lowercases_html_names_but_not_svg_names() {
    let mut doc = Document::new();
    let div = doc.create_element("DIV");
    let fo = doc.create_element_ns(Namespace::Svg, "foreignObject");
    assert_eq!(doc.name(div), Some("div"));
    assert_eq!(doc.name(fo), Some("foreignObject"));
    assert!(doc.is_svg(fo));
    assert!(!doc.is_svg(div));
}

#[test]
fn append_child_moves_a_parented_node() {
    let mut doc = Document::new();
    let a = element(&mut doc, "a");
    let b = element(&mut doc, "b");
    let child = doc.create_text("x");
    doc.append_child(a, child).unwrap();
    doc.append_child(b, child).unwrap();
    assert!(doc.children(a).is_empty());
    assert_eq!(doc.children(b), &[child]);
    assert_eq!(doc.parent(child), Some(b));
}

#[test]
fn append_child_rejects_cycles_and_leaf_parents() {
    let mut doc = Document::new();
    let outer = element(&mut doc, "div");
    let inner = element(&mut doc, "span");
    doc.append_child(outer, inner).unwrap();
    assert_eq!(
        doc.append_child(inner, outer),
        Err(DomError::CycleDetected {
            parent: inner,
            child: outer
        })
    );
    let text = doc.create_text("t");
    assert_eq!(
        doc.append_child(text, inner),
        Err(DomError::InvalidParent(text))
    );
    assert_eq!(
        doc.append_child(outer, NodeKey::INVALID),
        Err(DomError::InvalidKey(NodeKey::INVALID))
    );
}

#[test]
fn insert_before_places_child_ahead_of_sibling() {
    let mut doc = Document::new();
    let list = element(&mut doc, "ul");
    let first = element(&mut doc, "li");
    let second = element(&mut doc, "li");
    doc.append_child(list, second).unwrap();
    doc.insert_before(list, first, second).unwrap();
    assert_eq!(doc.children(list), &[first, second]);

    let stranger = element(&mut doc, "li");
    let other = element(&mut doc, "p");
    assert_eq!(
        doc.insert_before(list, other, stranger),
        Err(DomError::InvalidSibling {
            parent: list,
            before: stranger
        })
    );
}

#[test]
fn remove_invalidates_whole_subtree() {
    let mut doc = Document::new();
    let outer = element(&mut doc, "div");
    let inner = element(&mut doc, "span");
    let text = doc.create_text("t");
    doc.append_child(outer, inner).unwrap();
    doc.append_child(inner, text).unwrap();
    doc.remove(outer).unwrap();
    assert!(!doc.contains(outer));
    assert!(!doc.contains(inner));
    assert!(!doc.contains(text));
    assert_eq!(doc.remove(outer), Err(DomError::MissingKey(outer)));
    assert_eq!(doc.remove(doc.root()), Err(DomError::InvalidParent(doc.root())));
}

#[test]
fn attributes_keep_insertion_order_and_replace_in_place() {
    let mut doc = Document::new();
    let div = element(&mut doc, "div");
    doc.set_attribute(div, "id", Some("a".into())).unwrap();
    doc.set_attribute(div, "class", Some("c".into())).unwrap();
    doc.set_attribute(div, "ID", Some("b".into())).unwrap();
    let names: Vec<&str> = doc.attributes(div).iter().map(|(k, _)| k.as_ref()).collect();
    assert_eq!(names, vec!["id", "class"]);
    assert_eq!(doc.attribute(div, "id"), Some("b"));
    assert!(doc.remove_attribute(div, "class").unwrap());
    assert!(!doc.remove_attribute(div, "class").unwrap());

    let text = doc.create_text("t");
    assert_eq!(
        doc.set_attribute(text, "id", None),
        Err(DomError::WrongNodeKind(text))
    );
}

#[test]
fn shallow_clone_copies_attributes_but_not_children_or_handlers() {
    let mut doc = Document::new();
    let div = element(&mut doc, "div");
    doc.set_attribute(div, "class", Some("box".into())).unwrap();
    doc.set_style(div, "color", "red").unwrap();
    doc.set_handler(div, "load", Some(Rc::new(|_: &mut Document, _: NodeKey| {})))
        .unwrap();
    let child = doc.create_text("hi");
    doc.append_child(div, child).unwrap();

    let shallow = doc.clone_node(div, false).unwrap();
    assert_ne!(shallow, div);
    assert_eq!(doc.attribute(shallow, "class"), Some("box"));
    assert_eq!(doc.style(shallow), doc.style(div));
    assert!(doc.children(shallow).is_empty());
    assert!(doc.handler(shallow, "load").is_none());
    assert!(doc.parent(shallow).is_none());

    let deep = doc.clone_node(div, true).unwrap();
    assert_eq!(doc.text_content(deep), "hi");
    assert_ne!(doc.children(deep)[0], child);
}

#[test]
fn once_listeners_fire_once_and_persistent_ones_stay() {
    let mut doc = Document::new();
    let div = element(&mut doc, "div");
    let log = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&log);
    doc.add_listener(
        div,
        DomEvent::Mount,
        Listener::once(move |_, key| sink.borrow_mut().push(("once", key))),
    )
    .unwrap();
    let sink = Rc::clone(&log);
    doc.add_listener(
        div,
        DomEvent::Mount,
        Listener::persistent(move |_, key| sink.borrow_mut().push(("always", key))),
    )
    .unwrap();

    assert_eq!(doc.dispatch(div, DomEvent::Mount), 2);
    assert_eq!(doc.dispatch(div, DomEvent::Mount), 1);
    assert_eq!(doc.dispatch(div, DomEvent::Destroy), 0);
    assert_eq!(
        *log.borrow(),
        vec![("once", div), ("always", div), ("always", div)]
    );
}

#[test]
fn mount_dispatches_only_when_parent_is_connected() {
    let mut doc = Document::new();
    let detached = element(&mut doc, "section");
    let child = element(&mut doc, "p");
    let mounted = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&mounted);
    doc.add_listener(
        child,
        DomEvent::Mount,
        Listener::once(move |_, _| *counter.borrow_mut() += 1),
    )
    .unwrap();

    doc.mount(child, detached).unwrap();
    assert_eq!(*mounted.borrow(), 0);

    let body = doc.body();
    doc.mount(detached, body).unwrap();
    assert_eq!(*mounted.borrow(), 1);
}

#[test]
fn unmount_dispatches_destroy_in_tree_order_then_removes() {
    let mut doc = Document::new();
    let outer = element(&mut doc, "div");
    let inner = element(&mut doc, "span");
    doc.append_child(outer, inner).unwrap();
    let body = doc.body();
    doc.mount(outer, body).unwrap();

    let order = Rc::new(RefCell::new(Vec::new()));
    for key in [outer, inner] {
        let sink = Rc::clone(&order);
        doc.add_listener(
            key,
            DomEvent::Destroy,
            Listener::once(move |doc: &mut Document, key| {
                assert!(doc.contains(key));
                sink.borrow_mut().push(key);
            }),
        )
        .unwrap();
    }

    doc.unmount(outer).unwrap();
    assert_eq!(*order.borrow(), vec![outer, inner]);
    assert!(!doc.contains(outer));
    assert!(doc.children(body).is_empty());
}

#[test]
fn text_content_skips_comments() {
    let mut doc = Document::new();
    let p = element(&mut doc, "p");
    let a = doc.create_text("a");
    let c = doc.create_comment("hidden");
    let b = doc.create_text("b");
    for key in [a, c, b] {
        doc.append_child(p, key).unwrap();
    }
    assert_eq!(doc.text_content(p), "ab");
    doc.set_text(c, "still hidden").unwrap();
    assert_eq!(doc.text(c), Some("still hidden"));
    assert_eq!(doc.set_text(p, "x"), Err(DomError::WrongNodeKind(p)));
}
