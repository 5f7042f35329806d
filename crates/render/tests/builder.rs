use dom::snapshot::{DomSnapshot, DomSnapshotOptions, assert_snapshot_eq};
use dom::{Document, DomError, Namespace, NodeKey};
use render::{
    Built, ComponentFn, CustomTags, FunctionComponent, Hyperscript, Node, PropValue, Props,
    QueryResolver, Renderer, TagResolver, current_component,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Default)]
struct CountingResolver {
    calls: Rc<RefCell<Vec<(String, bool)>>>,
}

impl TagResolver for CountingResolver {
    fn resolve(&self, doc: &mut Document, query: &str, is_svg: bool) -> Result<NodeKey, DomError> {
        self.calls.borrow_mut().push((query.to_string(), is_svg));
        QueryResolver.resolve(doc, query, is_svg)
    }
}

fn snapshot(doc: &Document, key: NodeKey) -> DomSnapshot {
    DomSnapshot::new(&doc.to_tree(key).unwrap(), DomSnapshotOptions::default())
}

fn element(built: Built) -> NodeKey {
    built.element().expect("intrinsic build returns an element")
}

#[test]
fn second_build_of_a_tag_reuses_the_template() {
    let resolver = CountingResolver::default();
    let mut h = Hyperscript::with_resolver(Renderer::new(), resolver.clone());
    let mut doc = Document::new();

    let first = element(h.html(&mut doc, 0, "li", None, Vec::new()).unwrap());
    let template = h.templates().get("li", false).unwrap();
    let second = element(h.html(&mut doc, 0, "li", None, Vec::new()).unwrap());

    assert_eq!(resolver.calls.borrow().len(), 1);
    assert_eq!(h.templates().get("li", false), Some(template));
    assert_ne!(first, second);
    assert_ne!(first, template);

    doc.set_attribute(first, "id", Some("a".into())).unwrap();
    assert!(!doc.has_attribute(second, "id"));
    assert!(doc.attributes(template).is_empty());
}

#[test]
fn html_and_svg_pools_are_separate() {
    let resolver = CountingResolver::default();
    let mut h = Hyperscript::with_resolver(Renderer::new(), resolver.clone());
    let mut doc = Document::new();

    let html_a = element(h.html(&mut doc, 0, "a", None, Vec::new()).unwrap());
    let svg_a = element(h.svg(&mut doc, 0, "a", None, Vec::new()).unwrap());
    let svg_root = element(h.html(&mut doc, 0, "svg", None, Vec::new()).unwrap());

    assert!(!doc.is_svg(html_a));
    assert!(doc.is_svg(svg_a));
    assert!(doc.is_svg(svg_root));
    assert_eq!(
        *resolver.calls.borrow(),
        vec![
            ("a".to_string(), false),
            ("a".to_string(), true),
            ("svg".to_string(), true)
        ]
    );
}

#[test]
fn query_syntax_sets_id_and_classes_and_props_override() {
    let mut h = Hyperscript::new(Renderer::new());
    let mut doc = Document::new();
    let props = Props::new().with("title", "t").with("id", "override");
    let key = element(
        h.html(&mut doc, 0, "button#go.primary.big", Some(props), vec!["Go".into()])
            .unwrap(),
    );
    assert_snapshot_eq(
        &[
            "<button id=\"override\" class=\"primary big\" title=\"t\">",
            "| \"Go\"",
        ],
        &snapshot(&doc, key),
    );
}

#[test]
fn nested_children_are_flattened_and_falsy_ones_skipped() {
    let mut h = Hyperscript::new(Renderer::new());
    let mut doc = Document::new();
    let item = element(h.html(&mut doc, 1, "li", None, vec!["one".into()]).unwrap());
    let children = vec![
        Node::Real(item),
        Node::List(vec![
            Node::Null,
            Node::element("li", Props::new().with("class", "two"), vec![Node::text("two")]),
            Node::Bool(false),
        ]),
        Node::Number(3.0),
    ];
    let list = element(h.html(&mut doc, 0, "ul", None, children).unwrap());
    assert_snapshot_eq(
        &[
            "<ul>",
            "| <li>",
            "| | \"one\"",
            "| <li class=\"two\">",
            "| | \"two\"",
            "| \"3\"",
        ],
        &snapshot(&doc, list),
    );
    // The nested intrinsic descriptor went through the template cache.
    assert_eq!(h.templates().len(), 2);
}

#[test]
fn svg_children_inherit_the_namespace() {
    let mut h = Hyperscript::new(Renderer::new());
    let mut doc = Document::new();
    let circle = Node::element("circle", Props::new().with("r", 4i64), Vec::new());
    let svg = element(h.html(&mut doc, 0, "svg", None, vec![circle]).unwrap());
    let circle = doc.children(svg)[0];
    assert_eq!(doc.namespace(circle), Some(Namespace::Svg));
    assert_eq!(doc.attribute(circle, "r"), Some("4"));
}

#[test]
fn onload_handler_is_invoked_immediately() {
    let mut h = Hyperscript::new(Renderer::new());
    let mut doc = Document::new();
    let loaded = Rc::new(Cell::new(None));
    let seen = Rc::clone(&loaded);
    let props = Props::new().with(
        "onload",
        PropValue::handler(move |doc, el| {
            seen.set(Some((el, doc.children(el).len())));
        }),
    );
    let key = element(
        h.html(&mut doc, 0, "img", Some(props), vec!["alt".into()])
            .unwrap(),
    );
    assert_eq!(loaded.get(), Some((key, 1)));
}

#[test]
fn component_constructor_returns_an_unrendered_instance() {
    let calls = Rc::new(Cell::new(0));
    let counted = Rc::clone(&calls);
    let card = ComponentFn::new("card", move |_, props, children| {
        counted.set(counted.get() + 1);
        Node::element("div", props.clone(), children.to_vec())
    });
    let renderer = Renderer::new();
    let mut h = Hyperscript::new(renderer.clone());
    let mut doc = Document::new();

    let built = h
        .html(
            &mut doc,
            0,
            card,
            Some(Props::new().with("id", "c")),
            vec!["body".into()],
        )
        .unwrap();
    let Built::Instance(instance) = built else {
        panic!("expected an instance");
    };
    assert_eq!(calls.get(), 0);
    assert_eq!(instance.props().text("id").as_deref(), Some("c"));

    let rendered = renderer
        .render_instance(&mut doc, Rc::clone(&instance), None)
        .unwrap();
    assert_eq!(calls.get(), 1);
    assert_snapshot_eq(
        &["<div id=\"c\">", "| \"body\""],
        &snapshot(&doc, rendered.as_node().unwrap()),
    );
}

#[test]
fn function_component_is_called_eagerly_with_children_in_props() {
    let greet = FunctionComponent::new("greet", |props| {
        assert!(current_component().is_none());
        let name = props.text("name").unwrap_or_default();
        Node::List(vec![
            Node::text(format!("hello {name}")),
            Node::List(props.children().to_vec()),
        ])
    });
    let mut h = Hyperscript::new(Renderer::new());
    let mut doc = Document::new();
    let built = h
        .html(
            &mut doc,
            0,
            greet,
            Some(Props::new().with("name", "ada")),
            vec!["!".into()],
        )
        .unwrap();
    let Built::Value(node) = built else {
        panic!("expected a value");
    };

    let mut doc = Document::new();
    let rendered = Renderer::new().materialize(&mut doc, node, None).unwrap();
    let texts: Vec<_> = rendered
        .nodes()
        .into_iter()
        .map(|key| doc.text(key).unwrap_or_default().to_string())
        .collect();
    assert_eq!(texts, vec!["hello ada", "!"]);
}

#[test]
fn custom_tag_children_are_rendered_through_the_registry() {
    let tags = CustomTags::new();
    tags.register(
        "x-icon",
        ComponentFn::new("icon", |_, props, _| {
            Node::element("i", Props::new().with("class", props.text("name").unwrap_or_default()), Vec::new())
        }),
    );
    let resolver = CountingResolver::default();
    let mut h = Hyperscript::with_resolver(Renderer::new().with_tags(tags), resolver.clone());
    let mut doc = Document::new();
    let icon = Node::element("x-icon", Props::new().with("name", "star"), Vec::new());
    let key = element(h.html(&mut doc, 0, "span", None, vec![icon]).unwrap());

    assert_snapshot_eq(&["<span>", "| <i class=\"star\">"], &snapshot(&doc, key));
    assert_eq!(resolver.calls.borrow().len(), 1);
}
