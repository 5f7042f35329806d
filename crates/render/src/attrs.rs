//! Applying props onto realized elements.

use crate::props::{CHILDREN, PropValue, Props};
use dom::{Document, DomError, NodeKey};
use std::rc::Rc;

/// Apply `props` to `element` as attributes, inline style and handlers.
///
/// * `children` and `key` are structural and skipped;
/// * handler values install `on<event>` handlers;
/// * `style` accepts declaration pairs or a `"a: b; c: d"` string;
/// * strings and numbers become attribute values, `true` a valueless
///   attribute, `false`/`null` remove the attribute;
/// * anything else (nodes, pending values) is not representable on an
///   element and is ignored.
///
/// `depth` is the nesting level of the element in the build, used for logs.
pub fn set_attributes(
    doc: &mut Document,
    element: NodeKey,
    props: &Props,
    depth: usize,
) -> Result<(), DomError> {
    for (name, value) in props {
        apply(doc, element, name, value, depth)?;
    }
    Ok(())
}

pub fn set_props(doc: &mut Document, element: NodeKey, props: &Props) -> Result<(), DomError> {
    set_attributes(doc, element, props, 0)
}

fn apply(
    doc: &mut Document,
    element: NodeKey,
    name: &str,
    value: &PropValue,
    depth: usize,
) -> Result<(), DomError> {
    if name == CHILDREN || name == "key" {
        return Ok(());
    }
    let event = handler_event(name);
    match value {
        PropValue::Handler(handler) => {
            doc.set_handler(element, event.unwrap_or(name), Some(Rc::clone(handler)))
        }
        PropValue::Style(pairs) => {
            for (property, value) in pairs {
                doc.set_style(element, property, value)?;
            }
            Ok(())
        }
        PropValue::Str(text) if name == "style" => {
            for (property, value) in parse_style(text) {
                doc.set_style(element, property, value)?;
            }
            Ok(())
        }
        PropValue::Str(_) | PropValue::Number(_) => {
            doc.set_attribute(element, attribute_name(name), value.to_attribute_value())
        }
        PropValue::Bool(true) => doc.set_attribute(element, attribute_name(name), None),
        PropValue::Bool(false) | PropValue::Null => {
            if let Some(event) = event {
                doc.set_handler(element, event, None)?;
            }
            doc.remove_attribute(element, attribute_name(name))
                .map(|_| ())
        }
        other => {
            log::debug!(
                target: "render",
                "{:indent$}<{}> ignoring {} prop `{name}`",
                "",
                element.0,
                other.kind_name(),
                indent = depth * 2
            );
            Ok(())
        }
    }
}

/// `onload` -> `load`.
fn handler_event(name: &str) -> Option<&str> {
    name.strip_prefix("on").filter(|event| !event.is_empty())
}

fn attribute_name(prop: &str) -> &str {
    match prop {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

/// Split an inline style string into trimmed declaration pairs.
pub fn parse_style(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.split(';').filter_map(|decl| {
        let (property, value) = decl.split_once(':')?;
        let property = property.trim();
        if property.is_empty() {
            return None;
        }
        Some((property, value.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn scalars_become_attributes_and_structural_keys_are_skipped() {
        let mut doc = Document::new();
        let el = doc.create_element("label");
        let props = Props::new()
            .with("className", "a b")
            .with("htmlFor", "name")
            .with("tabindex", 2i64)
            .with("hidden", true)
            .with("key", "k1");
        set_props(&mut doc, el, &props).unwrap();

        assert_eq!(doc.attribute(el, "class"), Some("a b"));
        assert_eq!(doc.attribute(el, "for"), Some("name"));
        assert_eq!(doc.attribute(el, "tabindex"), Some("2"));
        assert!(doc.has_attribute(el, "hidden"));
        assert!(!doc.has_attribute(el, "key"));
    }

    #[test]
    fn false_and_null_remove_attributes() {
        let mut doc = Document::new();
        let el = doc.create_element("input");
        doc.set_attribute(el, "disabled", None).unwrap();
        doc.set_attribute(el, "title", Some("t".into())).unwrap();
        let props = Props::new()
            .with("disabled", false)
            .with("title", PropValue::Null);
        set_props(&mut doc, el, &props).unwrap();
        assert!(doc.attributes(el).is_empty());
    }

    #[test]
    fn style_accepts_pairs_and_strings() {
        let mut doc = Document::new();
        let a = doc.create_element("p");
        let b = doc.create_element("p");
        let pairs = PropValue::Style(vec![("color".into(), "red".into())]);
        set_props(&mut doc, a, &Props::new().with("style", pairs)).unwrap();
        set_props(
            &mut doc,
            b,
            &Props::new().with("style", "color: red; margin : 0 ;;"),
        )
        .unwrap();

        assert_eq!(doc.style(a), &[("color".to_string(), "red".to_string())]);
        assert_eq!(
            doc.style(b),
            &[
                ("color".to_string(), "red".to_string()),
                ("margin".to_string(), "0".to_string())
            ]
        );
    }

    #[test]
    fn handlers_are_installed_under_their_event_name() {
        let mut doc = Document::new();
        let el = doc.create_element("img");
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let props = Props::new().with("onload", PropValue::handler(move |_, _| seen.set(seen.get() + 1)));
        set_props(&mut doc, el, &props).unwrap();

        let handler = doc.handler(el, "load").unwrap();
        handler(&mut doc, el);
        assert_eq!(hits.get(), 1);

        set_props(&mut doc, el, &Props::new().with("onload", PropValue::Null)).unwrap();
        assert!(doc.handler(el, "load").is_none());
    }

    #[test]
    fn setting_props_on_a_text_node_fails() {
        let mut doc = Document::new();
        let text = doc.create_text("x");
        let err = set_props(&mut doc, text, &Props::new().with("id", "a")).unwrap_err();
        assert_eq!(err, DomError::WrongNodeKind(text));
    }
}
