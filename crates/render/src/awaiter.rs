//! Built-in component for pending values.

use crate::component::ComponentFn;
use crate::node::Node;
use crate::props::{PropValue, Props};

/// Component for the descriptor the renderer synthesizes around a pending
/// value (`<await src=...>`).
///
/// Renders the value once `src` is resolved. Until then it renders the
/// `placeholder` prop, or an empty placeholder comment. Without a `src` the
/// children are rendered as they are.
pub fn await_component() -> ComponentFn {
    ComponentFn::new("await", |_, props, children| match props.get("src") {
        Some(PropValue::Pending(pending)) => pending.value().unwrap_or_else(|| placeholder(props)),
        Some(PropValue::Node(node)) => (**node).clone(),
        Some(value) => match value.to_attribute_value() {
            Some(text) => Node::Text(text),
            None => Node::List(children.to_vec()),
        },
        None => Node::List(children.to_vec()),
    })
}

fn placeholder(props: &Props) -> Node {
    match props.get("placeholder") {
        Some(PropValue::Node(node)) => (**node).clone(),
        Some(PropValue::Str(text)) => Node::Text(text.clone()),
        _ => Node::Null,
    }
}
