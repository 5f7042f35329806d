//! Declarative UI materialization.
//!
//! [`Renderer`] turns a tree of [`Node`]s (elements, components, text,
//! bindings, pending values) into live [`dom::Document`] nodes and wires
//! component lifecycle onto the result. [`Hyperscript`] is the imperative
//! counterpart: it builds elements directly, cloning cached prototypes.

pub mod attrs;
pub mod awaiter;
pub mod builder;
pub mod classify;
pub mod component;
pub mod config;
pub mod context;
pub mod node;
pub mod pending;
pub mod props;
pub mod registry;
pub mod rendered;
pub mod renderer;
pub mod store;
pub mod template;

pub use crate::builder::{Built, Hyperscript, Query};
pub use crate::classify::{Classified, NodeClass, class_of, classify};
pub use crate::component::{ComponentFn, ComponentInstance, DomRef, FunctionComponent, RefSink};
pub use crate::config::RenderConfig;
pub use crate::context::current_component;
pub use crate::node::{Descriptor, Kind, Node, flatten};
pub use crate::pending::Pending;
pub use crate::props::{PropValue, Props};
pub use crate::registry::CustomTags;
pub use crate::rendered::Rendered;
pub use crate::renderer::Renderer;
pub use crate::store::{Binding, Listener, Store};
pub use crate::template::{QueryResolver, TagResolver, TemplateCache};
