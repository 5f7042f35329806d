//! Template prototypes for the hyperscript builder.
//!
//! Building an element by cloning a prototype is cheaper than constructing it
//! from its query every time, so the first build of a query resolves a
//! detached prototype and every later build clones it. Prototypes are never
//! attached to the tree and never mutated.

use dom::{Document, DomError, Namespace, NodeKey};
use std::collections::HashMap;
use std::sync::Arc;

/// Turns a query into a freshly constructed, detached element.
pub trait TagResolver {
    fn resolve(&self, doc: &mut Document, query: &str, is_svg: bool) -> Result<NodeKey, DomError>;
}

/// Parts of a `tag#id.class1.class2` query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedQuery<'a> {
    pub tag: &'a str,
    pub id: Option<&'a str>,
    pub classes: Vec<&'a str>,
}

/// Parse a query; a missing tag means `div`. A repeated `#id` keeps the last.
pub fn parse_query(query: &str) -> ParsedQuery<'_> {
    let split = query.find(['#', '.']).unwrap_or(query.len());
    let (tag, mut rest) = query.split_at(split);
    let mut parsed = ParsedQuery {
        tag: if tag.is_empty() { "div" } else { tag },
        id: None,
        classes: Vec::new(),
    };
    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let (value, next) = body.split_at(end);
        if !value.is_empty() {
            if marker == '#' {
                parsed.id = Some(value);
            } else {
                parsed.classes.push(value);
            }
        }
        rest = next;
    }
    parsed
}

/// Default resolver: understands `tag#id.class` queries.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryResolver;

impl TagResolver for QueryResolver {
    fn resolve(&self, doc: &mut Document, query: &str, is_svg: bool) -> Result<NodeKey, DomError> {
        let parsed = parse_query(query);
        let element = if is_svg {
            doc.create_element_ns(Namespace::Svg, parsed.tag)
        } else {
            doc.create_element(parsed.tag)
        };
        if let Some(id) = parsed.id {
            doc.set_attribute(element, "id", Some(id.to_string()))?;
        }
        if !parsed.classes.is_empty() {
            doc.set_attribute(element, "class", Some(parsed.classes.join(" ")))?;
        }
        Ok(element)
    }
}

/// Two pools of prototypes, HTML and SVG, keyed by query.
///
/// Prototypes belong to one document; handing the cache another document
/// drops every prototype resolved so far.
#[derive(Debug, Default)]
pub struct TemplateCache {
    doc_id: Option<u64>,
    html: HashMap<Arc<str>, NodeKey>,
    svg: HashMap<Arc<str>, NodeKey>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prototype for `query` in the requested pool, resolving it on first use.
    pub fn get_or_resolve(
        &mut self,
        doc: &mut Document,
        resolver: &dyn TagResolver,
        query: &str,
        is_svg: bool,
    ) -> Result<NodeKey, DomError> {
        if self.doc_id != Some(doc.id()) {
            if self.doc_id.is_some() {
                log::debug!(target: "render.template", "document changed, dropping {} templates", self.len());
            }
            self.clear();
            self.doc_id = Some(doc.id());
        }

        let pool = if is_svg { &mut self.svg } else { &mut self.html };
        if let Some(key) = pool.get(query).copied() {
            if doc.contains(key) {
                return Ok(key);
            }
            log::debug!(target: "render.template", "template for {query} was removed, resolving again");
        }
        let key = resolver.resolve(doc, query, is_svg)?;
        log::trace!(target: "render.template", "resolved {query} (svg: {is_svg}) -> {}", key.0);
        pool.insert(Arc::from(query), key);
        Ok(key)
    }

    pub fn get(&self, query: &str, is_svg: bool) -> Option<NodeKey> {
        let pool = if is_svg { &self.svg } else { &self.html };
        pool.get(query).copied()
    }

    pub fn len(&self) -> usize {
        self.html.len() + self.svg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.html.clear();
        self.svg.clear();
        self.doc_id = None;
    }
}
