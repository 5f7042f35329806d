use crate::{Namespace, TreeNode};
use std::fmt;

/// Deterministic subtree serialization for test comparisons.
/// Not a public stable format.
///
/// Equivalence rules:
/// - Node kinds, element names and namespaces must match.
/// - Attribute list order is significant; names and values must match.
/// - Text and comment data must match exactly.
/// - Keys are ignored unless `include_keys` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomSnapshotOptions {
    pub include_keys: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &TreeNode, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    /// Snapshot of several sibling roots, as produced by a fragment.
    pub fn of_all<'a>(
        roots: impl IntoIterator<Item = &'a TreeNode>,
        options: DomSnapshotOptions,
    ) -> Self {
        let mut lines = Vec::new();
        for root in roots {
            walk_snapshot(root, &options, 0, &mut lines);
        }
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

pub fn assert_snapshot_eq(expected: &[&str], actual: &DomSnapshot) {
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    if expected != actual.as_lines() {
        panic!(
            "DOM snapshot mismatch\nexpected:\n{}\nactual:\n{}",
            expected.join("\n"),
            actual
        );
    }
}

fn walk_snapshot(
    node: &TreeNode,
    options: &DomSnapshotOptions,
    depth: usize,
    out: &mut Vec<String>,
) {
    let mut line = "| ".repeat(depth);
    if options.include_keys {
        line.push_str(&format!("[{}] ", node.key().0));
    }
    match node {
        TreeNode::Document { .. } => line.push_str("#document"),
        TreeNode::Element {
            name,
            namespace,
            attributes,
            style,
            ..
        } => {
            line.push('<');
            if *namespace == Namespace::Svg {
                line.push_str("svg ");
            }
            line.push_str(name);
            for (k, v) in attributes {
                line.push(' ');
                line.push_str(k);
                if let Some(v) = v {
                    line.push_str("=\"");
                    line.push_str(v);
                    line.push('"');
                }
            }
            if !style.is_empty() {
                line.push_str(" style=\"");
                for (i, (k, v)) in style.iter().enumerate() {
                    if i != 0 {
                        line.push(' ');
                    }
                    line.push_str(k);
                    line.push_str(": ");
                    line.push_str(v);
                    line.push(';');
                }
                line.push('"');
            }
            line.push('>');
        }
        TreeNode::Text { text, .. } => {
            line.push('"');
            line.push_str(text);
            line.push('"');
        }
        TreeNode::Comment { text, .. } => {
            line.push_str("<!-- ");
            line.push_str(text);
            line.push_str(" -->");
        }
    }
    out.push(line);
    for child in node.children() {
        walk_snapshot(child, options, depth + 1, out);
    }
}
