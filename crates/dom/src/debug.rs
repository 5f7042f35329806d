use crate::{Namespace, TreeNode};
use std::fmt::Write;

pub fn first_styles(style: &[(String, String)]) -> String {
    let mut out = String::new();
    for (i, (k, v)) in style.iter().take(3).enumerate() {
        if i != 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, r#"{k}: {v};"#);
    }
    out
}

/// Human-readable outline of a subtree, one line per node, at most `cap` lines.
pub fn outline(root: &TreeNode, cap: usize) -> Vec<String> {
    struct IndentGuard<'a> {
        indent: &'a mut String,
        step: usize,
    }

    impl Drop for IndentGuard<'_> {
        fn drop(&mut self) {
            let new_len = self.indent.len() - self.step;
            self.indent.truncate(new_len);
        }
    }

    fn push_preview_replace_newlines(out: &mut String, s: &str, max_chars: usize) {
        let mut truncated = false;
        for (i, ch) in s.chars().enumerate() {
            if i == max_chars {
                truncated = true;
                break;
            }
            out.push(if ch == '\n' { ' ' } else { ch });
        }
        if truncated {
            out.push('…');
        }
    }

    const INDENT_STEP: &str = "  ";
    const PREVIEW_CHARS: usize = 40;

    fn walk(node: &TreeNode, indent: &mut String, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = String::with_capacity(indent.len() + 64);
        line.push_str(indent);
        match node {
            TreeNode::Document { .. } => line.push_str("#document"),
            TreeNode::Element {
                name,
                namespace,
                style,
                ..
            } => {
                line.push('<');
                if *namespace == Namespace::Svg {
                    line.push_str("svg:");
                }
                line.push_str(name);
                for attr in ["id", "class"] {
                    if let Some(value) = node.attr(attr).filter(|v| !v.is_empty()) {
                        let _ = write!(&mut line, r#" {attr}="{value}""#);
                    }
                }
                line.push('>');
                let styl = first_styles(style);
                if !styl.is_empty() {
                    line.push_str("  /* ");
                    line.push_str(&styl);
                    line.push_str(" */");
                }
            }
            TreeNode::Text { text, .. } => {
                line.push('"');
                push_preview_replace_newlines(&mut line, text, PREVIEW_CHARS);
                line.push('"');
            }
            TreeNode::Comment { text, .. } => {
                line.push_str("<!-- ");
                push_preview_replace_newlines(&mut line, text, PREVIEW_CHARS);
                line.push_str(" -->");
            }
        }
        out.push(line);

        let children = node.children();
        if children.is_empty() {
            return;
        }
        indent.push_str(INDENT_STEP);
        let mut guard = IndentGuard {
            indent,
            step: INDENT_STEP.len(),
        };
        for c in children {
            walk(c, &mut *guard.indent, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    let mut indent = String::new();
    walk(root, &mut indent, &mut out, &mut left);
    out
}
