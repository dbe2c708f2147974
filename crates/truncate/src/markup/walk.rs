use quick_xml::escape::partial_escape;
use sm_domain::Mode;

use super::parse::{Fragment, Node};
use crate::plain::{boundary_before, byte_offset};

/// Traversal state, threaded by value through every step.
#[derive(Debug)]
struct Walk {
    /// Characters of text still allowed.
    remaining: usize,
    emitted: String,
    /// Set once the budget ran out; no further content is emitted, only
    /// the closing tags of the elements still open.
    halted: bool,
}

/// Emit `fragment` until `budget` characters of text have been written.
pub(crate) fn cut(fragment: &Fragment, budget: usize, mode: Mode) -> String {
    let walk = Walk {
        remaining: budget,
        emitted: String::new(),
        halted: false,
    };
    walk_nodes(fragment.nodes(), walk, mode).emitted
}

fn walk_nodes(nodes: &[Node], mut walk: Walk, mode: Mode) -> Walk {
    for node in nodes {
        if walk.halted {
            break;
        }
        walk = walk_node(node, walk, mode);
    }
    walk
}

fn walk_node(node: &Node, mut walk: Walk, mode: Mode) -> Walk {
    if walk.remaining == 0 {
        walk.halted = true;
        return walk;
    }
    match node {
        Node::Opaque(raw) => walk.emitted.push_str(raw),
        Node::Text { raw, text, chars } => {
            if *chars <= walk.remaining {
                walk.emitted.push_str(raw);
                walk.remaining -= chars;
            } else {
                let prefix = text_prefix(text, walk.remaining, mode);
                walk.emitted.push_str(&partial_escape(prefix));
                walk.remaining = 0;
                walk.halted = true;
            }
        }
        Node::Element {
            name,
            open,
            close,
            children,
        } => {
            walk.emitted.push_str(open);
            walk = walk_nodes(children, walk, mode);
            match close {
                Some(close) => walk.emitted.push_str(close),
                None if walk.halted => {
                    walk.emitted.push_str("</");
                    walk.emitted.push_str(name);
                    walk.emitted.push('>');
                }
                None => {}
            }
        }
    }
    walk
}

/// First `budget` characters of `text`. In word mode a cut that lands
/// inside a word backs up to the preceding whitespace when it is close
/// enough to the end.
fn text_prefix(text: &str, budget: usize, mode: Mode) -> &str {
    let end = byte_offset(text, budget);
    let prefix = &text[..end];
    if mode == Mode::Words && cuts_mid_word(text, end) {
        if let Some(boundary) = boundary_before(prefix, budget) {
            return &prefix[..boundary];
        }
    }
    prefix
}

fn cuts_mid_word(text: &str, end: usize) -> bool {
    let before = text[..end].chars().next_back();
    let after = text[end..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if !b.is_whitespace() && !a.is_whitespace())
}
