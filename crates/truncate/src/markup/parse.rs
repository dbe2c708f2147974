//! Markup fragment parsing into a lossless node tree.
//!
//! Tags are kept as the exact bytes the reader saw between `<` and `>`,
//! so re-emitting a node reproduces its attributes untouched. HTML habits
//! that are not well-formed XML (void elements without a slash, stray or
//! missing end tags, bare `&`) are tolerated rather than rejected.

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use sm_domain::error::{Error, Result};

/// Elements that never have content or an end tag in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data. `raw` is the source text, `text` its decoded form
    /// and `chars` the length of `text` in characters.
    Text {
        raw: String,
        text: String,
        chars: usize,
    },
    Element {
        /// Lowercased tag name.
        name: String,
        /// Opening tag, verbatim.
        open: String,
        /// Closing tag, verbatim; `None` when the source never closed it.
        close: Option<String>,
        children: Vec<Node>,
    },
    /// Markup without text of its own: comments, void elements,
    /// self-closing tags and unmatched end tags.
    Opaque(String),
}

impl Node {
    fn write_markup(&self, out: &mut String) {
        match self {
            Node::Text { raw, .. } => out.push_str(raw),
            Node::Element {
                open,
                close,
                children,
                ..
            } => {
                out.push_str(open);
                for child in children {
                    child.write_markup(out);
                }
                if let Some(close) = close {
                    out.push_str(close);
                }
            }
            Node::Opaque(raw) => out.push_str(raw),
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } => {
                for child in children {
                    child.write_text(out);
                }
            }
            Node::Opaque(_) => {}
        }
    }

    fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }
}

/// A parsed markup fragment: a sequence of sibling nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    pub fn parse(source: &str) -> Result<Self> {
        let source = escape_stray_lt(source);
        let mut reader = Reader::from_str(&source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;

        let mut tree = TreeBuilder::default();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = tag_name(e.name().as_ref());
                    let open = format!("<{}>", lossy(&e));
                    if VOID_ELEMENTS.contains(&name.as_str()) {
                        tree.push(Node::Opaque(open));
                    } else {
                        tree.start(name, open);
                    }
                }
                Ok(Event::Empty(e)) => tree.push(Node::Opaque(format!("<{}/>", lossy(&e)))),
                Ok(Event::End(e)) => {
                    let name = tag_name(e.name().as_ref());
                    tree.end(&name, format!("</{}>", lossy(&e)));
                }
                Ok(Event::Text(e)) => {
                    let raw = e
                        .decode()
                        .map_err(|err| Error::Markup(format!("text decode: {err}")))?;
                    tree.text(&raw, &raw);
                }
                Ok(Event::GeneralRef(e)) => {
                    let name = e
                        .decode()
                        .map_err(|err| Error::Markup(format!("entity decode: {err}")))?;
                    let raw = format!("&{name};");
                    let text = resolve_reference(&raw);
                    tree.text(&raw, &text);
                }
                Ok(Event::CData(e)) => {
                    let text = lossy(&e);
                    tree.text(&format!("<![CDATA[{text}]]>"), &text);
                }
                Ok(Event::Comment(e)) => {
                    tree.push(Node::Opaque(format!("<!--{}-->", lossy(&e))));
                }
                Ok(Event::Eof) => break,
                // Declarations and processing instructions have no place
                // in a displayed fragment.
                Ok(_) => {}
                Err(err) => {
                    return Err(Error::Markup(format!(
                        "at byte {}: {err}",
                        reader.buffer_position()
                    )));
                }
            }
        }

        Ok(Self {
            nodes: tree.finish(),
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` if anything besides text is present.
    pub fn has_markup(&self) -> bool {
        self.nodes.iter().any(|n| !n.is_text())
    }

    /// Plain-text projection: decoded text of every node, tags ignored.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_text(&mut out);
        }
        out
    }

    /// Serialize back to markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_markup(&mut out);
        }
        out
    }
}

// ── tree building ───────────────────────────────────────────────────

struct OpenElement {
    name: String,
    open: String,
    children: Vec<Node>,
}

impl OpenElement {
    fn into_node(self, close: Option<String>) -> Node {
        Node::Element {
            name: self.name,
            open: self.open,
            close,
            children: self.children,
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<OpenElement>,
}

impl TreeBuilder {
    fn siblings(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.root,
        }
    }

    fn push(&mut self, node: Node) {
        self.siblings().push(node);
    }

    /// Append text, merging with a preceding text node so that text split
    /// around entity references stays one node.
    fn text(&mut self, raw: &str, text: &str) {
        let siblings = self.siblings();
        if let Some(Node::Text {
            raw: prev_raw,
            text: prev_text,
            chars,
        }) = siblings.last_mut()
        {
            prev_raw.push_str(raw);
            prev_text.push_str(text);
            *chars += text.chars().count();
            return;
        }
        siblings.push(Node::Text {
            raw: raw.to_string(),
            text: text.to_string(),
            chars: text.chars().count(),
        });
    }

    fn start(&mut self, name: String, open: String) {
        self.open.push(OpenElement {
            name,
            open,
            children: Vec::new(),
        });
    }

    fn end(&mut self, name: &str, close: String) {
        let Some(depth) = self.open.iter().rposition(|el| el.name == name) else {
            // Nothing to close: keep the stray tag as-is.
            self.push(Node::Opaque(close));
            return;
        };
        // Elements opened inside the matched one end here implicitly.
        while self.open.len() > depth + 1 {
            if let Some(inner) = self.open.pop() {
                self.push(inner.into_node(None));
            }
        }
        if let Some(element) = self.open.pop() {
            self.push(element.into_node(Some(close)));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(element) = self.open.pop() {
            self.push(element.into_node(None));
        }
        self.root
    }
}

// ── stray `<` ───────────────────────────────────────────────────────

/// Whether a `<` followed by `after` can open a tag, comment or
/// declaration. Anything else (`a < b`, `x <= 5`) is character data.
fn opens_tag(after: &str) -> bool {
    after
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

/// Whether `value` contains anything that looks like a tag.
pub(crate) fn has_tag_opener(value: &str) -> bool {
    value.match_indices('<').any(|(at, _)| opens_tag(&value[at + 1..]))
}

/// Rewrite every `<` that opens nothing as `&lt;` so the reader sees it
/// as text. Tags (quoted attribute values included), comments and CDATA
/// sections are copied untouched.
fn escape_stray_lt(source: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut copied = 0;
    let mut pos = 0;
    while let Some(found) = source[pos..].find('<') {
        let at = pos + found;
        match markup_len(&source[at..]) {
            Some(len) => pos = at + len,
            None => {
                out.push_str(&source[copied..at]);
                out.push_str("&lt;");
                copied = at + 1;
                pos = at + 1;
            }
        }
    }
    if copied == 0 {
        return Cow::Borrowed(source);
    }
    out.push_str(&source[copied..]);
    Cow::Owned(out)
}

/// Byte length of the tag, comment or CDATA section at the start of
/// `tail`, or `None` when its leading `<` opens nothing. Unterminated
/// constructs run to the end and are left for the reader to reject.
fn markup_len(tail: &str) -> Option<usize> {
    let after = &tail[1..];
    if let Some(body) = after.strip_prefix("!--") {
        return Some(body.find("-->").map_or(tail.len(), |end| 4 + end + 3));
    }
    if let Some(body) = after.strip_prefix("![CDATA[") {
        return Some(body.find("]]>").map_or(tail.len(), |end| 9 + end + 3));
    }
    if !opens_tag(after) {
        return None;
    }
    let mut quote = None;
    for (i, c) in after.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i + 2),
            None => {}
        }
    }
    Some(tail.len())
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn lossy(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Decode a character or entity reference; unknown names stay literal.
fn resolve_reference(raw: &str) -> String {
    unescape_with(raw, resolve_html5_entity)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}
