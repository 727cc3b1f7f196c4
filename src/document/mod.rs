//! Restricted document tree.
//!
//! Entry markup is parsed into an owned arena of typed nodes. Every node lives
//! in `Document::nodes` and is addressed by a [`NodeId`]; structure is kept as
//! ordered child lists, so re-parenting is a splice on two `Vec<NodeId>`s and a
//! detached node simply stops being reachable from the root.

pub mod builder;
pub mod format;
pub mod sanitize;
pub mod tags;

pub use builder::build_document;
pub use format::{format_document, serialize};
pub use sanitize::sanitize;

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The implicit document root (always 0).
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a document node.
///
/// The set is closed: the builder maps every recognized tag onto one of these
/// and keeps anything else as [`NodeKind::Other`] for the sanitizer to remove.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Implicit document root.
    Root,
    /// Text run.
    Text,
    /// `<p>`
    Paragraph,
    /// `<li>`
    ListItem,
    /// `<ul>`
    UnorderedList,
    /// `<br>`
    LineBreak,
    /// `<strong>` / `<b>`
    Strong,
    /// `<em>` / `<i>`
    Emphasis,
    /// `<table>`
    Table,
    /// `<tr>`
    Row,
    /// `<th>`
    HeaderCell,
    /// `<td>`
    Cell,
    /// `<hr>`
    HorizontalRule,
    /// Any tag outside the model, by name.
    Other(String),
}

impl NodeKind {
    /// Map a lowercase tag name onto a kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "p" => Self::Paragraph,
            "li" => Self::ListItem,
            "ul" => Self::UnorderedList,
            "br" => Self::LineBreak,
            "strong" | "b" => Self::Strong,
            "em" | "i" => Self::Emphasis,
            "table" => Self::Table,
            "tr" => Self::Row,
            "th" => Self::HeaderCell,
            "td" => Self::Cell,
            "hr" => Self::HorizontalRule,
            other => Self::Other(other.to_string()),
        }
    }

    /// Tag name used when serializing; `None` for root and text.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Root | Self::Text => None,
            Self::Paragraph => Some("p"),
            Self::ListItem => Some("li"),
            Self::UnorderedList => Some("ul"),
            Self::LineBreak => Some("br"),
            Self::Strong => Some("strong"),
            Self::Emphasis => Some("em"),
            Self::Table => Some("table"),
            Self::Row => Some("tr"),
            Self::HeaderCell => Some("th"),
            Self::Cell => Some("td"),
            Self::HorizontalRule => Some("hr"),
            Self::Other(tag) => Some(tag),
        }
    }

    /// Kinds that never have children.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::LineBreak | Self::HorizontalRule)
    }

    /// Paragraph-like kinds: split by line breaks, trimmed by the formatter.
    #[must_use]
    pub fn is_paragraph_like(&self) -> bool {
        matches!(self, Self::Paragraph | Self::ListItem)
    }
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node kind.
    pub kind: NodeKind,
    /// Parent node (`None` for the root and for detached nodes).
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
    /// Text content (only for text nodes).
    pub text: String,
    /// Space-separated classification tokens.
    pub class: Option<String>,
    /// Source attributes other than `class`; cleared by the sanitizer.
    pub attrs: Vec<(String, String)>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            class: None,
            attrs: Vec::new(),
        }
    }
}

/// Arena-backed document tree rooted at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root)],
        }
    }

    /// Borrow a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Text of a text node (empty for elements).
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        &self.node(id).text
    }

    /// Replace the text of a text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.node_mut(id).text = text.into();
    }

    /// Whether the node is a text run.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        *self.kind(id) == NodeKind::Text
    }

    // === Construction ===

    /// Allocate a detached element node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        let id = self.create(NodeKind::Text);
        self.node_mut(id).text = text.into();
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Insert `child` at `index` in `parent`'s child list, detaching it first.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `new` immediately after `sibling`.
    ///
    /// Does nothing when `sibling` is detached.
    pub fn insert_after(&mut self, sibling: NodeId, new: NodeId) {
        if let (Some(parent), Some(index)) = (self.parent(sibling), self.index_in_parent(sibling)) {
            self.insert(parent, index + 1, new);
        }
    }

    /// Remove a node from its parent. The node keeps its own subtree.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Replace a node by its children, in place.
    pub fn unwrap(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(index) = self.index_in_parent(id) else {
            return;
        };
        let children = std::mem::take(&mut self.node_mut(id).children);
        for &child in &children {
            self.node_mut(child).parent = Some(parent);
        }
        let siblings = &mut self.node_mut(parent).children;
        siblings.splice(index..=index, children);
        self.node_mut(id).parent = None;
    }

    /// Move every child of `from` after position `start` to the end of `to`.
    pub fn move_children_from(&mut self, from: NodeId, start: usize, to: NodeId) {
        let moved: Vec<NodeId> = {
            let children = &mut self.node_mut(from).children;
            let start = start.min(children.len());
            children.drain(start..).collect()
        };
        for child in moved {
            self.node_mut(child).parent = Some(to);
            self.node_mut(to).children.push(child);
        }
    }

    // === Navigation ===

    /// Position of a node in its parent's child list.
    #[must_use]
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Next sibling.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Previous sibling.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index.checked_sub(1).map(|i| self.children(parent)[i])
    }

    /// First child.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// All attached descendants of `id` in document order (excluding `id`).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Concatenated text of a subtree.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if self.is_text(id) {
            return self.text(id).to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter(|&d| self.is_text(d))
            .map(|d| self.text(d))
            .collect()
    }

    // === Classes ===

    /// Class string of a node.
    #[must_use]
    pub fn class(&self, id: NodeId) -> Option<&str> {
        self.node(id).class.as_deref()
    }

    /// Overwrite the class string.
    pub fn set_class(&mut self, id: NodeId, class: impl Into<String>) {
        self.node_mut(id).class = Some(class.into());
    }

    /// Whether the class string contains `token`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, token: &str) -> bool {
        self.class(id)
            .is_some_and(|c| c.split_whitespace().any(|t| t == token))
    }

    /// Add a class token if not already present.
    pub fn add_class(&mut self, id: NodeId, token: &str) {
        if self.has_class(id, token) {
            return;
        }
        let node = self.node_mut(id);
        node.class = Some(match node.class.take() {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {token}"),
            _ => token.to_string(),
        });
    }

    /// First root-level block carrying the class token.
    #[must_use]
    pub fn find_block_by_class(&self, token: &str) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&c| self.has_class(c, token))
    }
}
