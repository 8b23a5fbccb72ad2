//! Arena-backed node tree for parsed filings

use indexmap::IndexMap;

/// Index of a node within its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element or character data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Element with a lowercased, possibly namespace-qualified name
    /// (`td`, `ix:nonfraction`) and lowercased attribute keys.
    Element {
        name: String,
        attributes: IndexMap<String, String>,
    },
    /// Decoded character data
    Text(String),
}

/// A node in the document tree
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// 1-based source line of the node's first character
    pub line: usize,
    /// 0-based column of the node's first character within its line
    pub offset: usize,
}

/// A parsed document: the root is a synthetic `#document` element.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

pub(crate) const ROOT_NAME: &str = "#document";

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element {
                    name: ROOT_NAME.to_string(),
                    attributes: IndexMap::new(),
                },
                parent: None,
                children: Vec::new(),
                line: 1,
                offset: 0,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Append a child element and return its id
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        attributes: IndexMap<String, String>,
        line: usize,
        offset: usize,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                name: name.into(),
                attributes,
            },
            line,
            offset,
        )
    }

    /// Append character data; adjacent text nodes are merged.
    pub fn append_text(&mut self, parent: NodeId, text: &str, line: usize, offset: usize) {
        if let Some(&last) = self.nodes[parent.0].children.last() {
            if let NodeKind::Text(existing) = &mut self.nodes[last.0].kind {
                existing.push_str(text);
                return;
            }
        }
        self.push(parent, NodeKind::Text(text.to_string()), line, offset);
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind, line: usize, offset: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            line,
            offset,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Element name, or `None` for text nodes
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    pub fn has_attr(&self, id: NodeId, key: &str) -> bool {
        self.attr(id, key).is_some()
    }

    /// Attribute value by lowercased key
    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Source position as `(line, offset)`
    pub fn position(&self, id: NodeId) -> (usize, usize) {
        let node = self.node(id);
        (node.line, node.offset)
    }

    /// Descendant elements of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.name(next).is_none() {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// All descendant elements named `name`, in document order.
    pub fn find_all(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.is_element(n, name))
            .collect()
    }

    /// First descendant element named `name`.
    pub fn find_first(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|&n| self.is_element(n, name))
    }

    /// The `body` element, or the root when the document has none.
    pub fn body(&self) -> NodeId {
        self.find_first(self.root(), "body").unwrap_or_else(|| self.root())
    }

    /// Nearest ancestor element named `name`.
    pub fn enclosing(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.is_element(ancestor, name) {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// The table row containing `id`, if any.
    pub fn enclosing_row(&self, id: NodeId) -> Option<NodeId> {
        self.enclosing(id, "tr")
    }

    /// Sole string content of a node.
    ///
    /// A text node yields its text. An element yields the string of its
    /// only child; elements with zero or several children (whitespace
    /// included) have no single string.
    pub fn string(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element { .. } => match self.children(id) {
                [only] => self.string(*only),
                _ => None,
            },
        }
    }

    /// Concatenated character data of the node and all its descendants.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.node(id).kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }
}
