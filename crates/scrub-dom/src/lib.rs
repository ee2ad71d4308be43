//! Fragment tree for the scrub pipeline.
//!
//! This crate provides an arena-based tree for parsed HTML fragments together
//! with the mutation primitives the rewrite passes are built from: detach,
//! insert-before, unwrap, rename, attribute removal.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. A fragment has no single root element, so index 0 holds a synthetic
//! [`NodeType::Fragment`] node whose children are the fragment's top-level
//! nodes. Passes mutate the tree in place; detached nodes stay allocated in
//! the arena until the tree is dropped (a tree lives for one pipeline run).

/// An attribute on an element.
///
/// Attributes are stored as a list, not a map, so that serialization emits
/// them in source order. Duplicate names are rejected at tokenization time,
/// so lookups can stop at the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, lowercased by the tokenizer.
    pub name: String,
    /// The attribute value, character references already resolved.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A type-safe index into the fragment tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues. Ids remain valid across mutations: detaching a node never
/// invalidates ids, it only unlinks the node from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic fragment root is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the fragment tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "An object that participates in a tree has a parent, which is either
/// null or an object", and "an associated list of children".
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,
    /// The parent node, or `None` for the root and detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order. Order is significant and preserved by
    /// every mutation primitive.
    pub children: Vec<NodeId>,
}

/// The discriminant of a node.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The synthetic root holding a fragment's top-level nodes.
    ///
    /// A fragment has no enclosing document element, so the root is not an
    /// element and never matches a selector.
    Fragment,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// A CDATA section. Treated identically to text by the typography pass,
    /// but serialized back as `<![CDATA[…]]>`.
    Cdata(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    ///
    /// Comments pass through the pipeline untouched.
    Comment(String),
}

/// Element-specific data: a tag name and an ordered attribute list.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's local name, lowercased by the tokenizer.
    pub tag_name: String,
    /// Attributes in source order.
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// Create element data with the given tag name and attributes.
    #[must_use]
    pub const fn new(tag_name: String, attrs: Vec<Attribute>) -> Self {
        Self { tag_name, attrs }
    }

    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns true if the named attribute is present.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Remove the named attribute. Returns true if it was present;
    /// removal of an absent attribute is a no-op, not an error.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match self.attrs.iter().position(|a| a.name == name) {
            Some(pos) => {
                let _ = self.attrs.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Arena-based fragment tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]. Mutation
/// primitives maintain two invariants: the tree is acyclic, and every
/// attached node appears in exactly one children list (moving a node always
/// detaches it from its prior position first).
#[derive(Debug, Clone)]
pub struct FragmentTree {
    nodes: Vec<Node>,
}

impl FragmentTree {
    /// Create a new tree holding only the fragment root.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Fragment,
            parent: None,
            children: Vec::new(),
        };
        FragmentTree { nodes: vec![root] }
    }

    /// The fragment root's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes allocated in the arena, detached nodes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena is empty (never the case after `new`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its id. The node starts detached.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a new element node with the given tag name and no attributes.
    pub fn alloc_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(
            tag_name.to_string(),
            Vec::new(),
        )))
    }

    /// The parent of a node, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// The children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Text content if this node is a text or CDATA node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(data) | NodeType::Cdata(data) => Some(data.as_str()),
            _ => None,
        })
    }

    /// The tag name if this node is an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|data| data.tag_name.as_str())
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Append `child` as the last child of `parent`. If `child` is currently
    /// attached elsewhere it is detached first, so a node is never referenced
    /// from two children lists.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detach a node from its parent's children.
    ///
    /// No-op if the node is already detached or is the root. The node and its
    /// subtree stay allocated and can be re-inserted.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent_id) = self.parent(id) else {
            return;
        };
        if let Some(pos) = self.nodes[parent_id.0]
            .children
            .iter()
            .position(|&c| c == id)
        {
            let _ = self.nodes[parent_id.0].children.remove(pos);
        }
        self.nodes[id.0].parent = None;
    }

    /// [§ 4.2.1 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Insert `new` as the immediately preceding sibling of `reference`,
    /// within the same parent. `new` is detached from any prior position
    /// first. No-op if `reference` is detached or the two ids are equal.
    pub fn insert_before(&mut self, new: NodeId, reference: NodeId) {
        if new == reference {
            return;
        }
        // Detach first: removing `new` from the same parent could otherwise
        // shift `reference`'s position after we computed it.
        self.remove(new);
        let Some(parent_id) = self.parent(reference) else {
            return;
        };
        if let Some(pos) = self.nodes[parent_id.0]
            .children
            .iter()
            .position(|&c| c == reference)
        {
            self.nodes[parent_id.0].children.insert(pos, new);
            self.nodes[new.0].parent = Some(parent_id);
        }
    }

    /// Replace a node by its children, in place.
    ///
    /// The node's children are promoted to the position the node occupied in
    /// its parent's children list, in their original order; the node itself
    /// (with its tag and attributes) is detached and discarded. Relative
    /// order of the promoted children and of the existing siblings is
    /// preserved. No-op if the node is detached or the root.
    pub fn unwrap(&mut self, id: NodeId) {
        let Some(parent_id) = self.parent(id) else {
            return;
        };
        let Some(pos) = self.nodes[parent_id.0]
            .children
            .iter()
            .position(|&c| c == id)
        else {
            return;
        };
        let promoted = std::mem::take(&mut self.nodes[id.0].children);
        for &child in &promoted {
            self.nodes[child.0].parent = Some(parent_id);
        }
        let siblings = &mut self.nodes[parent_id.0].children;
        let _ = siblings.remove(pos);
        for (offset, &child) in promoted.iter().enumerate() {
            siblings.insert(pos + offset, child);
        }
        self.nodes[id.0].parent = None;
    }

    /// Change an element's tag name, leaving attributes and children
    /// untouched. No-op on non-element nodes.
    pub fn rename(&mut self, id: NodeId, new_tag: &str) {
        if let Some(data) = self.as_element_mut(id) {
            data.tag_name = new_tag.to_string();
        }
    }

    /// Delete the named attribute from an element. Returns true if the
    /// attribute was present; absence is a no-op, not an error.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.as_element_mut(id)
            .is_some_and(|data| data.remove_attr(name))
    }

    /// Concatenated content of all text and CDATA nodes in the subtree,
    /// in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(data) | NodeType::Cdata(data)) => out.push_str(data),
            Some(NodeType::Element(_) | NodeType::Fragment) => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            Some(NodeType::Comment(_)) | None => {}
        }
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over all descendants of a node in document order, the node
    /// itself excluded.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }
}

impl Default for FragmentTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a FragmentTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Preorder iterator over the descendants of a node.
pub struct Descendants<'a> {
    tree: &'a FragmentTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
