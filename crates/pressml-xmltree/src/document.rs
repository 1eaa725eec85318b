//! Flat-array XML document tree.

/// Handle to a node within a [`Document`].
///
/// A `NodeId` is only meaningful for the document that created it; using it
/// with another document is a logic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single element node.
///
/// Nodes are stored in a flat arena and reference their children by index.
#[derive(Debug, Clone)]
struct Node {
    /// Tag name of the element.
    tag: String,
    /// Text content (empty for container elements).
    text: String,
    /// Attributes as key-value pairs, in insertion order.
    attributes: Vec<(String, String)>,
    /// Child nodes, in append order.
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// An owned XML document.
///
/// The document owns all of its elements. Elements are created detached and
/// become part of the tree once appended to a parent; the tree is rooted by
/// [`Document::set_root`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    namespace: Option<String>,
}

impl Document {
    /// Create an empty document with no default namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document whose root element will declare `namespace`
    /// as the default `xmlns` when serialized.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    /// The default namespace URI, if one was declared.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Create a new detached element and return its handle.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    /// Set the text content of an element.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].text = text.into();
    }

    /// Get the text content of an element.
    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    /// Get the tag name of an element.
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    /// Set an attribute, replacing any existing value for the same name.
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let node = &mut self.nodes[id.0];
        if let Some(attr) = node.attributes.iter_mut().find(|(n, _)| *n == name) {
            attr.1 = value;
        } else {
            node.attributes.push((name, value));
        }
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The attributes of an element, in insertion order.
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes[id.0]
            .attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Iterate over the children of an element, in append order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    /// Find the immediate children of `id` with the given tag name.
    pub fn children_by_tag<'a>(
        &'a self,
        id: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id).filter(move |&child| self.tag(child) == tag)
    }

    /// Set the document root. The document serializes exactly one root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// The document root, if one has been set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Deep-copy a subtree from another document into this one.
    ///
    /// All descendant elements, attributes and text are copied; the returned
    /// handle is detached and must be appended to a parent (or made root) by
    /// the caller. The source document is left untouched.
    pub fn import(&mut self, src: &Document, id: NodeId) -> NodeId {
        let src_node = &src.nodes[id.0];
        let imported = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: src_node.tag.clone(),
            text: src_node.text.clone(),
            attributes: src_node.attributes.clone(),
            children: Vec::with_capacity(src_node.children.len()),
        });

        for &child in &src.nodes[id.0].children {
            let imported_child = self.import(src, child);
            self.nodes[imported.0].children.push(imported_child);
        }

        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree() {
        let mut doc = Document::new();
        let root = doc.create_element("submission");
        doc.set_attribute(root, "locale", "en_US");

        let title = doc.create_element("title");
        doc.set_text(title, "A Title");
        doc.append_child(root, title);
        doc.set_root(root);

        assert_eq!(doc.root(), Some(root));
        assert_eq!(doc.tag(root), "submission");
        assert_eq!(doc.attribute(root, "locale"), Some("en_US"));
        assert_eq!(doc.attribute(root, "missing"), None);

        let children: Vec<_> = doc.children(root).collect();
        assert_eq!(children, vec![title]);
        assert_eq!(doc.text(title), "A Title");
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut doc = Document::new();
        let node = doc.create_element("id");
        doc.set_attribute(node, "type", "internal");
        doc.set_attribute(node, "type", "public");

        assert_eq!(doc.attribute(node, "type"), Some("public"));
        assert_eq!(doc.attributes(node).count(), 1);
    }

    #[test]
    fn test_children_by_tag() {
        let mut doc = Document::new();
        let root = doc.create_element("submission_file");
        for tag in ["name", "revision", "name", "revision"] {
            let child = doc.create_element(tag);
            doc.append_child(root, child);
        }

        let revisions: Vec<_> = doc.children_by_tag(root, "revision").collect();
        assert_eq!(revisions.len(), 2);
        assert!(revisions.iter().all(|&id| doc.tag(id) == "revision"));
    }

    #[test]
    fn test_import_deep_copies() {
        let mut fragment = Document::new();
        let file = fragment.create_element("submission_file");
        fragment.set_attribute(file, "id", "12");
        let revision = fragment.create_element("revision");
        fragment.set_attribute(revision, "number", "1");
        let name = fragment.create_element("name");
        fragment.set_text(name, "paper.pdf");
        fragment.append_child(revision, name);
        fragment.append_child(file, revision);
        fragment.set_root(file);

        let mut doc = Document::new();
        let imported = doc.import(&fragment, file);

        assert_eq!(doc.tag(imported), "submission_file");
        assert_eq!(doc.attribute(imported, "id"), Some("12"));

        let children: Vec<_> = doc.children(imported).collect();
        assert_eq!(children.len(), 1);
        let imported_revision = children[0];
        assert_eq!(doc.tag(imported_revision), "revision");
        assert_eq!(doc.attribute(imported_revision, "number"), Some("1"));

        let grandchildren: Vec<_> = doc.children(imported_revision).collect();
        assert_eq!(grandchildren.len(), 1);
        assert_eq!(doc.text(grandchildren[0]), "paper.pdf");

        // The source fragment is untouched.
        assert_eq!(fragment.children(file).count(), 1);
    }
}
