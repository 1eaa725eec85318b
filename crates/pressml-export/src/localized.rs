//! Builders for localized and optional metadata nodes.

use pressml_xmltree::{Document, NodeId};

use crate::model::LocalizedText;

/// Build one element per (locale, value) pair of a localized field.
///
/// Each element is named `tag`, carries a `locale` attribute and the value
/// as text. Emission follows the field's locale-sorted iteration order.
/// An empty field yields no elements. The returned nodes are detached;
/// the caller appends them.
pub fn build_localized_nodes(doc: &mut Document, tag: &str, field: &LocalizedText) -> Vec<NodeId> {
    let mut nodes = Vec::with_capacity(field.len());

    for (locale, value) in field.iter() {
        let node = doc.create_element(tag);
        doc.set_attribute(node, "locale", locale);
        doc.set_text(node, value);
        nodes.push(node);
    }

    nodes
}

/// Build a single element for an optional non-localized value.
///
/// Yields no element when the value is absent or empty.
pub fn build_optional_node(doc: &mut Document, tag: &str, value: Option<&str>) -> Option<NodeId> {
    match value {
        Some(value) if !value.is_empty() => {
            let node = doc.create_element(tag);
            doc.set_text(node, value);
            Some(node)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_node_per_locale() {
        let mut field = LocalizedText::new();
        field.set("en_US", "Title");
        field.set("fr_CA", "Titre");

        let mut doc = Document::new();
        let nodes = build_localized_nodes(&mut doc, "title", &field);

        assert_eq!(nodes.len(), 2);
        assert_eq!(doc.tag(nodes[0]), "title");
        assert_eq!(doc.attribute(nodes[0], "locale"), Some("en_US"));
        assert_eq!(doc.text(nodes[0]), "Title");
        assert_eq!(doc.attribute(nodes[1], "locale"), Some("fr_CA"));
        assert_eq!(doc.text(nodes[1]), "Titre");
    }

    #[test]
    fn test_empty_field_yields_no_nodes() {
        let mut doc = Document::new();
        let nodes = build_localized_nodes(&mut doc, "title", &LocalizedText::new());
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_optional_node() {
        let mut doc = Document::new();

        let node = build_optional_node(&mut doc, "comments_to_editor", Some("Please rush"));
        let node = node.expect("non-empty value yields a node");
        assert_eq!(doc.tag(node), "comments_to_editor");
        assert_eq!(doc.text(node), "Please rush");
        assert_eq!(doc.attribute(node, "locale"), None);

        assert!(build_optional_node(&mut doc, "comments_to_editor", None).is_none());
        assert!(build_optional_node(&mut doc, "comments_to_editor", Some("")).is_none());
    }
}
