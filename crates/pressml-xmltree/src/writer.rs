//! XML serialization for document trees.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Document, Error, NodeId, Result};

impl Document {
    /// Serialize the document to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output)?;
        String::from_utf8(output).map_err(Error::Utf8)
    }

    /// Write the document as XML to a writer.
    ///
    /// Emits an XML 1.0 declaration with UTF-8 encoding, then the root
    /// element (if set) and its subtree, indented with two spaces. The
    /// default namespace, if declared, is written as `xmlns` on the root.
    pub fn write_xml<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

        xml_writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| Error::Xml(e.to_string()))?;

        if let Some(root) = self.root() {
            self.write_element(&mut xml_writer, root, true)?;
        }

        Ok(())
    }

    /// Write a single element and its children.
    fn write_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        id: NodeId,
        is_root: bool,
    ) -> Result<()> {
        let tag = self.tag(id);
        let mut elem = BytesStart::new(tag);

        if is_root {
            if let Some(namespace) = self.namespace() {
                elem.push_attribute(("xmlns", namespace));
            }
        }

        for (name, value) in self.attributes(id) {
            elem.push_attribute((name, value));
        }

        let text = self.text(id);
        let has_children = self.children(id).next().is_some();

        if !has_children && text.is_empty() {
            // Self-closing element
            writer
                .write_event(Event::Empty(elem))
                .map_err(|e| Error::Xml(e.to_string()))?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(elem))
            .map_err(|e| Error::Xml(e.to_string()))?;

        if !text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        for child in self.children(id) {
            self.write_element(writer, child, false)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(|e| Error::Xml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_and_root() {
        let mut doc = Document::new();
        let root = doc.create_element("submissions");
        doc.set_root(root);

        let xml = doc.to_xml_string().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<submissions/>"));
    }

    #[test]
    fn test_namespace_on_root_only() {
        let mut doc = Document::with_namespace("http://pkp.sfu.ca");
        let root = doc.create_element("submission");
        let title = doc.create_element("title");
        doc.set_text(title, "A Title");
        doc.append_child(root, title);
        doc.set_root(root);

        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("<submission xmlns=\"http://pkp.sfu.ca\">"));
        assert!(xml.contains("<title>A Title</title>"));
    }

    #[test]
    fn test_attributes_and_text() {
        let mut doc = Document::new();
        let root = doc.create_element("id");
        doc.set_attribute(root, "type", "internal");
        doc.set_text(root, "42");
        doc.set_root(root);

        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("<id type=\"internal\">42</id>"));
    }

    #[test]
    fn test_escaping() {
        let mut doc = Document::new();
        let root = doc.create_element("title");
        doc.set_attribute(root, "note", "a \"b\" & c");
        doc.set_text(root, "Q <A> & B");
        doc.set_root(root);

        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("&quot;b&quot; &amp; c"));
        assert!(xml.contains("Q &lt;A&gt; &amp; B"));
    }

    #[test]
    fn test_empty_document_is_declaration_only() {
        let doc = Document::new();
        let xml = doc.to_xml_string().unwrap();
        assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>");
    }
}
