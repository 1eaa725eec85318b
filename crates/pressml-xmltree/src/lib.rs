//! Owned XML document tree for native XML export.
//!
//! Export filters produce standalone XML fragments that the composition
//! engine merges into one output document. This crate provides the tree
//! those fragments and the output document are built from: elements live
//! in a flat arena and reference each other by [`NodeId`], so a subtree
//! can keep receiving children after it has been attached to a parent.
//!
//! # Example
//!
//! ```
//! use pressml_xmltree::Document;
//!
//! let mut doc = Document::with_namespace("http://pkp.sfu.ca");
//! let root = doc.create_element("submission");
//! doc.set_attribute(root, "locale", "en_US");
//!
//! let title = doc.create_element("title");
//! doc.set_text(title, "On the Origin of Filters");
//! doc.append_child(root, title);
//! doc.set_root(root);
//!
//! let xml = doc.to_xml_string()?;
//! assert!(xml.contains("<submission"));
//! # Ok::<(), pressml_xmltree::Error>(())
//! ```

mod document;
mod error;
mod writer;

pub use document::{Document, NodeId};
pub use error::{Error, Result};
