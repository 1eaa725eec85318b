//! Composition engine for native XML submission export.
//!
//! Exports a set of submission records (publication metadata, authors,
//! files and representations) into a single native XML document. Each
//! sub-entity is serialized by a pluggable per-type filter into a
//! standalone fragment; the composer imports the fragments into the
//! shared output document and merges file-revision fragments that share
//! a logical file id into one element.
//!
//! # Example
//!
//! ```no_run
//! use pressml_export::{Deployment, FilterSet, NativeXmlExporter, Submission};
//! # fn filters() -> FilterSet { unimplemented!() }
//!
//! let exporter = NativeXmlExporter::new(Deployment::default(), filters());
//!
//! let mut submission = Submission::new(42, "en_US");
//! submission.title.set("en_US", "On the Origin of Filters");
//!
//! let doc = exporter.export(&[submission])?;
//! println!("{}", doc.to_xml_string()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod deployment;
mod error;
mod exporter;
mod filter;
mod localized;
mod model;

pub use deployment::Deployment;
pub use error::{Error, Result, Stage};
pub use exporter::{NativeXmlExporter, XSI_NAMESPACE};
pub use filter::{
    AuthorListFilter, ExportContext, FileFilter, FilterSet, FilterSetBuilder, PubIdPlugin,
    RepresentationFilter,
};
pub use localized::{build_localized_nodes, build_optional_node};
pub use model::{
    Author, FileKind, LocalizedText, Representation, Submission, SubmissionFile,
};

// Re-export the tree types filters work with.
pub use pressml_xmltree::{Document, NodeId};
