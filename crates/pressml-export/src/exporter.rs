//! Native XML export composition.
//!
//! This module walks a submission's object graph, delegates serialization
//! of each sub-entity to its filter, and reassembles the resulting
//! fragments into one schema-valid output document.

use std::collections::hash_map::Entry;

use pressml_xmltree::{Document, NodeId};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::deployment::Deployment;
use crate::error::{Error, Result, Stage};
use crate::filter::{ExportContext, FilterSet};
use crate::localized::{build_localized_nodes, build_optional_node};
use crate::model::Submission;

/// The XML Schema instance namespace, declared on every export root.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Composes submissions into a native XML export document.
pub struct NativeXmlExporter {
    deployment: Deployment,
    filters: FilterSet,
}

impl NativeXmlExporter {
    /// Create a new exporter from a deployment and a validated filter set.
    pub fn new(deployment: Deployment, filters: FilterSet) -> Self {
        Self {
            deployment,
            filters,
        }
    }

    /// The deployment this exporter was configured with.
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Export a sequence of submissions into one XML document.
    ///
    /// A single submission becomes the document root directly; several are
    /// wrapped under the configured plural element, appended in input
    /// order. The root always receives the `xmlns:xsi` declaration and an
    /// `xsi:schemaLocation` pairing the namespace URI with the schema
    /// filename.
    pub fn export(&self, submissions: &[Submission]) -> Result<Document> {
        if submissions.is_empty() {
            return Err(Error::NoSubmissions);
        }

        debug!(count = submissions.len(), "exporting submissions");
        let mut doc = Document::with_namespace(&self.deployment.namespace);

        let root = if let [submission] = submissions {
            self.compose_submission(&mut doc, submission)?
        } else {
            let wrapper = doc.create_element(&self.deployment.submissions_node);
            for submission in submissions {
                let node = self.compose_submission(&mut doc, submission)?;
                doc.append_child(wrapper, node);
            }
            wrapper
        };

        doc.set_attribute(root, "xmlns:xsi", XSI_NAMESPACE);
        doc.set_attribute(
            root,
            "xsi:schemaLocation",
            format!(
                "{} {}",
                self.deployment.namespace, self.deployment.schema_filename
            ),
        );
        doc.set_root(root);

        Ok(doc)
    }

    /// Compose one submission's full subtree and return its element.
    ///
    /// Children are assembled in fixed order: identifiers, metadata,
    /// authors, files, representations.
    pub fn compose_submission(
        &self,
        doc: &mut Document,
        submission: &Submission,
    ) -> Result<NodeId> {
        debug!(id = submission.id, "composing submission");

        let node = doc.create_element(&self.deployment.submission_node);
        doc.set_attribute(node, "locale", &submission.locale);
        if let Some(date) = submission.date_published {
            doc.set_attribute(node, "date_published", date.format("%Y-%m-%d").to_string());
        }

        self.add_identifiers(doc, node, submission)
            .map_err(|e| e.in_stage(Stage::Identifiers))?;
        self.add_metadata(doc, node, submission)
            .map_err(|e| e.in_stage(Stage::Metadata))?;
        self.add_authors(doc, node, submission)
            .map_err(|e| e.in_stage(Stage::Authors))?;
        self.add_files(doc, node, submission)
            .map_err(|e| e.in_stage(Stage::Files))?;
        self.add_representations(doc, node, submission)
            .map_err(|e| e.in_stage(Stage::Representations))?;

        Ok(node)
    }

    /// Append `id` elements: the internal id, the publisher id if present,
    /// then one per pub-id plugin that assigns a value.
    fn add_identifiers(
        &self,
        doc: &mut Document,
        parent: NodeId,
        submission: &Submission,
    ) -> Result<()> {
        let internal = doc.create_element("id");
        doc.set_attribute(internal, "type", "internal");
        doc.set_text(internal, submission.id.to_string());
        doc.append_child(parent, internal);

        if let Some(publisher_id) = &submission.publisher_id {
            let public = doc.create_element("id");
            doc.set_attribute(public, "type", "public");
            doc.set_text(public, publisher_id);
            doc.append_child(parent, public);
        }

        for plugin in &self.filters.pub_id_plugins {
            let pub_id = plugin.pub_id(submission, !submission.published);
            match pub_id {
                Some(value) if !value.is_empty() => {
                    let node = doc.create_element("id");
                    doc.set_attribute(node, "type", plugin.id_type());
                    doc.set_text(node, value);
                    doc.append_child(parent, node);
                }
                // Plugins that assign nothing are skipped.
                _ => {}
            }
        }

        Ok(())
    }

    /// Append the localized metadata fields and the optional editor comment.
    fn add_metadata(
        &self,
        doc: &mut Document,
        parent: NodeId,
        submission: &Submission,
    ) -> Result<()> {
        let fields = [
            ("title", &submission.title),
            ("prefix", &submission.prefix),
            ("subtitle", &submission.subtitle),
            ("abstract", &submission.abstract_text),
            ("subject_class", &submission.subject_class),
            ("coverage_geo", &submission.coverage_geo),
            ("coverage_chron", &submission.coverage_chron),
            ("coverage_sample", &submission.coverage_sample),
            ("type", &submission.work_type),
            ("source", &submission.source),
            ("rights", &submission.rights),
        ];

        for (tag, field) in fields {
            for node in build_localized_nodes(doc, tag, field) {
                doc.append_child(parent, node);
            }
        }

        if let Some(node) = build_optional_node(
            doc,
            "comments_to_editor",
            submission.comments_to_editor.as_deref(),
        ) {
            doc.append_child(parent, node);
        }

        Ok(())
    }

    /// Serialize the whole author list in one filter call and import the
    /// resulting root, if any.
    ///
    /// A rootless fragment is accepted silently: an empty author list is
    /// permitted to produce no element.
    fn add_authors(
        &self,
        doc: &mut Document,
        parent: NodeId,
        submission: &Submission,
    ) -> Result<()> {
        let ctx = ExportContext {
            deployment: &self.deployment,
            submission,
        };

        let fragment = self.filters.authors.execute(&ctx, &submission.authors)?;
        if let Some(root) = fragment.root() {
            let imported = doc.import(&fragment, root);
            doc.append_child(parent, imported);
        }

        Ok(())
    }

    /// Serialize the submission's files and group revision fragments by
    /// logical file id.
    ///
    /// Each file filter emits a single-revision wrapper and is unaware of
    /// sibling revisions. Fragments sharing a logical `id` are merged here:
    /// the first fragment is imported whole, later fragments contribute
    /// only their `revision` child, appended to the existing wrapper.
    /// Wrapper order is first-seen order; revision order is input order.
    fn add_files(
        &self,
        doc: &mut Document,
        parent: NodeId,
        submission: &Submission,
    ) -> Result<()> {
        let ctx = ExportContext {
            deployment: &self.deployment,
            submission,
        };

        let mut wrappers: FxHashMap<String, NodeId> = FxHashMap::default();

        for file in &submission.files {
            let filter = self.filters.file_filter(file.kind);
            let fragment = filter.execute(&ctx, file)?;
            let frag_root = fragment.root().ok_or(Error::EmptyFragment { entity: "file" })?;

            let file_id = fragment
                .attribute(frag_root, "id")
                .ok_or(Error::MissingFileId)?
                .to_string();
            let revision = single_revision_child(&fragment, frag_root, &file_id)?;

            match wrappers.entry(file_id) {
                Entry::Vacant(entry) => {
                    let imported = doc.import(&fragment, frag_root);
                    doc.append_child(parent, imported);
                    entry.insert(imported);
                }
                Entry::Occupied(entry) => {
                    trace!(file_id = %entry.key(), "merging revision into existing file element");
                    let imported = doc.import(&fragment, revision);
                    doc.append_child(*entry.get(), imported);
                }
            }
        }

        Ok(())
    }

    /// Serialize each representation in its own filter call and append the
    /// imported roots in input order.
    fn add_representations(
        &self,
        doc: &mut Document,
        parent: NodeId,
        submission: &Submission,
    ) -> Result<()> {
        let ctx = ExportContext {
            deployment: &self.deployment,
            submission,
        };

        for representation in &submission.representations {
            let fragment = self.filters.representations.execute(&ctx, representation)?;
            let root = fragment.root().ok_or(Error::EmptyFragment {
                entity: "representation",
            })?;
            let imported = doc.import(&fragment, root);
            doc.append_child(parent, imported);
        }

        Ok(())
    }
}

/// Locate the single immediate `revision` child of a file fragment root.
fn single_revision_child(fragment: &Document, root: NodeId, file_id: &str) -> Result<NodeId> {
    let mut revisions = fragment.children_by_tag(root, "revision");

    let first = revisions.next().ok_or_else(|| Error::MissingRevision {
        file_id: file_id.to_string(),
    })?;

    let extra = revisions.count();
    if extra > 0 {
        return Err(Error::AmbiguousRevision {
            file_id: file_id.to_string(),
            count: extra + 1,
        });
    }

    Ok(first)
}
