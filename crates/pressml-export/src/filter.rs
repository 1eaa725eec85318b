//! Export filter traits and the filter set.
//!
//! Each entity type is serialized by exactly one filter. Filters produce
//! standalone single-root fragment documents; the composer imports the
//! fragment root into the shared output document. The slot-per-type
//! [`FilterSet`] replaces a string-keyed registry lookup: cardinality is
//! validated when the set is built, so a missing or doubly-registered
//! filter is a construction-time configuration error rather than a
//! per-call check.

use pressml_xmltree::Document;

use crate::deployment::Deployment;
use crate::error::{Error, Result};
use crate::model::{Author, FileKind, Representation, Submission, SubmissionFile};

/// Borrowed context handed to every filter invocation.
///
/// Nested filters emit elements in the deployment's namespace, and pub-id
/// lookups address the submission currently being composed.
#[derive(Debug, Clone, Copy)]
pub struct ExportContext<'a> {
    pub deployment: &'a Deployment,
    pub submission: &'a Submission,
}

/// Serializes the whole author list of one submission in a single call.
///
/// An empty author list may yield a rootless fragment, which the composer
/// accepts silently (no authors element is emitted).
pub trait AuthorListFilter {
    fn execute(&self, ctx: &ExportContext<'_>, authors: &[Author]) -> Result<Document>;
}

/// Serializes one submission file revision.
///
/// The fragment root must carry an `id` attribute identifying the logical
/// file and contain exactly one immediate `revision` child.
pub trait FileFilter {
    fn execute(&self, ctx: &ExportContext<'_>, file: &SubmissionFile) -> Result<Document>;
}

/// Serializes one representation.
pub trait RepresentationFilter {
    fn execute(&self, ctx: &ExportContext<'_>, representation: &Representation) -> Result<Document>;
}

/// An identifier-assigning plugin.
///
/// Queried once per submission; a plugin that returns `None` (or an empty
/// string) is skipped without error. `provisional` is set for unpublished
/// submissions, since some plugins assign provisional ids pre-publication.
pub trait PubIdPlugin {
    /// The `type` attribute value for ids assigned by this plugin.
    fn id_type(&self) -> &str;

    /// The pub-id value for a submission, if one is assigned.
    fn pub_id(&self, submission: &Submission, provisional: bool) -> Option<String>;
}

/// The complete set of filters for one export run: one slot per entity
/// type, plus the ordered pub-id plugins.
pub struct FilterSet {
    pub(crate) authors: Box<dyn AuthorListFilter>,
    pub(crate) document_files: Box<dyn FileFilter>,
    pub(crate) artwork_files: Box<dyn FileFilter>,
    pub(crate) supplementary_files: Box<dyn FileFilter>,
    pub(crate) representations: Box<dyn RepresentationFilter>,
    pub(crate) pub_id_plugins: Vec<Box<dyn PubIdPlugin>>,
}

impl FilterSet {
    pub fn builder() -> FilterSetBuilder {
        FilterSetBuilder::default()
    }

    /// The file filter serializing files of the given kind.
    pub(crate) fn file_filter(&self, kind: FileKind) -> &dyn FileFilter {
        match kind {
            FileKind::Document => self.document_files.as_ref(),
            FileKind::Artwork => self.artwork_files.as_ref(),
            FileKind::Supplementary => self.supplementary_files.as_ref(),
        }
    }
}

/// Builder for [`FilterSet`].
///
/// Every slot except the pub-id plugins must be filled exactly once.
#[derive(Default)]
pub struct FilterSetBuilder {
    authors: Option<Box<dyn AuthorListFilter>>,
    document_files: Option<Box<dyn FileFilter>>,
    artwork_files: Option<Box<dyn FileFilter>>,
    supplementary_files: Option<Box<dyn FileFilter>>,
    representations: Option<Box<dyn RepresentationFilter>>,
    pub_id_plugins: Vec<Box<dyn PubIdPlugin>>,
}

impl FilterSetBuilder {
    pub fn authors(mut self, filter: impl AuthorListFilter + 'static) -> Result<Self> {
        if self.authors.is_some() {
            return Err(Error::DuplicateFilter { slot: "author" });
        }
        self.authors = Some(Box::new(filter));
        Ok(self)
    }

    pub fn files(mut self, kind: FileKind, filter: impl FileFilter + 'static) -> Result<Self> {
        let slot = match kind {
            FileKind::Document => &mut self.document_files,
            FileKind::Artwork => &mut self.artwork_files,
            FileKind::Supplementary => &mut self.supplementary_files,
        };
        if slot.is_some() {
            return Err(Error::DuplicateFilter {
                slot: file_slot_name(kind),
            });
        }
        *slot = Some(Box::new(filter));
        Ok(self)
    }

    pub fn representations(
        mut self,
        filter: impl RepresentationFilter + 'static,
    ) -> Result<Self> {
        if self.representations.is_some() {
            return Err(Error::DuplicateFilter {
                slot: "representation",
            });
        }
        self.representations = Some(Box::new(filter));
        Ok(self)
    }

    /// Register an identifier-assigning plugin. Plugins are queried in
    /// registration order; any number may be registered.
    pub fn pub_id_plugin(mut self, plugin: impl PubIdPlugin + 'static) -> Self {
        self.pub_id_plugins.push(Box::new(plugin));
        self
    }

    /// Validate that every slot is filled and produce the filter set.
    pub fn build(self) -> Result<FilterSet> {
        Ok(FilterSet {
            authors: self
                .authors
                .ok_or(Error::MissingFilter { slot: "author" })?,
            document_files: self.document_files.ok_or(Error::MissingFilter {
                slot: file_slot_name(FileKind::Document),
            })?,
            artwork_files: self.artwork_files.ok_or(Error::MissingFilter {
                slot: file_slot_name(FileKind::Artwork),
            })?,
            supplementary_files: self.supplementary_files.ok_or(Error::MissingFilter {
                slot: file_slot_name(FileKind::Supplementary),
            })?,
            representations: self.representations.ok_or(Error::MissingFilter {
                slot: "representation",
            })?,
            pub_id_plugins: self.pub_id_plugins,
        })
    }
}

fn file_slot_name(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Document => "document file",
        FileKind::Artwork => "artwork file",
        FileKind::Supplementary => "supplementary file",
    }
}
