//! Error types for export composition.

use std::fmt;

use thiserror::Error;

/// The composition stage that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Identifier elements (`id` nodes).
    Identifiers,
    /// Localized metadata fields.
    Metadata,
    /// Author list serialization.
    Authors,
    /// File serialization and revision grouping.
    Files,
    /// Representation serialization.
    Representations,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identifiers => "identifier",
            Self::Metadata => "metadata",
            Self::Authors => "author",
            Self::Files => "file",
            Self::Representations => "representation",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur when composing an export document.
///
/// Configuration errors (`MissingFilter`, `DuplicateFilter`) are raised when
/// the filter set is built, before any export runs. Malformed fragment
/// errors indicate a contract violation between the composer and a filter;
/// the in-progress document is discarded.
#[derive(Debug, Error)]
pub enum Error {
    /// XML tree error.
    #[error("{0}")]
    Tree(#[from] pressml_xmltree::Error),

    /// No filter registered for a required slot.
    #[error("no {slot} filter registered")]
    MissingFilter { slot: &'static str },

    /// More than one filter registered for a slot.
    #[error("{slot} filter registered more than once")]
    DuplicateFilter { slot: &'static str },

    /// The export was invoked with an empty submission list.
    #[error("no submissions to export")]
    NoSubmissions,

    /// A filter returned a fragment document with no root element.
    #[error("{entity} filter produced a fragment with no root element")]
    EmptyFragment { entity: &'static str },

    /// A file fragment root is missing the logical file `id` attribute.
    #[error("file fragment root is missing the id attribute")]
    MissingFileId,

    /// A file fragment has no `revision` child to merge.
    #[error("file fragment {file_id} has no revision child")]
    MissingRevision { file_id: String },

    /// A file fragment has more than one `revision` child.
    #[error("file fragment {file_id} has {count} revision children, expected exactly one")]
    AmbiguousRevision { file_id: String, count: usize },

    /// A collaborator-side filter failure.
    #[error("filter error: {0}")]
    Filter(String),

    /// An error attributed to the composition stage that raised it.
    #[error("{stage} composition failed: {source}")]
    Stage { stage: Stage, source: Box<Error> },
}

impl Error {
    /// Wrap this error with the composition stage it was raised in.
    pub(crate) fn in_stage(self, stage: Stage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The stage attribution, if this error carries one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, Error>;
