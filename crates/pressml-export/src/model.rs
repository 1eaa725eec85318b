//! Submission data model.
//!
//! These types are owned by the caller; the export engine only reads them.
//! Retrieval from a data store is a collaborator's concern.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A localized text field: locale code mapped to a text value.
///
/// Locale uniqueness holds by construction; iteration is locale-sorted so
/// that emission order is deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalizedText {
    values: BTreeMap<String, String>,
}

impl LocalizedText {
    /// Create an empty localized field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field holding a single localized value.
    pub fn single(locale: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.set(locale, value);
        field
    }

    /// Set the value for a locale, replacing any existing value.
    pub fn set(&mut self, locale: impl Into<String>, value: impl Into<String>) {
        self.values.insert(locale.into(), value.into());
    }

    /// Get the value for a locale.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.values.get(locale).map(String::as_str)
    }

    /// Whether the field holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of locales with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over (locale, value) pairs in locale order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

/// The concrete kind of a submission file.
///
/// The kind selects which file filter serializes the file, via exhaustive
/// matching in the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileKind {
    /// An ordinary submission document.
    Document,
    /// An artwork file (figures, images).
    Artwork,
    /// Supplementary material.
    Supplementary,
}

/// One revision of a logical submission file.
///
/// Several files in a submission may share the same `file_id`; they are
/// successive revisions of one logical file and are merged into a single
/// wrapper element on export.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmissionFile {
    /// Identity of the logical file this revision belongs to.
    pub file_id: i64,
    /// Revision number within the logical file.
    pub revision: i32,
    /// Original file name.
    pub name: String,
    /// MIME type.
    pub file_type: String,
    /// Concrete kind, selecting the serializing filter.
    pub kind: FileKind,
}

/// A submission author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Author {
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    /// Whether this author is the submission's primary contact.
    pub primary_contact: bool,
    /// Position within the author list.
    pub seq: i32,
}

/// A derivative representation of a submission (e.g. a galley).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Representation {
    pub id: i64,
    pub name: LocalizedText,
}

/// A submission record: publication metadata, authors, files and
/// representations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submission {
    /// Internal numeric id.
    pub id: i64,
    /// Publisher-assigned public id, if any.
    pub publisher_id: Option<String>,
    /// Primary locale of the submission.
    pub locale: String,
    /// Publication date; absent for unpublished submissions.
    pub date_published: Option<NaiveDate>,
    /// Whether the submission has been published. Pub-id plugins receive
    /// the inverse as the provisional flag.
    pub published: bool,

    pub title: LocalizedText,
    pub prefix: LocalizedText,
    pub subtitle: LocalizedText,
    pub abstract_text: LocalizedText,
    pub subject_class: LocalizedText,
    pub coverage_geo: LocalizedText,
    pub coverage_chron: LocalizedText,
    pub coverage_sample: LocalizedText,
    pub work_type: LocalizedText,
    pub source: LocalizedText,
    pub rights: LocalizedText,

    /// Free-form comment to the editor, not localized.
    pub comments_to_editor: Option<String>,

    pub authors: Vec<Author>,
    pub files: Vec<SubmissionFile>,
    pub representations: Vec<Representation>,
}

impl Submission {
    /// Create an empty submission with the given id and locale.
    pub fn new(id: i64, locale: impl Into<String>) -> Self {
        Self {
            id,
            locale: locale.into(),
            ..Self::default()
        }
    }
}
