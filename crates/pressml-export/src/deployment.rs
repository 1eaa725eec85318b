//! Per-run export configuration.

/// Configuration for one export run.
///
/// Set once per run and read-only thereafter. Collaborator calls receive the
/// submission being exported as an explicit argument; there is no mutable
/// "current submission" pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Target XML namespace URI, declared as the default namespace on the
    /// output document's root.
    pub namespace: String,
    /// Schema filename paired with the namespace in `xsi:schemaLocation`.
    pub schema_filename: String,
    /// Tag name for a single submission element.
    pub submission_node: String,
    /// Tag name for the wrapper element when exporting several submissions.
    pub submissions_node: String,
}

impl Deployment {
    pub fn new(
        namespace: impl Into<String>,
        schema_filename: impl Into<String>,
        submission_node: impl Into<String>,
        submissions_node: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            schema_filename: schema_filename.into(),
            submission_node: submission_node.into(),
            submissions_node: submissions_node.into(),
        }
    }
}

impl Default for Deployment {
    /// The native-format defaults.
    fn default() -> Self {
        Self::new("http://pkp.sfu.ca", "native.xsd", "submission", "submissions")
    }
}
