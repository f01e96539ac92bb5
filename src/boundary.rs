use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while running a workflow.
/// These never abort a run but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No dependency moved forward, so the SDK version stays put
    NoVersionBump { current_version: String },
    /// A source document's section disclosure block could not be parsed
    MalformedSection {
        path: PathBuf,
        section: String,
        reason: String,
    },
    /// The target document has no marker pair for a section, so it was left as is
    MarkerPairMissing { path: PathBuf, section: String },
    /// The document to update does not exist
    TargetMissing { path: PathBuf },
    /// A documentation source directory does not exist
    DocSourceMissing { path: PathBuf },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionBump { current_version } => {
                write!(
                    f,
                    "No version bump required (dependencies unchanged, staying at {})",
                    current_version
                )
            }
            BoundaryWarning::MalformedSection {
                path,
                section,
                reason,
            } => {
                write!(
                    f,
                    "Skipping '{}' section of '{}': {}",
                    section,
                    path.display(),
                    reason
                )
            }
            BoundaryWarning::MarkerPairMissing { path, section } => {
                write!(
                    f,
                    "'{}' has no '{}' marker pair; left unchanged",
                    path.display(),
                    section
                )
            }
            BoundaryWarning::TargetMissing { path } => {
                write!(f, "'{}' does not exist", path.display())
            }
            BoundaryWarning::DocSourceMissing { path } => {
                write!(
                    f,
                    "Documentation source '{}' does not exist; nothing copied",
                    path.display()
                )
            }
        }
    }
}
