use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Ordering is lexicographic on (major, minor, patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string (e.g., "1.2.3" or a manifest pin like "^1.2.3").
    ///
    /// Pre-release and build metadata are accepted but not retained.
    pub fn parse(input: &str) -> Result<Self> {
        let clean = input.trim().trim_start_matches('^');

        let parsed = semver::Version::parse(clean).map_err(|e| {
            ReleaseError::parse(format!(
                "Invalid version format: '{}' - expected X.Y.Z ({})",
                input, e
            ))
        })?;

        Ok(SemanticVersion::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Bump version according to bump kind. `BumpKind::None` returns the version unchanged.
    ///
    /// # Errors
    /// `Parse` when the bumped field is already `u64::MAX`.
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let overflow = || ReleaseError::parse(format!("cannot apply a {} bump to {}", kind, self));
        match kind {
            BumpKind::Major => Ok(SemanticVersion::new(
                self.major.checked_add(1).ok_or_else(overflow)?,
                0,
                0,
            )),
            BumpKind::Minor => Ok(SemanticVersion::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            )),
            BumpKind::Patch => Ok(SemanticVersion::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            )),
            BumpKind::None => Ok(*self),
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Magnitude of a version change, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BumpKind {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::None => "none",
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
        };
        f.write_str(name)
    }
}
