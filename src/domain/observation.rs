use crate::domain::version::{BumpKind, SemanticVersion};
use crate::error::Result;

/// A dependency's previously pinned version next to the latest version found for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyObservation {
    pub name: String,
    pub previous: String,
    pub current: String,
}

impl DependencyObservation {
    pub fn new(
        name: impl Into<String>,
        previous: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        DependencyObservation {
            name: name.into(),
            previous: previous.into(),
            current: current.into(),
        }
    }

    /// Classify the change from `previous` to `current`.
    ///
    /// Only increases are detected, checked from the most significant field down;
    /// the first increasing field decides. Decreases are never reported.
    pub fn classify(&self) -> Result<BumpKind> {
        let previous = SemanticVersion::parse(&self.previous)?;
        let current = SemanticVersion::parse(&self.current)?;
        Ok(classify_change(&previous, &current))
    }

    /// Whether the raw version strings differ at all
    pub fn has_changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Classify the change between two versions.
pub fn classify_change(previous: &SemanticVersion, current: &SemanticVersion) -> BumpKind {
    if current.major > previous.major {
        BumpKind::Major
    } else if current.minor > previous.minor {
        BumpKind::Minor
    } else if current.patch > previous.patch {
        BumpKind::Patch
    } else {
        BumpKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u64, minor: u64, patch: u64) -> SemanticVersion {
        SemanticVersion::new(major, minor, patch)
    }

    #[test]
    fn test_classify_major() {
        assert_eq!(classify_change(&v(1, 4, 9), &v(2, 0, 0)), BumpKind::Major);
    }

    #[test]
    fn test_classify_minor() {
        assert_eq!(classify_change(&v(1, 0, 0), &v(1, 1, 0)), BumpKind::Minor);
    }

    #[test]
    fn test_classify_patch() {
        assert_eq!(classify_change(&v(1, 1, 0), &v(1, 1, 1)), BumpKind::Patch);
    }

    #[test]
    fn test_classify_unchanged() {
        assert_eq!(classify_change(&v(1, 1, 1), &v(1, 1, 1)), BumpKind::None);
    }

    #[test]
    fn test_classify_patch_regression_is_none() {
        assert_eq!(classify_change(&v(1, 2, 5), &v(1, 2, 3)), BumpKind::None);
    }

    #[test]
    fn test_classify_major_regression_falls_through_to_minor() {
        // Lower fields are still inspected when a higher field went down
        assert_eq!(classify_change(&v(2, 0, 0), &v(1, 5, 0)), BumpKind::Minor);
    }

    #[test]
    fn test_classify_minor_regression_with_patch_increase() {
        assert_eq!(classify_change(&v(1, 3, 0), &v(1, 2, 4)), BumpKind::Patch);
    }

    #[test]
    fn test_observation_parses_caret_pins() {
        let obs = DependencyObservation::new("@avalanche-sdk/data", "^0.1.0", "0.2.0");
        assert_eq!(obs.classify().unwrap(), BumpKind::Minor);
        assert!(obs.has_changed());
    }

    #[test]
    fn test_observation_malformed_version() {
        let obs = DependencyObservation::new("dep", "1.0", "1.0.1");
        assert!(obs.classify().is_err());
    }

    #[test]
    fn test_observation_unchanged() {
        let obs = DependencyObservation::new("dep", "1.0.0", "1.0.0");
        assert!(!obs.has_changed());
        assert_eq!(obs.classify().unwrap(), BumpKind::None);
    }
}
