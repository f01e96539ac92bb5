use crate::domain::version::{BumpKind, SemanticVersion};
use crate::error::Result;

/// Where a bump decision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Derived from dependency observations
    Computed,
    /// Supplied verbatim by the caller
    Manual,
}

/// Outcome of version planning for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpDecision {
    pub kind: BumpKind,
    pub new_version: Option<String>,
    pub source: DecisionSource,
}

impl BumpDecision {
    /// Decision computed from the current version and the most severe observed change
    pub fn computed(current: &SemanticVersion, kind: BumpKind) -> Result<Self> {
        let new_version = match kind {
            BumpKind::None => None,
            _ => Some(current.bump(kind)?.to_string()),
        };
        Ok(BumpDecision {
            kind,
            new_version,
            source: DecisionSource::Computed,
        })
    }

    /// Decision carrying a caller-supplied version string, used as-is
    pub fn manual(version: impl Into<String>) -> Self {
        BumpDecision {
            kind: BumpKind::None,
            new_version: Some(version.into()),
            source: DecisionSource::Manual,
        }
    }

    /// Whether the caller should release at all
    pub fn is_release(&self) -> bool {
        self.new_version.is_some()
    }

    pub fn new_version(&self) -> Option<&str> {
        self.new_version.as_deref()
    }

    pub fn is_manual(&self) -> bool {
        self.source == DecisionSource::Manual
    }
}
