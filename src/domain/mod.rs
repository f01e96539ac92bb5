//! Domain logic - pure release rules independent of the filesystem

pub mod decision;
pub mod observation;
pub mod version;

pub use decision::{BumpDecision, DecisionSource};
pub use observation::{classify_change, DependencyObservation};
pub use version::{BumpKind, SemanticVersion};
