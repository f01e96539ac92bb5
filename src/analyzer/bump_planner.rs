use crate::domain::{BumpDecision, BumpKind, DependencyObservation, SemanticVersion};
use crate::error::Result;
use tracing::debug;

/// Decides how the SDK version moves given what happened to its dependencies
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionBumpPlanner;

impl VersionBumpPlanner {
    pub fn new() -> Self {
        VersionBumpPlanner
    }

    /// Plan the next version from dependency observations.
    ///
    /// The most severe classification across all observations wins. Returns a
    /// decision without a version when nothing increased.
    pub fn plan(
        &self,
        current: &SemanticVersion,
        observations: &[DependencyObservation],
    ) -> Result<BumpDecision> {
        let kind = self.overall_kind(observations)?;
        BumpDecision::computed(current, kind)
    }

    /// Same as [`plan`](Self::plan), but an explicit version short-circuits planning entirely.
    ///
    /// With an override, neither `current` nor the observations are parsed. A blank
    /// override counts as no override.
    pub fn plan_with_override(
        &self,
        current: &str,
        observations: &[DependencyObservation],
        manual_version: Option<&str>,
    ) -> Result<BumpDecision> {
        match manual_version.filter(|v| !v.trim().is_empty()) {
            Some(version) => {
                debug!(version, "using manual version override");
                Ok(BumpDecision::manual(version))
            }
            None => self.plan(&SemanticVersion::parse(current)?, observations),
        }
    }

    /// Most severe change across all observations
    pub fn overall_kind(&self, observations: &[DependencyObservation]) -> Result<BumpKind> {
        let mut overall = BumpKind::None;

        for observation in observations {
            let kind = observation.classify()?;
            debug!(
                dependency = %observation.name,
                previous = %observation.previous,
                current = %observation.current,
                %kind,
                "classified dependency change"
            );

            overall = overall.max(kind);
        }

        Ok(overall)
    }
}
