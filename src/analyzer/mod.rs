//! Analysis engine for determining version bumps from dependency changes

pub mod bump_planner;

pub use bump_planner::VersionBumpPlanner;
