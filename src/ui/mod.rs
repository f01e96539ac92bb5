//! User interface module - console output for the release workflows.
//!
//! All formatting lives in [`formatter`]; this module re-exports it for convenience.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_bump_decision, display_dependency_changes, display_error,
    display_section_merged, display_status, display_success, display_written_file,
    format_bump_decision,
};

use crate::boundary::BoundaryWarning;

/// Display every warning in order.
pub fn display_boundary_warnings(warnings: &[BoundaryWarning]) {
    for warning in warnings {
        display_boundary_warning(warning);
    }
}
