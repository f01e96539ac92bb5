//! Pure formatting functions for UI output.
//!
//! Styling goes through `console`, which drops colors when the stream is not a terminal.

use std::path::Path;

use console::style;

use crate::boundary::BoundaryWarning;
use crate::changelog::DependencyChange;
use crate::domain::BumpDecision;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Text describing a bump decision, e.g. `1.2.3 → 1.3.0 (minor)`.
pub fn format_bump_decision(current: &str, decision: &BumpDecision) -> String {
    match decision.new_version() {
        Some(new) if decision.is_manual() => format!("{} → {} (manual)", current, new),
        Some(new) => format!("{} → {} ({})", current, new, decision.kind),
        None => format!("{} (unchanged)", current),
    }
}

/// Display the planned version change.
pub fn display_bump_decision(current: &str, decision: &BumpDecision) {
    println!("\n{}", style("SDK version:").bold());
    println!("  {}", format_bump_decision(current, decision));
}

/// Display the dependency changes that went into a release.
///
/// Shows at most 10 changes; the remainder is summarized.
pub fn display_dependency_changes(changes: &[DependencyChange]) {
    if changes.is_empty() {
        println!("{}", style("No dependency changes detected").dim());
        return;
    }

    println!("{}", style(format!("{} dependency changes:", changes.len())).underlined());
    for change in changes.iter().take(10) {
        println!(
            "  - {}: {} → {}",
            change.name,
            style(change.previous.as_deref().unwrap_or("N/A")).red(),
            style(&change.current).green()
        );
    }

    if changes.len() > 10 {
        println!("  ... and {} more", changes.len() - 10);
    }
}

/// Display a file written by the docs workflow.
pub fn display_written_file(path: &Path) {
    println!("  {} {}", style("📄").dim(), path.display());
}

/// Display the outcome of merging one README section.
pub fn display_section_merged(section: &str, contributors: usize) {
    display_success(&format!(
        "Merged '{}' from {} document{}",
        section,
        contributors,
        if contributors == 1 { "" } else { "s" }
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BumpKind, SemanticVersion};

    #[test]
    fn test_format_computed_decision() {
        let decision =
            BumpDecision::computed(&SemanticVersion::new(1, 2, 3), BumpKind::Minor).unwrap();
        assert_eq!(format_bump_decision("1.2.3", &decision), "1.2.3 → 1.3.0 (minor)");
    }

    #[test]
    fn test_format_manual_decision() {
        let decision = BumpDecision::manual("9.0.0");
        assert_eq!(format_bump_decision("1.2.3", &decision), "1.2.3 → 9.0.0 (manual)");
    }

    #[test]
    fn test_format_no_bump() {
        let decision =
            BumpDecision::computed(&SemanticVersion::new(2, 0, 0), BumpKind::None).unwrap();
        assert_eq!(format_bump_decision("2.0.0", &decision), "2.0.0 (unchanged)");
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_dependency_changes(&[]);
        display_section_merged("operations", 1);
    }
}
