use std::path::PathBuf;

use sdk_release::boundary::BoundaryWarning;
use sdk_release::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_version_bump_display() {
    let warning = BoundaryWarning::NoVersionBump {
        current_version: "2.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No version bump required"),
        "Message should mention the skipped bump, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("2.0.0"),
        "Message should contain the current version, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_marker_pair_missing_display() {
    let warning = BoundaryWarning::MarkerPairMissing {
        path: PathBuf::from("sdk/README.md"),
        section: "standalone-funcs".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("sdk/README.md"),
        "Message should contain the target path, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("standalone-funcs"),
        "Message should name the section, got: {}",
        display_msg
    );
    assert!(display_msg.contains("left unchanged"));
}

#[test]
fn test_boundary_warning_malformed_section_display() {
    let warning = BoundaryWarning::MalformedSection {
        path: PathBuf::from("data/README.md"),
        section: "operations".to_string(),
        reason: "disclosure block is never closed".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("data/README.md"));
    assert!(display_msg.contains("operations"));
    assert!(
        display_msg.contains("never closed"),
        "Message should carry the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_target_missing_display() {
    let warning = BoundaryWarning::TargetMissing {
        path: PathBuf::from("sdk/README.md"),
    };
    assert_eq!(warning.to_string(), "'sdk/README.md' does not exist");
}

#[test]
fn test_boundary_warning_doc_source_missing_display() {
    let warning = BoundaryWarning::DocSourceMissing {
        path: PathBuf::from("metrics/docs"),
    };
    let display_msg = warning.to_string();
    assert!(display_msg.contains("metrics/docs"));
    assert!(display_msg.contains("nothing copied"));
}

#[test]
fn test_boundary_warning_equality() {
    let a = BoundaryWarning::TargetMissing {
        path: PathBuf::from("a"),
    };
    let b = BoundaryWarning::TargetMissing {
        path: PathBuf::from("a"),
    };
    let c = BoundaryWarning::TargetMissing {
        path: PathBuf::from("b"),
    };
    assert_eq!(a, b);
    assert_ne!(a, c);
}

// ============================================================================
// UI Display Tests
// ============================================================================

#[test]
fn test_display_boundary_warnings() {
    // Visual verification test - output is printed to stderr
    ui::display_boundary_warnings(&[
        BoundaryWarning::NoVersionBump {
            current_version: "1.0.0".to_string(),
        },
        BoundaryWarning::TargetMissing {
            path: PathBuf::from("sdk/README.md"),
        },
    ]);
}
