//! Release workflows
//!
//! Each workflow corresponds to one subcommand of the binary. They take the
//! root directory and configuration explicitly so they can be driven
//! programmatically (and from tests) without depending on clap.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::analyzer::VersionBumpPlanner;
use crate::boundary::BoundaryWarning;
use crate::changelog::{DependencyChange, ReleaseEntry};
use crate::config::Config;
use crate::docs::{AggregationReport, DocTreeAggregator};
use crate::domain::{BumpDecision, DependencyObservation};
use crate::error::Result;
use crate::lockfile::LockfileSync;
use crate::manifest::{discover_dependency_versions, PackageManifest};
use crate::readme::{SectionMerger, SourceDocument};

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Version to release regardless of dependency changes
    pub manual_version: Option<String>,

    /// Time stamped on the release notes entry
    pub timestamp: NaiveDateTime,
}

/// Result of the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    pub previous_version: String,
    pub decision: BumpDecision,
    /// Dependencies whose version moved, as listed in the release notes
    pub changes: Vec<DependencyChange>,
    pub lockfile_synced: bool,
    pub warnings: Vec<BoundaryWarning>,
}

impl BumpOutcome {
    pub fn released(&self) -> bool {
        self.decision.is_release()
    }
}

/// Bump the SDK version from its dependencies' versions.
///
/// 1. Load the SDK manifest and the previous dependency pins
/// 2. Discover the latest version of every sub-package
/// 3. Plan the bump (or take the manual version)
/// 4. Write the manifest, prepend release notes, resync the lockfile
///
/// Nothing is written when no bump is required. Every read happens before the
/// first write, so a missing manifest leaves all files untouched.
pub fn run_bump_workflow(root: &Path, config: &Config, args: &BumpWorkflowArgs) -> Result<BumpOutcome> {
    let release = &config.release;

    let mut manifest = PackageManifest::load(root.join(&release.manifest))?;
    let previous_version = manifest.version()?.to_string();
    let previous_pins = manifest.dependency_pins();

    let latest = discover_dependency_versions(root, &release.dependency_dirs)?;

    let observations: Vec<DependencyObservation> = latest
        .iter()
        .filter_map(|(name, current)| {
            previous_pins
                .get(name)
                .map(|previous| DependencyObservation::new(name, previous, current))
        })
        .collect();
    debug!(count = observations.len(), "collected dependency observations");

    let decision = VersionBumpPlanner::new().plan_with_override(
        &previous_version,
        &observations,
        args.manual_version.as_deref(),
    )?;

    let Some(new_version) = decision.new_version().map(str::to_string) else {
        info!(version = %previous_version, "no version bump required");
        return Ok(BumpOutcome {
            warnings: vec![BoundaryWarning::NoVersionBump {
                current_version: previous_version.clone(),
            }],
            previous_version,
            decision,
            changes: Vec::new(),
            lockfile_synced: false,
        });
    };

    manifest.set_version(&new_version);
    manifest.pin_dependencies(&latest);
    manifest.save()?;
    info!(from = %previous_version, to = %new_version, "updated SDK manifest");

    let changes: Vec<DependencyChange> = latest
        .iter()
        .filter(|(name, current)| previous_pins.get(*name) != Some(*current))
        .map(|(name, current)| {
            DependencyChange::new(name.clone(), previous_pins.get(name).cloned(), current.clone())
        })
        .collect();

    let entry = ReleaseEntry {
        timestamp: args.timestamp,
        version: new_version.clone(),
        changes: changes.clone(),
        generated_label: release.generated_label.clone(),
        package_label: release.package_label.clone(),
        registry_url: release.registry_url_for(&new_version),
    };
    entry.prepend_to(&root.join(&release.changelog))?;

    let lockfile_synced = match LockfileSync::from_command(
        &release.lockfile_command,
        root.join(&release.lockfile_dir),
    ) {
        Some(sync) => {
            sync.run()?;
            true
        }
        None => {
            debug!("lockfile sync disabled");
            false
        }
    };

    Ok(BumpOutcome {
        previous_version,
        decision,
        changes,
        lockfile_synced,
        warnings: Vec::new(),
    })
}

/// Rebuild the aggregate documentation tree and standalone function modules.
pub fn run_docs_workflow(root: &Path, config: &Config) -> Result<AggregationReport> {
    DocTreeAggregator::new(root, config.docs.clone())?.run()
}

/// Outcome of merging one README section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutcome {
    pub name: String,
    pub contributors: usize,
    /// Whether the target had the marker pair and was rewritten
    pub applied: bool,
}

/// Result of the README workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReadmeOutcome {
    pub target: PathBuf,
    pub sections: Vec<SectionOutcome>,
    /// Whether the target file content changed
    pub updated: bool,
    pub warnings: Vec<BoundaryWarning>,
}

/// Merge the configured sections of every package README into the SDK README.
///
/// Missing source READMEs are skipped. A missing target, or a target without a
/// section's markers, is reported and otherwise left alone.
pub fn run_readme_workflow(root: &Path, config: &Config) -> Result<ReadmeOutcome> {
    let readme = &config.readme;
    let target = root.join(&readme.target);

    let mut outcome = ReadmeOutcome {
        target: target.clone(),
        sections: Vec::new(),
        updated: false,
        warnings: Vec::new(),
    };

    if !target.is_file() {
        outcome
            .warnings
            .push(BoundaryWarning::TargetMissing { path: target });
        return Ok(outcome);
    }

    let documents = load_documents(root, &readme.sources)?;
    let original = fs::read_to_string(&target)?;
    let mut content = original.clone();

    for section in &readme.sections {
        let merger = SectionMerger::new(section.clone());
        let merged = merger.merge(&documents);
        debug!(section = %section.name, rendered = %merged.rendered, "merged section");
        outcome.warnings.extend(merged.warnings);

        let applied = match merger.apply(&content, &merged.rendered) {
            Some(updated) => {
                content = updated;
                true
            }
            None => {
                outcome.warnings.push(BoundaryWarning::MarkerPairMissing {
                    path: target.clone(),
                    section: section.name.clone(),
                });
                false
            }
        };

        outcome.sections.push(SectionOutcome {
            name: section.name.clone(),
            contributors: merged.contributors,
            applied,
        });
    }

    if content != original {
        fs::write(&target, &content)?;
        outcome.updated = true;
        info!(path = %target.display(), "README updated");
    }

    Ok(outcome)
}

fn load_documents(root: &Path, sources: &[PathBuf]) -> Result<Vec<SourceDocument>> {
    let mut documents = Vec::new();

    for source in sources {
        let path = root.join(source);
        if !path.is_file() {
            debug!(path = %path.display(), "source README missing, skipped");
            continue;
        }
        let content = fs::read_to_string(&path)?;
        documents.push(SourceDocument::new(path, content));
    }

    Ok(documents)
}
