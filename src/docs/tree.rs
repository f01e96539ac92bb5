//! Documentation tree aggregation.
//!
//! Every destination is rebuilt in a staging directory next to it and only swapped in
//! once all sources have been copied, so a failed run leaves the previous trees intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::boundary::BoundaryWarning;
use crate::config::{DocMapping, DocsConfig};
use crate::docs::rewrite::ImportRewriter;
use crate::error::{ReleaseError, Result};

/// What a documentation run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationReport {
    /// Final paths of every file written, in write order
    pub written: Vec<PathBuf>,
    /// Final paths of the generated standalone function modules
    pub func_modules: Vec<PathBuf>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Copies per-package documentation into the aggregate SDK tree
#[derive(Debug)]
pub struct DocTreeAggregator {
    root: PathBuf,
    config: DocsConfig,
    rewriter: ImportRewriter,
}

impl DocTreeAggregator {
    pub fn new(root: impl Into<PathBuf>, config: DocsConfig) -> Result<Self> {
        let rewriter = ImportRewriter::from_config(&config)?;
        Ok(DocTreeAggregator {
            root: root.into(),
            config,
            rewriter,
        })
    }

    /// Rebuild every destination from its sources.
    pub fn run(&self) -> Result<AggregationReport> {
        let mut destinations = vec![
            self.root.join(&self.config.sdk_docs_dir),
            self.root.join(&self.config.errors_docs_dir),
            self.root.join(&self.config.funcs_dir),
        ];
        destinations.extend(
            self.config
                .mappings
                .iter()
                .map(|mapping| self.root.join(&mapping.destination)),
        );
        let staging = Staging::prepare(&destinations)?;

        let mut report = AggregationReport::default();
        for mapping in &self.config.mappings {
            self.copy_mapping(mapping, &staging, &mut report)?;
        }

        staging.commit()?;
        info!(
            files = report.written.len(),
            funcs = report.func_modules.len(),
            "documentation aggregated"
        );
        Ok(report)
    }

    fn copy_mapping(
        &self,
        mapping: &DocMapping,
        staging: &Staging,
        report: &mut AggregationReport,
    ) -> Result<()> {
        let source = self.root.join(&mapping.source);
        if !source.is_dir() {
            report.warnings.push(BoundaryWarning::DocSourceMissing { path: source });
            return Ok(());
        }

        let destination = self.root.join(&mapping.destination);
        let sdk_docs = self.root.join(&self.config.sdk_docs_dir);
        let errors_docs = self.root.join(&self.config.errors_docs_dir);
        let sdk_subtree = Path::new(&self.config.sdk_subtree);
        let errors_subtree = Path::new(&self.config.errors_subtree);

        for entry in WalkDir::new(&source).sort_by_file_name() {
            let entry = entry.map_err(|e| ReleaseError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&source)
                .map_err(|e| ReleaseError::config(e.to_string()))?;
            let bytes = fs::read(entry.path())?;
            let text = String::from_utf8(bytes);

            if rel.starts_with(sdk_subtree) {
                if let Ok(content) = &text {
                    self.write_func_modules(content, staging, report)?;
                }
                let stripped = rel.strip_prefix(sdk_subtree).unwrap_or(rel);
                let out = transform(&text, |c| self.rewriter.rewrite_packages(c));
                staging.write(&sdk_docs, stripped, &out, report)?;
            }

            if rel.starts_with(errors_subtree) {
                let stripped = rel.strip_prefix(errors_subtree).unwrap_or(rel);
                let out = transform(&text, |c| self.rewriter.rewrite_packages(c));
                staging.write(&errors_docs, stripped, &out, report)?;
            }

            let out = transform(&text, |c| self.rewriter.rewrite_scope(c));
            staging.write(&destination, rel, &out, report)?;
        }

        Ok(())
    }

    fn write_func_modules(
        &self,
        content: &str,
        staging: &Staging,
        report: &mut AggregationReport,
    ) -> Result<()> {
        let funcs_dir = self.root.join(&self.config.funcs_dir);

        for export in self.rewriter.func_exports(content) {
            let file_name = export.file_name();
            let source = export.module_source(self.rewriter.scope());
            staging.write(&funcs_dir, Path::new(&file_name), source.as_bytes(), report)?;

            let final_path = funcs_dir.join(&file_name);
            if !report.func_modules.contains(&final_path) {
                report.func_modules.push(final_path);
            }
        }

        Ok(())
    }
}

/// Apply a text rewrite to UTF-8 content; anything else is copied byte for byte.
fn transform(
    text: &std::result::Result<String, std::string::FromUtf8Error>,
    rewrite: impl Fn(&str) -> String,
) -> Vec<u8> {
    match text {
        Ok(content) => rewrite(content).into_bytes(),
        Err(e) => e.as_bytes().to_vec(),
    }
}

/// Staging directories keyed by the outermost destinations they will replace.
///
/// A destination nested inside another is staged inside the outer one's staging
/// directory and lands with it on commit.
#[derive(Debug, Default)]
struct Staging {
    dirs: BTreeMap<PathBuf, TempDir>,
}

impl Staging {
    /// Start empty staging directories for `destinations`, next to them.
    fn prepare(destinations: &[PathBuf]) -> Result<Self> {
        let mut ordered: Vec<&PathBuf> = destinations.iter().collect();
        ordered.sort_by_key(|path| path.components().count());

        let mut staging = Staging::default();
        for destination in ordered {
            if let Some(staged) = staging.resolve(destination) {
                fs::create_dir_all(&staged)?;
                continue;
            }

            let parent = parent_dir(destination)?;
            fs::create_dir_all(&parent)?;
            let dir = tempfile::Builder::new()
                .prefix(".sdk-release-staging-")
                .tempdir_in(&parent)?;
            debug!(destination = %destination.display(), staging = %dir.path().display(), "staging");
            staging.dirs.insert(destination.clone(), dir);
        }
        Ok(staging)
    }

    /// Staged location standing in for `destination`
    fn resolve(&self, destination: &Path) -> Option<PathBuf> {
        self.dirs.iter().find_map(|(outer, dir)| {
            destination
                .strip_prefix(outer)
                .ok()
                .map(|rel| dir.path().join(rel))
        })
    }

    fn write(
        &self,
        destination: &Path,
        rel: &Path,
        content: &[u8],
        report: &mut AggregationReport,
    ) -> Result<()> {
        let staged_root = self.resolve(destination).ok_or_else(|| {
            ReleaseError::config(format!(
                "no staging directory for '{}'",
                destination.display()
            ))
        })?;

        let staged = staged_root.join(rel);
        if let Some(parent) = staged.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&staged, content)?;

        let final_path = destination.join(rel);
        debug!(path = %final_path.display(), "copied");
        report.written.push(final_path);
        Ok(())
    }

    /// Swap every outermost staged directory into place.
    fn commit(self) -> Result<()> {
        for (destination, staged) in self.dirs {
            swap_into_place(staged, &destination)?;
        }
        Ok(())
    }
}

/// Replace `destination` with the staged directory.
///
/// The old tree is moved aside first and restored if the final rename fails.
fn swap_into_place(staged: TempDir, destination: &Path) -> Result<()> {
    let parent = parent_dir(destination)?;
    let trash = tempfile::Builder::new()
        .prefix(".sdk-release-old-")
        .tempdir_in(&parent)?;
    let old = trash.path().join("previous");

    let had_previous = destination.exists();
    if had_previous {
        fs::rename(destination, &old)?;
    }

    if let Err(e) = fs::rename(staged.path(), destination) {
        if had_previous {
            fs::rename(&old, destination)?;
        }
        return Err(e.into());
    }

    // `staged` now points at a path that no longer exists; dropping it is a no-op.
    drop(staged);
    drop(trash);
    Ok(())
}

fn parent_dir(path: &Path) -> Result<PathBuf> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        Some(_) => Ok(PathBuf::from(".")),
        None => Err(ReleaseError::config(format!(
            "'{}' cannot be used as a documentation destination",
            path.display()
        ))),
    }
}
