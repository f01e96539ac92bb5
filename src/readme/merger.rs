use std::path::PathBuf;

use tracing::{debug, warn};

use crate::boundary::BoundaryWarning;
use crate::config::SectionConfig;
use crate::readme::section::{splice_region, MarkedSection};

/// Separator placed between the items of consecutive documents
pub const ITEMS_SEPARATOR: &str = "\n\n";

/// A README to pull a section out of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub content: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        SourceDocument {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A rendered section plus whatever had to be skipped to build it
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSection {
    pub rendered: String,
    /// Number of documents that contributed items
    pub contributors: usize,
    pub warnings: Vec<BoundaryWarning>,
}

/// Merges one marker-delimited section across several READMEs
#[derive(Debug, Clone)]
pub struct SectionMerger {
    section: SectionConfig,
}

impl SectionMerger {
    pub fn new(section: SectionConfig) -> Self {
        SectionMerger { section }
    }

    pub fn section(&self) -> &SectionConfig {
        &self.section
    }

    /// Items text of each document that has the section, in document order.
    ///
    /// Documents without the section contribute nothing. Documents whose disclosure
    /// block is malformed contribute nothing and produce a warning.
    pub fn collect_items(&self, documents: &[SourceDocument]) -> (Vec<String>, Vec<BoundaryWarning>) {
        let mut items = Vec::new();
        let mut warnings = Vec::new();

        for document in documents {
            let Some(section) = MarkedSection::extract(
                &document.content,
                &self.section.start_marker,
                &self.section.end_marker,
            ) else {
                debug!(
                    path = %document.path.display(),
                    section = %self.section.name,
                    "document has no such section"
                );
                continue;
            };

            match section.items(&self.section.open_tag) {
                Ok(text) if text.is_empty() => {}
                Ok(text) => items.push(text),
                Err(e) => {
                    warn!(path = %document.path.display(), section = %self.section.name, "{}", e);
                    warnings.push(BoundaryWarning::MalformedSection {
                        path: document.path.clone(),
                        section: self.section.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        (items, warnings)
    }

    /// Wrap joined items in the section template
    pub fn render(&self, items: &[String]) -> String {
        render_template(&self.section.template, &items.join(ITEMS_SEPARATOR))
    }

    pub fn merge(&self, documents: &[SourceDocument]) -> MergedSection {
        let (items, warnings) = self.collect_items(documents);
        MergedSection {
            rendered: self.render(&items),
            contributors: items.len(),
            warnings,
        }
    }

    /// Splice a rendered section into `target`. `None` when the target lacks the markers.
    pub fn apply(&self, target: &str, rendered: &str) -> Option<String> {
        splice_region(
            target,
            &self.section.start_marker,
            &self.section.end_marker,
            rendered,
        )
    }
}

/// Merge one section across `documents` and render it with `template`.
pub fn merge_sections(
    documents: &[SourceDocument],
    start_marker: &str,
    end_marker: &str,
    open_tag: &str,
    template: &str,
) -> String {
    let merger = SectionMerger::new(SectionConfig {
        name: start_marker.to_string(),
        start_marker: start_marker.to_string(),
        end_marker: end_marker.to_string(),
        open_tag: open_tag.to_string(),
        template: template.to_string(),
    });
    merger.merge(documents).rendered
}

fn render_template(template: &str, items: &str) -> String {
    template.replacen("{}", items, 1)
}
