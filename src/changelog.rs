//! Release notes: one entry per release, newest first.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::Result;

/// Separator between consecutive entries in the release notes
pub const ENTRY_SEPARATOR: &str = "\n\n---\n\n";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A dependency whose version moved in this release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChange {
    pub name: String,
    /// Previously pinned version; `None` when the SDK did not pin it before
    pub previous: Option<String>,
    pub current: String,
}

impl DependencyChange {
    pub fn new(name: impl Into<String>, previous: Option<String>, current: impl Into<String>) -> Self {
        DependencyChange {
            name: name.into(),
            previous,
            current: current.into(),
        }
    }
}

/// A single release notes entry
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseEntry {
    pub timestamp: NaiveDateTime,
    pub version: String,
    pub changes: Vec<DependencyChange>,
    pub generated_label: String,
    pub package_label: String,
    pub registry_url: String,
}

impl ReleaseEntry {
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {}\n\n### Changes\n\nBased on:\n",
            self.timestamp.format(TIMESTAMP_FORMAT)
        ));

        if self.changes.is_empty() {
            out.push_str("- Manually triggered: No dependency changes detected\n\n");
        } else {
            let lines: Vec<String> = self
                .changes
                .iter()
                .map(|change| {
                    format!(
                        "- {} bumped from {} to {}",
                        change.name,
                        change.previous.as_deref().unwrap_or("N/A"),
                        change.current
                    )
                })
                .collect();
            out.push_str(&lines.join("\n"));
            out.push_str("\n\n");
        }

        out.push_str(&format!(
            "### Generated\n\n- [{} v{}] {}\n\n### Releases\n\n- [NPM v{}] {} - {}",
            self.generated_label,
            self.version,
            self.package_label,
            self.version,
            self.registry_url,
            self.package_label
        ));

        out
    }

    /// Put this entry above the existing notes, creating the file if needed.
    pub fn prepend_to(&self, path: &Path) -> Result<()> {
        let entry = self.render();

        let content = if path.exists() {
            let existing = fs::read_to_string(path)?;
            format!("{}{}{}", entry, ENTRY_SEPARATOR, existing)
        } else {
            entry
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        debug!(path = %path.display(), version = %self.version, "prepended release entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn entry(changes: Vec<DependencyChange>) -> ReleaseEntry {
        ReleaseEntry {
            timestamp: NaiveDate::from_ymd_opt(2024, 11, 5)
                .unwrap()
                .and_hms_opt(14, 3, 9)
                .unwrap(),
            version: "1.3.0".to_string(),
            changes,
            generated_label: "typescript".to_string(),
            package_label: "sdk".to_string(),
            registry_url: "https://www.npmjs.com/package/@avalanche-sdk/sdk/v/1.3.0".to_string(),
        }
    }

    #[test]
    fn test_render_with_changes() {
        let rendered = entry(vec![
            DependencyChange::new("@avalanche-sdk/data", Some("0.1.0".to_string()), "0.2.0"),
            DependencyChange::new("@avalanche-sdk/webhooks", None, "0.1.0"),
        ])
        .render();

        let expected = "## 2024-11-05 14:03:09\n\n\
### Changes\n\n\
Based on:\n\
- @avalanche-sdk/data bumped from 0.1.0 to 0.2.0\n\
- @avalanche-sdk/webhooks bumped from N/A to 0.1.0\n\n\
### Generated\n\n\
- [typescript v1.3.0] sdk\n\n\
### Releases\n\n\
- [NPM v1.3.0] https://www.npmjs.com/package/@avalanche-sdk/sdk/v/1.3.0 - sdk";

        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_manual_placeholder() {
        let rendered = entry(Vec::new()).render();
        assert!(rendered.contains("- Manually triggered: No dependency changes detected\n\n### Generated"));
    }

    #[test]
    fn test_prepend_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("RELEASE.md");

        entry(Vec::new()).prepend_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("## 2024-11-05 14:03:09"));
        assert!(!content.contains("---"));
    }

    #[test]
    fn test_prepend_keeps_existing_below_separator() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("RELEASE.md");
        fs::write(&path, "## older entry\n").unwrap();

        entry(Vec::new()).prepend_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let (newest, rest) = content.split_once(ENTRY_SEPARATOR).unwrap();
        assert!(newest.starts_with("## 2024-11-05"));
        assert_eq!(rest, "## older entry\n");
    }
}
