//! `package.json` manifests: reading versions and pins, writing them back in place.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ReleaseError, Result};

const MANIFEST_FILE: &str = "package.json";

/// A JSON package manifest.
///
/// Keeps the whole document so unrelated fields and key order survive a rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Load a manifest. A missing file is a `NotFound` error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ReleaseError::not_found(path));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parse a manifest from text; `path` is where [`save`](Self::save) will write it.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        match serde_json::from_str::<Value>(content)? {
            Value::Object(document) => Ok(PackageManifest { path, document }),
            _ => Err(ReleaseError::config(format!(
                "manifest {} is not a JSON object",
                path.display()
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Result<&str> {
        self.string_field("name")
    }

    pub fn version(&self) -> Result<&str> {
        self.string_field("version")
    }

    pub fn set_version(&mut self, version: &str) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Dependency pins with any leading caret removed, keyed by dependency name
    pub fn dependency_pins(&self) -> BTreeMap<String, String> {
        self.dependencies()
            .map(|deps| {
                deps.iter()
                    .filter_map(|(name, pin)| {
                        pin.as_str()
                            .map(|pin| (name.clone(), pin.trim_start_matches('^').to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Pin every listed dependency that the manifest already depends on to `^<version>`.
    ///
    /// Dependencies the manifest does not know about are not added. Returns the names
    /// that were pinned.
    pub fn pin_dependencies(&mut self, versions: &BTreeMap<String, String>) -> Vec<String> {
        let Some(Value::Object(deps)) = self.document.get_mut("dependencies") else {
            return Vec::new();
        };

        let mut pinned = Vec::new();
        for (name, version) in versions {
            if let Some(pin) = deps.get_mut(name) {
                *pin = Value::String(format!("^{}", version));
                pinned.push(name.clone());
            }
        }
        pinned
    }

    /// Serialize with two-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    pub fn save(&self) -> Result<()> {
        let content = self.to_pretty_string()?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "wrote manifest");
        Ok(())
    }

    fn dependencies(&self) -> Option<&Map<String, Value>> {
        self.document.get("dependencies").and_then(Value::as_object)
    }

    fn string_field(&self, field: &str) -> Result<&str> {
        self.document
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ReleaseError::config(format!(
                    "manifest {} has no string field '{}'",
                    self.path.display(),
                    field
                ))
            })
    }
}

/// Read `name` and `version` from the manifest in each dependency directory.
pub fn discover_dependency_versions(
    root: &Path,
    dependency_dirs: &[PathBuf],
) -> Result<BTreeMap<String, String>> {
    let mut versions = BTreeMap::new();

    for dir in dependency_dirs {
        let manifest = PackageManifest::load(root.join(dir).join(MANIFEST_FILE))?;
        let name = manifest.name()?.to_string();
        let version = manifest.version()?.to_string();
        debug!(%name, %version, "discovered dependency");
        versions.insert(name, version);
    }

    Ok(versions)
}
