use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Name of the configuration file looked up in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "sdk-release.toml";

/// Represents the complete configuration for sdk-release.
///
/// Every path is relative to the root directory the workflows run in, unless absolute.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub readme: ReadmeConfig,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("sdk/package.json")
}

fn default_dependency_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("data"),
        PathBuf::from("webhooks"),
        PathBuf::from("metrics"),
    ]
}

fn default_changelog() -> PathBuf {
    PathBuf::from("sdk/RELEASE.md")
}

fn default_registry_url() -> String {
    "https://www.npmjs.com/package/@avalanche-sdk/sdk/v/{version}".to_string()
}

fn default_generated_label() -> String {
    "typescript".to_string()
}

fn default_package_label() -> String {
    "sdk".to_string()
}

fn default_lockfile_command() -> Vec<String> {
    vec!["npm".to_string(), "install".to_string()]
}

fn default_lockfile_dir() -> PathBuf {
    PathBuf::from("sdk")
}

/// Settings for the version bump workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Manifest of the aggregate SDK package
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Directories of the sub-packages, each holding a `package.json`
    #[serde(default = "default_dependency_dirs")]
    pub dependency_dirs: Vec<PathBuf>,

    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,

    /// Registry page for a release; `{version}` is replaced with the new version
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    #[serde(default = "default_generated_label")]
    pub generated_label: String,

    #[serde(default = "default_package_label")]
    pub package_label: String,

    /// Program and arguments that resync the lockfile. Empty disables the resync.
    #[serde(default = "default_lockfile_command")]
    pub lockfile_command: Vec<String>,

    #[serde(default = "default_lockfile_dir")]
    pub lockfile_dir: PathBuf,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            manifest: default_manifest(),
            dependency_dirs: default_dependency_dirs(),
            changelog: default_changelog(),
            registry_url: default_registry_url(),
            generated_label: default_generated_label(),
            package_label: default_package_label(),
            lockfile_command: default_lockfile_command(),
            lockfile_dir: default_lockfile_dir(),
        }
    }
}

impl ReleaseConfig {
    /// Registry URL for a concrete version
    pub fn registry_url_for(&self, version: &str) -> String {
        self.registry_url.replace("{version}", version)
    }
}

/// A documentation source directory and where its copy lands
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DocMapping {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl DocMapping {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        DocMapping {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

fn default_doc_mappings() -> Vec<DocMapping> {
    vec![
        DocMapping::new("data/docs", "sdk/docs/data"),
        DocMapping::new("webhooks/docs", "sdk/docs/webhooks"),
        DocMapping::new("metrics/docs", "sdk/docs/metrics"),
    ]
}

fn default_sdk_docs_dir() -> PathBuf {
    PathBuf::from("sdk/docs/sdks")
}

fn default_errors_docs_dir() -> PathBuf {
    PathBuf::from("sdk/docs/errors")
}

fn default_funcs_dir() -> PathBuf {
    PathBuf::from("sdk/src/funcs")
}

fn default_sdk_subtree() -> String {
    "sdks".to_string()
}

fn default_errors_subtree() -> String {
    "models/errors".to_string()
}

fn default_import_scope() -> String {
    "@avalanche-sdk".to_string()
}

fn default_aggregate_package() -> String {
    "@avalanche-sdk/sdk".to_string()
}

fn default_sub_packages() -> Vec<String> {
    vec![
        "metrics".to_string(),
        "data".to_string(),
        "webhooks".to_string(),
    ]
}

fn default_namespace_token() -> String {
    "avalanche".to_string()
}

/// Settings for documentation aggregation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DocsConfig {
    #[serde(default = "default_doc_mappings")]
    pub mappings: Vec<DocMapping>,

    /// Flattened copy of every package's `sdks` subtree
    #[serde(default = "default_sdk_docs_dir")]
    pub sdk_docs_dir: PathBuf,

    /// Flattened copy of every package's error model docs
    #[serde(default = "default_errors_docs_dir")]
    pub errors_docs_dir: PathBuf,

    /// Where standalone function re-export modules are generated
    #[serde(default = "default_funcs_dir")]
    pub funcs_dir: PathBuf,

    #[serde(default = "default_sdk_subtree")]
    pub sdk_subtree: String,

    #[serde(default = "default_errors_subtree")]
    pub errors_subtree: String,

    /// Import scope shared by all packages, e.g. `@avalanche-sdk`
    #[serde(default = "default_import_scope")]
    pub import_scope: String,

    /// Import path of the aggregate package
    #[serde(default = "default_aggregate_package")]
    pub aggregate_package: String,

    #[serde(default = "default_sub_packages")]
    pub sub_packages: Vec<String>,

    /// Client namespace in code samples that gets annotated with the sub-package name
    #[serde(default = "default_namespace_token")]
    pub namespace_token: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            mappings: default_doc_mappings(),
            sdk_docs_dir: default_sdk_docs_dir(),
            errors_docs_dir: default_errors_docs_dir(),
            funcs_dir: default_funcs_dir(),
            sdk_subtree: default_sdk_subtree(),
            errors_subtree: default_errors_subtree(),
            import_scope: default_import_scope(),
            aggregate_package: default_aggregate_package(),
            sub_packages: default_sub_packages(),
            namespace_token: default_namespace_token(),
        }
    }
}

pub const OPERATIONS_START: &str =
    "<!-- Start Available Resources and Operations [operations] -->";
pub const OPERATIONS_END: &str = "<!-- End Available Resources and Operations [operations] -->";
pub const STANDALONE_START: &str = "<!-- Start Standalone functions [standalone-funcs] -->";
pub const STANDALONE_END: &str = "<!-- End Standalone functions [standalone-funcs] -->";

pub const OPERATIONS_TEMPLATE: &str = concat!(
    "\n",
    "## Available Resources and Operations\n",
    "\n",
    "<details open>\n",
    "<summary>Available methods</summary> \n",
    "\n",
    "{} \n",
    "\n",
    "</details>\n",
);

pub const STANDALONE_TEMPLATE: &str = concat!(
    "\n",
    "## Standalone functions\n",
    "\n",
    "All the methods listed above are available as standalone functions. These\n",
    "functions are ideal for use in applications running in the browser, serverless\n",
    "runtimes or other environments where application bundle size is a primary\n",
    "concern. When using a bundler to build your application, all unused\n",
    "functionality will be either excluded from the final bundle or tree-shaken away.\n",
    "\n",
    "To read more about standalone functions, check [FUNCTIONS.md](./FUNCTIONS.md).\n",
    "\n",
    "<details>\n",
    "\n",
    "<summary>Available standalone functions</summary>\n",
    "\n",
    "{}\n",
    "\n",
    "</details>\n",
);

/// One marker-delimited README section and how to rebuild it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SectionConfig {
    pub name: String,
    pub start_marker: String,
    pub end_marker: String,

    /// Opening tag of the disclosure block holding the items
    pub open_tag: String,

    /// Rendered section; must contain exactly one `{}` placeholder
    pub template: String,
}

impl SectionConfig {
    pub fn operations() -> Self {
        SectionConfig {
            name: "operations".to_string(),
            start_marker: OPERATIONS_START.to_string(),
            end_marker: OPERATIONS_END.to_string(),
            open_tag: "<details open>".to_string(),
            template: OPERATIONS_TEMPLATE.to_string(),
        }
    }

    pub fn standalone_funcs() -> Self {
        SectionConfig {
            name: "standalone-funcs".to_string(),
            start_marker: STANDALONE_START.to_string(),
            end_marker: STANDALONE_END.to_string(),
            open_tag: "<details>".to_string(),
            template: STANDALONE_TEMPLATE.to_string(),
        }
    }
}

fn default_readme_sources() -> Vec<PathBuf> {
    vec![
        PathBuf::from("data/README.md"),
        PathBuf::from("metrics/README.md"),
        PathBuf::from("webhooks/README.md"),
    ]
}

fn default_readme_target() -> PathBuf {
    PathBuf::from("sdk/README.md")
}

fn default_sections() -> Vec<SectionConfig> {
    vec![SectionConfig::operations(), SectionConfig::standalone_funcs()]
}

/// Settings for README section merging.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReadmeConfig {
    /// Source READMEs, merged in this order
    #[serde(default = "default_readme_sources")]
    pub sources: Vec<PathBuf>,

    #[serde(default = "default_readme_target")]
    pub target: PathBuf,

    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        ReadmeConfig {
            sources: default_readme_sources(),
            target: default_readme_target(),
            sections: default_sections(),
        }
    }
}

impl Config {
    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for section in &self.readme.sections {
            let placeholders = section.template.matches("{}").count();
            if placeholders != 1 {
                return Err(ReleaseError::config(format!(
                    "template for section '{}' must contain exactly one '{{}}' placeholder, found {}",
                    section.name, placeholders
                )));
            }
            if section.start_marker.is_empty() || section.end_marker.is_empty() {
                return Err(ReleaseError::config(format!(
                    "section '{}' has an empty marker",
                    section.name
                )));
            }
        }

        if !self.release.registry_url.contains("{version}") {
            return Err(ReleaseError::config(
                "release.registry_url must contain a '{version}' placeholder",
            ));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `sdk-release.toml` in current directory
/// 3. `sdk-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        if !path.exists() {
            return Err(ReleaseError::not_found(path));
        }
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_registry_url_for() {
        let release = ReleaseConfig::default();
        assert_eq!(
            release.registry_url_for("1.2.0"),
            "https://www.npmjs.com/package/@avalanche-sdk/sdk/v/1.2.0"
        );
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = Config::default();
        config.readme.sections[0].template = "no placeholder".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("operations"));
    }

    #[test]
    fn test_template_with_two_placeholders_rejected() {
        let mut config = Config::default();
        config.readme.sections[1].template = "{} and {}".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }
}
