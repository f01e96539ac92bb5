//! Text transforms applied to every copied documentation file.

use regex::Regex;

use crate::config::DocsConfig;
use crate::error::{ReleaseError, Result};

/// A standalone function module referenced by a code sample
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncExport {
    pub sub_package: String,
    pub name: String,
}

impl FuncExport {
    /// File name of the generated re-export module
    pub fn file_name(&self) -> String {
        format!("{}.ts", self.name)
    }

    /// Contents of the re-export module
    pub fn module_source(&self, scope: &str) -> String {
        format!(
            "export * from \"{}/{}/funcs/{}.js\";\n",
            scope, self.sub_package, self.name
        )
    }
}

/// Rewrites per-package import paths so samples target the aggregate package
#[derive(Debug, Clone)]
pub struct ImportRewriter {
    scope: String,
    aggregate_package: String,
    namespace_token: String,
    package_pattern: Regex,
    funcs_pattern: Regex,
}

impl ImportRewriter {
    pub fn new(
        scope: &str,
        sub_packages: &[String],
        aggregate_package: &str,
        namespace_token: &str,
    ) -> Result<Self> {
        if sub_packages.is_empty() {
            return Err(ReleaseError::config("docs.sub_packages must not be empty"));
        }

        let alternatives = sub_packages
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let scope_re = regex::escape(scope);

        let package_pattern = Regex::new(&format!("{}/({})", scope_re, alternatives))
            .map_err(|e| ReleaseError::config(format!("invalid import pattern: {}", e)))?;
        let funcs_pattern =
            Regex::new(&format!(r"{}/({})/funcs/(\w+)\.js", scope_re, alternatives))
                .map_err(|e| ReleaseError::config(format!("invalid funcs pattern: {}", e)))?;

        Ok(ImportRewriter {
            scope: scope.to_string(),
            aggregate_package: aggregate_package.to_string(),
            namespace_token: namespace_token.to_string(),
            package_pattern,
            funcs_pattern,
        })
    }

    pub fn from_config(config: &DocsConfig) -> Result<Self> {
        Self::new(
            &config.import_scope,
            &config.sub_packages,
            &config.aggregate_package,
            &config.namespace_token,
        )
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Point every occurrence of the bare scope at the aggregate package.
    ///
    /// This is a plain substring replacement, applied to files of the per-package doc trees.
    pub fn rewrite_scope(&self, content: &str) -> String {
        content.replace(&self.scope, &self.aggregate_package)
    }

    /// Rewrite sub-package imports to the aggregate package and qualify the client namespace.
    ///
    /// For each sub-package referenced (in order of first reference), `<token>,` becomes
    /// `<token>.<sub>,`. Once the first sub-package has claimed every bare token, later ones
    /// find nothing left to annotate.
    pub fn rewrite_packages(&self, content: &str) -> String {
        let bare = format!("{},", self.namespace_token);
        let mut updated = content.to_string();

        for sub_package in self.referenced_sub_packages(content) {
            let qualified = format!("{}.{},", self.namespace_token, sub_package);
            updated = updated.replace(&bare, &qualified);
        }

        self.package_pattern
            .replace_all(&updated, self.aggregate_package.as_str())
            .into_owned()
    }

    /// Distinct sub-packages imported by `content`, in order of first appearance
    pub fn referenced_sub_packages(&self, content: &str) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for captures in self.package_pattern.captures_iter(content) {
            let name = &captures[1];
            if !seen.iter().any(|s| s == name) {
                seen.push(name.to_string());
            }
        }
        seen
    }

    /// Standalone function imports found in `content`
    pub fn func_exports(&self, content: &str) -> Vec<FuncExport> {
        self.funcs_pattern
            .captures_iter(content)
            .map(|captures| FuncExport {
                sub_package: captures[1].to_string(),
                name: captures[2].to_string(),
            })
            .collect()
    }
}
