//! Catalog manifest types and loading

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Relative location of the manifest inside a NixTrix checkout
const MANIFEST_REL_PATH: &str = "src/lib/packages/manifest.json";

/// Environment variable pointing at the NixTrix checkout
pub const CATALOG_DIR_ENV: &str = "NIXTRIX_DIR";

/// Fallback checkout location when the env var is unset
const DEFAULT_CATALOG_SUBDIR: &str = "Projects/nixtrix";

/// One catalog entry: where the unit lives and what it is for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Source path as recorded in the manifest (informational; the actual
    /// source directory is derived from the section and unit name)
    pub path: String,

    /// Human-readable description shown by `nixtrix list`
    pub description: String,
}

/// The catalog manifest: three disjoint namespaces of units
///
/// BTreeMap keeps listing order stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub components: BTreeMap<String, UnitEntry>,

    #[serde(default)]
    pub routes: BTreeMap<String, UnitEntry>,

    #[serde(default)]
    pub libs: BTreeMap<String, UnitEntry>,
}

impl Manifest {
    /// Parse a manifest from its JSON text
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// An open catalog: the checkout root plus its parsed manifest
///
/// Created per operation and dropped when the command finishes; there is no
/// process-wide catalog handle.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    manifest: Manifest,
}

impl Catalog {
    /// Open the catalog at the root named by `NIXTRIX_DIR`
    /// (default: `$HOME/Projects/nixtrix`)
    pub fn open() -> Result<Self> {
        Self::open_at(default_root())
    }

    /// Open the catalog at an explicit checkout root
    pub fn open_at(root: PathBuf) -> Result<Self> {
        let manifest_path = root.join(MANIFEST_REL_PATH);
        if !manifest_path.exists() {
            return Err(Error::ManifestMissing(manifest_path));
        }
        let text = std::fs::read_to_string(&manifest_path).map_err(|e| {
            Error::io(
                format!("failed to read {}", manifest_path.display()),
                e,
            )
        })?;
        let manifest = Manifest::parse(&text)?;
        Ok(Self { root, manifest })
    }

    /// The checkout root this catalog was opened at
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The parsed manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

/// Resolve the catalog root: env var override, else `$HOME/Projects/nixtrix`
pub fn default_root() -> PathBuf {
    match std::env::var_os(CATALOG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = std::env::var_os("HOME").unwrap_or_default();
            PathBuf::from(home).join(DEFAULT_CATALOG_SUBDIR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let text = r#"{
            "components": {
                "sticky-header": { "path": "components/sticky-header", "description": "Header that sticks" }
            },
            "routes": {
                "blog": { "path": "routes/blog", "description": "Blog pages" }
            },
            "libs": {
                "auth": { "path": "libs/auth", "description": "Auth helpers" }
            }
        }"#;

        let manifest = Manifest::parse(text).unwrap();
        assert_eq!(manifest.components.len(), 1);
        assert_eq!(manifest.routes.len(), 1);
        assert_eq!(manifest.libs.len(), 1);
        assert_eq!(
            manifest.components["sticky-header"].description,
            "Header that sticks"
        );
    }

    #[test]
    fn test_parse_manifest_with_missing_sections() {
        // Sections are optional; absent ones default to empty
        let manifest = Manifest::parse(r#"{ "components": {} }"#).unwrap();
        assert!(manifest.components.is_empty());
        assert!(manifest.routes.is_empty());
        assert!(manifest.libs.is_empty());
    }

    #[test]
    fn test_open_at_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::open_at(dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, Error::ManifestMissing(_)));
    }

    #[test]
    fn test_open_at_reads_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_dir = dir.path().join("src/lib/packages");
        std::fs::create_dir_all(&manifest_dir).unwrap();
        std::fs::write(
            manifest_dir.join("manifest.json"),
            r#"{ "routes": { "blog": { "path": "routes/blog", "description": "Blog" } } }"#,
        )
        .unwrap();

        let catalog = Catalog::open_at(dir.path().to_path_buf()).unwrap();
        assert!(catalog.manifest().routes.contains_key("blog"));
        assert_eq!(catalog.root(), dir.path());
    }
}
