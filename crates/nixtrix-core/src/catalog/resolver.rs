//! Unit kinds and name resolution

use super::manifest::Catalog;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Directory under the checkout root that holds package sources
const PACKAGES_REL_PATH: &str = "src/lib/packages";

/// The three unit namespaces of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Component,
    Route,
    Library,
}

impl UnitKind {
    /// Manifest section name for this kind
    pub fn section(&self) -> &'static str {
        match self {
            UnitKind::Component => "components",
            UnitKind::Route => "routes",
            UnitKind::Library => "libs",
        }
    }

    /// Human-readable name for messages
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitKind::Component => "component",
            UnitKind::Route => "route",
            UnitKind::Library => "library",
        }
    }

    /// Destination directory in the consuming project, relative to CWD
    pub fn dest_dir(&self, name: &str) -> PathBuf {
        match self {
            UnitKind::Route => PathBuf::from("src/routes").join(name),
            UnitKind::Component => PathBuf::from("src/lib/components").join(name),
            UnitKind::Library => PathBuf::from("src/lib").join(name),
        }
    }

    /// Import path used by layout edits
    pub fn import_path(&self, name: &str) -> String {
        match self {
            UnitKind::Route => format!("./{}", name),
            UnitKind::Component => format!("$lib/components/{}", name),
            UnitKind::Library => format!("$lib/libs/{}", name),
        }
    }

    /// Whether adding this kind offers layout integration
    pub fn wants_layout(&self) -> bool {
        matches!(self, UnitKind::Component | UnitKind::Route)
    }
}

/// A resolved catalog entry
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub kind: UnitKind,
    pub source: PathBuf,
    pub description: String,
}

impl Catalog {
    /// Resolve a unit name against the three namespaces
    ///
    /// Lookup is exact and case-sensitive, checked in fixed priority order:
    /// components, then routes, then libs. A name present in more than one
    /// namespace resolves to the first match.
    pub fn resolve(&self, name: &str) -> Result<Unit> {
        let sections = [
            (UnitKind::Component, &self.manifest().components),
            (UnitKind::Route, &self.manifest().routes),
            (UnitKind::Library, &self.manifest().libs),
        ];

        for (kind, section) in sections {
            if let Some(entry) = section.get(name) {
                return Ok(Unit {
                    name: name.to_string(),
                    kind,
                    source: self
                        .root()
                        .join(PACKAGES_REL_PATH)
                        .join(kind.section())
                        .join(name),
                    description: entry.description.clone(),
                });
            }
        }

        Err(Error::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::manifest::{Manifest, UnitEntry};

    fn entry(desc: &str) -> UnitEntry {
        UnitEntry {
            path: String::new(),
            description: desc.to_string(),
        }
    }

    fn catalog_with(manifest: Manifest) -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let manifest_dir = dir.path().join("src/lib/packages");
        std::fs::create_dir_all(&manifest_dir).unwrap();
        std::fs::write(
            manifest_dir.join("manifest.json"),
            serde_json::to_string(&manifest).unwrap(),
        )
        .unwrap();
        let catalog = Catalog::open_at(dir.path().to_path_buf()).unwrap();
        (dir, catalog)
    }

    #[test]
    fn test_resolve_each_namespace() {
        let mut manifest = Manifest::default();
        manifest.components.insert("header".into(), entry("A header"));
        manifest.routes.insert("blog".into(), entry("Blog pages"));
        manifest.libs.insert("auth".into(), entry("Auth helpers"));
        let (_dir, catalog) = catalog_with(manifest);

        assert_eq!(catalog.resolve("header").unwrap().kind, UnitKind::Component);
        assert_eq!(catalog.resolve("blog").unwrap().kind, UnitKind::Route);
        assert_eq!(catalog.resolve("auth").unwrap().kind, UnitKind::Library);
    }

    #[test]
    fn test_resolve_priority_components_first() {
        // A name present in several namespaces resolves to components
        let mut manifest = Manifest::default();
        manifest.components.insert("blog".into(), entry("Blog widget"));
        manifest.routes.insert("blog".into(), entry("Blog pages"));
        let (_dir, catalog) = catalog_with(manifest);

        let unit = catalog.resolve("blog").unwrap();
        assert_eq!(unit.kind, UnitKind::Component);
        assert_eq!(unit.description, "Blog widget");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let mut manifest = Manifest::default();
        manifest.components.insert("header".into(), entry("A header"));
        let (_dir, catalog) = catalog_with(manifest);

        assert!(matches!(
            catalog.resolve("Header"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let (_dir, catalog) = catalog_with(Manifest::default());
        let err = catalog.resolve("missing").unwrap_err();
        assert!(err.to_string().contains("nixtrix list"));
    }

    #[test]
    fn test_resolved_source_path() {
        let mut manifest = Manifest::default();
        manifest.routes.insert("blog".into(), entry("Blog pages"));
        let (_dir, catalog) = catalog_with(manifest);

        let unit = catalog.resolve("blog").unwrap();
        assert!(unit
            .source
            .ends_with("src/lib/packages/routes/blog"));
    }

    #[test]
    fn test_dest_dir_mapping() {
        assert_eq!(
            UnitKind::Route.dest_dir("blog"),
            PathBuf::from("src/routes/blog")
        );
        assert_eq!(
            UnitKind::Component.dest_dir("header"),
            PathBuf::from("src/lib/components/header")
        );
        assert_eq!(
            UnitKind::Library.dest_dir("auth"),
            PathBuf::from("src/lib/auth")
        );
    }

    #[test]
    fn test_wants_layout_per_kind() {
        assert!(UnitKind::Component.wants_layout());
        assert!(UnitKind::Route.wants_layout());
        assert!(!UnitKind::Library.wants_layout());
    }

    #[test]
    fn test_import_path_mapping() {
        assert_eq!(UnitKind::Route.import_path("blog"), "./blog");
        assert_eq!(
            UnitKind::Component.import_path("header"),
            "$lib/components/header"
        );
        assert_eq!(UnitKind::Library.import_path("auth"), "$lib/libs/auth");
    }
}
