//! Catalog manifest parsing and unit resolution
//!
//! The catalog is a JSON manifest inside a NixTrix checkout with three unit
//! namespaces (components, routes, libs). A `Catalog` is opened per command
//! and resolves names to concrete source directories.

pub mod manifest;
pub mod resolver;

use colored::Colorize;

pub use manifest::{default_root, Catalog, Manifest, UnitEntry, CATALOG_DIR_ENV};
pub use resolver::{Unit, UnitKind};

/// Print the catalog listing for `nixtrix list`
pub fn print_listing(catalog: &Catalog) {
    let manifest = catalog.manifest();

    println!("{}", "Available packages:".bold());
    println!();

    let sections = [
        ("Components:", &manifest.components),
        ("Routes:", &manifest.routes),
        ("Libraries:", &manifest.libs),
    ];

    for (heading, section) in sections {
        if section.is_empty() {
            continue;
        }
        println!("{}", heading.cyan().bold());
        for (name, entry) in section {
            println!("  {} - {}", name.green(), entry.description);
        }
        println!();
    }
}
