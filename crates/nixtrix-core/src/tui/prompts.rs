//! Charm-style CLI prompts for the add workflow using cliclack

use crate::catalog::{Catalog, Unit};
use crate::layout::{inject, manual_instructions, EditOutcome, InjectStrategy};
use crate::{layout, packages};
use anyhow::{Context, Result};
use std::path::Path;

/// Non-interactive knobs for the add command
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    /// Preselected layout strategy (skips the prompt)
    pub strategy: Option<InjectStrategy>,

    /// Auto-confirm all prompts with their defaults (non-interactive mode)
    pub yes: bool,
}

/// Run the interactive add workflow: resolve, copy, then offer layout
/// integration for component and route units
pub async fn run_add(name: &str, args: AddArgs) -> Result<()> {
    let project_root = std::env::current_dir().context("Failed to resolve current directory")?;
    let catalog = Catalog::open()?;
    run_add_in(&catalog, &project_root, name, args).await
}

/// Add workflow against explicit catalog and project roots
///
/// Layout integration only runs for component and route units, and only
/// when the project actually has a layout template; an absent layout
/// degrades to a copy-only add.
pub async fn run_add_in(
    catalog: &Catalog,
    project_root: &Path,
    name: &str,
    args: AddArgs,
) -> Result<()> {
    cliclack::intro("nixtrix")?;

    let unit = catalog.resolve(name)?;

    cliclack::log::info(format!(
        "Adding {} ({})",
        unit.name,
        unit.kind.display_name()
    ))?;

    let dest = project_root.join(unit.kind.dest_dir(&unit.name));
    let copied = packages::materialize(&unit.source, &dest).await?;
    cliclack::log::success(format!("Copied {} file(s) to {}/", copied, dest.display()))?;

    if unit.kind.wants_layout() {
        match layout::locate_in(project_root) {
            Some(layout_path) => integrate_layout(&layout_path, &unit, &args).await?,
            None => {
                cliclack::log::info("No +layout.svelte found. Skipping auto-injection.")?;
            }
        }
    }

    cliclack::outro(format!("{} added", unit.name))?;
    Ok(())
}

async fn integrate_layout(layout_path: &Path, unit: &Unit, args: &AddArgs) -> Result<()> {
    let strategy = select_strategy(layout_path, &unit.name, args)?;

    match strategy {
        InjectStrategy::ManualOnly => {
            cliclack::log::info(manual_instructions(&unit.name, unit.kind))?;
            return Ok(());
        }
        InjectStrategy::Skip => {
            cliclack::log::info("Skipped layout integration.")?;
            return Ok(());
        }
        InjectStrategy::AutoEdit | InjectStrategy::MarkerBlock => {}
    }

    let text = tokio::fs::read_to_string(layout_path)
        .await
        .with_context(|| format!("Failed to read {}", layout_path.display()))?;

    let report = inject(&text, &unit.name, unit.kind, strategy);

    // Idempotence short-circuits are informational, not errors
    if strategy == InjectStrategy::MarkerBlock && report.import == EditOutcome::AlreadyPresent {
        cliclack::log::info("Marker already exists.")?;
    } else {
        if report.import == EditOutcome::AlreadyPresent {
            cliclack::log::info("Import already exists.")?;
        }
        if report.render == EditOutcome::AlreadyPresent {
            cliclack::log::info("Component already rendered.")?;
        }
    }

    if report.changed() {
        tokio::fs::write(layout_path, &report.text)
            .await
            .with_context(|| format!("Failed to write {}", layout_path.display()))?;
        cliclack::log::success(format!(
            "Added {} to {}",
            unit.name,
            layout_path.display()
        ))?;
    }

    Ok(())
}

/// Pick the injection strategy: preset flag, `--yes` default, or a select
/// prompt with AutoEdit as the default answer
fn select_strategy(
    layout_path: &Path,
    unit_name: &str,
    args: &AddArgs,
) -> Result<InjectStrategy> {
    if let Some(strategy) = args.strategy {
        cliclack::log::info(format!("Using preset strategy: {:?}", strategy))?;
        return Ok(strategy);
    }

    if args.yes {
        cliclack::log::info("Auto-injecting (--yes mode)")?;
        return Ok(InjectStrategy::AutoEdit);
    }

    let strategy: InjectStrategy = cliclack::select(format!(
        "Found {}. How would you like to add {}?",
        layout_path.display(),
        unit_name
    ))
    .item(
        InjectStrategy::AutoEdit,
        "Auto-inject",
        "add import and render",
    )
    .item(
        InjectStrategy::MarkerBlock,
        "Helper comments",
        "<!-- nixtrix:import --> block",
    )
    .item(
        InjectStrategy::ManualOnly,
        "Manual",
        "show instructions only",
    )
    .item(InjectStrategy::Skip, "Skip", "no layout integration")
    .initial_value(InjectStrategy::AutoEdit)
    .interact()?;

    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT_REL: &str = "src/routes/+layout.svelte";

    /// Seed a catalog with one unit per namespace, each holding one file
    fn seeded_catalog() -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let packages = dir.path().join("src/lib/packages");

        std::fs::create_dir_all(packages.join("components/widget")).unwrap();
        std::fs::write(packages.join("components/widget/index.svelte"), "<h1>w</h1>").unwrap();
        std::fs::create_dir_all(packages.join("libs/auth")).unwrap();
        std::fs::write(packages.join("libs/auth/index.ts"), "export {};").unwrap();

        std::fs::write(
            packages.join("manifest.json"),
            r#"{
                "components": { "widget": { "path": "components/widget", "description": "A widget" } },
                "libs": { "auth": { "path": "libs/auth", "description": "Auth helpers" } }
            }"#,
        )
        .unwrap();

        let catalog = Catalog::open_at(dir.path().to_path_buf()).unwrap();
        (dir, catalog)
    }

    #[tokio::test]
    async fn test_add_without_layout_skips_injection() {
        let (_catalog_dir, catalog) = seeded_catalog();
        let project = tempfile::tempdir().unwrap();

        // No layout in the project: the add must degrade to copy-only
        // without ever reaching a prompt or creating a layout
        run_add_in(&catalog, project.path(), "widget", AddArgs::default())
            .await
            .unwrap();

        assert!(project
            .path()
            .join("src/lib/components/widget/index.svelte")
            .exists());
        assert!(!project.path().join(LAYOUT_REL).exists());
    }

    #[tokio::test]
    async fn test_add_library_leaves_layout_untouched() {
        let (_catalog_dir, catalog) = seeded_catalog();
        let project = tempfile::tempdir().unwrap();
        let layout_path = project.path().join(LAYOUT_REL);
        std::fs::create_dir_all(layout_path.parent().unwrap()).unwrap();
        let layout_text = "<script>\n\tlet { foo } = $props();\n</script>\n<slot />";
        std::fs::write(&layout_path, layout_text).unwrap();

        // Library units never reach the layout step, prompt included
        run_add_in(&catalog, project.path(), "auth", AddArgs::default())
            .await
            .unwrap();

        assert!(project.path().join("src/lib/auth/index.ts").exists());
        assert_eq!(
            std::fs::read_to_string(&layout_path).unwrap(),
            layout_text
        );
    }

    #[tokio::test]
    async fn test_add_with_skip_strategy_leaves_layout_untouched() {
        let (_catalog_dir, catalog) = seeded_catalog();
        let project = tempfile::tempdir().unwrap();
        let layout_path = project.path().join(LAYOUT_REL);
        std::fs::create_dir_all(layout_path.parent().unwrap()).unwrap();
        let layout_text = "<slot />";
        std::fs::write(&layout_path, layout_text).unwrap();

        let args = AddArgs {
            strategy: Some(InjectStrategy::Skip),
            yes: false,
        };
        run_add_in(&catalog, project.path(), "widget", args)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&layout_path).unwrap(),
            layout_text
        );
    }
}
