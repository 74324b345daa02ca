//! NixTrix CLI - SvelteKit package manager for the NixTrix catalog

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use nixtrix_core::catalog::{self, Catalog};
use nixtrix_core::layout::InjectStrategy;
use nixtrix_core::packages;
use nixtrix_core::tui::AddArgs;

/// CLI version reported by --version and used by the upgrade check
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "nixtrix")]
#[command(about = "SvelteKit package manager for the NixTrix catalog")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available packages
    #[command(alias = "ls")]
    List,
    /// Add a package to your project
    Add(AddCliArgs),
    /// Remove a package from your project
    #[command(alias = "rm")]
    Remove {
        /// Package name from the catalog
        name: String,
    },
    /// Upgrade the nixtrix CLI to the latest version
    #[command(alias = "up")]
    Upgrade,
}

#[derive(Parser, Debug)]
pub struct AddCliArgs {
    /// Package name from the catalog
    pub name: String,

    /// Layout integration strategy (skips the interactive prompt)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

/// CLI spelling of the injection strategies
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    /// Edit the layout directly (import + render)
    Auto,
    /// Insert a marker-delimited helper block
    Markers,
    /// Show manual instructions only
    Manual,
    /// No layout integration
    Skip,
}

impl From<StrategyArg> for InjectStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => InjectStrategy::AutoEdit,
            StrategyArg::Markers => InjectStrategy::MarkerBlock,
            StrategyArg::Manual => InjectStrategy::ManualOnly,
            StrategyArg::Skip => InjectStrategy::Skip,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Command::List => {
            let catalog = Catalog::open()?;
            catalog::print_listing(&catalog);
            Ok(())
        }
        Command::Add(add) => {
            let result = nixtrix_core::run_add(
                &add.name,
                AddArgs {
                    strategy: add.strategy.map(InjectStrategy::from),
                    yes: add.yes,
                },
            )
            .await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Command::Remove { name } => remove(&name).await,
        Command::Upgrade => nixtrix_core::upgrade::run(CLI_VERSION).await,
    }
}

async fn remove(name: &str) -> Result<()> {
    let catalog = Catalog::open()?;
    let unit = catalog.resolve(name)?;
    let dest = unit.kind.dest_dir(&unit.name);

    if packages::remove(&dest).await? {
        println!("{} Removed from {}/", "✓".green(), dest.display());
        if unit.kind.wants_layout() {
            // Layout edits made by `add` are not reverted
            println!(
                "{}",
                "Layout entries for this package (imports, render tags) are left in place."
                    .dimmed()
            );
        }
    } else {
        println!("Package {} not found in project.", name);
    }

    Ok(())
}
