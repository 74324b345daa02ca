//! NixTrix Core - library behind the `nixtrix` package CLI
//!
//! Materializes catalog units (components, routes, libraries) into a
//! SvelteKit project and wires them into the shared layout template.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - catalog resolution, recursive package
//!   copy/removal, layout location, and the pure text injection engine
//! - **Layer 2: CLI/TUI Interface** - optional cliclack-based add workflow
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use nixtrix_core::catalog::Catalog;
//! use nixtrix_core::layout::{inject, InjectStrategy};
//!
//! let catalog = Catalog::open()?;
//! let unit = catalog.resolve("sticky-header")?;
//! let report = inject(&layout_text, &unit.name, unit.kind, InjectStrategy::AutoEdit);
//! ```

pub mod catalog;
pub mod error;
pub mod layout;
pub mod packages;
pub mod upgrade;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use catalog::{Catalog, Manifest, Unit, UnitKind};
pub use error::{Error, Result};
pub use layout::{inject, manual_instructions, InjectReport, InjectStrategy};
pub use packages::{materialize, remove};

#[cfg(feature = "tui")]
pub use tui::run_add;
