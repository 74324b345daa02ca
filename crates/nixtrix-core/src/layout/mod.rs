//! Layout template location and injection
//!
//! `locate` finds the single shared layout file in the consuming project;
//! `inject` rewrites its text to wire in a newly added unit. Location and
//! rewriting are separate so callers can skip injection cleanly when no
//! layout exists.

pub mod inject;
pub mod locate;

pub use inject::{
    inject, manual_instructions, pascal_case, EditOutcome, ImportBinding, InjectReport,
    InjectStrategy,
};
pub use locate::{locate, locate_in};
