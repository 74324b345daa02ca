//! Materializing packages into the consuming project

pub mod copier;

pub use copier::{materialize, remove};
