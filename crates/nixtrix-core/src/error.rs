//! Error taxonomy for catalog and package operations

use std::path::PathBuf;
use thiserror::Error;

/// Core result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the catalog and materializer layers
///
/// The injection engine itself never produces errors; "nothing to do"
/// conditions are reported as outcomes, not failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("package '{0}' not found in the catalog\nRun \"nixtrix list\" to see available packages.")]
    NotFound(String),

    #[error("catalog manifest not found at {0}\nSet NIXTRIX_DIR to your NixTrix checkout.")]
    ManifestMissing(PathBuf),

    #[error("failed to parse catalog manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("package source not found at {0}")]
    SourceMissing(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with a path-bearing message
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
