//! Top-level error type.
//!
//! Library crates each own their error enum. `GuideError` wraps them for the
//! catalog, config and controller surface of this crate.

use guide_types::RecordError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The id names a record the catalog rejected at load.
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Unknown destination '{0}'")]
    UnknownDestination(String),
}

impl GuideError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.code(),
            Self::Config(e) => e.code(),
            Self::Record(e) => e.code(),
            Self::UnknownDestination(_) => "UNKNOWN_DESTINATION",
        }
    }
}

/// Result type for guide operations
pub type GuideResult<T> = Result<T, GuideError>;
