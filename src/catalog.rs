//! Destination catalog
//!
//! Loads the JSON array of destination records. Each record is converted on
//! its own, so one bad record is reported and skipped while the rest load.
//!
//! ```text
//! JSON text ──► Vec<serde_json::Value> ──► DestinationRecord ──► Destination
//!    │                                          │
//!    └── syntax error: whole load fails         └── RecordError: record rejected
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use guide_composer::ListEntry;
use guide_types::{ConnectionType, Destination, DestinationRecord, RecordError};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not a JSON array of records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown connection filter '{0}' (expected all, direct or one-stop)")]
    UnknownFilter(String),
}

impl CatalogError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CATALOG_IO",
            Self::Json(_) => "CATALOG_JSON",
            Self::UnknownFilter(_) => "UNKNOWN_FILTER",
        }
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// Which destinations the list pane shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionFilter {
    #[default]
    All,
    Direct,
    #[serde(alias = "1-stop")]
    OneStop,
}

impl ConnectionFilter {
    pub fn matches(&self, connection: ConnectionType) -> bool {
        match self {
            Self::All => true,
            Self::Direct => connection == ConnectionType::Direct,
            Self::OneStop => connection == ConnectionType::OneStop,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Direct => "direct",
            Self::OneStop => "one-stop",
        }
    }
}

impl fmt::Display for ConnectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "direct" => Ok(Self::Direct),
            "one-stop" | "1-stop" => Ok(Self::OneStop),
            _ => Err(CatalogError::UnknownFilter(s.to_string())),
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// A record that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position in the source array.
    pub index: usize,
    pub error: RecordError,
}

impl RejectedRecord {
    /// Id of the rejected record, when it had one.
    pub fn id(&self) -> Option<&str> {
        match &self.error {
            RecordError::MissingId => None,
            RecordError::MissingField { id, .. }
            | RecordError::Malformed { id, .. }
            | RecordError::DuplicateId { id } => Some(id),
        }
    }
}

/// Valid destinations in source order, plus the records that were rejected.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: Vec<Destination>,
    rejected: Vec<RejectedRecord>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            loaded = catalog.len(),
            rejected = catalog.rejected.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a catalog from JSON text.
    ///
    /// # Errors
    /// Only when the text is not a JSON array. Bad records end up in
    /// `rejected()` instead.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(content)?;

        let mut catalog = Self::default();
        let mut seen = HashSet::new();

        for (index, value) in values.into_iter().enumerate() {
            let converted = DestinationRecord::from_value(value)
                .and_then(DestinationRecord::into_destination)
                .and_then(|d| {
                    if seen.contains(&d.id) {
                        Err(RecordError::DuplicateId { id: d.id })
                    } else {
                        Ok(d)
                    }
                });

            match converted {
                Ok(destination) => {
                    seen.insert(destination.id.clone());
                    catalog.destinations.push(destination);
                }
                Err(error) => {
                    tracing::warn!(index, code = error.code(), error = %error, "record rejected");
                    catalog.rejected.push(RejectedRecord { index, error });
                }
            }
        }

        Ok(catalog)
    }

    /// Build a catalog from already-validated destinations. Later duplicates
    /// are rejected the same way `from_json` does.
    pub fn from_destinations(destinations: impl IntoIterator<Item = Destination>) -> Self {
        let mut catalog = Self::default();
        let mut seen = HashSet::new();
        for (index, destination) in destinations.into_iter().enumerate() {
            if seen.insert(destination.id.clone()) {
                catalog.destinations.push(destination);
            } else {
                catalog.rejected.push(RejectedRecord {
                    index,
                    error: RecordError::DuplicateId { id: destination.id },
                });
            }
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    /// First rejection recorded under `id`.
    pub fn rejection(&self, id: &str) -> Option<&RejectedRecord> {
        self.rejected.iter().find(|r| r.id() == Some(id))
    }

    /// Destinations matching `filter`, in catalog order.
    pub fn filter(&self, filter: ConnectionFilter) -> Vec<&Destination> {
        self.destinations
            .iter()
            .filter(|d| filter.matches(d.connection_type))
            .collect()
    }

    /// List pane rows for `filter`.
    pub fn list_entries(&self, filter: ConnectionFilter) -> Vec<ListEntry> {
        self.filter(filter)
            .into_iter()
            .map(ListEntry::from_destination)
            .collect()
    }
}
