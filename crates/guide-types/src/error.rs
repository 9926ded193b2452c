//! Record conversion errors.

use thiserror::Error;

/// Why a catalog record could not become a `Destination`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// The record has no `id` at all.
    #[error("Destination record has no id")]
    MissingId,

    /// A required field is absent. `field` is the dotted path, e.g.
    /// `extendedDetails.food.items[2].title`.
    #[error("Destination '{id}' is missing required field '{field}'")]
    MissingField {
        /// Destination id.
        id: String,
        /// Dotted path of the missing field.
        field: String,
    },

    /// The record is not shaped like a destination (wrong JSON types).
    #[error("Destination '{id}' could not be decoded at '{}': {message}", .field.as_deref().unwrap_or("."))]
    Malformed {
        /// Destination id, or `?` when it could not be read.
        id: String,
        /// Dotted path of the offending value, `None` when the record itself
        /// is not an object.
        field: Option<String>,
        /// Decoder message.
        message: String,
    },

    /// Another record already claimed this id.
    #[error("Duplicate destination id '{id}'")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

impl RecordError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingId => "MISSING_ID",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::Malformed { .. } => "MALFORMED_RECORD",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
        }
    }

    /// Dotted path of the missing or mistyped field, when known.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingId => Some("id"),
            Self::MissingField { field, .. } => Some(field),
            Self::Malformed { field, .. } => field.as_deref(),
            Self::DuplicateId { .. } => None,
        }
    }
}
