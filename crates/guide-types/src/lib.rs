//! Destination Catalog Types
//!
//! This crate is the single source of truth for the shape of a destination
//! record, shared by the composer, the map overlay and the catalog loader.
//!
//! ## Two shapes
//!
//! ```text
//! JSON ──► DestinationRecord (wire, lenient) ──TryFrom──► Destination (strict)
//!                                  │
//!                                  └── RecordError::MissingField { id, field }
//! ```
//!
//! ## Rules
//!
//! 1. Every optional field of the catalog is an `Option<T>` on `Destination`;
//!    absence is all-or-nothing per field.
//! 2. Required fields are `Option<T>` only on the wire record, so a missing
//!    field is reported by its dotted path instead of failing the whole batch.
//! 3. Records are immutable once converted. Nothing downstream mutates them.

mod coordinate;
mod destination;
mod error;
mod record;

pub use coordinate::Coordinate;
pub use destination::{
    ConnectionType, ContentItem, ContentSection, Destination, ExtendedDetails, GettingAround,
    HistoricalContext, HistoryItem, HistorySection, Itinerary, ItineraryEntry, MapDescriptor,
    Spot,
};
pub use error::RecordError;
pub use record::{
    ContentItemRecord, ContentSectionRecord, DestinationRecord, ExtendedDetailsRecord,
    GettingAroundRecord, HistoricalContextRecord, HistoryItemRecord, HistorySectionRecord,
    ItineraryEntryRecord, ItineraryRecord, MapDescriptorRecord, SpotRecord,
};
