//! Guide Composer - deterministic detail documents for destinations.
//!
//! This crate turns a `Destination` into the structure the detail pane
//! renders:
//! - `DetailDocument` - ordered list of typed sections
//! - `SafeText` - escaped text, the only payload type sections carry
//! - `render_html` - markup for the detail pane
//! - `ListEntry` / `render_list_html` - the destination list pane
//!
//! # Architecture
//!
//! ```text
//! Destination ──► compose() ──► DetailDocument ──► render_html()
//!                    │
//!                    └── SafeText::escape at every insertion
//! ```
//!
//! Optional blocks of the record map to optional sections. A missing block
//! produces no section at all, never an empty one.
//!
//! # Example
//!
//! ```
//! use guide_composer::{compose, SectionKind};
//! use guide_types::{ConnectionType, Coordinate, Destination, MapDescriptor};
//!
//! let destination = Destination {
//!     id: "bologna".into(),
//!     name: "Bologna".into(),
//!     country: "Italy".into(),
//!     flight_time: "2h 10m".into(),
//!     route: "STN - BLQ".into(),
//!     description: "Porticoes & mortadella.".into(),
//!     connection_type: ConnectionType::Direct,
//!     banner_image: None,
//!     day_trip_intro: None,
//!     day_trips: vec![],
//!     extended_details: None,
//!     historical_context: None,
//!     map: MapDescriptor {
//!         center: Coordinate::new(44.49, 11.34),
//!         zoom: 13,
//!         markers: vec![],
//!     },
//! };
//!
//! let doc = compose(&destination);
//! assert_eq!(
//!     doc.kinds(),
//!     vec![
//!         SectionKind::Header,
//!         SectionKind::TravelStats,
//!         SectionKind::Description,
//!         SectionKind::DayTrips,
//!     ]
//! );
//! ```

mod composer;
mod document;
mod list;
mod render;
mod safe_text;

pub use composer::{
    compose, compose_record, DAY_TRIPS_HEADING, GETTING_AROUND_HEADING,
    HISTORICAL_CONTEXT_HEADING,
};
pub use document::{
    Badge, BadgeStyle, DayTripsSection, DetailDocument, DocumentBuilder, Entry,
    GettingAroundSection, Header, HistoryGroup, HistorySection, Image, ItineraryLine,
    ItinerarySection, ListSection, Paragraph, Section, SectionKind, Stat, TravelStats,
};
pub use list::{render_list_html, ListEntry, EMPTY_LIST_MESSAGE};
pub use render::{popup_html, render_html};
pub use safe_text::SafeText;
