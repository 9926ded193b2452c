//! Strict destination model.
//!
//! A `Destination` is only ever built from a record that carried every
//! required field, so consumers never re-check presence of those.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coordinate::Coordinate;

// ============================================================================
// DESTINATION
// ============================================================================

/// One city in the guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Unique across the catalog.
    pub id: String,
    pub name: String,
    pub country: String,
    pub flight_time: String,
    pub route: String,
    pub description: String,
    pub connection_type: ConnectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_trip_intro: Option<String>,
    /// Always present, possibly empty.
    pub day_trips: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_details: Option<ExtendedDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_context: Option<HistoricalContext>,
    pub map: MapDescriptor,
}

impl Destination {
    /// The first marker, reference point for connector lines.
    pub fn primary_spot(&self) -> Option<&Spot> {
        self.map.markers.first()
    }
}

/// How the destination is reached from home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionType {
    Direct,
    #[serde(alias = "1-stop")]
    OneStop,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Direct => "direct",
            ConnectionType::OneStop => "one-stop",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CONTENT
// ============================================================================

/// A titled entry with optional picture (day trips, attractions, food...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Optional extras; each block is independently present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getting_around: Option<GettingAround>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_destination: Option<ContentSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attractions: Option<ContentSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<ContentSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GettingAround {
    pub text: String,
    /// Highlighted transit advisory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub title: String,
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub title: String,
    pub items: Vec<ItineraryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub day: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalContext {
    pub sections: Vec<HistorySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySection {
    pub title: String,
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub title: String,
    pub description: String,
}

// ============================================================================
// MAP
// ============================================================================

/// Viewport and points of interest for one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDescriptor {
    pub center: Coordinate,
    pub zoom: u8,
    /// Index 0 is the primary spot. Order is never changed.
    pub markers: Vec<Spot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub title: String,
    pub coords: Coordinate,
}

impl Spot {
    pub fn new(title: impl Into<String>, coords: Coordinate) -> Self {
        Self {
            title: title.into(),
            coords,
        }
    }
}
