//! Wire-format destination records.
//!
//! Mirrors `Destination` but keeps required fields optional so a missing
//! field can be named precisely. Conversion walks the record once and stops
//! at the first missing field.

use serde::Deserialize;

use crate::coordinate::Coordinate;
use crate::destination::{
    ConnectionType, ContentItem, ContentSection, Destination, ExtendedDetails, GettingAround,
    HistoricalContext, HistoryItem, HistorySection, Itinerary, ItineraryEntry, MapDescriptor,
    Spot,
};
use crate::error::RecordError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub flight_time: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub connection_type: Option<ConnectionType>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub day_trip_intro: Option<String>,
    #[serde(default)]
    pub day_trips: Option<Vec<ContentItemRecord>>,
    #[serde(default)]
    pub extended_details: Option<ExtendedDetailsRecord>,
    #[serde(default)]
    pub historical_context: Option<HistoricalContextRecord>,
    #[serde(default)]
    pub map: Option<MapDescriptorRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentItemRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDetailsRecord {
    #[serde(default)]
    pub getting_around: Option<GettingAroundRecord>,
    #[serde(default)]
    pub primary_destination: Option<ContentSectionRecord>,
    #[serde(default)]
    pub attractions: Option<ContentSectionRecord>,
    #[serde(default)]
    pub food: Option<ContentSectionRecord>,
    #[serde(default)]
    pub itinerary: Option<ItineraryRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GettingAroundRecord {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSectionRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ContentItemRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ItineraryEntryRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryEntryRecord {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalContextRecord {
    #[serde(default)]
    pub sections: Option<Vec<HistorySectionRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistorySectionRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<HistoryItemRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryItemRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapDescriptorRecord {
    #[serde(default)]
    pub center: Option<Coordinate>,
    #[serde(default)]
    pub zoom: Option<u8>,
    #[serde(default)]
    pub markers: Option<Vec<SpotRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub coords: Option<Coordinate>,
}

impl DestinationRecord {
    /// Decode one catalog entry.
    ///
    /// # Errors
    /// `RecordError::Malformed` when a field has the wrong JSON type or the
    /// connection type is not one of the known values. The error carries the
    /// dotted path of the offending value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RecordError> {
        let id = value
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("?")
            .to_string();
        serde_path_to_error::deserialize(value).map_err(|e| {
            let path = e.path().to_string();
            RecordError::Malformed {
                id,
                field: (path != ".").then_some(path),
                message: e.into_inner().to_string(),
            }
        })
    }

    /// Convert into a strict `Destination`, naming the first missing field.
    pub fn into_destination(self) -> Result<Destination, RecordError> {
        Destination::try_from(self)
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Tracks the record id so every missing field reports where it came from.
struct FieldCheck<'a> {
    id: &'a str,
}

impl FieldCheck<'_> {
    fn require<T>(
        &self,
        value: Option<T>,
        path: impl FnOnce() -> String,
    ) -> Result<T, RecordError> {
        value.ok_or_else(|| RecordError::MissingField {
            id: self.id.to_string(),
            field: path(),
        })
    }

    fn content_items(
        &self,
        items: Vec<ContentItemRecord>,
        prefix: &str,
    ) -> Result<Vec<ContentItem>, RecordError> {
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                Ok(ContentItem {
                    title: self.require(item.title, || format!("{prefix}[{i}].title"))?,
                    description: self
                        .require(item.description, || format!("{prefix}[{i}].description"))?,
                    image: item.image,
                })
            })
            .collect()
    }

    fn content_section(
        &self,
        section: Option<ContentSectionRecord>,
        prefix: &str,
    ) -> Result<Option<ContentSection>, RecordError> {
        let Some(section) = section else {
            return Ok(None);
        };
        let title = self.require(section.title, || format!("{prefix}.title"))?;
        let items = self.require(section.items, || format!("{prefix}.items"))?;
        Ok(Some(ContentSection {
            title,
            items: self.content_items(items, &format!("{prefix}.items"))?,
        }))
    }

    fn extended_details(
        &self,
        details: ExtendedDetailsRecord,
    ) -> Result<ExtendedDetails, RecordError> {
        let getting_around = match details.getting_around {
            Some(ga) => Some(GettingAround {
                text: self.require(ga.text, || "extendedDetails.gettingAround.text".into())?,
                note: ga.note,
            }),
            None => None,
        };

        let itinerary = match details.itinerary {
            Some(it) => {
                let title = self.require(it.title, || "extendedDetails.itinerary.title".into())?;
                let items = self.require(it.items, || "extendedDetails.itinerary.items".into())?;
                let items = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        Ok(ItineraryEntry {
                            day: self.require(entry.day, || {
                                format!("extendedDetails.itinerary.items[{i}].day")
                            })?,
                            activity: self.require(entry.activity, || {
                                format!("extendedDetails.itinerary.items[{i}].activity")
                            })?,
                        })
                    })
                    .collect::<Result<Vec<_>, RecordError>>()?;
                Some(Itinerary { title, items })
            }
            None => None,
        };

        Ok(ExtendedDetails {
            getting_around,
            primary_destination: self.content_section(
                details.primary_destination,
                "extendedDetails.primaryDestination",
            )?,
            attractions: self.content_section(details.attractions, "extendedDetails.attractions")?,
            food: self.content_section(details.food, "extendedDetails.food")?,
            itinerary,
        })
    }

    fn historical_context(
        &self,
        context: HistoricalContextRecord,
    ) -> Result<HistoricalContext, RecordError> {
        let sections = self.require(context.sections, || "historicalContext.sections".into())?;
        let sections = sections
            .into_iter()
            .enumerate()
            .map(|(s, section)| {
                let title = self.require(section.title, || {
                    format!("historicalContext.sections[{s}].title")
                })?;
                let items = self.require(section.items, || {
                    format!("historicalContext.sections[{s}].items")
                })?;
                let items = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        Ok(HistoryItem {
                            title: self.require(item.title, || {
                                format!("historicalContext.sections[{s}].items[{i}].title")
                            })?,
                            description: self.require(item.description, || {
                                format!("historicalContext.sections[{s}].items[{i}].description")
                            })?,
                        })
                    })
                    .collect::<Result<Vec<_>, RecordError>>()?;
                Ok(HistorySection { title, items })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;
        Ok(HistoricalContext { sections })
    }

    fn map(&self, map: MapDescriptorRecord) -> Result<MapDescriptor, RecordError> {
        let center = self.require(map.center, || "map.center".into())?;
        let zoom = self.require(map.zoom, || "map.zoom".into())?;
        let markers = self.require(map.markers, || "map.markers".into())?;
        let markers = markers
            .into_iter()
            .enumerate()
            .map(|(i, spot)| {
                Ok(Spot {
                    title: self.require(spot.title, || format!("map.markers[{i}].title"))?,
                    coords: self.require(spot.coords, || format!("map.markers[{i}].coords"))?,
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;
        Ok(MapDescriptor {
            center,
            zoom,
            markers,
        })
    }
}

impl TryFrom<DestinationRecord> for Destination {
    type Error = RecordError;

    fn try_from(record: DestinationRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or(RecordError::MissingId)?;
        let check = FieldCheck { id: &id };

        let name = check.require(record.name, || "name".into())?;
        let country = check.require(record.country, || "country".into())?;
        let flight_time = check.require(record.flight_time, || "flightTime".into())?;
        let route = check.require(record.route, || "route".into())?;
        let description = check.require(record.description, || "description".into())?;
        let connection_type = check.require(record.connection_type, || "connectionType".into())?;
        let day_trips = check.require(record.day_trips, || "dayTrips".into())?;
        let day_trips = check.content_items(day_trips, "dayTrips")?;
        let extended_details = record
            .extended_details
            .map(|d| check.extended_details(d))
            .transpose()?;
        let historical_context = record
            .historical_context
            .map(|h| check.historical_context(h))
            .transpose()?;
        let map = check.require(record.map, || "map".into())?;
        let map = check.map(map)?;

        Ok(Destination {
            id,
            name,
            country,
            flight_time,
            route,
            description,
            connection_type,
            banner_image: record.banner_image,
            day_trip_intro: record.day_trip_intro,
            day_trips,
            extended_details,
            historical_context,
            map,
        })
    }
}
