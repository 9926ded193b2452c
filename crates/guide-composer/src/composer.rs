//! Content composer - turns a `Destination` into a `DetailDocument`.
//!
//! Creates, in fixed order:
//! - Banner (optional)
//! - Header with connection badge
//! - Travel stats
//! - Getting around (optional)
//! - Description
//! - Primary destination (optional)
//! - Day trips (always, possibly empty)
//! - Attractions, food, itinerary (optional)
//! - Historical context (optional)
//!
//! Composition is deterministic: same destination, same document.

use guide_types::{
    ConnectionType, ContentItem, ContentSection, Destination, DestinationRecord, ExtendedDetails,
    HistoricalContext, RecordError,
};

use crate::document::{
    Badge, BadgeStyle, DayTripsSection, DetailDocument, DocumentBuilder, Entry,
    GettingAroundSection, Header, HistoryGroup, HistorySection, Image, ItineraryLine,
    ItinerarySection, ListSection, Paragraph, Section, Stat, TravelStats,
};
use crate::safe_text::SafeText;

pub const GETTING_AROUND_HEADING: &str = "Getting Around";
pub const DAY_TRIPS_HEADING: &str = "Top Day Trips & Walks";
pub const HISTORICAL_CONTEXT_HEADING: &str = "Historical Context";

/// Compose the detail document for a destination.
pub fn compose(destination: &Destination) -> DetailDocument {
    let extended = destination.extended_details.as_ref();
    let mut builder = DocumentBuilder::new(&destination.id);

    builder
        .push_opt(banner(destination))
        .push(header(destination))
        .push(travel_stats(destination))
        .push_opt(extended.and_then(getting_around))
        .push(Section::Description(Paragraph {
            text: SafeText::escape(&destination.description),
        }))
        .push_opt(
            extended
                .and_then(|ed| ed.primary_destination.as_ref())
                .map(|s| Section::PrimaryDestination(list_section(s))),
        )
        .push(day_trips(destination))
        .push_opt(
            extended
                .and_then(|ed| ed.attractions.as_ref())
                .map(|s| Section::Attractions(list_section(s))),
        )
        .push_opt(
            extended
                .and_then(|ed| ed.food.as_ref())
                .map(|s| Section::Food(list_section(s))),
        )
        .push_opt(extended.and_then(itinerary))
        .push_opt(destination.historical_context.as_ref().map(history));

    let doc = builder.build();
    tracing::debug!(
        destination = %destination.id,
        sections = doc.len(),
        "composed detail document"
    );
    doc
}

/// Validate a wire record and compose it.
///
/// # Errors
/// Fails fast with the first missing required field; no partial document is
/// produced.
pub fn compose_record(record: DestinationRecord) -> Result<DetailDocument, RecordError> {
    let destination = Destination::try_from(record)?;
    Ok(compose(&destination))
}

fn banner(destination: &Destination) -> Option<Section> {
    destination.banner_image.as_ref().map(|src| {
        Section::Banner(Image {
            src: SafeText::escape(src),
            alt: SafeText::escape(&format!("{} Banner", destination.name)),
        })
    })
}

fn header(destination: &Destination) -> Section {
    let name = SafeText::escape(&destination.name);
    let country = SafeText::escape(&destination.country);
    let badge = match destination.connection_type {
        ConnectionType::Direct => Badge {
            label: SafeText::escape("Direct"),
            style: BadgeStyle::Direct,
        },
        ConnectionType::OneStop => Badge {
            label: SafeText::escape("1 Stop"),
            style: BadgeStyle::Warning,
        },
    };
    Section::Header(Header {
        title: SafeText::join(&[&name, &country], ", "),
        name,
        country,
        badge,
    })
}

fn travel_stats(destination: &Destination) -> Section {
    Section::TravelStats(TravelStats {
        stats: vec![
            Stat {
                label: SafeText::escape("Flight Time"),
                value: SafeText::escape(&destination.flight_time),
            },
            Stat {
                label: SafeText::escape("Route"),
                value: SafeText::escape(&destination.route),
            },
        ],
    })
}

fn getting_around(details: &ExtendedDetails) -> Option<Section> {
    details.getting_around.as_ref().map(|ga| {
        Section::GettingAround(GettingAroundSection {
            heading: SafeText::escape(GETTING_AROUND_HEADING),
            text: SafeText::escape(&ga.text),
            note: ga.note.as_deref().map(SafeText::escape),
        })
    })
}

fn day_trips(destination: &Destination) -> Section {
    Section::DayTrips(DayTripsSection {
        heading: SafeText::escape(DAY_TRIPS_HEADING),
        intro: destination.day_trip_intro.as_deref().map(SafeText::escape),
        entries: destination.day_trips.iter().map(entry).collect(),
    })
}

fn itinerary(details: &ExtendedDetails) -> Option<Section> {
    details.itinerary.as_ref().map(|it| {
        Section::Itinerary(ItinerarySection {
            heading: SafeText::escape(&it.title),
            entries: it
                .items
                .iter()
                .map(|item| ItineraryLine {
                    day: SafeText::escape(&item.day),
                    activity: SafeText::escape(&item.activity),
                })
                .collect(),
        })
    })
}

fn history(context: &HistoricalContext) -> Section {
    Section::HistoricalContext(HistorySection {
        heading: SafeText::escape(HISTORICAL_CONTEXT_HEADING),
        groups: context
            .sections
            .iter()
            .map(|section| HistoryGroup {
                title: SafeText::escape(&section.title),
                entries: section
                    .items
                    .iter()
                    .map(|item| Entry {
                        image: None,
                        title: SafeText::escape(&item.title),
                        description: SafeText::escape(&item.description),
                    })
                    .collect(),
            })
            .collect(),
    })
}

fn list_section(section: &ContentSection) -> ListSection {
    ListSection {
        heading: SafeText::escape(&section.title),
        entries: section.items.iter().map(entry).collect(),
    }
}

fn entry(item: &ContentItem) -> Entry {
    Entry {
        image: item.image.as_ref().map(|src| Image {
            src: SafeText::escape(src),
            alt: SafeText::escape(&item.title),
        }),
        title: SafeText::escape(&item.title),
        description: SafeText::escape(&item.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SectionKind;
    use guide_types::{
        Coordinate, GettingAround, HistoryItem, HistorySection as HistorySource, Itinerary,
        ItineraryEntry, MapDescriptor,
    };
    use pretty_assertions::assert_eq;

    fn item(title: &str, description: &str) -> ContentItem {
        ContentItem {
            title: title.into(),
            description: description.into(),
            image: None,
        }
    }

    fn bare() -> Destination {
        Destination {
            id: "krakow".into(),
            name: "Kraków".into(),
            country: "Poland".into(),
            flight_time: "2h 25m".into(),
            route: "STN - KRK".into(),
            description: "Old town and Wawel.".into(),
            connection_type: ConnectionType::Direct,
            banner_image: None,
            day_trip_intro: None,
            day_trips: vec![],
            extended_details: None,
            historical_context: None,
            map: MapDescriptor {
                center: Coordinate::new(50.06, 19.94),
                zoom: 13,
                markers: vec![],
            },
        }
    }

    fn full() -> Destination {
        let mut dest = bare();
        dest.banner_image = Some("img/krakow.jpg".into());
        dest.day_trip_intro = Some("Easy by train.".into());
        dest.day_trips = vec![
            item("Wieliczka", "Salt mine"),
            item("Zakopane", "Mountains"),
        ];
        dest.extended_details = Some(ExtendedDetails {
            getting_around: Some(GettingAround {
                text: "Trams everywhere".into(),
                note: Some("Validate tickets".into()),
            }),
            primary_destination: Some(ContentSection {
                title: "Old Town".into(),
                items: vec![item("Rynek", "Main square")],
            }),
            attractions: Some(ContentSection {
                title: "See".into(),
                items: vec![item("Wawel", "Castle")],
            }),
            food: Some(ContentSection {
                title: "Eat".into(),
                items: vec![item("Pierogi", "Dumplings")],
            }),
            itinerary: Some(Itinerary {
                title: "Two days".into(),
                items: vec![ItineraryEntry {
                    day: "Day 1".into(),
                    activity: "Old Town".into(),
                }],
            }),
        });
        dest.historical_context = Some(HistoricalContext {
            sections: vec![HistorySource {
                title: "Royal capital".into(),
                items: vec![HistoryItem {
                    title: "1038".into(),
                    description: "Becomes capital".into(),
                }],
            }],
        });
        dest
    }

    #[test]
    fn test_bare_destination_sections() {
        let doc = compose(&bare());
        assert_eq!(
            doc.kinds(),
            vec![
                SectionKind::Header,
                SectionKind::TravelStats,
                SectionKind::Description,
                SectionKind::DayTrips,
            ]
        );
        match doc.section(SectionKind::DayTrips) {
            Some(Section::DayTrips(trips)) => {
                assert!(trips.entries.is_empty());
                assert!(trips.intro.is_none());
            }
            other => panic!("expected day trips, got {:?}", other),
        }
    }

    #[test]
    fn test_full_destination_has_every_slot_in_order() {
        let doc = compose(&full());
        assert_eq!(doc.kinds(), SectionKind::ORDER.to_vec());
    }

    #[test]
    fn test_empty_extended_details_adds_nothing() {
        let mut dest = bare();
        dest.extended_details = Some(ExtendedDetails::default());
        assert_eq!(compose(&dest).kinds(), compose(&bare()).kinds());
    }

    #[test]
    fn test_header_badges() {
        let doc = compose(&bare());
        let Some(Section::Header(header)) = doc.section(SectionKind::Header) else {
            panic!("missing header");
        };
        assert_eq!(header.badge.style, BadgeStyle::Direct);
        assert_eq!(header.badge.label.as_str(), "Direct");
        assert_eq!(header.title.as_str(), "Kraków, Poland");

        let mut dest = bare();
        dest.connection_type = ConnectionType::OneStop;
        let doc = compose(&dest);
        let Some(Section::Header(header)) = doc.section(SectionKind::Header) else {
            panic!("missing header");
        };
        assert_eq!(header.badge.style, BadgeStyle::Warning);
        assert_eq!(header.badge.label.as_str(), "1 Stop");
    }

    #[test]
    fn test_banner_alt_text() {
        let doc = compose(&full());
        let Some(Section::Banner(image)) = doc.section(SectionKind::Banner) else {
            panic!("missing banner");
        };
        assert_eq!(image.src.as_str(), "img/krakow.jpg");
        assert_eq!(image.alt.as_str(), "Kraków Banner");
    }

    #[test]
    fn test_day_trips_preserve_order() {
        let mut dest = bare();
        dest.day_trips = vec![item("Zeta", "z"), item("Alpha", "a"), item("Zeta", "z")];
        let doc = compose(&dest);
        let Some(Section::DayTrips(trips)) = doc.section(SectionKind::DayTrips) else {
            panic!("missing day trips");
        };
        let titles: Vec<_> = trips.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_entry_image_alt_is_title() {
        let mut dest = bare();
        dest.day_trips = vec![ContentItem {
            title: "Ojców".into(),
            description: "Park".into(),
            image: Some("img/ojcow.jpg".into()),
        }];
        let doc = compose(&dest);
        let Some(Section::DayTrips(trips)) = doc.section(SectionKind::DayTrips) else {
            panic!("missing day trips");
        };
        let image = trips.entries[0].image.as_ref().unwrap();
        assert_eq!(image.alt.as_str(), "Ojców");
    }

    #[test]
    fn test_getting_around_note_optional() {
        let mut dest = bare();
        dest.extended_details = Some(ExtendedDetails {
            getting_around: Some(GettingAround {
                text: "Walk".into(),
                note: None,
            }),
            ..Default::default()
        });
        let doc = compose(&dest);
        let Some(Section::GettingAround(ga)) = doc.section(SectionKind::GettingAround) else {
            panic!("missing getting around");
        };
        assert!(ga.note.is_none());
        assert_eq!(ga.heading.as_str(), "Getting Around");
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        let mut dest = full();
        dest.name = "<img src=x onerror=alert(1)>".into();
        dest.description = "</p><script>steal()</script>".into();
        if let Some(ed) = dest.extended_details.as_mut() {
            if let Some(ga) = ed.getting_around.as_mut() {
                ga.note = Some("<b>strike</b>".into());
            }
        }
        let json = serde_json::to_string(&compose(&dest)).unwrap();
        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(json.contains("&lt;script&gt;"));
        assert!(json.contains("&lt;b&gt;strike&lt;/b&gt;"));
    }

    #[test]
    fn test_compose_record_reports_missing_field() {
        let record = DestinationRecord {
            id: Some("x".into()),
            ..Default::default()
        };
        let err = compose_record(record).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }
}
