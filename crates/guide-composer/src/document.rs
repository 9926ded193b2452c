//! DetailDocument - the composed detail view for one destination.
//!
//! A flat, ordered list of typed sections. Every text payload is `SafeText`,
//! so presentation layers never see unescaped catalog text.

use serde::Serialize;

use crate::safe_text::SafeText;

// ============================================================================
// SECTION KIND
// ============================================================================

/// Slot of a section in the document.
///
/// Declaration order is the fixed document order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Banner,
    Header,
    TravelStats,
    GettingAround,
    Description,
    PrimaryDestination,
    DayTrips,
    Attractions,
    Food,
    Itinerary,
    HistoricalContext,
}

impl SectionKind {
    /// All slots in document order.
    pub const ORDER: [SectionKind; 11] = [
        SectionKind::Banner,
        SectionKind::Header,
        SectionKind::TravelStats,
        SectionKind::GettingAround,
        SectionKind::Description,
        SectionKind::PrimaryDestination,
        SectionKind::DayTrips,
        SectionKind::Attractions,
        SectionKind::Food,
        SectionKind::Itinerary,
        SectionKind::HistoricalContext,
    ];
}

// ============================================================================
// SECTION PAYLOADS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
    Banner(Image),
    Header(Header),
    TravelStats(TravelStats),
    GettingAround(GettingAroundSection),
    Description(Paragraph),
    PrimaryDestination(ListSection),
    DayTrips(DayTripsSection),
    Attractions(ListSection),
    Food(ListSection),
    Itinerary(ItinerarySection),
    HistoricalContext(HistorySection),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Banner(_) => SectionKind::Banner,
            Section::Header(_) => SectionKind::Header,
            Section::TravelStats(_) => SectionKind::TravelStats,
            Section::GettingAround(_) => SectionKind::GettingAround,
            Section::Description(_) => SectionKind::Description,
            Section::PrimaryDestination(_) => SectionKind::PrimaryDestination,
            Section::DayTrips(_) => SectionKind::DayTrips,
            Section::Attractions(_) => SectionKind::Attractions,
            Section::Food(_) => SectionKind::Food,
            Section::Itinerary(_) => SectionKind::Itinerary,
            Section::HistoricalContext(_) => SectionKind::HistoricalContext,
        }
    }
}

/// Picture with alt text. `src` is escaped like any other text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub src: SafeText,
    pub alt: SafeText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// "{name}, {country}"
    pub title: SafeText,
    pub name: SafeText,
    pub country: SafeText,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub label: SafeText,
    pub style: BadgeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStyle {
    Direct,
    Warning,
}

impl BadgeStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeStyle::Direct => "direct",
            BadgeStyle::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelStats {
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub label: SafeText,
    pub value: SafeText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GettingAroundSection {
    pub heading: SafeText,
    pub text: SafeText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<SafeText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub text: SafeText,
}

/// Titled list of entries (primary destination, attractions, food).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSection {
    pub heading: SafeText,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub title: SafeText,
    pub description: SafeText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTripsSection {
    pub heading: SafeText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<SafeText>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItinerarySection {
    pub heading: SafeText,
    pub entries: Vec<ItineraryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryLine {
    pub day: SafeText,
    pub activity: SafeText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySection {
    pub heading: SafeText,
    pub groups: Vec<HistoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryGroup {
    pub title: SafeText,
    pub entries: Vec<Entry>,
}

// ============================================================================
// DOCUMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailDocument {
    /// Catalog id of the source destination. Identity only, never rendered.
    pub destination_id: String,
    pub sections: Vec<Section>,
}

impl DetailDocument {
    /// Section kinds in document order.
    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(Section::kind).collect()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Appends sections in slot order.
///
/// Sections pushed out of order, or twice, are a composer bug and are
/// dropped with an error log rather than reordered.
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: DetailDocument,
}

impl DocumentBuilder {
    pub fn new(destination_id: impl Into<String>) -> Self {
        Self {
            doc: DetailDocument {
                destination_id: destination_id.into(),
                sections: Vec::new(),
            },
        }
    }

    /// Append a section.
    pub fn push(&mut self, section: Section) -> &mut Self {
        let kind = section.kind();
        if let Some(last) = self.doc.sections.last().map(Section::kind) {
            if kind <= last {
                tracing::error!(
                    destination = %self.doc.destination_id,
                    ?kind,
                    ?last,
                    "section out of order, dropped"
                );
                return self;
            }
        }
        self.doc.sections.push(section);
        self
    }

    /// Append a section only when present.
    pub fn push_opt(&mut self, section: Option<Section>) -> &mut Self {
        if let Some(section) = section {
            self.push(section);
        }
        self
    }

    pub fn build(self) -> DetailDocument {
        self.doc
    }
}
