//! Destination list pane entries.

use guide_types::Destination;
use serde::Serialize;

use crate::safe_text::SafeText;

/// Placeholder shown when a filter matches nothing.
pub const EMPTY_LIST_MESSAGE: &str = "No destinations found.";

/// One row of the destination list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    /// Catalog id, used for selection. Escaped for the data attribute.
    pub id: SafeText,
    pub name: SafeText,
    pub country: SafeText,
    pub flight_time: SafeText,
}

impl ListEntry {
    pub fn from_destination(destination: &Destination) -> Self {
        Self {
            id: SafeText::escape(&destination.id),
            name: SafeText::escape(&destination.name),
            country: SafeText::escape(&destination.country),
            flight_time: SafeText::escape(&destination.flight_time),
        }
    }
}

/// Render the list pane. `selected` is the raw catalog id of the active row.
pub fn render_list_html(entries: &[ListEntry], selected: Option<&str>) -> String {
    if entries.is_empty() {
        return format!(
            "<li class=\"destination-item\">{}</li>\n",
            SafeText::escape(EMPTY_LIST_MESSAGE)
        );
    }

    let selected = selected.map(SafeText::escape);
    let mut out = String::new();
    for entry in entries {
        let class = if selected.as_ref() == Some(&entry.id) {
            "destination-item active"
        } else {
            "destination-item"
        };
        out.push_str(&format!(
            "<li class=\"{class}\" data-id=\"{}\">\n<h3>{}</h3>\n\
             <div class=\"destination-meta\"><span>{}</span><span>{}</span></div>\n</li>\n",
            entry.id, entry.name, entry.country, entry.flight_time
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_types::{ConnectionType, Coordinate, MapDescriptor};

    fn destination(id: &str, name: &str) -> Destination {
        Destination {
            id: id.into(),
            name: name.into(),
            country: "Italy".into(),
            flight_time: "2h".into(),
            route: "LHR - NAP".into(),
            description: String::new(),
            connection_type: ConnectionType::Direct,
            banner_image: None,
            day_trip_intro: None,
            day_trips: vec![],
            extended_details: None,
            historical_context: None,
            map: MapDescriptor {
                center: Coordinate::new(40.85, 14.27),
                zoom: 12,
                markers: vec![],
            },
        }
    }

    #[test]
    fn test_empty_list_placeholder() {
        let html = render_list_html(&[], None);
        assert!(html.contains("No destinations found."));
    }

    #[test]
    fn test_selected_row_is_active() {
        let entries = vec![
            ListEntry::from_destination(&destination("naples", "Naples")),
            ListEntry::from_destination(&destination("bari", "Bari")),
        ];
        let html = render_list_html(&entries, Some("bari"));
        assert_eq!(html.matches("destination-item active").count(), 1);
        let active = html.find("destination-item active").unwrap();
        assert!(html[active..].contains("Bari"));
        assert!(html.find("Naples").unwrap() < active);
    }

    #[test]
    fn test_list_entry_escapes_name() {
        let entry = ListEntry::from_destination(&destination("x", "<b>Naples</b>"));
        assert_eq!(entry.name.as_str(), "&lt;b&gt;Naples&lt;/b&gt;");
    }
}
