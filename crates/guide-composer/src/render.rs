//! HTML renderer for `DetailDocument`.
//!
//! Emits the markup classes the guide's stylesheet targets. Every dynamic
//! value written here is a `SafeText`; the only raw strings are the fixed
//! tags and class names below.

use crate::document::{DetailDocument, Entry, Image, Section};
use crate::safe_text::SafeText;

/// Render a detail document to an HTML fragment.
pub fn render_html(doc: &DetailDocument) -> String {
    let mut out = String::new();
    for section in &doc.sections {
        render_section(section, &mut out);
    }
    out
}

/// Popup body for a map marker, `<b>{title}</b>`.
pub fn popup_html(title: &str) -> String {
    format!("<b>{}</b>", SafeText::escape(title))
}

fn render_section(section: &Section, out: &mut String) {
    match section {
        Section::Banner(image) => {
            render_image(image, "city-banner", out);
            out.push('\n');
        }
        Section::Header(header) => {
            out.push_str("<div class=\"city-header\">\n");
            push_element(out, "h2", &header.title);
            out.push_str(&format!(
                "<span class=\"badge {}\">{}</span>\n",
                header.badge.style.css_class(),
                header.badge.label
            ));
            out.push_str("</div>\n");
        }
        Section::TravelStats(stats) => {
            out.push_str("<div class=\"travel-info\">\n");
            for stat in &stats.stats {
                out.push_str("<div class=\"travel-stat\">");
                out.push_str(&format!("<span>{}</span>", stat.label));
                out.push_str(&format!("<span>{}</span>", stat.value));
                out.push_str("</div>\n");
            }
            out.push_str("</div>\n");
        }
        Section::GettingAround(ga) => {
            out.push_str("<div class=\"extended-section\">\n");
            push_element(out, "h3", &ga.heading);
            push_element(out, "p", &ga.text);
            if let Some(note) = &ga.note {
                out.push_str(&format!("<p class=\"transit-note\">\u{1F6A8} {}</p>\n", note));
            }
            out.push_str("</div>\n");
        }
        Section::Description(paragraph) => push_element(out, "p", &paragraph.text),
        Section::PrimaryDestination(list)
        | Section::Attractions(list)
        | Section::Food(list) => {
            out.push_str("<div class=\"extended-section\">\n");
            push_element(out, "h3", &list.heading);
            for entry in &list.entries {
                render_entry(entry, "div", "section-list-item", out);
            }
            out.push_str("</div>\n");
        }
        Section::DayTrips(trips) => {
            out.push_str("<div class=\"day-trips-section\">\n");
            push_element(out, "h3", &trips.heading);
            if let Some(intro) = &trips.intro {
                out.push_str(&format!("<p class=\"section-intro\">{}</p>\n", intro));
            }
            out.push_str("<ul class=\"day-trips-list\">\n");
            for entry in &trips.entries {
                render_entry(entry, "li", "day-trip-item", out);
            }
            out.push_str("</ul>\n</div>\n");
        }
        Section::Itinerary(itinerary) => {
            out.push_str("<div class=\"extended-section\">\n");
            push_element(out, "h3", &itinerary.heading);
            out.push_str("<div class=\"itinerary-list\">\n");
            for line in &itinerary.entries {
                out.push_str(&format!(
                    "<div class=\"itinerary-item\"><strong>{}:</strong> {}</div>\n",
                    line.day, line.activity
                ));
            }
            out.push_str("</div>\n</div>\n");
        }
        Section::HistoricalContext(history) => {
            out.push_str("<div class=\"historical-context-section\">\n");
            push_element(out, "h2", &history.heading);
            for group in &history.groups {
                out.push_str("<div class=\"extended-section\">\n");
                push_element(out, "h3", &group.title);
                for entry in &group.entries {
                    render_entry(entry, "div", "section-list-item", out);
                }
                out.push_str("</div>\n");
            }
            out.push_str("</div>\n");
        }
    }
}

fn render_entry(entry: &Entry, tag: &str, class: &str, out: &mut String) {
    out.push_str(&format!("<{tag} class=\"{class}\">\n"));
    if let Some(image) = &entry.image {
        render_image(image, "content-image", out);
        out.push('\n');
    }
    push_element(out, "h4", &entry.title);
    push_element(out, "p", &entry.description);
    out.push_str(&format!("</{tag}>\n"));
}

fn render_image(image: &Image, class: &str, out: &mut String) {
    out.push_str(&format!(
        "<img src=\"{}\" class=\"{class}\" alt=\"{}\">",
        image.src, image.alt
    ));
}

fn push_element(out: &mut String, tag: &str, text: &SafeText) {
    out.push_str(&format!("<{tag}>{text}</{tag}>\n"));
}
