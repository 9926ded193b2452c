//! Selection controller
//!
//! Owns the catalog, the map surface and the overlay currently on it.
//!
//! ```text
//! apply_filter(f) ──► visible list ──► select(first visible)
//!                                           │
//! select(id) ──► compose(destination) ──────┤
//!                                           ▼
//!                update_overlay(surface, previous overlay)
//! ```
//!
//! The detail document is produced before the map is touched, and a map
//! failure never turns a selection into an error.

use guide_composer::{compose, render_list_html, DetailDocument, ListEntry};
use guide_geo::{update_overlay_reporting, MapSurface, OverlayLayers, SurfaceError};

use crate::catalog::{Catalog, ConnectionFilter};
use crate::error::{GuideError, GuideResult};

/// What happened on the map for a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum MapStatus {
    Updated { markers: usize, connectors: usize },
    /// The surface failed part way. `layers` is what is still tracked.
    Failed { error: SurfaceError, layers: usize },
}

impl MapStatus {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Result of selecting a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub destination_id: String,
    pub document: DetailDocument,
    pub map: MapStatus,
}

pub struct GuideController<S: MapSurface> {
    catalog: Catalog,
    surface: S,
    filter: ConnectionFilter,
    selected: Option<String>,
    overlay: OverlayLayers,
}

impl<S: MapSurface> GuideController<S> {
    pub fn new(catalog: Catalog, surface: S) -> Self {
        Self {
            catalog,
            surface,
            filter: ConnectionFilter::All,
            selected: None,
            overlay: OverlayLayers::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn filter(&self) -> ConnectionFilter {
        self.filter
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Layers currently tracked for the selected destination.
    pub fn overlay(&self) -> &OverlayLayers {
        &self.overlay
    }

    /// Rows of the list pane under the current filter.
    pub fn list_entries(&self) -> Vec<ListEntry> {
        self.catalog.list_entries(self.filter)
    }

    /// List pane markup with the selected row marked active.
    pub fn list_html(&self) -> String {
        render_list_html(&self.list_entries(), self.selected())
    }

    /// Switch filter and select the first visible destination.
    ///
    /// When nothing matches, the previous selection stays as it is and
    /// `None` is returned.
    pub fn apply_filter(&mut self, filter: ConnectionFilter) -> Option<Selection> {
        self.filter = filter;
        let first = self
            .catalog
            .filter(filter)
            .first()
            .map(|d| d.id.clone());

        tracing::debug!(filter = %filter, first = ?first, "filter applied");

        let id = first?;
        // The id comes from the catalog, so selection cannot miss.
        self.select(&id).ok()
    }

    /// Select a destination: compose its detail and redraw the overlay.
    ///
    /// # Errors
    /// `GuideError::Record` carrying the load error when `id` names a
    /// rejected record, `GuideError::UnknownDestination` otherwise.
    pub fn select(&mut self, id: &str) -> GuideResult<Selection> {
        let Some(destination) = self.catalog.get(id) else {
            return Err(match self.catalog.rejection(id) {
                Some(rejected) => GuideError::Record(rejected.error.clone()),
                None => GuideError::UnknownDestination(id.to_string()),
            });
        };

        let document = compose(destination);

        let previous = std::mem::take(&mut self.overlay);
        let update = update_overlay_reporting(&mut self.surface, previous, &destination.map);

        let map = match update.failure {
            None => MapStatus::Updated {
                markers: update.layers.marker_count(),
                connectors: update.layers.connector_count(),
            },
            Some(error) => MapStatus::Failed {
                error,
                layers: update.layers.len(),
            },
        };
        self.overlay = update.layers;
        self.selected = Some(destination.id.clone());

        tracing::info!(
            destination = %destination.id,
            sections = document.len(),
            "destination selected"
        );

        Ok(Selection {
            destination_id: destination.id.clone(),
            document,
            map,
        })
    }
}
