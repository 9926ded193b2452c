//! Guide Geo - map overlay for the selected destination.
//!
//! The map itself is behind the `MapSurface` trait. This crate decides what
//! to draw and keeps track of what it drew:
//!
//! ```text
//! MapDescriptor ──► update_overlay(surface, previous) ──► OverlayLayers
//!                          │
//!                          ├── set_viewport (no animation)
//!                          ├── add_marker per spot
//!                          └── add_line primary ──► spot when > 2 km apart
//! ```
//!
//! `RecordingSurface` is an in-memory surface for tests and the CLI.

mod distance;
mod overlay;
mod recording;
mod surface;

pub use distance::{haversine_distance, EARTH_RADIUS_METERS};
pub use overlay::{
    needs_connector, update_overlay, update_overlay_reporting, LayerKind, OverlayLayer,
    OverlayLayers, OverlayUpdate, CONNECTOR_THRESHOLD_METERS,
};
pub use recording::{PlacedLayer, RecordingSurface, SurfaceCommand, Viewport};
pub use surface::{
    LayerHandle, LineStyle, MapSurface, MapSurfaceConfig, SurfaceError, SurfaceResult,
};
