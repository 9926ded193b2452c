//! Map surface boundary.
//!
//! The overlay updater drives a map through this trait only. Implementations
//! wrap a real tile map, or record calls in memory (see `RecordingSurface`).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use guide_types::Coordinate;

use crate::distance::haversine_distance;

/// Opaque id of a layer placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerHandle(u64);

impl LayerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer:{}", self.0)
    }
}

/// Stroke for a line layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub color: String,
    pub weight: f32,
    pub opacity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

impl LineStyle {
    /// Dashed accent line from the primary spot to a distant spot.
    pub fn connector() -> Self {
        Self {
            color: "#3498db".to_string(),
            weight: 2.0,
            opacity: 0.6,
            dash_array: Some("5, 10".to_string()),
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.dash_array.is_some()
    }
}

/// Errors a surface can raise.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(Coordinate),

    #[error("Invalid zoom {zoom} (max {max})")]
    InvalidZoom { zoom: u8, max: u8 },

    #[error("Map surface not ready")]
    NotReady,

    #[error("Map backend error: {0}")]
    Backend(String),
}

impl SurfaceError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCoordinate(_) => "INVALID_COORDINATE",
            Self::InvalidZoom { .. } => "INVALID_ZOOM",
            Self::NotReady => "SURFACE_NOT_READY",
            Self::Backend(_) => "SURFACE_BACKEND",
        }
    }
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Primitive map operations the overlay updater needs.
pub trait MapSurface {
    /// Move the viewport. `animate = false` must jump without transition.
    fn set_viewport(&mut self, center: Coordinate, zoom: u8, animate: bool) -> SurfaceResult<()>;

    /// Place a point marker labeled with raw (unescaped) text.
    fn add_marker(&mut self, coords: Coordinate, label: &str) -> SurfaceResult<LayerHandle>;

    /// Draw a line between two points.
    fn add_line(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        style: &LineStyle,
    ) -> SurfaceResult<LayerHandle>;

    /// Remove a layer. Removing a layer that is not on the surface is a no-op.
    fn remove_layer(&mut self, handle: LayerHandle) -> SurfaceResult<()>;

    /// Great-circle distance in meters.
    fn geodesic_distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        haversine_distance(a, b)
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Initial view and tile source for a map surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapSurfaceConfig {
    #[serde(default = "default_initial_center")]
    pub initial_center: Coordinate,
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: u8,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for MapSurfaceConfig {
    fn default() -> Self {
        Self {
            initial_center: default_initial_center(),
            initial_zoom: default_initial_zoom(),
            max_zoom: default_max_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
        }
    }
}

fn default_initial_center() -> Coordinate {
    Coordinate::new(50.0, 10.0)
}

fn default_initial_zoom() -> u8 {
    4
}

fn default_max_zoom() -> u8 {
    19
}

fn default_tile_url() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "&copy; OpenStreetMap contributors".to_string()
}
