//! Overlay updater
//!
//! Replaces the layers shown for the previous destination with markers and
//! connector lines for the next one.
//!
//! ## Flow
//!
//! ```text
//! previous OverlayLayers ──► remove_layer (each)
//!                 │
//!                 ▼
//! set_viewport(center, zoom, animate = false)
//!                 │
//!                 ▼
//! for each spot: add_marker
//!     index > 0 && distance(primary, spot) > 2000 m ──► add_line
//!                 │
//!                 ▼
//! new OverlayLayers (owned by the caller until the next update)
//! ```
//!
//! Surface failures stop the update, are logged, and never reach the caller.
//! Whatever was placed before the failure is still returned so the next
//! update can remove it.

use serde::Serialize;

use guide_types::MapDescriptor;

use crate::surface::{LayerHandle, LineStyle, MapSurface, SurfaceError};

/// Connector lines are drawn only for spots strictly farther than this.
pub const CONNECTOR_THRESHOLD_METERS: f64 = 2000.0;

/// Whether a spot at `distance_meters` from the primary gets a connector.
pub fn needs_connector(distance_meters: f64) -> bool {
    distance_meters > CONNECTOR_THRESHOLD_METERS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Marker,
    Connector,
}

/// One layer placed by the updater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayLayer {
    pub handle: LayerHandle,
    pub kind: LayerKind,
    /// Index of the spot in `MapDescriptor::markers` this layer belongs to.
    pub spot_index: usize,
}

/// Layers currently on the surface for the selected destination.
///
/// Returned by `update_overlay` and handed back on the next call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverlayLayers {
    layers: Vec<OverlayLayer>,
}

impl OverlayLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayLayer> {
        self.layers.iter()
    }

    pub fn handles(&self) -> Vec<LayerHandle> {
        self.layers.iter().map(|l| l.handle).collect()
    }

    pub fn marker_count(&self) -> usize {
        self.count(LayerKind::Marker)
    }

    pub fn connector_count(&self) -> usize {
        self.count(LayerKind::Connector)
    }

    fn count(&self, kind: LayerKind) -> usize {
        self.layers.iter().filter(|l| l.kind == kind).count()
    }

    fn push(&mut self, layer: OverlayLayer) {
        self.layers.push(layer);
    }
}

impl IntoIterator for OverlayLayers {
    type Item = OverlayLayer;
    type IntoIter = std::vec::IntoIter<OverlayLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

/// Outcome of an overlay update.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayUpdate {
    pub layers: OverlayLayers,
    /// First surface error, if the update did not complete.
    pub failure: Option<SurfaceError>,
}

impl OverlayUpdate {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Replace `previous` with the overlay for `map`.
pub fn update_overlay<S>(
    surface: &mut S,
    previous: OverlayLayers,
    map: &MapDescriptor,
) -> OverlayLayers
where
    S: MapSurface + ?Sized,
{
    update_overlay_reporting(surface, previous, map).layers
}

/// Same as `update_overlay`, also reporting the surface failure if any.
pub fn update_overlay_reporting<S>(
    surface: &mut S,
    previous: OverlayLayers,
    map: &MapDescriptor,
) -> OverlayUpdate
where
    S: MapSurface + ?Sized,
{
    let (mut layers, mut failure) = clear(surface, previous);

    if let Err(e) = draw(surface, map, &mut layers) {
        tracing::warn!(error = %e, code = e.code(), "map overlay update failed");
        failure.get_or_insert(e);
    }

    tracing::debug!(
        markers = layers.marker_count(),
        connectors = layers.connector_count(),
        "map overlay updated"
    );

    OverlayUpdate { layers, failure }
}

/// Remove previous layers. Layers the surface refused to remove are kept so
/// the next update retries them.
fn clear<S>(surface: &mut S, previous: OverlayLayers) -> (OverlayLayers, Option<SurfaceError>)
where
    S: MapSurface + ?Sized,
{
    let mut retained = OverlayLayers::new();
    let mut failure = None;
    for layer in previous {
        if let Err(e) = surface.remove_layer(layer.handle) {
            tracing::warn!(handle = %layer.handle, error = %e, "failed to remove overlay layer");
            retained.push(layer);
            failure.get_or_insert(e);
        }
    }
    (retained, failure)
}

fn draw<S>(
    surface: &mut S,
    map: &MapDescriptor,
    layers: &mut OverlayLayers,
) -> Result<(), SurfaceError>
where
    S: MapSurface + ?Sized,
{
    surface.set_viewport(map.center, map.zoom, false)?;

    let Some(primary) = map.markers.first() else {
        return Ok(());
    };

    let style = LineStyle::connector();
    for (index, spot) in map.markers.iter().enumerate() {
        let handle = surface.add_marker(spot.coords, &spot.title)?;
        layers.push(OverlayLayer {
            handle,
            kind: LayerKind::Marker,
            spot_index: index,
        });

        if index == 0 {
            continue;
        }

        let distance = surface.geodesic_distance(primary.coords, spot.coords);
        if needs_connector(distance) {
            let handle = surface.add_line(primary.coords, spot.coords, &style)?;
            layers.push(OverlayLayer {
                handle,
                kind: LayerKind::Connector,
                spot_index: index,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{PlacedLayer, RecordingSurface, SurfaceCommand};
    use guide_types::{Coordinate, Spot};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn map(markers: Vec<Spot>) -> MapDescriptor {
        MapDescriptor {
            center: Coordinate::new(0.0, 0.0),
            zoom: 13,
            markers,
        }
    }

    fn spot(title: &str, lat: f64, lng: f64) -> Spot {
        Spot::new(title, Coordinate::new(lat, lng))
    }

    /// Surface that reports a fixed distance for every pair.
    struct FixedDistance {
        inner: RecordingSurface,
        meters: f64,
    }

    impl MapSurface for FixedDistance {
        fn set_viewport(
            &mut self,
            center: Coordinate,
            zoom: u8,
            animate: bool,
        ) -> Result<(), SurfaceError> {
            self.inner.set_viewport(center, zoom, animate)
        }

        fn add_marker(
            &mut self,
            coords: Coordinate,
            label: &str,
        ) -> Result<LayerHandle, SurfaceError> {
            self.inner.add_marker(coords, label)
        }

        fn add_line(
            &mut self,
            from: Coordinate,
            to: Coordinate,
            style: &LineStyle,
        ) -> Result<LayerHandle, SurfaceError> {
            self.inner.add_line(from, to, style)
        }

        fn remove_layer(&mut self, handle: LayerHandle) -> Result<(), SurfaceError> {
            self.inner.remove_layer(handle)
        }

        fn geodesic_distance(&self, _a: Coordinate, _b: Coordinate) -> f64 {
            self.meters
        }
    }

    #[test]
    fn test_distant_spot_gets_connector() {
        let mut surface = RecordingSurface::default();
        let layers = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("A", 0.0, 0.0), spot("B", 0.0, 0.02)]),
        );
        assert_eq!(layers.marker_count(), 2);
        assert_eq!(layers.connector_count(), 1);
        assert_eq!(surface.line_count(), 1);
    }

    #[test]
    fn test_near_spot_gets_no_connector() {
        let mut surface = RecordingSurface::default();
        let layers = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("A", 0.0, 0.0), spot("B", 0.0, 0.005)]),
        );
        assert_eq!(layers.marker_count(), 2);
        assert_eq!(layers.connector_count(), 0);
    }

    #[test]
    fn test_connector_joins_primary_and_spot() {
        let mut surface = RecordingSurface::default();
        let layers = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![
                spot("Hub", 0.0, 0.0),
                spot("Near", 0.0, 0.001),
                spot("Far", 0.1, 0.0),
            ]),
        );
        let connector = layers
            .iter()
            .find(|l| l.kind == LayerKind::Connector)
            .unwrap();
        assert_eq!(connector.spot_index, 2);
        match surface.layer(connector.handle) {
            Some(PlacedLayer::Line { from, to, style }) => {
                assert_eq!(*from, Coordinate::new(0.0, 0.0));
                assert_eq!(*to, Coordinate::new(0.1, 0.0));
                assert!(style.is_dashed());
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_layer_order_follows_markers() {
        let mut surface = RecordingSurface::default();
        let layers = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![
                spot("A", 0.0, 0.0),
                spot("B", 0.0, 1.0),
                spot("C", 0.0, 0.0001),
            ]),
        );
        let shape: Vec<_> = layers.iter().map(|l| (l.kind, l.spot_index)).collect();
        assert_eq!(
            shape,
            vec![
                (LayerKind::Marker, 0),
                (LayerKind::Marker, 1),
                (LayerKind::Connector, 1),
                (LayerKind::Marker, 2),
            ]
        );
    }

    #[test]
    fn test_empty_markers_only_moves_viewport() {
        let mut surface = RecordingSurface::default();
        let descriptor = MapDescriptor {
            center: Coordinate::new(45.4, 12.3),
            zoom: 11,
            markers: vec![],
        };
        let layers = update_overlay(&mut surface, OverlayLayers::new(), &descriptor);
        assert!(layers.is_empty());
        assert_eq!(surface.viewport().center, Coordinate::new(45.4, 12.3));
        assert_eq!(surface.viewport().zoom, 11);
        assert_eq!(surface.live_handles().len(), 0);
    }

    #[test]
    fn test_single_marker_has_no_connector() {
        let mut surface = RecordingSurface::default();
        let layers = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("Only", 10.0, 10.0)]),
        );
        assert_eq!(layers.marker_count(), 1);
        assert_eq!(layers.connector_count(), 0);
    }

    #[test]
    fn test_viewport_set_without_animation() {
        let mut surface = RecordingSurface::default();
        update_overlay(&mut surface, OverlayLayers::new(), &map(vec![]));
        assert!(surface.commands().iter().any(|c| matches!(
            c,
            SurfaceCommand::SetViewport { animate: false, .. }
        )));
        assert!(!surface.commands().iter().any(|c| matches!(
            c,
            SurfaceCommand::SetViewport { animate: true, .. }
        )));
    }

    #[test]
    fn test_second_update_replaces_first() {
        let mut surface = RecordingSurface::default();
        let first = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("A", 0.0, 0.0), spot("B", 0.0, 0.5), spot("C", 0.5, 0.0)]),
        );
        assert_eq!(surface.live_handles().len(), 5);

        let second = update_overlay(
            &mut surface,
            first.clone(),
            &map(vec![spot("X", 10.0, 10.0)]),
        );
        assert_eq!(surface.live_handles(), second.handles());
        for handle in first.handles() {
            assert!(surface.layer(handle).is_none());
        }
    }

    #[test]
    fn test_removing_absent_layer_is_noop() {
        let mut surface = RecordingSurface::default();
        let first = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("A", 0.0, 0.0)]),
        );
        for handle in first.handles() {
            surface.remove_layer(handle).unwrap();
        }
        let update = update_overlay_reporting(&mut surface, first, &map(vec![]));
        assert!(update.is_complete());
        assert!(update.layers.is_empty());
    }

    #[test]
    fn test_failure_keeps_partial_overlay() {
        let mut surface = RecordingSurface::default();
        let update = update_overlay_reporting(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("A", 0.0, 0.0), spot("Broken", 95.0, 0.0), spot("C", 1.0, 1.0)]),
        );
        assert_eq!(
            update.failure,
            Some(SurfaceError::InvalidCoordinate(Coordinate::new(95.0, 0.0)))
        );
        assert_eq!(update.layers.marker_count(), 1);
        assert_eq!(surface.live_handles(), update.layers.handles());

        // The next update still cleans up the partial overlay.
        let next = update_overlay(&mut surface, update.layers, &map(vec![]));
        assert!(next.is_empty());
        assert!(surface.live_handles().is_empty());
    }

    #[test]
    fn test_surface_not_ready_is_swallowed() {
        let mut surface = RecordingSurface::default();
        surface.set_ready(false);
        let update = update_overlay_reporting(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("A", 0.0, 0.0)]),
        );
        assert_eq!(update.failure, Some(SurfaceError::NotReady));
        assert!(update.layers.is_empty());
    }

    #[test]
    fn test_failed_removal_is_retried_next_time() {
        let mut surface = RecordingSurface::default();
        let first = update_overlay(
            &mut surface,
            OverlayLayers::new(),
            &map(vec![spot("A", 0.0, 0.0)]),
        );
        surface.set_ready(false);
        let stuck = update_overlay(&mut surface, first.clone(), &map(vec![]));
        assert_eq!(stuck.handles(), first.handles());

        surface.set_ready(true);
        let clean = update_overlay(&mut surface, stuck, &map(vec![]));
        assert!(clean.is_empty());
        assert!(surface.live_handles().is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!needs_connector(2000.0));
        assert!(needs_connector(2000.000_001));
        assert!(!needs_connector(0.0));
    }

    fn fixed_distance_connectors(meters: f64, spots: usize) -> usize {
        let mut surface = FixedDistance {
            inner: RecordingSurface::default(),
            meters,
        };
        let markers = (0..spots)
            .map(|i| spot(&format!("S{i}"), 0.0, i as f64 * 0.001))
            .collect();
        update_overlay(&mut surface, OverlayLayers::new(), &map(markers)).connector_count()
    }

    #[test]
    fn test_exactly_threshold_draws_nothing() {
        assert_eq!(fixed_distance_connectors(2000.0, 4), 0);
        assert_eq!(fixed_distance_connectors(2000.5, 4), 3);
    }

    proptest! {
        #[test]
        fn connector_iff_beyond_threshold(meters in 0.0f64..10_000.0, spots in 0usize..8) {
            let expected = if meters > CONNECTOR_THRESHOLD_METERS {
                spots.saturating_sub(1)
            } else {
                0
            };
            prop_assert_eq!(fixed_distance_connectors(meters, spots), expected);
        }

        #[test]
        fn markers_match_spots(lngs in prop::collection::vec(-1.0f64..1.0, 0..10)) {
            let mut surface = RecordingSurface::default();
            let markers: Vec<Spot> = lngs.iter().map(|lng| spot("s", 0.0, *lng)).collect();
            let layers = update_overlay(&mut surface, OverlayLayers::new(), &map(markers));
            prop_assert_eq!(layers.marker_count(), lngs.len());
            prop_assert!(layers.connector_count() <= lngs.len().saturating_sub(1));
            prop_assert_eq!(surface.live_handles(), layers.handles());
        }
    }
}
