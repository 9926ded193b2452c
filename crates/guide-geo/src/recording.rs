//! In-memory map surface.
//!
//! Keeps the live layer set and a log of every call. Used by tests and by
//! the CLI to show what a real map would have drawn.

use serde::Serialize;
use std::collections::BTreeMap;

use guide_types::Coordinate;

use crate::surface::{
    LayerHandle, LineStyle, MapSurface, MapSurfaceConfig, SurfaceError, SurfaceResult,
};

/// Current camera of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

/// A layer currently on the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacedLayer {
    Marker {
        coords: Coordinate,
        label: String,
    },
    Line {
        from: Coordinate,
        to: Coordinate,
        style: LineStyle,
    },
}

/// One call made against the surface, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    SetViewport {
        center: Coordinate,
        zoom: u8,
        animate: bool,
    },
    AddMarker {
        handle: LayerHandle,
        coords: Coordinate,
        label: String,
    },
    AddLine {
        handle: LayerHandle,
        from: Coordinate,
        to: Coordinate,
    },
    RemoveLayer {
        handle: LayerHandle,
        /// False when the layer was already gone.
        present: bool,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    config: MapSurfaceConfig,
    ready: bool,
    next_handle: u64,
    viewport: Viewport,
    layers: BTreeMap<LayerHandle, PlacedLayer>,
    commands: Vec<SurfaceCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(MapSurfaceConfig::default())
    }
}

impl RecordingSurface {
    /// Create a surface showing the configured initial view.
    pub fn new(config: MapSurfaceConfig) -> Self {
        let viewport = Viewport {
            center: config.initial_center,
            zoom: config.initial_zoom,
        };
        Self {
            config,
            ready: true,
            next_handle: 1,
            viewport,
            layers: BTreeMap::new(),
            commands: Vec::new(),
        }
    }

    /// Simulate a surface that is not mounted yet.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layer(&self, handle: LayerHandle) -> Option<&PlacedLayer> {
        self.layers.get(&handle)
    }

    /// Handles of every live layer, oldest first.
    pub fn live_handles(&self) -> Vec<LayerHandle> {
        self.layers.keys().copied().collect()
    }

    pub fn layers(&self) -> impl Iterator<Item = (&LayerHandle, &PlacedLayer)> {
        self.layers.iter()
    }

    pub fn marker_count(&self) -> usize {
        self.layers
            .values()
            .filter(|l| matches!(l, PlacedLayer::Marker { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.layers
            .values()
            .filter(|l| matches!(l, PlacedLayer::Line { .. }))
            .count()
    }

    /// Every call since the last `take_commands`.
    ///
    /// The log is never trimmed on its own. A long-lived surface should be
    /// drained once per selection.
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drain the call log, keeping layers.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    fn ensure_ready(&self) -> SurfaceResult<()> {
        if self.ready {
            Ok(())
        } else {
            Err(SurfaceError::NotReady)
        }
    }

    fn ensure_valid(coords: Coordinate) -> SurfaceResult<()> {
        if coords.is_valid() {
            Ok(())
        } else {
            Err(SurfaceError::InvalidCoordinate(coords))
        }
    }

    fn allocate(&mut self) -> LayerHandle {
        let handle = LayerHandle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl MapSurface for RecordingSurface {
    fn set_viewport(&mut self, center: Coordinate, zoom: u8, animate: bool) -> SurfaceResult<()> {
        self.ensure_ready()?;
        Self::ensure_valid(center)?;
        if zoom > self.config.max_zoom {
            return Err(SurfaceError::InvalidZoom {
                zoom,
                max: self.config.max_zoom,
            });
        }
        self.viewport = Viewport { center, zoom };
        self.commands.push(SurfaceCommand::SetViewport {
            center,
            zoom,
            animate,
        });
        Ok(())
    }

    fn add_marker(&mut self, coords: Coordinate, label: &str) -> SurfaceResult<LayerHandle> {
        self.ensure_ready()?;
        Self::ensure_valid(coords)?;
        let handle = self.allocate();
        self.layers.insert(
            handle,
            PlacedLayer::Marker {
                coords,
                label: label.to_string(),
            },
        );
        self.commands.push(SurfaceCommand::AddMarker {
            handle,
            coords,
            label: label.to_string(),
        });
        Ok(handle)
    }

    fn add_line(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        style: &LineStyle,
    ) -> SurfaceResult<LayerHandle> {
        self.ensure_ready()?;
        Self::ensure_valid(from)?;
        Self::ensure_valid(to)?;
        let handle = self.allocate();
        self.layers.insert(
            handle,
            PlacedLayer::Line {
                from,
                to,
                style: style.clone(),
            },
        );
        self.commands
            .push(SurfaceCommand::AddLine { handle, from, to });
        Ok(handle)
    }

    fn remove_layer(&mut self, handle: LayerHandle) -> SurfaceResult<()> {
        self.ensure_ready()?;
        let present = self.layers.remove(&handle).is_some();
        self.commands
            .push(SurfaceCommand::RemoveLayer { handle, present });
        Ok(())
    }
}
