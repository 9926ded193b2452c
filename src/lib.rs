//! Destination Guide
//!
//! Browse a catalog of city destinations: filter by connection type, select
//! one, get its detail document and see its spots on a map.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  guide (CLI)  ── GuideConfig (YAML) ── tracing-subscriber     │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  GuideController                                             │
//! │    Catalog (JSON, per-record rejects)   ConnectionFilter      │
//! └──────────────────────────────────────────────────────────────┘
//!                │                                  │
//!                ▼                                  ▼
//! ┌─────────────────────────────┐   ┌────────────────────────────┐
//! │ guide-composer              │   │ guide-geo                  │
//! │ compose() ─► DetailDocument │   │ update_overlay(MapSurface) │
//! └─────────────────────────────┘   └────────────────────────────┘
//!                \                                  /
//!                 └──────── guide-types ───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use destination_guide::{Catalog, ConnectionFilter, GuideController};
//! use guide_geo::RecordingSurface;
//!
//! let catalog = Catalog::from_json(r#"[{
//!     "id": "porto", "name": "Porto", "country": "Portugal",
//!     "flightTime": "2h 30m", "route": "LGW - OPO",
//!     "description": "Port lodges on the Douro.", "connectionType": "direct",
//!     "dayTrips": [],
//!     "map": { "center": [41.15, -8.61], "zoom": 12, "markers": [] }
//! }]"#)?;
//!
//! let mut controller = GuideController::new(catalog, RecordingSurface::default());
//! let selection = controller.apply_filter(ConnectionFilter::Direct).unwrap();
//! assert_eq!(selection.destination_id, "porto");
//! # Ok::<(), destination_guide::CatalogError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;

pub use catalog::{Catalog, CatalogError, ConnectionFilter, RejectedRecord};
pub use config::{ConfigError, GuideConfig, CONFIG_ENV};
pub use controller::{GuideController, MapStatus, Selection};
pub use error::{GuideError, GuideResult};
