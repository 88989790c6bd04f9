//! GeoLayer - styled geometry layers on a stateful rendering surface
//!
//! This library provides the core of a GIS layer tool: an ordered store of
//! styled GeoJSON layers, a pipeline of geometry operations that derive new
//! layers from existing ones, and a reconciliation engine that keeps a
//! rendering surface in sync with the store without redundant resource
//! churn.
//!
//! # High-Level API
//!
//! For most use cases, the [`session`] module provides a simplified facade:
//!
//! ```ignore
//! use geolayer::session::Session;
//! use geolayer::layer::LayerId;
//!
//! let mut session = Session::new();
//! session.ingest_document("parks.geojson", &text);
//!
//! // Derive a 250 m halo around every park
//! let halo = session.buffer(&LayerId::new("parks.geojson"), 250.0, "Park halo")?;
//!
//! // Drive a rendering surface from the session's snapshots
//! let mut attachment = session.attach_surface(surface);
//! attachment.surface_ready();
//! ```

pub mod color;
pub mod config;
pub mod geometry;
pub mod id;
pub mod ingest;
pub mod layer;
pub mod logging;
pub mod ops;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod surface;

/// Version of the GeoLayer library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
