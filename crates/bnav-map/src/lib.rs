//! `bnav-map` — the seams between the navigation core and a real map.
//!
//! The core never renders.  Everything it needs from a map library is
//! expressed as three narrow traits, implemented by the application against
//! its rendering wrapper of choice:
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`marker`]  | `MarkerFactory`, `MarkerHandle`, `MarkerKind`          |
//! | [`surface`] | `MapSurface`, `FramingOptions`, `FlyToOptions`         |
//! | [`layer`]   | `RouteLineSink`                                        |
//! | [`noop`]    | Inert implementations for tests and headless use       |
//!
//! Implementations are deliberately not required to be `Send`: the framework
//! runs on a single cooperative loop, and map wrappers rarely tolerate
//! cross-thread access anyway.

pub mod layer;
pub mod marker;
pub mod noop;
pub mod surface;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use layer::RouteLineSink;
pub use marker::{MarkerFactory, MarkerHandle, MarkerKind};
pub use noop::{NoopLineSink, NoopMarker, NoopMarkerFactory, NoopSurface};
pub use surface::{FlyToOptions, FramingOptions, MapSurface};
