//! `bnav` — the navigation facade.
//!
//! Composes the route session, the simulation clock, and the spatial station
//! queries behind a single event-emitting API.  The application provides the
//! four collaborators (routing provider, marker factory, map surface, route
//! line sink) at construction and drives time by calling
//! [`Navigator::advance`] from its event loop.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bnav::{Coordinate, EventKind, Millis, Navigator};
//! use bnav_map::{NoopLineSink, NoopMarkerFactory, NoopSurface};
//! use bnav_route::StaticProvider;
//!
//! let mut nav = Navigator::new(provider, factory, surface, line);
//! nav.on(EventKind::PositionUpdated, |event| println!("{event:?}"));
//!
//! nav.set_start(Coordinate::new(121.5170, 25.0478));
//! nav.set_end(Coordinate::new(121.5678, 25.0408));
//! nav.calculate_route();
//! nav.start_simulation(Millis(0));
//! loop {
//!     nav.advance(now_ms());
//!     // … host event loop …
//! }
//! ```

pub mod facade;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use facade::Navigator;

pub use bnav_core::{
    Availability, Coordinate, EventBus, EventKind, GeoBounds, Millis, NavEvent, ProgressUpdate,
    Station, SubscriptionId, duration_parts, format_distance_km,
};
pub use bnav_map::{MapSurface, MarkerFactory, MarkerHandle, MarkerKind, RouteLineSink};
pub use bnav_route::{ProviderRoute, RouteMetrics, RoutingProvider, StaticProvider};
pub use bnav_sim::SimPhase;

#[cfg(feature = "index")]
pub use bnav_spatial::StationIndex;
