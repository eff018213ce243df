//! `bnav-route` — route retrieval and storage.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`densify`]  | Linear point interpolation for smooth playback          |
//! | [`provider`] | `RoutingProvider` trait, `ProviderRoute`, `StaticProvider` |
//! | [`session`]  | `RouteSession` — endpoints, path, metrics, staleness    |
//! | [`error`]    | `RouteError`                                            |
//!
//! # The async boundary
//!
//! Route computation happens in an external provider, typically over HTTP.
//! The session models that suspension explicitly as a two-phase call:
//! [`begin_calculation`](session::RouteSession::begin_calculation) captures
//! the request, the caller performs the fetch however it likes (blocking,
//! async runtime, worker thread), and
//! [`complete_calculation`](session::RouteSession::complete_calculation)
//! applies the outcome — discarding it if the session was reset while the
//! fetch was in flight.  [`calculate_route`](session::RouteSession::calculate_route)
//! composes both phases for synchronous callers.

pub mod densify;
pub mod error;
pub mod provider;
pub mod session;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use densify::densify;
pub use error::RouteError;
pub use provider::{ProviderError, ProviderRoute, RoutingProvider, StaticProvider};
pub use session::{PendingCalculation, RouteMetrics, RouteSession};
