//! Routing provider seam.
//!
//! # Pluggability
//!
//! The session requests routes through the [`RoutingProvider`] trait, so
//! applications can back it with any directions service (or a local graph
//! router) without touching the core.  The contract is the common shape of
//! directions APIs: a ranked candidate list, of which the first is
//! authoritative.

use bnav_core::Coordinate;
use thiserror::Error;

// ── ProviderRoute ─────────────────────────────────────────────────────────────

/// One candidate route returned by a provider.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProviderRoute {
    /// Ordered route geometry, source to destination.
    pub geometry: Vec<Coordinate>,
    /// Total route length in metres.
    pub distance_m: f64,
    /// Estimated travel time in seconds.
    pub duration_s: f64,
}

// ── ProviderError ─────────────────────────────────────────────────────────────

/// Failure modes of a route fetch.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("malformed provider response: {0}")]
    Decode(String),
}

// ── RoutingProvider ───────────────────────────────────────────────────────────

/// Pluggable route source.
///
/// An empty `Ok` list means the provider answered but found no route; the
/// session treats that as a failure distinct from transport errors.
/// `&mut self` lets implementations keep connection or request state.
pub trait RoutingProvider {
    /// Fetch candidate routes from `from` to `to`, best first.
    fn fetch_route(
        &mut self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<ProviderRoute>, ProviderError>;
}

// ── StaticProvider ────────────────────────────────────────────────────────────

/// A provider that answers every request with the same canned candidate
/// list.  Used by the demos and as a test double; an empty list reproduces
/// the "provider found no route" case.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    routes: Vec<ProviderRoute>,
}

impl StaticProvider {
    pub fn new(routes: Vec<ProviderRoute>) -> Self {
        Self { routes }
    }

    /// Convenience constructor for the single-route case.
    pub fn with_route(route: ProviderRoute) -> Self {
        Self { routes: vec![route] }
    }
}

impl RoutingProvider for StaticProvider {
    fn fetch_route(
        &mut self,
        _from: Coordinate,
        _to: Coordinate,
    ) -> Result<Vec<ProviderRoute>, ProviderError> {
        Ok(self.routes.clone())
    }
}
