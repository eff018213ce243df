//! The route session: endpoints, stored path, and metrics.
//!
//! One session owns one route at a time.  Recalculation replaces the path
//! and metrics wholesale — nothing accumulates.  The session also owns the
//! two endpoint markers; replacing an endpoint removes the old marker before
//! placing the new one.

use bnav_core::{Coordinate, EventBus, NavEvent};
use bnav_map::{MarkerFactory, MarkerHandle, MarkerKind, RouteLineSink};
use log::{debug, warn};

use crate::densify::densify;
use crate::error::RouteError;
use crate::provider::{ProviderError, ProviderRoute, RoutingProvider};

/// Default interpolation density: extra points per provider segment.
pub const DEFAULT_DENSITY: u32 = 3;

// ── RouteMetrics ──────────────────────────────────────────────────────────────

/// Totals for the stored route.  Lifecycle is 1:1 with the path: both are
/// replaced together and cleared together.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteMetrics {
    /// Total route length in metres.
    pub distance_m: f64,
    /// Estimated travel time in seconds.
    pub duration_s: f64,
}

// ── PendingCalculation ────────────────────────────────────────────────────────

/// A route request captured by [`RouteSession::begin_calculation`].
///
/// Holds the endpoints to fetch and the session generation at capture time.
/// [`RouteSession::complete_calculation`] consumes it and discards the
/// outcome if the generation moved on — the staleness check that makes a
/// reset-during-fetch safe.
#[derive(Debug)]
pub struct PendingCalculation {
    pub from: Coordinate,
    pub to: Coordinate,
    generation: u64,
}

// ── RouteSession ──────────────────────────────────────────────────────────────

/// Route state machine: set endpoints, calculate, clear.
///
/// Generic over the marker handle type so endpoint markers can be real map
/// markers in the application and recording doubles in tests.
pub struct RouteSession<H: MarkerHandle> {
    start_point: Option<Coordinate>,
    end_point: Option<Coordinate>,
    start_marker: Option<H>,
    end_marker: Option<H>,
    path: Vec<Coordinate>,
    metrics: RouteMetrics,
    density: u32,
    /// Bumped on every clear/reset; in-flight calculations that captured an
    /// older value land stale and are discarded.
    generation: u64,
}

impl<H: MarkerHandle> Default for RouteSession<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MarkerHandle> RouteSession<H> {
    pub fn new() -> Self {
        Self {
            start_point: None,
            end_point: None,
            start_marker: None,
            end_marker: None,
            path: Vec::new(),
            metrics: RouteMetrics::default(),
            density: DEFAULT_DENSITY,
            generation: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn start_point(&self) -> Option<Coordinate> {
        self.start_point
    }

    pub fn end_point(&self) -> Option<Coordinate> {
        self.end_point
    }

    /// The stored (densified) route path.  Empty when no route is stored.
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn metrics(&self) -> RouteMetrics {
        self.metrics
    }

    pub fn density(&self) -> u32 {
        self.density
    }

    pub fn has_route(&self) -> bool {
        !self.path.is_empty()
    }

    // ── Endpoints ─────────────────────────────────────────────────────────

    /// Set or replace the start point, moving its marker.
    ///
    /// Invalid coordinates are an input error: warn-logged no-op.
    pub fn set_start<F>(&mut self, at: Coordinate, factory: &mut F, bus: &mut EventBus)
    where
        F: MarkerFactory<Handle = H>,
    {
        if !at.is_valid() {
            warn!("ignoring invalid start point {at}");
            return;
        }
        if let Some(old) = self.start_marker.take() {
            old.remove();
        }
        self.start_marker = Some(factory.place(at, MarkerKind::RouteStart));
        self.start_point = Some(at);
        bus.publish(NavEvent::StartPointSet(at));
    }

    /// Set or replace the end point, moving its marker.
    pub fn set_end<F>(&mut self, at: Coordinate, factory: &mut F, bus: &mut EventBus)
    where
        F: MarkerFactory<Handle = H>,
    {
        if !at.is_valid() {
            warn!("ignoring invalid end point {at}");
            return;
        }
        if let Some(old) = self.end_marker.take() {
            old.remove();
        }
        self.end_marker = Some(factory.place(at, MarkerKind::RouteEnd));
        self.end_point = Some(at);
        bus.publish(NavEvent::EndPointSet(at));
    }

    // ── Calculation ───────────────────────────────────────────────────────

    /// Phase one: validate endpoints and capture the request.
    ///
    /// Emits `RouteCalculationStart` on success.  A missing endpoint is an
    /// input error — warn-logged, no event, `Err(MissingEndpoint)`.
    pub fn begin_calculation(
        &mut self,
        bus: &mut EventBus,
    ) -> Result<PendingCalculation, RouteError> {
        let (from, to) = match (self.start_point, self.end_point) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                warn!("route calculation requested without both endpoints");
                return Err(RouteError::MissingEndpoint);
            }
        };

        bus.publish(NavEvent::RouteCalculationStart);
        Ok(PendingCalculation { from, to, generation: self.generation })
    }

    /// Phase two: apply a provider outcome captured by
    /// [`begin_calculation`](Self::begin_calculation).
    ///
    /// Returns `Ok(Some(metrics))` when a route was stored, `Ok(None)` when
    /// the result arrived stale (the session was cleared or reset while the
    /// fetch was in flight) and was discarded without events, and `Err` on
    /// provider failure — in which case `RouteCalculationError` has been
    /// published and the session is untouched.
    pub fn complete_calculation<L>(
        &mut self,
        pending: PendingCalculation,
        outcome: Result<Vec<ProviderRoute>, ProviderError>,
        line: &mut L,
        bus: &mut EventBus,
    ) -> Result<Option<RouteMetrics>, RouteError>
    where
        L: RouteLineSink,
    {
        if pending.generation != self.generation {
            debug!("discarding stale route result (generation {} != {})",
                pending.generation, self.generation);
            return Ok(None);
        }

        let route = match outcome {
            Ok(routes) => match routes.into_iter().next() {
                Some(route) => route,
                None => {
                    let err = RouteError::NoRoute;
                    bus.publish(NavEvent::RouteCalculationError(err.to_string()));
                    return Err(err);
                }
            },
            Err(e) => {
                let err = RouteError::from(e);
                bus.publish(NavEvent::RouteCalculationError(err.to_string()));
                return Err(err);
            }
        };

        self.path = densify(&route.geometry, self.density);
        self.metrics = RouteMetrics {
            distance_m: route.distance_m,
            duration_s: route.duration_s,
        };
        line.set_route(&self.path);

        bus.publish(NavEvent::RouteCalculated {
            path: self.path.clone(),
            distance_m: self.metrics.distance_m,
            duration_s: self.metrics.duration_s,
        });

        Ok(Some(self.metrics))
    }

    /// Both phases in one synchronous call.  Returns the stored metrics, or
    /// `None` on any failure (already logged and, where applicable, surfaced
    /// as a `RouteCalculationError` event).
    pub fn calculate_route<P, L>(
        &mut self,
        provider: &mut P,
        line: &mut L,
        bus: &mut EventBus,
    ) -> Option<RouteMetrics>
    where
        P: RoutingProvider,
        L: RouteLineSink,
    {
        let pending = self.begin_calculation(bus).ok()?;
        let outcome = provider.fetch_route(pending.from, pending.to);
        self.complete_calculation(pending, outcome, line, bus)
            .ok()
            .flatten()
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Empty the stored path, metrics, and the drawn line.  Endpoints stay.
    ///
    /// Any calculation in flight will land stale and be discarded.
    pub fn clear_route<L: RouteLineSink>(&mut self, line: &mut L) {
        self.path.clear();
        self.metrics = RouteMetrics::default();
        self.generation += 1;
        line.clear();
    }

    /// Clear the route *and* the endpoints with their markers.
    ///
    /// The facade emits the `Reset` event; this method only tears state down.
    pub fn reset<L: RouteLineSink>(&mut self, line: &mut L) {
        self.clear_route(line);
        if let Some(marker) = self.start_marker.take() {
            marker.remove();
        }
        if let Some(marker) = self.end_marker.take() {
            marker.remove();
        }
        self.start_point = None;
        self.end_point = None;
    }

    /// Change the interpolation density for *future* calculations.  The
    /// stored path is not touched; the facade owns the
    /// recalculate-while-simulating contract.
    pub fn set_density(&mut self, density: u32) {
        self.density = density;
    }
}
