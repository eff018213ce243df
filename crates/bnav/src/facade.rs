//! The `Navigator` composition root.

use bnav_core::{
    Coordinate, EventBus, EventKind, Millis, NavEvent, Station, SubscriptionId,
};
use bnav_map::{MapSurface, MarkerFactory, RouteLineSink};
use bnav_route::{RouteMetrics, RouteSession, RoutingProvider};
use bnav_sim::{SimPhase, SimulationClock};
use bnav_spatial::{find_within_bounds, find_within_radius, viewport_radius};
use log::debug;

/// Owns the session, the clock, the event bus, and the four collaborators,
/// and mediates every interaction between them.
///
/// # Type parameters
///
/// | Param | Collaborator                                    |
/// |-------|-------------------------------------------------|
/// | `P`   | [`RoutingProvider`] — the directions backend    |
/// | `F`   | [`MarkerFactory`] — creates map markers         |
/// | `S`   | [`MapSurface`] — the steerable viewport         |
/// | `L`   | [`RouteLineSink`] — draws the route line        |
///
/// Swap any of them for a test double to exercise the full navigation flow
/// headless.
pub struct Navigator<P, F, S, L>
where
    P: RoutingProvider,
    F: MarkerFactory,
    S: MapSurface,
    L: RouteLineSink,
{
    provider: P,
    factory: F,
    surface: S,
    line: L,
    bus: EventBus,
    session: RouteSession<F::Handle>,
    clock: SimulationClock<F::Handle>,
}

impl<P, F, S, L> Navigator<P, F, S, L>
where
    P: RoutingProvider,
    F: MarkerFactory,
    S: MapSurface,
    L: RouteLineSink,
{
    pub fn new(provider: P, factory: F, surface: S, line: L) -> Self {
        Self {
            provider,
            factory,
            surface,
            line,
            bus: EventBus::new(),
            session: RouteSession::new(),
            clock: SimulationClock::new(),
        }
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Subscribe to `kind`.  Listeners fire synchronously, in subscription
    /// order.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&NavEvent) + 'static) -> SubscriptionId {
        self.bus.on(kind, listener)
    }

    /// Unsubscribe.  Returns `false` when the subscription was already gone.
    pub fn off(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        self.bus.off(kind, id)
    }

    // ── Route ─────────────────────────────────────────────────────────────

    /// Set or replace the route start point (emits `StartPointSet`).
    pub fn set_start(&mut self, at: Coordinate) {
        self.session.set_start(at, &mut self.factory, &mut self.bus);
    }

    /// Set or replace the route end point (emits `EndPointSet`).
    pub fn set_end(&mut self, at: Coordinate) {
        self.session.set_end(at, &mut self.factory, &mut self.bus);
    }

    /// Fetch and store a route between the current endpoints.
    ///
    /// Returns the stored metrics, or `None` on failure — missing endpoints
    /// are a logged no-op, provider failures surface as a
    /// `RouteCalculationError` event with the session untouched.
    pub fn calculate_route(&mut self) -> Option<RouteMetrics> {
        self.session
            .calculate_route(&mut self.provider, &mut self.line, &mut self.bus)
    }

    /// Empty the stored route and the drawn line.  Endpoints stay.
    pub fn clear_route(&mut self) {
        self.session.clear_route(&mut self.line);
    }

    /// The stored (densified) route path; empty when no route exists.
    pub fn route_path(&self) -> &[Coordinate] {
        self.session.path()
    }

    pub fn route_metrics(&self) -> RouteMetrics {
        self.session.metrics()
    }

    /// Interpolation density for future calculations.
    pub fn points_to_insert(&self) -> u32 {
        self.session.density()
    }

    /// Change the interpolation density (emits `PointsToInsertChanged`).
    ///
    /// When a simulation is active this recalculates the route at the new
    /// density and restarts playback from the beginning, re-pausing if the
    /// clock was paused.  Deliberate, long-standing behavior — callers that
    /// find a silent restart surprising should change density while idle.
    pub fn set_points_to_insert(&mut self, now: Millis, count: u32) {
        self.session.set_density(count);
        self.bus.publish(NavEvent::PointsToInsertChanged(count));

        if self.clock.is_active() {
            debug!("density changed mid-playback; recalculating and restarting");
            self.recalculate_route(now);
        }
    }

    /// Recalculate with the current endpoints and density, restarting any
    /// active playback over the new path.
    pub fn recalculate_route(&mut self, now: Millis) -> Option<RouteMetrics> {
        let was_active = self.clock.is_active();
        let was_paused = self.clock.phase() == SimPhase::Paused;

        self.clock.stop(&mut self.bus);
        let metrics = self.calculate_route();

        if was_active && self.session.has_route() {
            self.clock.start(
                now,
                self.session.path(),
                self.session.metrics(),
                &mut self.factory,
                &mut self.surface,
            );
            if was_paused {
                self.clock.pause(&mut self.bus);
            }
        }
        metrics
    }

    // ── Playback ──────────────────────────────────────────────────────────

    /// Begin playback over the stored route (see
    /// [`SimulationClock::start`]).  `false` without a route.
    pub fn start_simulation(&mut self, now: Millis) -> bool {
        self.clock.start(
            now,
            self.session.path(),
            self.session.metrics(),
            &mut self.factory,
            &mut self.surface,
        )
    }

    pub fn pause_simulation(&mut self) -> bool {
        self.clock.pause(&mut self.bus)
    }

    pub fn resume_simulation(&mut self, now: Millis) -> bool {
        self.clock.resume(now, &mut self.bus)
    }

    /// Pause when running, resume when paused.
    pub fn toggle_simulation(&mut self, now: Millis) -> bool {
        self.clock.toggle(now, &mut self.bus)
    }

    pub fn stop_simulation(&mut self) -> bool {
        self.clock.stop(&mut self.bus)
    }

    /// Change the playback tick interval (emits `SimulationSpeedChanged`).
    pub fn set_simulation_speed(&mut self, now: Millis, interval_ms: u64) -> bool {
        self.clock.set_speed(now, interval_ms, &mut self.bus)
    }

    pub fn simulation_phase(&self) -> SimPhase {
        self.clock.phase()
    }

    /// Drive all due timers.  Call from the host event loop with a
    /// monotonically non-decreasing timestamp.
    pub fn advance(&mut self, now: Millis) {
        self.clock.poll(now, &mut self.surface, &mut self.bus);
    }

    /// Forward a move-end notification from the map surface.
    ///
    /// Re-published as `MapMoveEnd` only while playback holds the follow
    /// listener; otherwise dropped — the attach/detach lifecycle of the
    /// original listener, inverted.
    pub fn notify_move_end(&mut self) {
        if self.clock.follows_view() {
            self.bus.publish(NavEvent::MapMoveEnd);
        }
    }

    // ── Station queries ───────────────────────────────────────────────────

    /// Stations within `radius_m` of `center`, in input order.
    pub fn find_stations_in_radius<'a>(
        &self,
        stations: &'a [Station],
        center: Coordinate,
        radius_m: f64,
    ) -> Vec<&'a Station> {
        find_within_radius(stations, center, radius_m)
    }

    /// Stations within a circle covering the whole current viewport
    /// (center-to-corner radius).
    pub fn find_stations_in_viewport<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        let center = self.surface.center();
        let radius = viewport_radius(center, self.surface.bounds().north_east);
        find_within_radius(stations, center, radius)
    }

    /// Stations strictly inside the current viewport rectangle.
    pub fn find_stations_in_bounds<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        find_within_bounds(stations, self.surface.bounds())
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Stop playback, clear the route, and drop the endpoint markers
    /// (emits `Reset`).  Idempotent.
    pub fn reset(&mut self) {
        self.clock.stop(&mut self.bus);
        self.session.reset(&mut self.line);
        self.bus.publish(NavEvent::Reset);
    }

    /// [`reset`](Self::reset), then drop every subscriber.  Safe to call
    /// repeatedly; afterwards no timer is live and no handle is retained.
    pub fn cleanup(&mut self) {
        self.reset();
        self.bus.clear();
    }
}
