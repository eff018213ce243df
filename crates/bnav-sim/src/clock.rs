//! The playback state machine.

use bnav_core::{Coordinate, EventBus, GeoBounds, Millis, NavEvent, ProgressUpdate};
use bnav_map::{FlyToOptions, FramingOptions, MapSurface, MarkerFactory, MarkerHandle, MarkerKind};
use bnav_route::RouteMetrics;
use log::{debug, warn};

use crate::timer::RepeatingTimer;

// ── Launch constants ──────────────────────────────────────────────────────────
//
// Starting playback runs a two-step view-framing sequence before the first
// tick: frame the whole route, settle, dive to the start position, settle,
// then begin ticking.  The settle windows cover the surface animations.

/// Padding around the fitted route bounds, pixels.
pub const FRAME_PADDING_PX: u32 = 100;
/// Route-framing animation duration.
pub const FRAME_DURATION_MS: u64 = 1_000;
/// Wait after framing before diving to the start position.
pub const FRAME_SETTLE_MS: u64 = 1_500;
/// Zoom level for the dive to the start position.
pub const APPROACH_ZOOM: f64 = 16.0;
/// Dive animation duration.
pub const APPROACH_DURATION_MS: u64 = 1_000;
/// Wait after the dive before the first tick interval begins.
pub const APPROACH_SETTLE_MS: u64 = 1_200;

/// Default tick interval: one path point per second.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

// ── SimPhase ──────────────────────────────────────────────────────────────────

/// Externally visible playback state.
///
/// `Completed` is transient: it is entered on the tick that reaches the end
/// of the path, `SimulationCompleted` is published, and the same teardown as
/// [`stop`](SimulationClock::stop) runs immediately (publishing
/// `SimulationStopped` and returning the clock to `Idle`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Pending launch step while the view-framing sequence plays out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Launch {
    /// `fit_bounds` issued; waiting for the frame to settle.
    Framing { until: Millis },
    /// `fly_to` issued; waiting to begin ticking.
    Approaching { until: Millis },
}

// ── SimulationClock ───────────────────────────────────────────────────────────

/// Replays a route path on a timer, publishing progress on every tick.
///
/// Owns a snapshot of the path, the position marker, and the tick timer.
/// All timing flows through [`poll`](Self::poll); nothing here reads a wall
/// clock.
pub struct SimulationClock<H: MarkerHandle> {
    phase: SimPhase,
    launch: Option<Launch>,
    timer: Option<RepeatingTimer>,
    /// Current index into `path`; `0 <= index < path.len()` while active.
    index: usize,
    interval_ms: u64,
    marker: Option<H>,
    /// `true` while playback holds the surface move-end listener.
    follow_attached: bool,
    path: Vec<Coordinate>,
    totals: RouteMetrics,
}

impl<H: MarkerHandle> Default for SimulationClock<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MarkerHandle> SimulationClock<H> {
    pub fn new() -> Self {
        Self {
            phase: SimPhase::Idle,
            launch: None,
            timer: None,
            index: 0,
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
            marker: None,
            follow_attached: false,
            path: Vec::new(),
            totals: RouteMetrics::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// `true` in `Running` or `Paused` — a playback session exists.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, SimPhase::Running | SimPhase::Paused)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// `true` while playback holds the surface move-end listener.
    pub fn follows_view(&self) -> bool {
        self.follow_attached
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Begin playback over `path` (Idle → Running).
    ///
    /// Requires a non-empty path and an idle clock; otherwise a warn-logged
    /// no-op returning `false` — no timer is created and nothing is
    /// published.  On success the position marker is placed at `path[0]`,
    /// the route is framed, and the launch sequence is armed; the first tick
    /// (and `SimulationStarted`) follow from [`poll`](Self::poll) once the
    /// settle windows elapse.
    pub fn start<F, S>(
        &mut self,
        now: Millis,
        path: &[Coordinate],
        totals: RouteMetrics,
        factory: &mut F,
        surface: &mut S,
    ) -> bool
    where
        F: MarkerFactory<Handle = H>,
        S: MapSurface,
    {
        if path.is_empty() {
            warn!("cannot start playback without a route");
            return false;
        }
        if self.phase != SimPhase::Idle {
            warn!("cannot start playback while {:?}", self.phase);
            return false;
        }

        self.path = path.to_vec();
        self.totals = totals;
        self.index = 0;

        let start_pos = self.path[0];
        self.marker = Some(factory.place(start_pos, MarkerKind::Position));

        // Frame the whole route, then dive to the start once it settles.
        let end_pos = *self.path.last().unwrap_or(&start_pos);
        let frame = GeoBounds::framing(start_pos, end_pos);
        surface.fit_bounds(frame, FramingOptions {
            padding: FRAME_PADDING_PX,
            duration_ms: FRAME_DURATION_MS,
        });

        self.follow_attached = true;
        self.launch = Some(Launch::Framing { until: now.offset(FRAME_SETTLE_MS) });
        self.phase = SimPhase::Running;
        debug!("playback armed over {} points", self.path.len());
        true
    }

    /// Fire every transition due by `now`: launch steps, then tick batches.
    ///
    /// Call from the host loop whenever time passes.  No-op unless Running.
    pub fn poll<S>(&mut self, now: Millis, surface: &mut S, bus: &mut EventBus)
    where
        S: MapSurface,
    {
        if self.phase != SimPhase::Running {
            return;
        }

        // Walk the launch sequence as far as `now` allows.
        while let Some(step) = self.launch {
            match step {
                Launch::Framing { until } if now >= until => {
                    surface.fly_to(FlyToOptions {
                        center: self.path[0],
                        zoom: APPROACH_ZOOM,
                        duration_ms: APPROACH_DURATION_MS,
                    });
                    self.launch = Some(Launch::Approaching {
                        until: now.offset(APPROACH_SETTLE_MS),
                    });
                }
                Launch::Approaching { until } if now >= until => {
                    self.launch = None;
                    self.timer = Some(RepeatingTimer::new(now, self.interval_ms));
                    bus.publish(NavEvent::SimulationStarted);
                }
                _ => break,
            }
        }

        let fires = self.timer.as_mut().map_or(0, |t| t.fire_due(now));
        for _ in 0..fires {
            self.tick(surface, bus);
            if self.phase != SimPhase::Running {
                break;
            }
        }
    }

    /// One playback step: advance by exactly one path point, or complete.
    fn tick<S>(&mut self, surface: &mut S, bus: &mut EventBus)
    where
        S: MapSurface,
    {
        let len = self.path.len();

        if self.index >= len.saturating_sub(1) {
            self.phase = SimPhase::Completed;
            bus.publish(NavEvent::SimulationCompleted);
            self.teardown(bus);
            return;
        }

        self.index += 1;
        let position = self.path[self.index];

        if let Some(marker) = &mut self.marker {
            marker.set_coordinate(position);
        }
        surface.set_center(position);

        let progress_ratio = self.index as f64 / (len - 1) as f64;
        bus.publish(NavEvent::PositionUpdated(ProgressUpdate {
            position,
            index: self.index,
            total: len,
            progress_ratio,
            remaining_distance_m: self.totals.distance_m * (1.0 - progress_ratio),
            remaining_time_s: self.totals.duration_s * (1.0 - progress_ratio),
        }));
    }

    /// Running → Paused.  Keeps index and marker, drops the timer (and any
    /// pending launch step).  Safe from any state: returns `false` when not
    /// Running.
    pub fn pause(&mut self, bus: &mut EventBus) -> bool {
        if self.phase != SimPhase::Running {
            return false;
        }
        self.timer = None;
        self.launch = None;
        self.phase = SimPhase::Paused;
        bus.publish(NavEvent::SimulationPaused);
        true
    }

    /// Paused → Running: a fresh timer at the current interval, same index.
    pub fn resume(&mut self, now: Millis, bus: &mut EventBus) -> bool {
        if self.phase != SimPhase::Paused {
            return false;
        }
        self.timer = Some(RepeatingTimer::new(now, self.interval_ms));
        self.phase = SimPhase::Running;
        bus.publish(NavEvent::SimulationResumed);
        true
    }

    /// Pause when running, resume when paused, `false` otherwise.
    pub fn toggle(&mut self, now: Millis, bus: &mut EventBus) -> bool {
        match self.phase {
            SimPhase::Running => self.pause(bus),
            SimPhase::Paused => self.resume(now, bus),
            _ => false,
        }
    }

    /// Any non-Idle state → Idle.  From Idle: silent no-op returning `false`.
    pub fn stop(&mut self, bus: &mut EventBus) -> bool {
        if self.phase == SimPhase::Idle {
            return false;
        }
        self.teardown(bus);
        true
    }

    /// Change the tick interval.  Zero is an input error (warn, no-op).
    ///
    /// A live timer is replaced atomically — the old cadence vanishes in the
    /// same assignment that installs the new one, so no tick is doubled and
    /// no stale interval survives.
    pub fn set_speed(&mut self, now: Millis, interval_ms: u64, bus: &mut EventBus) -> bool {
        if interval_ms == 0 {
            warn!("ignoring zero tick interval");
            return false;
        }
        self.interval_ms = interval_ms;
        if let Some(timer) = &mut self.timer {
            timer.replace(now, interval_ms);
        }
        bus.publish(NavEvent::SimulationSpeedChanged(interval_ms));
        true
    }

    /// Shared teardown: cancel timers, remove the marker, detach the view
    /// follow, rewind the index, publish `SimulationStopped`.
    fn teardown(&mut self, bus: &mut EventBus) {
        self.timer = None;
        self.launch = None;
        if let Some(marker) = self.marker.take() {
            marker.remove();
        }
        self.follow_attached = false;
        self.index = 0;
        self.phase = SimPhase::Idle;
        bus.publish(NavEvent::SimulationStopped);
    }
}
