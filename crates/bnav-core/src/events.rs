//! Typed navigation events and the subscriber bus.
//!
//! # Design
//!
//! Every observable state change in the framework is one variant of
//! [`NavEvent`].  Components never hold rendering callbacks; they receive a
//! `&mut EventBus` per operation and publish into it, and the application
//! subscribes per [`EventKind`].  Delivery is synchronous, in subscription
//! order, on the caller's thread — there is no queue and no re-entrancy.

use std::collections::BTreeMap;
use std::fmt;

use crate::Coordinate;

// ── Event payloads ────────────────────────────────────────────────────────────

/// Per-tick playback progress, published as [`NavEvent::PositionUpdated`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressUpdate {
    /// The simulated position after this tick.
    pub position: Coordinate,
    /// Index into the densified route path, `0 <= index < total`.
    pub index: usize,
    /// Total number of path points.
    pub total: usize,
    /// `index / (total - 1)`, in `[0.0, 1.0]`.
    pub progress_ratio: f64,
    /// Route distance left, `total_distance * (1 - progress_ratio)`.
    pub remaining_distance_m: f64,
    /// Route duration left, `total_duration * (1 - progress_ratio)`.
    pub remaining_time_s: f64,
}

// ── NavEvent ──────────────────────────────────────────────────────────────────

/// Every event the framework can publish, with typed payloads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavEvent {
    /// A route start point was set or replaced.
    StartPointSet(Coordinate),
    /// A route end point was set or replaced.
    EndPointSet(Coordinate),
    /// A route calculation began (provider fetch in flight).
    RouteCalculationStart,
    /// A route was calculated and stored.
    RouteCalculated {
        path: Vec<Coordinate>,
        distance_m: f64,
        duration_s: f64,
    },
    /// A route calculation failed; the session is unchanged.
    RouteCalculationError(String),
    /// Playback ticking began (after the view-framing sequence).
    SimulationStarted,
    SimulationPaused,
    SimulationResumed,
    /// Playback was torn down (explicit stop, or cleanup after completion).
    SimulationStopped,
    /// The simulated position reached the end of the path.
    SimulationCompleted,
    /// One playback tick advanced.
    PositionUpdated(ProgressUpdate),
    /// The tick interval changed, in milliseconds.
    SimulationSpeedChanged(u64),
    /// The interpolation density changed, in points per segment.
    PointsToInsertChanged(u32),
    /// The whole navigation state was reset.
    Reset,
    /// The map surface finished a programmatic or user move.
    MapMoveEnd,
}

impl NavEvent {
    /// The fieldless discriminant used for subscription routing.
    pub fn kind(&self) -> EventKind {
        match self {
            NavEvent::StartPointSet(_) => EventKind::StartPointSet,
            NavEvent::EndPointSet(_) => EventKind::EndPointSet,
            NavEvent::RouteCalculationStart => EventKind::RouteCalculationStart,
            NavEvent::RouteCalculated { .. } => EventKind::RouteCalculated,
            NavEvent::RouteCalculationError(_) => EventKind::RouteCalculationError,
            NavEvent::SimulationStarted => EventKind::SimulationStarted,
            NavEvent::SimulationPaused => EventKind::SimulationPaused,
            NavEvent::SimulationResumed => EventKind::SimulationResumed,
            NavEvent::SimulationStopped => EventKind::SimulationStopped,
            NavEvent::SimulationCompleted => EventKind::SimulationCompleted,
            NavEvent::PositionUpdated(_) => EventKind::PositionUpdated,
            NavEvent::SimulationSpeedChanged(_) => EventKind::SimulationSpeedChanged,
            NavEvent::PointsToInsertChanged(_) => EventKind::PointsToInsertChanged,
            NavEvent::Reset => EventKind::Reset,
            NavEvent::MapMoveEnd => EventKind::MapMoveEnd,
        }
    }
}

/// Subscription key — one per [`NavEvent`] variant.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    StartPointSet,
    EndPointSet,
    RouteCalculationStart,
    RouteCalculated,
    RouteCalculationError,
    SimulationStarted,
    SimulationPaused,
    SimulationResumed,
    SimulationStopped,
    SimulationCompleted,
    PositionUpdated,
    SimulationSpeedChanged,
    PointsToInsertChanged,
    Reset,
    MapMoveEnd,
}

// ── EventBus ──────────────────────────────────────────────────────────────────

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

type Listener = Box<dyn FnMut(&NavEvent)>;

/// Synchronous publish/subscribe fan-out keyed by [`EventKind`].
///
/// Listeners for a kind are invoked in subscription order.  The bus is not
/// `Send`: the whole framework runs on one cooperative loop.
#[derive(Default)]
pub struct EventBus {
    listeners: BTreeMap<EventKind, Vec<(SubscriptionId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to `kind`.  Returns the id to pass to [`off`].
    ///
    /// [`off`]: EventBus::off
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&NavEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove one subscription.  Returns `false` if it was already gone.
    pub fn off(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        match self.listeners.get_mut(&kind) {
            Some(subs) => {
                let before = subs.len();
                subs.retain(|(sid, _)| *sid != id);
                subs.len() != before
            }
            None => false,
        }
    }

    /// Drop every subscription.  Used by `cleanup()`; safe to call twice.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Deliver `event` to every listener of its kind, in subscription order.
    pub fn publish(&mut self, event: NavEvent) {
        if let Some(subs) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in subs.iter_mut() {
                listener(&event);
            }
        }
    }

    /// Number of live subscriptions for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("kinds", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
