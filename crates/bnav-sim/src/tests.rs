//! Unit tests for the timer and the playback state machine.

use std::cell::RefCell;
use std::rc::Rc;

use bnav_core::{Coordinate, EventBus, EventKind, GeoBounds, Millis, NavEvent};
use bnav_map::{
    FlyToOptions, FramingOptions, MapSurface, MarkerFactory, MarkerHandle, MarkerKind,
};
use bnav_route::RouteMetrics;

use crate::clock::{APPROACH_SETTLE_MS, FRAME_SETTLE_MS};
use crate::{SimPhase, SimulationClock};

// ── Recording doubles ─────────────────────────────────────────────────────────

#[derive(Default)]
struct MarkerLog {
    placed: Vec<(Coordinate, MarkerKind)>,
    moved: Vec<Coordinate>,
    removed: usize,
}

#[derive(Clone, Default)]
struct TestFactory {
    log: Rc<RefCell<MarkerLog>>,
}

struct TestMarker {
    log: Rc<RefCell<MarkerLog>>,
}

impl MarkerHandle for TestMarker {
    fn set_coordinate(&mut self, at: Coordinate) {
        self.log.borrow_mut().moved.push(at);
    }
    fn remove(self) {
        self.log.borrow_mut().removed += 1;
    }
}

impl MarkerFactory for TestFactory {
    type Handle = TestMarker;

    fn place(&mut self, at: Coordinate, kind: MarkerKind) -> TestMarker {
        self.log.borrow_mut().placed.push((at, kind));
        TestMarker { log: Rc::clone(&self.log) }
    }
}

#[derive(Default)]
struct SurfaceLog {
    fitted: Vec<GeoBounds>,
    flew_to: Vec<Coordinate>,
    centered: Vec<Coordinate>,
}

#[derive(Clone, Default)]
struct TestSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl MapSurface for TestSurface {
    fn bounds(&self) -> GeoBounds {
        GeoBounds::new(Coordinate::new(-180.0, -90.0), Coordinate::new(180.0, 90.0))
    }
    fn center(&self) -> Coordinate {
        self.log.borrow().centered.last().copied().unwrap_or_default()
    }
    fn set_center(&mut self, at: Coordinate) {
        self.log.borrow_mut().centered.push(at);
    }
    fn fit_bounds(&mut self, bounds: GeoBounds, _opts: FramingOptions) {
        self.log.borrow_mut().fitted.push(bounds);
    }
    fn fly_to(&mut self, opts: FlyToOptions) {
        self.log.borrow_mut().flew_to.push(opts.center);
    }
}

fn record_sim_events(bus: &mut EventBus) -> Rc<RefCell<Vec<NavEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        EventKind::SimulationStarted,
        EventKind::SimulationPaused,
        EventKind::SimulationResumed,
        EventKind::SimulationStopped,
        EventKind::SimulationCompleted,
        EventKind::PositionUpdated,
        EventKind::SimulationSpeedChanged,
    ] {
        let seen = Rc::clone(&seen);
        bus.on(kind, move |e: &NavEvent| seen.borrow_mut().push(e.clone()));
    }
    seen
}

fn five_point_path() -> Vec<Coordinate> {
    (0..5).map(|i| Coordinate::new(121.5 + i as f64 * 0.001, 25.0)).collect()
}

fn totals() -> RouteMetrics {
    RouteMetrics { distance_m: 400.0, duration_s: 80.0 }
}

/// Instant at which ticking begins after `start(Millis(0))`.
const LAUNCHED: u64 = FRAME_SETTLE_MS + APPROACH_SETTLE_MS;

/// Start a clock over the 5-point path at t=0 and poll through the launch
/// sequence so ticking is armed.
fn launched_clock(
    factory: &mut TestFactory,
    surface: &mut TestSurface,
    bus: &mut EventBus,
) -> SimulationClock<TestMarker> {
    let mut clock = SimulationClock::new();
    assert!(clock.start(Millis(0), &five_point_path(), totals(), factory, surface));
    clock.poll(Millis(FRAME_SETTLE_MS), surface, bus);
    clock.poll(Millis(LAUNCHED), surface, bus);
    clock
}

fn count(seen: &[NavEvent], kind: EventKind) -> usize {
    seen.iter().filter(|e| e.kind() == kind).count()
}

// ── timer ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer {
    use bnav_core::Millis;

    use crate::RepeatingTimer;

    #[test]
    fn fires_once_per_interval() {
        let mut t = RepeatingTimer::new(Millis(0), 1_000);
        assert_eq!(t.fire_due(Millis(999)), 0);
        assert_eq!(t.fire_due(Millis(1_000)), 1);
        assert_eq!(t.fire_due(Millis(1_500)), 0);
        assert_eq!(t.fire_due(Millis(2_000)), 1);
    }

    #[test]
    fn late_polls_batch_missed_fires() {
        let mut t = RepeatingTimer::new(Millis(0), 100);
        assert_eq!(t.fire_due(Millis(350)), 3);
        assert_eq!(t.next_due(), Millis(400));
    }

    #[test]
    fn replace_restarts_the_cadence() {
        let mut t = RepeatingTimer::new(Millis(0), 1_000);
        assert_eq!(t.fire_due(Millis(1_000)), 1);

        // Speed up at t=1200: next fire is 1200+250, the pending 2000 fire
        // is gone — no double ticking across the swap.
        t.replace(Millis(1_200), 250);
        assert_eq!(t.fire_due(Millis(1_449)), 0);
        assert_eq!(t.fire_due(Millis(1_450)), 1);
        assert_eq!(t.interval_ms(), 250);
    }
}

// ── clock ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clock {
    use super::*;

    #[test]
    fn start_with_empty_path_is_refused() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);

        let mut clock: SimulationClock<TestMarker> = SimulationClock::new();
        assert!(!clock.start(Millis(0), &[], totals(), &mut factory, &mut surface));

        assert_eq!(clock.phase(), SimPhase::Idle);
        assert!(seen.borrow().is_empty());
        assert!(factory.log.borrow().placed.is_empty());

        // And later polling does nothing.
        clock.poll(Millis(10_000), &mut surface, &mut bus);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn launch_sequence_frames_then_dives_then_starts() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);

        let mut clock = SimulationClock::new();
        let path = five_point_path();
        assert!(clock.start(Millis(0), &path, totals(), &mut factory, &mut surface));

        // The route is framed immediately; the marker sits at path[0].
        assert_eq!(surface.log.borrow().fitted.len(), 1);
        assert_eq!(factory.log.borrow().placed, vec![(path[0], MarkerKind::Position)]);
        assert_eq!(clock.phase(), SimPhase::Running);

        // Nothing is published until both settle windows elapse.
        clock.poll(Millis(FRAME_SETTLE_MS - 1), &mut surface, &mut bus);
        assert!(seen.borrow().is_empty());
        assert!(surface.log.borrow().flew_to.is_empty());

        clock.poll(Millis(FRAME_SETTLE_MS), &mut surface, &mut bus);
        assert_eq!(surface.log.borrow().flew_to, vec![path[0]]);
        assert!(seen.borrow().is_empty(), "fly-to still settling");

        clock.poll(Millis(LAUNCHED), &mut surface, &mut bus);
        assert_eq!(count(&seen.borrow(), EventKind::SimulationStarted), 1);
        assert_eq!(count(&seen.borrow(), EventKind::PositionUpdated), 0);
    }

    #[test]
    fn full_playback_emits_four_updates_then_completion() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        // 5 points → 4 advancing ticks + 1 completing tick.
        for i in 1..=5u64 {
            clock.poll(Millis(LAUNCHED + i * 1_000), &mut surface, &mut bus);
        }

        {
            let seen = seen.borrow();
            assert_eq!(count(&seen, EventKind::PositionUpdated), 4);
            assert_eq!(count(&seen, EventKind::SimulationCompleted), 1);
            assert_eq!(count(&seen, EventKind::SimulationStopped), 1);
            // Completion precedes the stop cleanup event.
            let completed_at = seen.iter().position(|e| e.kind() == EventKind::SimulationCompleted);
            let stopped_at = seen.iter().position(|e| e.kind() == EventKind::SimulationStopped);
            assert!(completed_at < stopped_at);
        }

        assert_eq!(clock.phase(), SimPhase::Idle);
        assert_eq!(clock.index(), 0);
        assert_eq!(factory.log.borrow().removed, 1, "position marker removed");

        // stop() afterwards is a safe no-op with no further events.
        let events_before = seen.borrow().len();
        assert!(!clock.stop(&mut bus));
        assert_eq!(seen.borrow().len(), events_before);
    }

    #[test]
    fn progress_payload_math() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        clock.poll(Millis(LAUNCHED + 1_000), &mut surface, &mut bus);

        let seen = seen.borrow();
        let NavEvent::PositionUpdated(update) = &seen[1] else {
            panic!("expected PositionUpdated after SimulationStarted, got {seen:?}");
        };
        assert_eq!(update.index, 1);
        assert_eq!(update.total, 5);
        assert!((update.progress_ratio - 0.25).abs() < 1e-12);
        assert!((update.remaining_distance_m - 300.0).abs() < 1e-9);
        assert!((update.remaining_time_s - 60.0).abs() < 1e-9);
        assert_eq!(update.position, five_point_path()[1]);
    }

    #[test]
    fn marker_and_view_follow_each_tick() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        clock.poll(Millis(LAUNCHED + 2_000), &mut surface, &mut bus);

        let path = five_point_path();
        assert_eq!(factory.log.borrow().moved, vec![path[1], path[2]]);
        assert_eq!(surface.log.borrow().centered, vec![path[1], path[2]]);
    }

    #[test]
    fn pause_then_resume_keeps_the_index() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        clock.poll(Millis(LAUNCHED + 2_000), &mut surface, &mut bus);
        assert_eq!(clock.index(), 2);

        assert!(clock.pause(&mut bus));
        assert_eq!(clock.phase(), SimPhase::Paused);

        // Time passes while paused; nothing fires.
        clock.poll(Millis(LAUNCHED + 60_000), &mut surface, &mut bus);
        assert_eq!(clock.index(), 2);

        assert!(clock.resume(Millis(LAUNCHED + 60_000), &mut bus));
        clock.poll(Millis(LAUNCHED + 61_000), &mut surface, &mut bus);
        assert_eq!(clock.index(), 3, "resumed from the paused index, not 0");

        assert_eq!(count(&seen.borrow(), EventKind::SimulationPaused), 1);
        assert_eq!(count(&seen.borrow(), EventKind::SimulationResumed), 1);
    }

    #[test]
    fn toggle_round_trip() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        assert!(clock.toggle(Millis(LAUNCHED), &mut bus));
        assert_eq!(clock.phase(), SimPhase::Paused);
        assert!(clock.toggle(Millis(LAUNCHED), &mut bus));
        assert_eq!(clock.phase(), SimPhase::Running);

        clock.stop(&mut bus);
        assert!(!clock.toggle(Millis(LAUNCHED), &mut bus));
    }

    #[test]
    fn pause_during_launch_cancels_it() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);

        let mut clock = SimulationClock::new();
        clock.start(Millis(0), &five_point_path(), totals(), &mut factory, &mut surface);
        assert!(clock.pause(&mut bus));

        // The launch never completes, so SimulationStarted never fires…
        clock.poll(Millis(100_000), &mut surface, &mut bus);
        assert_eq!(count(&seen.borrow(), EventKind::SimulationStarted), 0);

        // …and resume goes straight to ticking from index 0.
        clock.resume(Millis(100_000), &mut bus);
        clock.poll(Millis(101_000), &mut surface, &mut bus);
        assert_eq!(clock.index(), 1);
    }

    #[test]
    fn speed_change_swaps_the_timer_atomically() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        clock.poll(Millis(LAUNCHED + 1_000), &mut surface, &mut bus);
        assert_eq!(clock.index(), 1);

        // Halfway to the next fire, switch to a 300 ms cadence.
        assert!(clock.set_speed(Millis(LAUNCHED + 1_500), 300, &mut bus));
        assert_eq!(count(&seen.borrow(), EventKind::SimulationSpeedChanged), 1);

        // The old 1000 ms fire at +2000 must not happen early…
        clock.poll(Millis(LAUNCHED + 1_799), &mut surface, &mut bus);
        assert_eq!(clock.index(), 1);
        // …the new cadence fires at 1500+300, exactly once.
        clock.poll(Millis(LAUNCHED + 1_800), &mut surface, &mut bus);
        assert_eq!(clock.index(), 2);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        assert!(!clock.set_speed(Millis(LAUNCHED), 0, &mut bus));
        assert_eq!(count(&seen.borrow(), EventKind::SimulationSpeedChanged), 0);
        assert_eq!(clock.interval_ms(), 1_000);
    }

    #[test]
    fn stop_detaches_view_follow() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let mut clock = launched_clock(&mut factory, &mut surface, &mut bus);

        assert!(clock.follows_view());
        assert!(clock.stop(&mut bus));
        assert!(!clock.follows_view());
        assert_eq!(clock.phase(), SimPhase::Idle);
        assert!(!clock.stop(&mut bus), "second stop is a no-op");
    }

    #[test]
    fn single_point_path_completes_on_first_tick() {
        let mut factory = TestFactory::default();
        let mut surface = TestSurface::default();
        let mut bus = EventBus::new();
        let seen = record_sim_events(&mut bus);

        let mut clock = SimulationClock::new();
        let path = [Coordinate::new(121.5, 25.0)];
        assert!(clock.start(Millis(0), &path, totals(), &mut factory, &mut surface));
        clock.poll(Millis(FRAME_SETTLE_MS), &mut surface, &mut bus);
        clock.poll(Millis(LAUNCHED), &mut surface, &mut bus);
        clock.poll(Millis(LAUNCHED + 1_000), &mut surface, &mut bus);

        let seen = seen.borrow();
        assert_eq!(count(&seen, EventKind::PositionUpdated), 0);
        assert_eq!(count(&seen, EventKind::SimulationCompleted), 1);
    }
}
