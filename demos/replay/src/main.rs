//! replay — smallest end-to-end demo for the bnav navigation framework.
//!
//! Replays a canned route between two Taipei landmarks with headless map
//! collaborators, printing per-tick progress.  Swap the `StaticProvider` for
//! a real directions client and the noop collaborators for a map wrapper to
//! turn this into an interactive application.

use anyhow::Result;

use bnav::{Coordinate, EventKind, Millis, NavEvent, Navigator};
use bnav_core::{duration_parts, format_distance_km};
use bnav_map::{NoopLineSink, NoopMarkerFactory, NoopSurface};
use bnav_route::{ProviderRoute, StaticProvider};

// ── Constants ─────────────────────────────────────────────────────────────────

// Taipei Main Station → Taipei City Hall.
const START: Coordinate = Coordinate { lon: 121.5170, lat: 25.0478 };
const END: Coordinate = Coordinate { lon: 121.5645, lat: 25.0375 };

const TICK_INTERVAL_MS: u64 = 250;
/// Total view-framing delay before the first tick.
const LAUNCH_MS: u64 = 1_500 + 1_200;

// ── Canned route ──────────────────────────────────────────────────────────────

/// A hand-sketched driving route roughly along Zhongxiao Road.
fn canned_route() -> ProviderRoute {
    ProviderRoute {
        geometry: vec![
            START,
            Coordinate { lon: 121.5250, lat: 25.0460 },
            Coordinate { lon: 121.5330, lat: 25.0415 },
            Coordinate { lon: 121.5440, lat: 25.0412 },
            Coordinate { lon: 121.5550, lat: 25.0400 },
            END,
        ],
        distance_m: 5_200.0,
        duration_s: 780.0,
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let mut nav = Navigator::new(
        StaticProvider::with_route(canned_route()),
        NoopMarkerFactory,
        NoopSurface::new(),
        NoopLineSink,
    );

    nav.on(EventKind::RouteCalculated, |event| {
        if let NavEvent::RouteCalculated { path, distance_m, duration_s } = event {
            println!(
                "route: {} points, {}, {}",
                path.len(),
                format_distance_km(*distance_m),
                duration_parts(*duration_s),
            );
        }
    });
    nav.on(EventKind::PositionUpdated, |event| {
        if let NavEvent::PositionUpdated(p) = event {
            println!(
                "tick {:>2}/{}: {} — {} left, {} to go",
                p.index,
                p.total - 1,
                p.position,
                format_distance_km(p.remaining_distance_m),
                duration_parts(p.remaining_time_s),
            );
        }
    });
    nav.on(EventKind::SimulationCompleted, |_| println!("arrived"));

    nav.set_start(START);
    nav.set_end(END);
    nav.calculate_route()
        .ok_or_else(|| anyhow::anyhow!("route calculation failed"))?;

    nav.set_simulation_speed(Millis(0), TICK_INTERVAL_MS);
    nav.start_simulation(Millis(0));

    // Drive the cooperative timebase: walk the two launch settles, then one
    // poll per tick interval until the playback has completed.
    nav.advance(Millis(1_500));
    nav.advance(Millis(LAUNCH_MS));
    let ticks = nav.route_path().len() as u64 + 1;
    for i in 1..=ticks {
        nav.advance(Millis(LAUNCH_MS + i * TICK_INTERVAL_MS));
    }

    nav.cleanup();
    Ok(())
}
