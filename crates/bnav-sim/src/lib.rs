//! `bnav-sim` — timed playback of a stored route.
//!
//! # The cooperative timer model
//!
//! The original timer-per-interval design is replaced by due-time timers
//! polled from the host's event loop: the host calls
//! [`SimulationClock::poll`] with the current [`Millis`] and the clock fires
//! every transition that has come due.  A logical timer is a single owned
//! slot — replacing it (speed change) or dropping it (pause, stop) is one
//! assignment, so duplicate ticking is unrepresentable by construction.
//!
//! ```text
//!              start(now)                    frame settle      fly-to settle
//!  Idle ──────────────────────► Running ─────────────┬─────────────┬─► ticking…
//!    ▲                          (framing the route)  fit_bounds    fly_to + SimulationStarted
//!    │  stop() / completion                │
//!    └─────────────────────────────────────┴──◄── pause()/resume() ↔ Paused
//! ```
//!
//! [`Millis`]: bnav_core::Millis

pub mod clock;
pub mod timer;

#[cfg(test)]
mod tests;

pub use clock::{SimPhase, SimulationClock};
pub use timer::RepeatingTimer;
