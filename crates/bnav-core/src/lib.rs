//! `bnav-core` — foundational types for the `bnav` navigation framework.
//!
//! This crate is a dependency of every other `bnav-*` crate.  It intentionally
//! has no `bnav-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`geo`]     | `Coordinate`, `GeoBounds`, haversine distance         |
//! | [`time`]    | `Millis` — the host-supplied monotonic timebase       |
//! | [`format`]  | Duration and distance display helpers                 |
//! | [`station`] | `Station` record, `Availability` classification       |
//! | [`events`]  | `NavEvent`, `EventKind`, `EventBus`                   |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod error;
pub mod events;
pub mod format;
pub mod geo;
pub mod station;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use events::{EventBus, EventKind, NavEvent, ProgressUpdate, SubscriptionId};
pub use format::{format_distance_km, duration_parts, DurationParts};
pub use geo::{Coordinate, GeoBounds};
pub use station::{Availability, Station};
pub use time::Millis;
