//! `bnav-spatial` — station filtering by radius and viewport.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`query`] | Linear order-preserving filters, viewport radius helper    |
//! | [`index`] | `StationIndex` R-tree accelerator (feature = `"index"`)    |
//!
//! # Data-quality contract
//!
//! Station feeds ship coordinates as strings and occasionally ship junk.  A
//! station whose coordinate fails to parse is skipped silently (debug-logged)
//! — one dirty record never aborts a query.  An empty input list yields an
//! empty result and a warning, not an error.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `index` | Enables the rstar-backed `StationIndex`.                    |

pub mod query;

#[cfg(feature = "index")]
pub mod index;

#[cfg(test)]
mod tests;

pub use query::{find_within_bounds, find_within_radius, viewport_radius};

#[cfg(feature = "index")]
pub use index::StationIndex;
