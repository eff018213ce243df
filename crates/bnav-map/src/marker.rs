//! Marker lifecycle seam.
//!
//! The core creates, moves, and removes markers; it never styles them.
//! [`MarkerKind`] tells the implementation *what* a marker represents so it
//! can pick its own presentation.

use bnav_core::Coordinate;

/// What a marker stands for.  Presentation is the implementor's business.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerKind {
    /// The route's start endpoint.
    RouteStart,
    /// The route's end endpoint.
    RouteEnd,
    /// The simulated current position during playback.
    Position,
    /// A bike-share station.
    Station,
}

/// A live marker on the map.
///
/// Dropping a handle without calling [`remove`](MarkerHandle::remove) is a
/// leak on the rendering side; the owning component always removes
/// explicitly on replace, stop, and reset.
pub trait MarkerHandle {
    /// Move the marker.
    fn set_coordinate(&mut self, at: Coordinate);

    /// Take the marker off the map, consuming the handle.
    fn remove(self);
}

/// Creates markers on the implementation's surface.
pub trait MarkerFactory {
    type Handle: MarkerHandle;

    /// Create a marker of `kind` at `at` and add it to the map.
    fn place(&mut self, at: Coordinate, kind: MarkerKind) -> Self::Handle;
}
