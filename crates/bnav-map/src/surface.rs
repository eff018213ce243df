//! Read and steer the map viewport.

use bnav_core::{Coordinate, GeoBounds};

/// Options for [`MapSurface::fit_bounds`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramingOptions {
    /// Pixels of padding around the fitted bounds.
    pub padding: u32,
    /// Animation duration in milliseconds.
    pub duration_ms: u64,
}

/// Options for [`MapSurface::fly_to`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlyToOptions {
    pub center: Coordinate,
    pub zoom: f64,
    /// Animation duration in milliseconds.
    pub duration_ms: u64,
}

/// The viewport contract the core steers during playback.
///
/// Move-end notification is inverted relative to a callback-based wrapper:
/// the application forwards its map library's move-end signal to
/// `Navigator::notify_move_end`, and the facade decides whether anyone is
/// listening.  That keeps this trait free of callback storage.
pub trait MapSurface {
    /// Current viewport as a south-west/north-east box.
    fn bounds(&self) -> GeoBounds;

    /// Current viewport center.
    fn center(&self) -> Coordinate;

    /// Recenter without changing zoom.
    fn set_center(&mut self, at: Coordinate);

    /// Animate the viewport to contain `bounds`.
    fn fit_bounds(&mut self, bounds: GeoBounds, opts: FramingOptions);

    /// Animate the viewport to a center/zoom pair.
    fn fly_to(&mut self, opts: FlyToOptions);
}
