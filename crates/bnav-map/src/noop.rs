//! Inert collaborator implementations.
//!
//! Useful as placeholders in tests and for headless runs that exercise the
//! navigation logic without a renderer.  `NoopSurface` keeps just enough
//! state (center, bounds) to satisfy read-backs.

use bnav_core::{Coordinate, GeoBounds};

use crate::{
    FlyToOptions, FramingOptions, MapSurface, MarkerFactory, MarkerHandle, MarkerKind,
    RouteLineSink,
};

/// A marker that renders nowhere.
#[derive(Debug)]
pub struct NoopMarker;

impl MarkerHandle for NoopMarker {
    fn set_coordinate(&mut self, _at: Coordinate) {}
    fn remove(self) {}
}

/// A [`MarkerFactory`] producing [`NoopMarker`]s.
#[derive(Debug, Default)]
pub struct NoopMarkerFactory;

impl MarkerFactory for NoopMarkerFactory {
    type Handle = NoopMarker;

    fn place(&mut self, _at: Coordinate, _kind: MarkerKind) -> NoopMarker {
        NoopMarker
    }
}

/// A surface with no pixels: remembers the last center and reports a fixed
/// world-sized viewport.
#[derive(Debug)]
pub struct NoopSurface {
    center: Coordinate,
    bounds: GeoBounds,
}

impl Default for NoopSurface {
    fn default() -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            bounds: GeoBounds::new(
                Coordinate::new(-180.0, -90.0),
                Coordinate::new(180.0, 90.0),
            ),
        }
    }
}

impl NoopSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapSurface for NoopSurface {
    fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    fn center(&self) -> Coordinate {
        self.center
    }

    fn set_center(&mut self, at: Coordinate) {
        self.center = at;
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, _opts: FramingOptions) {
        self.bounds = bounds;
    }

    fn fly_to(&mut self, opts: FlyToOptions) {
        self.center = opts.center;
    }
}

/// A [`RouteLineSink`] that discards geometry.
#[derive(Debug, Default)]
pub struct NoopLineSink;

impl RouteLineSink for NoopLineSink {
    fn set_route(&mut self, _path: &[Coordinate]) {}
    fn clear(&mut self) {}
}
