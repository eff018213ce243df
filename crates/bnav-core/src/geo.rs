//! Geographic coordinate type and spatial primitives.
//!
//! `Coordinate` stores longitude before latitude, matching the GeoJSON wire
//! order used by routing providers and station feeds.  Fields are `f64`:
//! station feeds publish coordinates to 10 decimal places, and route metrics
//! arrive as doubles, so single precision would truncate real data.

use crate::{CoreError, CoreResult};

/// A WGS-84 geographic coordinate, `(longitude, latitude)` in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Validating constructor for coordinates from untrusted input.
    pub fn try_new(lon: f64, lat: f64) -> CoreResult<Self> {
        let c = Self { lon, lat };
        if c.is_valid() {
            Ok(c)
        } else {
            Err(CoreError::InvalidCoordinate { lon, lat })
        }
    }

    /// `true` when both components are finite and inside the WGS-84 domain
    /// (lon ∈ [-180, 180], lat ∈ [-90, 90]).
    pub fn is_valid(self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Symmetric in point order up to floating rounding, and zero for a point
    /// against itself.  NaN inputs propagate as NaN rather than panicking;
    /// callers that filter dirty data do so upstream (see `bnav-spatial`).
    pub fn distance_m(self, other: Coordinate) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

// ── GeoBounds ─────────────────────────────────────────────────────────────────

/// An axis-aligned geographic bounding box.
///
/// The box is defined by its south-west and north-east corners.  When
/// `south_west.lon > north_east.lon` the box crosses the antimeridian (±180°)
/// and the longitude test wraps; this is a required behavior for viewports
/// panned across the date line, not an invalid state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl GeoBounds {
    #[inline]
    pub fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self { south_west, north_east }
    }

    /// The smallest non-wrapping box containing both points.  Used to frame
    /// a route's endpoints before playback.
    pub fn framing(a: Coordinate, b: Coordinate) -> Self {
        Self {
            south_west: Coordinate::new(a.lon.min(b.lon), a.lat.min(b.lat)),
            north_east: Coordinate::new(a.lon.max(b.lon), a.lat.max(b.lat)),
        }
    }

    /// Point-in-box test with antimeridian handling.
    ///
    /// Latitude is a plain range check.  Longitude is a range check for a
    /// normal box; for a box crossing ±180° the point is inside when it lies
    /// on either side of the seam (`lon >= sw.lon || lon <= ne.lon`).
    pub fn contains(&self, c: Coordinate) -> bool {
        let sw = self.south_west;
        let ne = self.north_east;

        let lat_in = c.lat >= sw.lat && c.lat <= ne.lat;
        let lon_in = if sw.lon <= ne.lon {
            c.lon >= sw.lon && c.lon <= ne.lon
        } else {
            c.lon >= sw.lon || c.lon <= ne.lon
        };

        lat_in && lon_in
    }
}

impl std::fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.south_west, self.north_east)
    }
}
