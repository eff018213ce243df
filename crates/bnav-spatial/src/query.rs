//! Linear station filters.
//!
//! Both filters preserve input order — callers rely on feed order for stable
//! marker placement — and cost O(N) per query, which is fine for the few
//! thousand stations a city feed carries.  Larger data sets can opt into the
//! R-tree index (feature `"index"`), which keeps identical semantics.

use bnav_core::{Coordinate, GeoBounds, Station};
use log::{debug, warn};

/// All stations within `radius_m` metres of `center`, in input order.
///
/// Stations with unparsable coordinates are skipped per record.  An empty
/// input yields an empty result (warn-logged, not an error).
pub fn find_within_radius<'a>(
    stations: &'a [Station],
    center: Coordinate,
    radius_m: f64,
) -> Vec<&'a Station> {
    if stations.is_empty() {
        warn!("radius query over an empty station list");
        return Vec::new();
    }

    stations
        .iter()
        .filter(|station| match station.coordinate() {
            Some(at) => at.distance_m(center) <= radius_m,
            None => {
                debug!("skipping station {:?}: unparsable coordinate", station.id);
                false
            }
        })
        .collect()
}

/// All stations inside `bounds`, in input order.
///
/// The longitude test wraps across the antimeridian when the box does — see
/// [`GeoBounds::contains`].
pub fn find_within_bounds<'a>(stations: &'a [Station], bounds: GeoBounds) -> Vec<&'a Station> {
    if stations.is_empty() {
        warn!("viewport query over an empty station list");
        return Vec::new();
    }

    stations
        .iter()
        .filter(|station| match station.coordinate() {
            Some(at) => bounds.contains(at),
            None => {
                debug!("skipping station {:?}: unparsable coordinate", station.id);
                false
            }
        })
        .collect()
}

/// Radius covering the whole viewport: distance from its center to the
/// north-east corner.  Feeding this to [`find_within_radius`] turns a
/// rectangular viewport into a covering circular query.
pub fn viewport_radius(center: Coordinate, north_east: Coordinate) -> f64 {
    center.distance_m(north_east)
}
