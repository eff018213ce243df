//! R-tree station index (feature = `"index"`).
//!
//! # Two-stage filtering
//!
//! Radius queries run in two stages: a cheap envelope prefilter in degree
//! space over the R-tree, then a haversine refinement of the candidates.
//! Euclidean degree distance drifts from geodesic distance away from the
//! equator, so the envelope is widened by `1 / cos(lat)` in longitude and
//! only ever over-selects; the refinement restores exact semantics.
//!
//! Results are returned in input order, matching the linear filters in
//! [`query`](crate::query) exactly.

use bnav_core::{Coordinate, Station};
use log::debug;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

// Metres per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[lon, lat]` point plus the station's
/// position in the input list.
#[derive(Clone)]
struct StationEntry {
    point: [f64; 2], // [lon, lat]
    pos: usize,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    /// Squared Euclidean distance in degree space.  Only used for
    /// nearest-neighbour ordering, where monotonicity is all that matters.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── StationIndex ──────────────────────────────────────────────────────────────

/// An immutable spatial index over a snapshot of the station list.
///
/// Build once per feed refresh; queries then avoid the O(N) scan of the
/// linear filters.  Stations with unparsable coordinates are excluded at
/// build time (the same data-quality skip the linear filters apply per
/// query).
pub struct StationIndex {
    tree: RTree<StationEntry>,
    stations: Vec<Station>,
}

impl StationIndex {
    /// Index a snapshot of `stations`.
    pub fn build(stations: Vec<Station>) -> Self {
        let entries: Vec<StationEntry> = stations
            .iter()
            .enumerate()
            .filter_map(|(pos, station)| match station.coordinate() {
                Some(at) => Some(StationEntry { point: [at.lon, at.lat], pos }),
                None => {
                    debug!("not indexing station {:?}: unparsable coordinate", station.id);
                    None
                }
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            stations,
        }
    }

    /// Number of indexed (parsable) stations.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// All indexed stations within `radius_m` metres of `center`, in input
    /// order.  Same result set as
    /// [`find_within_radius`](crate::query::find_within_radius).
    pub fn within_radius(&self, center: Coordinate, radius_m: f64) -> Vec<&Station> {
        let d_lat = radius_m / METERS_PER_DEGREE;
        // Widen longitude by the latitude shrink factor; clamp keeps the
        // envelope finite near the poles.
        let d_lon = d_lat / center.lat.to_radians().cos().abs().max(1e-6);

        let envelope = AABB::from_corners(
            [center.lon - d_lon, center.lat - d_lat],
            [center.lon + d_lon, center.lat + d_lat],
        );

        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .filter(|entry| {
                let at = Coordinate::new(entry.point[0], entry.point[1]);
                at.distance_m(center) <= radius_m
            })
            .map(|entry| entry.pos)
            .collect();

        hits.sort_unstable();
        hits.into_iter().map(|pos| &self.stations[pos]).collect()
    }

    /// The indexed station closest to `center`, or `None` if nothing is
    /// indexed.
    pub fn nearest(&self, center: Coordinate) -> Option<&Station> {
        self.tree
            .nearest_neighbor(&[center.lon, center.lat])
            .map(|entry| &self.stations[entry.pos])
    }
}
