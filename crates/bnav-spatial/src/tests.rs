//! Unit tests for the spatial queries.

use bnav_core::Station;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A station with feed-style string coordinates.
fn station(id: &str, lat: &str, lng: &str, sbi: u32, tot: u32) -> Station {
    Station {
        id: id.into(),
        name: format!("station {id}"),
        lat: lat.into(),
        lng: lng.into(),
        bikes_available: sbi,
        docks_available: tot.saturating_sub(sbi),
        capacity: tot,
        updated_at: "20220523181004".into(),
    }
}

// At this latitude one degree of latitude spans ~111,195 m, so these
// offsets put stations at ~50 m and ~150 m from the query center.
const CENTER_LAT: f64 = 25.0;
const CENTER_LON: f64 = 121.5;
const DEG_50M: f64 = 50.0 / 111_195.0;
const DEG_150M: f64 = 150.0 / 111_195.0;

fn fixture() -> Vec<Station> {
    vec![
        station("near-a", &format!("{}", CENTER_LAT + DEG_50M), "121.5", 15, 40),
        station("near-b", &format!("{}", CENTER_LAT - DEG_50M), "121.5", 3, 40),
        station("far", &format!("{}", CENTER_LAT + DEG_150M), "121.5", 10, 20),
        station("junk", "not-a-latitude", "121.5", 5, 10),
    ]
}

#[cfg(test)]
mod radius {
    use bnav_core::Coordinate;

    use super::{fixture, station, CENTER_LAT, CENTER_LON};
    use crate::find_within_radius;

    #[test]
    fn includes_near_excludes_far() {
        let stations = fixture();
        let center = Coordinate::new(CENTER_LON, CENTER_LAT);

        let hits = find_within_radius(&stations, center, 100.0);
        let ids: Vec<&str> = hits.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["near-a", "near-b"]);
        assert_eq!(hits[0].capacity, 40);
        assert_eq!(hits[0].bikes_available, 15);
    }

    #[test]
    fn result_grows_with_radius() {
        let stations = fixture();
        let center = Coordinate::new(CENTER_LON, CENTER_LAT);

        let small = find_within_radius(&stations, center, 100.0);
        let large = find_within_radius(&stations, center, 200.0);

        assert!(small.len() <= large.len());
        for s in &small {
            assert!(large.iter().any(|l| l.id == s.id), "{} missing at larger radius", s.id);
        }
        assert_eq!(large.len(), 3); // junk still excluded
    }

    #[test]
    fn junk_coordinates_are_skipped_not_fatal() {
        let stations = vec![station("junk", "NaN", "garbage", 0, 0)];
        let hits = find_within_radius(&stations, Coordinate::new(CENTER_LON, CENTER_LAT), 1e9);
        assert!(hits.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let hits = find_within_radius(&[], Coordinate::new(0.0, 0.0), 100.0);
        assert!(hits.is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let stations = fixture();
        let hits = find_within_radius(&stations, Coordinate::new(CENTER_LON, CENTER_LAT), 1e6);
        let ids: Vec<&str> = hits.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["near-a", "near-b", "far"]);
    }
}

#[cfg(test)]
mod bounds {
    use bnav_core::{Coordinate, GeoBounds};

    use super::station;
    use crate::{find_within_bounds, viewport_radius};

    #[test]
    fn plain_viewport() {
        let stations = vec![
            station("in", "25.0", "121.5", 0, 0),
            station("out", "26.5", "121.5", 0, 0),
        ];
        let bounds = GeoBounds::new(Coordinate::new(121.0, 24.5), Coordinate::new(122.0, 25.5));

        let hits = find_within_bounds(&stations, bounds);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "in");
    }

    #[test]
    fn antimeridian_viewport() {
        let stations = vec![
            station("fiji-side", "0.0", "179.0", 0, 0),
            station("greenwich", "0.0", "0.0", 0, 0),
        ];
        let bounds = GeoBounds::new(Coordinate::new(170.0, -10.0), Coordinate::new(-170.0, 10.0));

        let hits = find_within_bounds(&stations, bounds);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "fiji-side");
    }

    #[test]
    fn viewport_radius_is_center_to_corner() {
        let center = Coordinate::new(121.5, 25.0);
        let ne = Coordinate::new(121.6, 25.1);
        let r = viewport_radius(center, ne);
        assert_eq!(r, center.distance_m(ne));
        assert!(r > 0.0);
    }
}

#[cfg(all(test, feature = "index"))]
mod index {
    use bnav_core::Coordinate;

    use super::{fixture, CENTER_LAT, CENTER_LON};
    use crate::{find_within_radius, StationIndex};

    #[test]
    fn matches_linear_filter() {
        let stations = fixture();
        let center = Coordinate::new(CENTER_LON, CENTER_LAT);
        let index = StationIndex::build(stations.clone());

        for radius in [10.0, 100.0, 200.0, 1e6] {
            let linear: Vec<&str> = find_within_radius(&stations, center, radius)
                .iter()
                .map(|s| s.id.as_str())
                .collect();
            let indexed: Vec<&str> = index
                .within_radius(center, radius)
                .iter()
                .map(|s| s.id.as_str())
                .collect();
            assert_eq!(linear, indexed, "radius {radius}");
        }
    }

    #[test]
    fn junk_excluded_at_build_time() {
        let index = StationIndex::build(fixture());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn nearest_station() {
        let stations = fixture();
        let index = StationIndex::build(stations);
        let nearest = index.nearest(Coordinate::new(CENTER_LON, CENTER_LAT)).unwrap();
        assert!(nearest.id.starts_with("near-"));
    }

    #[test]
    fn empty_index() {
        let index = StationIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.nearest(Coordinate::new(0.0, 0.0)).is_none());
        assert!(index.within_radius(Coordinate::new(0.0, 0.0), 100.0).is_empty());
    }
}
