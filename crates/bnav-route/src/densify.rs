//! Route densification.
//!
//! Provider geometries are sparse at road scale; a playback tick per vertex
//! would jump whole blocks.  Inserting `k` linearly interpolated points per
//! segment turns the path into an evenly steppable sequence without touching
//! the geometry's shape.  Linear interpolation in degree space is fine here:
//! consecutive route vertices are tens of metres apart, where great-circle
//! curvature is far below GPS noise.

use bnav_core::Coordinate;

/// Insert `insert_between` interpolated points into every segment of `points`.
///
/// For each consecutive pair `(p, q)` the output contains `p`, then the
/// interpolated points at ratios `j / (insert_between + 1)`, then `q` — with
/// shared vertices emitted exactly once.  For `N` input points the output
/// length is `N + (N - 1) * insert_between`.
///
/// Inputs with fewer than two points are returned unchanged; zero density is
/// the identity.  Pure: the input is never mutated.
pub fn densify(points: &[Coordinate], insert_between: u32) -> Vec<Coordinate> {
    if points.len() < 2 || insert_between == 0 {
        return points.to_vec();
    }

    let k = insert_between as usize;
    let mut out = Vec::with_capacity(points.len() + (points.len() - 1) * k);
    out.push(points[0]);

    for pair in points.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        for j in 1..=k {
            let ratio = j as f64 / (k + 1) as f64;
            out.push(Coordinate::new(
                p.lon + (q.lon - p.lon) * ratio,
                p.lat + (q.lat - p.lat) * ratio,
            ));
        }
        out.push(q);
    }

    out
}
