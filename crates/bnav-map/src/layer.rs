//! Route line drawing seam.

use bnav_core::Coordinate;

/// Receives the full route geometry whenever it changes.
///
/// Both operations are idempotent replacements: `set_route` redraws the
/// whole line (never appends), and `clear` on an empty layer is a no-op.
pub trait RouteLineSink {
    /// Replace the drawn route line with `path`.
    fn set_route(&mut self, path: &[Coordinate]);

    /// Remove the drawn route line.
    fn clear(&mut self);
}
