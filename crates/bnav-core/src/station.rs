//! The bike-share station record.
//!
//! Stations are owned by an external data client; this crate only reads
//! them.  Coordinates are kept as the raw feed strings and parsed lazily:
//! live feeds ship quoted decimals and occasionally junk, and a station with
//! an unparsable position is a per-record data-quality skip, never an error.
//!
//! The serde aliases cover both feed dialects in circulation (`lat` /
//! `latitude`, `sbi` / `available_rent_bikes`, …) so either deserializes
//! into the same struct.  Counts absent from a record default to 0.

use crate::Coordinate;

/// A bike-share dock location with live availability counts.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Station identifier, e.g. `"500101001"`.
    #[cfg_attr(feature = "serde", serde(rename = "sno", default))]
    pub id: String,

    /// Display name.
    #[cfg_attr(feature = "serde", serde(rename = "sna", default))]
    pub name: String,

    /// Raw latitude as published by the feed.  May be junk.
    #[cfg_attr(feature = "serde", serde(alias = "latitude", default))]
    pub lat: String,

    /// Raw longitude as published by the feed.  May be junk.
    #[cfg_attr(feature = "serde", serde(alias = "longitude", default))]
    pub lng: String,

    /// Bikes currently available to rent.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "sbi", alias = "available_rent_bikes", default)
    )]
    pub bikes_available: u32,

    /// Empty docks currently available for returns.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "bemp", alias = "available_return_bikes", default)
    )]
    pub docks_available: u32,

    /// Total dock capacity.  `bikes_available + docks_available <= capacity`
    /// is expected of well-formed feeds but not enforced here.
    #[cfg_attr(feature = "serde", serde(rename = "tot", alias = "total", default))]
    pub capacity: u32,

    /// Last-update timestamp, raw: either 14-digit (`20220523181004`) or ISO.
    #[cfg_attr(feature = "serde", serde(rename = "mday", default))]
    pub updated_at: String,
}

impl Station {
    /// Parse the raw feed coordinate.
    ///
    /// Returns `None` when either component fails to parse or is non-finite.
    /// Spatial queries treat `None` as a silent skip.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lon: f64 = self.lng.trim().parse().ok()?;
        let lat: f64 = self.lat.trim().parse().ok()?;
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        Some(Coordinate::new(lon, lat))
    }

    /// Classify how easy it is to rent a bike here right now.
    ///
    /// Percentage of capacity currently rentable, bucketed at the 20/40/50/70
    /// thresholds.  Zero-capacity stations classify as `Critical`.
    pub fn availability(&self) -> Availability {
        let pct = if self.capacity > 0 {
            self.bikes_available as f64 / self.capacity as f64 * 100.0
        } else {
            0.0
        };

        if pct < 20.0 {
            Availability::Critical
        } else if pct < 40.0 {
            Availability::Low
        } else if pct > 70.0 {
            Availability::High
        } else if pct > 50.0 {
            Availability::Good
        } else {
            Availability::Normal
        }
    }
}

/// Rentability buckets for a station's live bike count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Availability {
    /// Under 20 % of capacity rentable.
    Critical,
    /// Under 40 %.
    Low,
    /// 40–50 %.
    Normal,
    /// Over 50 %.
    Good,
    /// Over 70 %.
    High,
}
