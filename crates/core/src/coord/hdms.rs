//! Hemisphere/degrees/minutes/seconds strings, e.g. `48° 51′ 30″ N 2° 17′ 40″ E`.

use std::fmt::Write;

use geo::Coord;

/// Seconds are written with at most this many decimals.
pub const MAX_FRACTION_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn hemisphere(self, negative: bool) -> char {
        match (self, negative) {
            (Axis::Latitude, false) => 'N',
            (Axis::Latitude, true) => 'S',
            (Axis::Longitude, false) => 'E',
            (Axis::Longitude, true) => 'W',
        }
    }
}

/// Formats one angle. Degrees are normalized into [-180, 180) first.
///
/// Minutes are only written when minutes or seconds are non-zero, seconds only when
/// non-zero, and the hemisphere letter is dropped at exactly zero. Seconds rounding up
/// to 60 carry into the minutes (and minutes into the degrees). `fraction_digits` is
/// capped at [`MAX_FRACTION_DIGITS`].
pub fn degrees_to_string_hdms(axis: Axis, degrees: f64, fraction_digits: usize) -> String {
    let fraction_digits = fraction_digits.min(MAX_FRACTION_DIGITS);
    let normalized = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    let x = (3600.0 * normalized).abs();

    let mut deg = (x / 3600.0).floor();
    let mut min = ((x - deg * 3600.0) / 60.0).floor();
    let mut sec = round_to(x - deg * 3600.0 - min * 60.0, fraction_digits);

    if sec >= 60.0 {
        sec = 0.0;
        min += 1.0;
    }
    if min >= 60.0 {
        min = 0.0;
        deg += 1.0;
    }

    let mut hdms = format!("{}\u{b0}", deg as u32);
    if min != 0.0 || sec != 0.0 {
        let _ = write!(hdms, " {:02}\u{2032}", min as u32);
    }
    if sec != 0.0 {
        let width = if fraction_digits > 0 {
            fraction_digits + 3
        } else {
            2
        };
        let _ = write!(hdms, " {sec:0width$.fraction_digits$}\u{2033}");
    }
    if normalized != 0.0 {
        hdms.push(' ');
        hdms.push(axis.hemisphere(normalized < 0.0));
    }

    hdms
}

/// Formats a lon/lat pair, latitude first.
pub fn to_string_hdms(lon_lat: Coord, fraction_digits: usize) -> String {
    format!(
        "{} {}",
        degrees_to_string_hdms(Axis::Latitude, lon_lat.y, fraction_digits),
        degrees_to_string_hdms(Axis::Longitude, lon_lat.x, fraction_digits),
    )
}

fn round_to(value: f64, fraction_digits: usize) -> f64 {
    let factor = 10f64.powi(fraction_digits as i32);
    (value * factor).round() / factor
}
