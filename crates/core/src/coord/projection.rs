//! Spherical Web Mercator (EPSG:3857) to and from WGS-84 longitude/latitude.
//!
//! Map coordinates handed out by the engine are in metres; everything shown to the
//! user is in degrees.

use std::f64::consts::PI;

use geo::Coord;

pub const EARTH_RADIUS: f64 = 6_378_137.0;
/// Half the width of the projected world, in metres.
pub const HALF_SIZE: f64 = PI * EARTH_RADIUS;
/// Latitude at which the square Web Mercator world ends.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;
pub const TILE_SIZE: f64 = 256.0;

/// Projected metres to degrees. Longitudes outside the first world copy are wrapped
/// back into [-180, 180].
pub fn to_lon_lat(coordinate: Coord) -> Coord {
    let mut lon = 180.0 * coordinate.x / HALF_SIZE;
    let lat = 360.0 * (coordinate.y / EARTH_RADIUS).exp().atan() / PI - 90.0;

    if !(-180.0..=180.0).contains(&lon) {
        lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
    }

    Coord { x: lon, y: lat }
}

/// Degrees to projected metres. Latitude is clamped to the Mercator limit so the
/// poles do not project to infinity.
pub fn from_lon_lat(lon_lat: Coord) -> Coord {
    let lat = lon_lat.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);

    Coord {
        x: EARTH_RADIUS * lon_lat.x.to_radians(),
        y: EARTH_RADIUS * lat.to_radians().sin().atanh(),
    }
}

/// Metres per pixel at a zoom level, for 256px tiles.
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    2.0 * HALF_SIZE / TILE_SIZE / 2f64.powf(zoom)
}
