//! Longitude/latitude conversions for unit-sphere points (z axis through the poles).

use glam::DVec3;

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoord {
    /// Longitude in `[-180, 180]`.
    pub lon: f64,
    /// Latitude in `[-90, 90]`.
    pub lat: f64,
}

impl GeoCoord {
    /// Geographic coordinate of the direction `point` (need not be normalized).
    pub fn from_point(point: DVec3) -> Self {
        Self {
            lon: libm::atan2(point.y, point.x).to_degrees(),
            lat: latitude_deg(point),
        }
    }

    /// Unit-sphere point for this coordinate.
    pub fn to_unit(self) -> DVec3 {
        lon_lat_to_unit(self.lon, self.lat)
    }
}

/// Map a longitude/latitude pair in degrees onto the unit sphere.
///
/// `x = cos(lat) cos(lon)`, `y = cos(lat) sin(lon)`, `z = sin(lat)`.
pub fn lon_lat_to_unit(lon_deg: f64, lat_deg: f64) -> DVec3 {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let r = libm::cos(lat);
    DVec3::new(r * libm::cos(lon), r * libm::sin(lon), libm::sin(lat))
}

/// Latitude of the direction `point` in degrees. Returns 0 for the zero vector.
pub fn latitude_deg(point: DVec3) -> f64 {
    let len = point.length();
    if len == 0.0 {
        return 0.0;
    }
    libm::asin((point.z / len).clamp(-1.0, 1.0)).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_poles_and_equator() {
        assert!((lon_lat_to_unit(0.0, 90.0) - DVec3::Z).length() < EPSILON);
        assert!((lon_lat_to_unit(123.0, -90.0) + DVec3::Z).length() < EPSILON);
        assert!((lon_lat_to_unit(0.0, 0.0) - DVec3::X).length() < EPSILON);
        assert!((lon_lat_to_unit(90.0, 0.0) - DVec3::Y).length() < EPSILON);
    }

    #[test]
    fn test_geo_round_trip() {
        for &(lon, lat) in &[(10.0, 20.0), (-170.0, 45.5), (179.0, -66.5), (0.0, 0.0)] {
            let geo = GeoCoord::from_point(lon_lat_to_unit(lon, lat));
            assert!((geo.lon - lon).abs() < EPSILON, "lon {lon} -> {}", geo.lon);
            assert!((geo.lat - lat).abs() < EPSILON, "lat {lat} -> {}", geo.lat);
        }
    }

    #[test]
    fn test_latitude_ignores_length() {
        let p = DVec3::new(1.0, 0.0, 1.0);
        assert!((latitude_deg(p) - 45.0).abs() < EPSILON);
        assert!((latitude_deg(p * 7.5) - 45.0).abs() < EPSILON);
        assert_eq!(latitude_deg(DVec3::ZERO), 0.0);
    }

    #[test]
    fn test_antimeridian_points_coincide() {
        let east = lon_lat_to_unit(180.0, 30.0);
        let west = lon_lat_to_unit(-180.0, 30.0);
        assert!((east - west).length() < EPSILON);
    }
}
