//! Tolerance-based vertex identity.

use glam::DVec3;

/// Default number of decimal places kept when quantizing vertex positions.
///
/// Neighboring vertices of a class-I grid with `m = 1000` are still about
/// `1e-3` apart on the unit sphere, far above the `5e-7` merge tolerance.
pub const DEFAULT_KEY_DECIMALS: u32 = 6;

/// Upper bound on key precision. Larger scales would overflow the `i64` axes
/// or fall below `f64` resolution for unit-sphere coordinates.
pub const MAX_KEY_DECIMALS: u32 = 12;

/// Upper bound on output rounding precision. `f64` carries about 15
/// significant digits, so finer rounding of unit-sphere coordinates is a
/// no-op, and much larger scales overflow to infinity.
pub const MAX_OUTPUT_DECIMALS: u32 = 15;

/// Canonical identity of a mesh vertex.
///
/// Every coordinate is scaled by `10^decimals` and rounded to the nearest
/// integer. Points closer than [`VertexKey::tolerance`] on every axis are
/// merged unless they straddle a rounding boundary; points further apart than
/// `10^-decimals` on any axis never share a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    x: i64,
    y: i64,
    z: i64,
}

impl VertexKey {
    /// Quantize `point` to `decimals` decimal places (capped at [`MAX_KEY_DECIMALS`]).
    pub fn quantize(point: DVec3, decimals: u32) -> Self {
        let scale = scale_for(decimals.min(MAX_KEY_DECIMALS));
        Self {
            x: (point.x * scale).round() as i64,
            y: (point.y * scale).round() as i64,
            z: (point.z * scale).round() as i64,
        }
    }

    /// Half-width of the quantization bucket along one axis.
    pub fn tolerance(decimals: u32) -> f64 {
        0.5 / scale_for(decimals.min(MAX_KEY_DECIMALS))
    }

    /// The integer lattice coordinates of this key.
    pub fn components(&self) -> [i64; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::fmt::Display for VertexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Round every component of `point` to `decimals` decimal places (capped at
/// [`MAX_OUTPUT_DECIMALS`]).
///
/// Used for output stability only; never for identity.
pub fn round_decimals(point: DVec3, decimals: u32) -> DVec3 {
    let scale = scale_for(decimals.min(MAX_OUTPUT_DECIMALS));
    (point * scale).round() / scale
}

fn scale_for(decimals: u32) -> f64 {
    10f64.powi(decimals as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_within_tolerance_share_key() {
        let a = DVec3::new(0.123_456_1, -0.5, 0.25);
        let b = DVec3::new(0.123_456_3, -0.500_000_2, 0.25);
        assert_eq!(VertexKey::quantize(a, 6), VertexKey::quantize(b, 6));
    }

    #[test]
    fn test_points_beyond_one_step_never_merge() {
        let a = DVec3::new(0.1, 0.2, 0.3);
        let b = a + DVec3::new(1.01e-6, 0.0, 0.0);
        assert_ne!(VertexKey::quantize(a, 6), VertexKey::quantize(b, 6));
    }

    #[test]
    fn test_coarse_precision_merges_close_points() {
        // Two decimals merges points a few thousandths apart, the failure mode
        // of coarse keys on dense grids.
        let a = DVec3::new(0.501, 0.0, 0.0);
        let b = DVec3::new(0.503, 0.0, 0.0);
        assert_eq!(VertexKey::quantize(a, 2), VertexKey::quantize(b, 2));
        assert_ne!(VertexKey::quantize(a, 6), VertexKey::quantize(b, 6));
    }

    #[test]
    fn test_tolerance_value() {
        assert!((VertexKey::tolerance(2) - 0.005).abs() < 1e-15);
        assert!((VertexKey::tolerance(6) - 5e-7).abs() < 1e-18);
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let a = DVec3::new(-0.0, 0.0, -1e-9);
        let b = DVec3::ZERO;
        assert_eq!(VertexKey::quantize(a, 6), VertexKey::quantize(b, 6));
    }

    #[test]
    fn test_rounding_precision_is_capped() {
        let p = DVec3::new(0.123_456_789, -0.987_654_321, 0.5);
        for decimals in [MAX_OUTPUT_DECIMALS, 16, 400, u32::MAX] {
            let rounded = round_decimals(p, decimals);
            assert!(rounded.is_finite(), "{decimals} decimals gave {rounded}");
            assert!((rounded - p).abs().max_element() < 1e-14);
        }
    }

    #[test]
    fn test_precision_is_capped() {
        let p = DVec3::new(0.3, 0.6, 0.9);
        assert_eq!(VertexKey::quantize(p, 40), VertexKey::quantize(p, MAX_KEY_DECIMALS));
    }

    #[test]
    fn test_round_decimals() {
        let p = round_decimals(DVec3::new(0.123_49, -0.987_51, 0.5), 3);
        assert_eq!(p, DVec3::new(0.123, -0.988, 0.5));
    }
}
