use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Sun placement in degrees above the horizon and around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sun {
    pub elevation: f32,
    pub azimuth: f32,
}

impl Default for Sun {
    fn default() -> Self {
        Self {
            elevation: 2.0,
            azimuth: 180.0,
        }
    }
}

impl Sun {
    pub fn new(elevation: f32, azimuth: f32) -> Self {
        Self {
            elevation: elevation.clamp(-90.0, 90.0),
            azimuth: wrap_degrees(azimuth),
        }
    }

    /// Unit vector pointing from the scene toward the sun.
    ///
    /// Spherical coordinates with polar angle `90 - elevation` measured from +Y
    /// and azimuth measured from +Z toward +X.
    pub fn direction(&self) -> Vec3 {
        let phi = (90.0 - self.elevation.clamp(-90.0, 90.0)).to_radians();
        let theta = self.azimuth.to_radians();
        Vec3::new(
            phi.sin() * theta.sin(),
            phi.cos(),
            phi.sin() * theta.cos(),
        )
    }
}

/// Wrap an angle into [-180, 180].
fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && deg > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn zenith_sun_points_up() {
        assert!(approx(Sun::new(90.0, 0.0).direction(), Vec3::Y));
    }

    #[test]
    fn horizon_sun_follows_azimuth() {
        assert!(approx(Sun::new(0.0, 0.0).direction(), Vec3::Z));
        assert!(approx(Sun::new(0.0, 90.0).direction(), Vec3::X));
        assert!(approx(Sun::new(0.0, 180.0).direction(), -Vec3::Z));
    }

    #[test]
    fn direction_is_unit_length() {
        for elevation in [-45.0, 0.0, 2.0, 30.0, 89.0] {
            for azimuth in [-170.0, -30.0, 0.0, 77.0, 180.0] {
                let d = Sun::new(elevation, azimuth).direction();
                assert!((d.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn low_sun_is_just_above_horizon() {
        let d = Sun::default().direction();
        assert!(d.y > 0.0 && d.y < 0.05);
    }

    #[test]
    fn new_clamps_and_wraps() {
        let sun = Sun::new(120.0, 540.0);
        assert_eq!(sun.elevation, 90.0);
        assert_eq!(sun.azimuth, 180.0);
        assert_eq!(Sun::new(0.0, -190.0).azimuth, 170.0);
    }
}
