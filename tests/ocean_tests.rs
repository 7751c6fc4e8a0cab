use glam::{Vec2, Vec3};
use ocean_scene::math::{fbm, value_noise};
use ocean_scene::ocean::seascape::{self, SeascapeCamera, CAMERA_CLEARANCE, FAR};
use ocean_scene::ocean::{GerstnerWaves, Sun, WaveLayer};

#[cfg(test)]
mod gerstner_tests {
    use super::*;

    #[test]
    fn test_crest_sharpens_with_steepness() {
        // Steeper waves pinch crests toward each other: the horizontal
        // displacement swings further around the rest point
        let gentle = GerstnerWaves::new(vec![WaveLayer::new(1.0, 0.0, 0.1, 30.0)]);
        let steep = GerstnerWaves::new(vec![WaveLayer::new(1.0, 0.0, 0.9, 30.0)]);
        let x = 0.0;
        let g = gentle.sample(x, 0.0, 0.0).displacement.x.abs();
        let s = steep.sample(x, 0.0, 0.0).displacement.x.abs();
        assert!(s > g);
    }

    #[test]
    fn test_default_waves_keep_a_unit_normal() {
        let waves = GerstnerWaves::default();
        for i in 0..25 {
            let sample = waves.sample(i as f32 * 11.0, i as f32 * -5.0, 4.0);
            assert!((sample.normal().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_longer_waves_travel_faster() {
        let short = WaveLayer::new(1.0, 0.0, 0.25, 10.0);
        let long = WaveLayer::new(1.0, 0.0, 0.25, 60.0);
        assert!(long.phase_speed() > short.phase_speed());
    }

    #[test]
    fn test_flat_waves_produce_flat_surface() {
        let mut waves = GerstnerWaves::default();
        for layer in &mut waves.layers {
            layer.steepness = 0.0;
        }
        assert_eq!(waves.surface_height(12.0, 34.0, 5.0), 0.0);
    }
}

#[cfg(test)]
mod seascape_tests {
    use super::*;

    #[test]
    fn test_camera_rays_cover_sky_and_sea() {
        let cam = SeascapeCamera::at(1.0, 3.3, 3.5, 5.0);
        let up = cam.ray(Vec2::new(0.0, 0.9));
        let down = cam.ray(Vec2::new(0.0, -0.9));
        assert!(up.y > down.y);

        let hit = seascape::trace_height_field(cam.origin, down, 3.3);
        assert!(hit.hit);
        assert!(hit.distance < FAR);
    }

    #[test]
    fn test_hit_point_lies_on_the_surface() {
        let origin = Vec3::new(2.0, 4.0, -1.0);
        let dir = Vec3::new(0.2, -1.0, 0.4).normalize();
        let hit = seascape::trace_height_field(origin, dir, 1.0);
        assert!(hit.hit);
        assert!(seascape::map(hit.point, 1.0).abs() < 0.05);
    }

    #[test]
    fn test_camera_clearance_holds_over_time() {
        for i in 0..40 {
            let t = i as f32 * 0.25;
            let cam = SeascapeCamera::at(t * 0.3, t, 0.2, 5.0);
            let h = seascape::surface_height(cam.origin.x, cam.origin.z, t);
            assert!(cam.origin.y + 1e-4 >= h + CAMERA_CLEARANCE);
        }
    }

    #[test]
    fn test_noise_ranges() {
        for i in 0..200 {
            let p = Vec2::new(i as f32 * 0.731, i as f32 * -0.377);
            assert!((-1.0..=1.0).contains(&value_noise(p)));
            assert!(fbm(p, 5).abs() < 1.0);
        }
    }
}

#[cfg(test)]
mod sun_tests {
    use super::*;

    #[test]
    fn test_sun_on_horizon_is_level() {
        let dir = Sun::new(0.0, 37.0).direction();
        assert!(dir.y.abs() < 1e-6);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sun_at_zenith_points_up() {
        let dir = Sun::new(90.0, -120.0).direction();
        assert!((dir - Vec3::Y).length() < 1e-6);
    }
}
