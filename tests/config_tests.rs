use clap::Parser;
use ocean_scene::config::ConfigError;
use ocean_scene::{Cli, SceneKind, Settings};
use std::io::Write;

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("ocean-scene-{}-{}.json", name, std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_file_then_flags() {
        let path = write_temp("layered", r#"{ "sun": { "elevation": 20.0, "azimuth": 45.0 }, "sky": { "turbidity": 4.0 } }"#);
        let cli = Cli::parse_from([
            "ocean-scene",
            "--config",
            path.to_str().unwrap(),
            "--azimuth",
            "-90",
            "--scene",
            "seascape",
        ]);
        let settings = cli.settings().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cli.scene, SceneKind::Seascape);
        assert_eq!(settings.sun.elevation, 20.0);
        assert_eq!(settings.sun.azimuth, -90.0);
        assert_eq!(settings.sky.turbidity, 4.0);
    }

    #[test]
    fn test_invalid_file_values_are_reported() {
        let path = write_temp("invalid", r#"{ "camera": { "fov_y_degrees": 0.0 } }"#);
        let err = Settings::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.fov_y_degrees", .. }));
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let settings = Settings::default();
        let text = serde_json::to_string_pretty(&settings).unwrap();
        assert_eq!(Settings::from_json(&text).unwrap(), settings);
    }

    #[test]
    fn test_flat_flag_clears_waves() {
        let cli = Cli::parse_from(["ocean-scene", "--flat"]);
        assert!(cli.settings().unwrap().waves.active_layers().is_empty());
    }

    #[test]
    fn test_out_of_range_sun_in_file_is_clamped_and_wrapped() {
        let path = write_temp("sun", r#"{ "sun": { "elevation": -135.0, "azimuth": -250.0 } }"#);
        let settings = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.sun.elevation, -90.0);
        assert_eq!(settings.sun.azimuth, 110.0);
    }
}
