//! Application configuration loaded from TOML.
//!
//! Every section is optional; missing fields fall back to the defaults below,
//! which reproduce the classic 800×800 viewer with a 32×32 unit sphere.
//!
//! ```toml
//! material = 2
//!
//! [window]
//! title = "Phong Lighting Model"
//! width = 1024
//! height = 768
//!
//! [sphere]
//! latitude_segments = 64
//! longitude_segments = 64
//!
//! [light]
//! position = [2.0, 2.0, 2.0]
//! step = 0.25
//! ```

use crate::error::ConfigError;
use crate::material::MaterialKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Window creation options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Phong Lighting Model".to_string(),
            width: 800,
            height: 800,
        }
    }
}

/// Sphere tessellation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub latitude_segments: u32,
    pub longitude_segments: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            latitude_segments: 32,
            longitude_segments: 32,
        }
    }
}

/// Projection and orbit parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Horizontal distance from the orbit axis.
    pub orbit_radius: f32,
    pub orbit_height: f32,
    /// Orbit speed in degrees per second.
    pub orbit_speed_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            orbit_radius: 3.0,
            orbit_height: 1.5,
            orbit_speed_degrees: 30.0,
        }
    }
}

/// Point light placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    /// Distance one key press moves the light.
    pub step: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [2.0, 2.0, 2.0],
            color: [1.0, 1.0, 1.0],
            step: 0.1,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial material preset id (0 = metal, 1 = wall, 2 = wood, 3 = plastic).
    pub material: i32,
    pub window: WindowConfig,
    pub sphere: SphereConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn sphere_segments(mut self, latitude: u32, longitude: u32) -> Self {
        self.sphere.latitude_segments = latitude;
        self.sphere.longitude_segments = longitude;
        self
    }

    /// Applies command-line sphere resolution overrides, then validates the
    /// result. `None` keeps the configured value.
    pub fn with_segment_overrides(
        self,
        latitude: Option<u32>,
        longitude: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let lat = latitude.unwrap_or(self.sphere.latitude_segments);
        let lon = longitude.unwrap_or(self.sphere.longitude_segments);
        let config = self.sphere_segments(lat, lon);
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks every numeric range, reporting all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.window.width == 0 || self.window.height == 0 {
            errors.push(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        let sphere = &self.sphere;
        if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
            errors.push(format!("sphere.radius must be positive, got {}", sphere.radius));
        }
        if sphere.latitude_segments == 0 {
            errors.push("sphere.latitude_segments must be at least 1".to_string());
        }
        if sphere.longitude_segments == 0 {
            errors.push("sphere.longitude_segments must be at least 1".to_string());
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            errors.push(format!(
                "camera.fov_degrees must be inside (0, 180), got {}",
                camera.fov_degrees
            ));
        }
        if !(camera.near.is_finite() && camera.near > 0.0) {
            errors.push(format!("camera.near must be positive, got {}", camera.near));
        }
        if !(camera.far.is_finite() && camera.far > camera.near) {
            errors.push(format!(
                "camera.far must exceed camera.near, got {} <= {}",
                camera.far, camera.near
            ));
        }
        if !(camera.orbit_radius.is_finite() && camera.orbit_radius > 0.0) {
            errors.push(format!(
                "camera.orbit_radius must be positive, got {}",
                camera.orbit_radius
            ));
        }

        if !camera.orbit_height.is_finite() {
            errors.push(format!(
                "camera.orbit_height must be finite, got {}",
                camera.orbit_height
            ));
        }
        if !camera.orbit_speed_degrees.is_finite() {
            errors.push(format!(
                "camera.orbit_speed_degrees must be finite, got {}",
                camera.orbit_speed_degrees
            ));
        }

        let light = &self.light;
        if !light.position.iter().all(|c| c.is_finite()) {
            errors.push(format!("light.position must be finite, got {:?}", light.position));
        }
        if !light.color.iter().all(|c| c.is_finite()) {
            errors.push(format!("light.color must be finite, got {:?}", light.color));
        }
        if !(self.light.step.is_finite() && self.light.step > 0.0) {
            errors.push(format!("light.step must be positive, got {}", self.light.step));
        }
        if MaterialKind::from_id(self.material).is_none() {
            errors.push(format!("material must be 0..=3, got {}", self.material));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.sphere.latitude_segments, 32);
        assert_eq!(config.camera.fov_degrees, 45.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
material = 3

[sphere]
latitude_segments = 12

[light]
step = 0.5
"#,
        )
        .unwrap();

        assert_eq!(config.material, 3);
        assert_eq!(config.sphere.latitude_segments, 12);
        assert_eq!(config.sphere.longitude_segments, 32);
        assert_eq!(config.light.step, 0.5);
        assert_eq!(config.light.position, [2.0, 2.0, 2.0]);
        assert_eq!(config.window.title, "Phong Lighting Model");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("this is not valid toml {{{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut config = AppConfig::new().sphere_segments(0, 8);
        config.camera.near = 10.0;
        config.camera.far = 10.0;
        config.material = 7;

        let Err(ConfigError::Validation(msg)) = config.validate() else {
            panic!("expected validation error");
        };
        assert!(msg.contains("latitude_segments"));
        assert!(msg.contains("camera.far"));
        assert!(msg.contains("material"));
        assert!(!msg.contains("longitude_segments"));
    }

    #[test]
    fn non_finite_orbit_and_light_values_are_rejected() {
        let cases = [
            ("[camera]\norbit_speed_degrees = nan\n", "camera.orbit_speed_degrees"),
            ("[camera]\norbit_height = inf\n", "camera.orbit_height"),
            ("[light]\nposition = [2.0, nan, 2.0]\n", "light.position"),
            ("[light]\ncolor = [1.0, 1.0, -inf]\n", "light.color"),
        ];
        for (toml, field) in cases {
            match AppConfig::from_toml_str(toml) {
                Err(ConfigError::Validation(msg)) => assert!(msg.contains(field), "{msg}"),
                other => panic!("expected validation error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn out_of_range_fov_is_rejected() {
        let err = AppConfig::from_toml_str("[camera]\nfov_degrees = 180.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phong.toml");
        std::fs::write(&path, "[window]\nwidth = 1024\nheight = 768\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn segment_overrides_are_validated() {
        let config = AppConfig::default()
            .with_segment_overrides(Some(12), None)
            .unwrap();
        assert_eq!(config.sphere.latitude_segments, 12);
        assert_eq!(config.sphere.longitude_segments, 32);

        let err = AppConfig::default()
            .with_segment_overrides(Some(0), Some(8))
            .unwrap_err();
        let ConfigError::Validation(msg) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(msg.contains("latitude_segments"));
    }

    #[test]
    fn builder_overrides_window() {
        let config = AppConfig::new().title("Sphere").size(640, 480);
        assert_eq!(config.window.title, "Sphere");
        assert_eq!((config.window.width, config.window.height), (640, 480));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let text = toml::to_string(&AppConfig::default()).unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), AppConfig::default());
    }
}
