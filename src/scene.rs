//! Driver-owned render state: material selection, light, and orbiting camera.
//!
//! Everything the per-frame matrix calls need lives in [`SceneState`], which
//! the app owns and passes by reference. The core geometry and matrix modules
//! never hold state of their own.

use crate::config::{AppConfig, CameraConfig};
use crate::error::Result;
use crate::mat4::{self, Matrix4x4};
use crate::material::MaterialKind;
use crate::phong::PointLight;
use glam::Vec3;

/// World axis a light move is applied along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// The three transforms handed to the vertex stage, plus the normal matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMatrices {
    pub model: Matrix4x4,
    pub view: Matrix4x4,
    pub projection: Matrix4x4,
    /// Inverse-transpose of `model`.
    pub normal_matrix: Matrix4x4,
}

/// Mutable per-run state of the viewer.
///
/// The camera circles the origin at a fixed height, looking at the sphere's
/// center, while the light stays wherever the user last moved it.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub material: MaterialKind,
    pub light: PointLight,
    /// Distance a single light move covers.
    pub light_step: f32,
    /// Current camera azimuth in degrees.
    pub orbit_angle: f32,
    pub camera: CameraConfig,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl SceneState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            material: MaterialKind::from_id(config.material).unwrap_or_default(),
            light: PointLight {
                position: Vec3::from(config.light.position),
                color: Vec3::from(config.light.color),
            },
            light_step: config.light.step,
            orbit_angle: 0.0,
            camera: config.camera.clone(),
        }
    }

    /// Switches the active preset. Returns `true` if it changed.
    pub fn select_material(&mut self, kind: MaterialKind) -> bool {
        let changed = self.material != kind;
        self.material = kind;
        changed
    }

    /// Moves the light by `delta` along `axis`.
    pub fn move_light(&mut self, axis: Axis, delta: f32) {
        self.light.position += axis.unit() * delta;
    }

    /// Moves the light one configured step along `axis`, in the direction of
    /// `sign`. A zero or NaN `sign` leaves the light in place.
    pub fn step_light(&mut self, axis: Axis, sign: f32) {
        if sign == 0.0 || sign.is_nan() {
            return;
        }
        self.move_light(axis, self.light_step * sign.signum());
    }

    /// Advances the camera orbit by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.orbit_angle = (self.orbit_angle + self.camera.orbit_speed_degrees * dt) % 360.0;
    }

    /// Camera position for the current orbit angle.
    pub fn eye(&self) -> Vec3 {
        let (sin, cos) = self.orbit_angle.to_radians().sin_cos();
        Vec3::new(
            sin * self.camera.orbit_radius,
            self.camera.orbit_height,
            cos * self.camera.orbit_radius,
        )
    }

    /// Builds this frame's transforms for a viewport of the given aspect ratio.
    pub fn frame_matrices(&self, aspect: f32) -> Result<FrameMatrices> {
        let model = mat4::identity();
        let view = mat4::look_at(self.eye(), Vec3::ZERO, Vec3::Y)?;
        let projection = mat4::perspective(
            self.camera.fov_degrees,
            aspect,
            self.camera.near,
            self.camera.far,
        )?;

        Ok(FrameMatrices {
            model,
            view,
            projection,
            normal_matrix: mat4::normal_matrix(&model),
        })
    }
}
