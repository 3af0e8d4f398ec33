//! # phong-sphere
//!
//! A Phong-lit UV sphere rendered with wgpu.
//!
//! The crate splits into a pure core and a thin GPU driver:
//!
//! - [`mesh`]: procedural sphere generation into interleaved vertex and index buffers
//! - [`mat4`]: column-major `[f32; 16]` perspective, look-at and translation
//! - [`material`], [`phong`], [`scene`]: presets, lighting reference and per-run state
//! - [`app`]: the winit event loop driving [`phong_pass::PhongPass`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use phong_sphere::{AppConfig, run};
//!
//! fn main() -> Result<(), phong_sphere::RendererError> {
//!     run(AppConfig::new().title("Sphere").sphere_segments(48, 48))
//! }
//! ```
//!
//! The core can be used without a window:
//!
//! ```
//! use glam::{Vec3, Vec4};
//! use phong_sphere::{Mesh, mat4};
//!
//! let sphere = Mesh::sphere(1.0, 16, 16).unwrap();
//! let view = mat4::look_at(Vec3::new(0.0, 1.5, 3.0), Vec3::ZERO, Vec3::Y).unwrap();
//! let proj = mat4::perspective(45.0, 1.0, 0.1, 100.0).unwrap();
//! let mvp = mat4::multiply(&proj, &view);
//! assert_eq!(sphere.triangle_count(), 2 * 16 * 16);
//! let center = mat4::transform(&mvp, Vec4::new(0.0, 0.0, 0.0, 1.0));
//! assert!(center.w > 0.0);
//! ```

pub mod app;
pub mod config;
pub mod controls;
pub mod error;
pub mod gpu;
pub mod input;
pub mod mat4;
pub mod material;
pub mod mesh;
pub mod phong;
pub mod phong_pass;
pub mod scene;

pub use app::run;
pub use config::{AppConfig, CameraConfig, LightConfig, SphereConfig, WindowConfig};
pub use controls::Command;
pub use error::{ConfigError, Error, RendererError, Result};
pub use gpu::GpuContext;
pub use input::Input;
pub use mat4::Matrix4x4;
pub use material::{Material, MaterialKind};
pub use mesh::{FLOATS_PER_VERTEX, Mesh, Vertex3d};
pub use phong::PointLight;
pub use phong_pass::{GpuMesh, PhongPass, PhongUniforms};
pub use scene::{Axis, FrameMatrices, SceneState};
