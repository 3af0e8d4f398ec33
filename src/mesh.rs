//! Procedural UV-sphere geometry.
//!
//! This module produces the CPU-side buffers the renderer uploads once at
//! startup:
//!
//! - [`Mesh`]: an interleaved `f32` vertex buffer (position + normal) and a
//!   `u32` triangle-list index buffer
//! - [`Vertex3d`]: a typed, `Pod` view of one interleaved vertex
//!
//! Generation is pure: no GPU, no I/O, and identical parameters always give
//! bit-identical buffers.
//!
//! # Example
//!
//! ```
//! use phong_sphere::Mesh;
//!
//! let sphere = Mesh::sphere(1.0, 32, 32).unwrap();
//! assert_eq!(sphere.vertex_count(), 33 * 33);
//! assert_eq!(sphere.index_count(), 6 * 32 * 32);
//! ```
//!
//! # Vertex Layout
//!
//! Each vertex occupies 6 floats (24 bytes):
//!
//! | Attribute | Floats  | Byte offset |
//! |-----------|---------|-------------|
//! | position  | 0..3    | 0           |
//! | normal    | 3..6    | 12          |
//!
//! Vertex `(lat, lon)` starts at float `(lat * (lon_segments + 1) + lon) * 6`.

use crate::error::{Error, Result};
use std::f32::consts::PI;

/// Number of `f32` values per interleaved vertex.
pub const FLOATS_PER_VERTEX: usize = 6;

/// One interleaved vertex: position followed by a unit normal.
///
/// The layout matches a 6-float stride of [`Mesh::vertices`], so a vertex
/// buffer can be reinterpreted as `&[Vertex3d]` with [`bytemuck`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Position in model space.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
}

/// Triangulated sphere geometry.
///
/// Holds exactly `(lat + 1) * (lon + 1)` vertices and `6 * lat * lon`
/// indices. The first and last longitude columns share positions (the seam),
/// and every vertex of the first and last latitude rows sits on a pole. These
/// duplicates keep the index scheme a plain grid with no wrap-around.
///
/// # Winding Order
///
/// Each quad emits `(current, next, current + 1)` then
/// `(current + 1, next, next + 1)`. With azimuth sweeping from +X toward +Z
/// this orders every triangle clockwise when viewed from outside in a
/// right-handed, Y-up frame. Pipelines that cull must declare
/// `FrontFace::Cw` to keep the outer surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    latitude_segments: u32,
    longitude_segments: u32,
}

impl Mesh {
    /// Generates a UV sphere centered at the origin.
    ///
    /// # Arguments
    ///
    /// * `radius` - Sphere radius; scales positions only, normals stay unit length
    /// * `latitude_segments` - Divisions from the north pole (+Y) to the south pole (-Y)
    /// * `longitude_segments` - Divisions around the Y axis
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either segment count is zero,
    /// if the vertex or index count would not fit in a `u32`, or if `radius`
    /// is not a finite positive number.
    ///
    /// # Recommended Values
    ///
    /// | Quality | Latitude | Longitude |
    /// |---------|----------|-----------|
    /// | Low     | 8        | 16        |
    /// | Medium  | 32       | 32        |
    /// | High    | 64       | 64        |
    pub fn sphere(radius: f32, latitude_segments: u32, longitude_segments: u32) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid(
                "radius",
                format!("must be a finite positive number, got {radius}"),
            ));
        }
        if latitude_segments == 0 {
            return Err(Error::invalid("latitude_segments", "must be at least 1, got 0"));
        }
        if longitude_segments == 0 {
            return Err(Error::invalid("longitude_segments", "must be at least 1, got 0"));
        }

        // Vertex ids and the draw count are both u32.
        let row_count = u64::from(latitude_segments) + 1;
        let column_count = u64::from(longitude_segments) + 1;
        let fits_u32 = |n: Option<u64>| n.is_some_and(|n| n <= u64::from(u32::MAX));
        let index_total = 6u64
            .checked_mul(u64::from(latitude_segments))
            .and_then(|n| n.checked_mul(u64::from(longitude_segments)));
        if !fits_u32(row_count.checked_mul(column_count)) || !fits_u32(index_total) {
            return Err(Error::invalid(
                "segments",
                format!(
                    "{latitude_segments}x{longitude_segments} does not fit 32-bit vertex indices"
                ),
            ));
        }

        let columns = longitude_segments + 1;
        let vertex_count = (latitude_segments as usize + 1) * columns as usize;
        let mut vertices = Vec::with_capacity(vertex_count * FLOATS_PER_VERTEX);

        for lat in 0..=latitude_segments {
            let theta = lat as f32 * PI / latitude_segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for lon in 0..=longitude_segments {
                let phi = lon as f32 * 2.0 * PI / longitude_segments as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let x = cos_phi * sin_theta;
                let y = cos_theta;
                let z = sin_phi * sin_theta;

                vertices.extend_from_slice(&[radius * x, radius * y, radius * z, x, y, z]);
            }
        }

        let mut indices = Vec::with_capacity(6 * latitude_segments as usize * longitude_segments as usize);

        for lat in 0..latitude_segments {
            for lon in 0..longitude_segments {
                let current = lat * columns + lon;
                let next = current + columns;

                indices.extend_from_slice(&[current, next, current + 1]);
                indices.extend_from_slice(&[current + 1, next, next + 1]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            latitude_segments,
            longitude_segments,
        })
    }

    /// Interleaved vertex data, 6 floats per vertex.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangle-list indices into [`vertices`](Self::vertices).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Typed view over the vertex buffer.
    pub fn as_vertices(&self) -> &[Vertex3d] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw vertex bytes for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    /// Number of indices, i.e. the element count of the indexed draw call.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn latitude_segments(&self) -> u32 {
        self.latitude_segments
    }

    pub fn longitude_segments(&self) -> u32 {
        self.longitude_segments
    }

    /// Position of vertex `index`, or `None` if out of range.
    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        self.as_vertices().get(index).map(|v| v.position)
    }

    /// Normal of vertex `index`, or `None` if out of range.
    pub fn normal(&self, index: usize) -> Option<[f32; 3]> {
        self.as_vertices().get(index).map(|v| v.normal)
    }

    /// Index of the vertex at grid cell `(lat, lon)`.
    pub fn grid_index(&self, lat: u32, lon: u32) -> usize {
        (lat * (self.longitude_segments + 1) + lon) as usize
    }
}
