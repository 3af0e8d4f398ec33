//! Phong material presets.
//!
//! Four presets cover the range from a tight specular highlight (metal) to an
//! almost purely diffuse surface (wall). Each preset also carries a base color
//! that the fragment stage multiplies into the lit result.

use std::fmt;

/// Reflectance coefficients for the Phong model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    /// Specular exponent; higher values give a smaller, sharper highlight.
    pub shininess: f32,
}

/// The selectable material presets.
///
/// The discriminant doubles as the `material_id` uniform the shader uses to
/// pick a base color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Directional, mirror-like reflection.
    #[default]
    Metal = 0,
    /// Diffuse reflection.
    Wall = 1,
    Wood = 2,
    Plastic = 3,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Metal,
        MaterialKind::Wall,
        MaterialKind::Wood,
        MaterialKind::Plastic,
    ];

    /// Looks up a preset by its shader id.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(MaterialKind::Metal),
            1 => Some(MaterialKind::Wall),
            2 => Some(MaterialKind::Wood),
            3 => Some(MaterialKind::Plastic),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialKind::Metal => "Metal",
            MaterialKind::Wall => "Wall",
            MaterialKind::Wood => "Wood",
            MaterialKind::Plastic => "Plastic",
        }
    }

    /// Short description of how the preset reflects light.
    pub fn reflection(self) -> &'static str {
        match self {
            MaterialKind::Metal => "directional reflection",
            MaterialKind::Wall => "diffuse reflection",
            MaterialKind::Wood | MaterialKind::Plastic => "between directional and diffuse",
        }
    }

    pub fn material(self) -> Material {
        match self {
            MaterialKind::Metal => Material {
                ambient: [0.25, 0.25, 0.25],
                diffuse: [0.4, 0.4, 0.4],
                specular: [0.774597, 0.774597, 0.774597],
                shininess: 76.8,
            },
            MaterialKind::Wall => Material {
                ambient: [0.05, 0.05, 0.05],
                diffuse: [0.55, 0.55, 0.55],
                specular: [0.07, 0.07, 0.07],
                shininess: 2.8,
            },
            MaterialKind::Wood => Material {
                ambient: [0.1, 0.05, 0.0],
                diffuse: [0.5, 0.25, 0.0],
                specular: [0.3, 0.15, 0.0],
                shininess: 32.0,
            },
            MaterialKind::Plastic => Material {
                ambient: [0.0, 0.1, 0.06],
                diffuse: [0.0, 0.51, 0.3],
                specular: [0.5, 0.5, 0.5],
                shininess: 32.0,
            },
        }
    }

    /// Base color band the fragment stage selects with `material_id`.
    pub fn base_color(self) -> [f32; 3] {
        match self {
            MaterialKind::Metal => [0.8, 0.8, 0.8],
            MaterialKind::Wall => [0.9, 0.85, 0.7],
            MaterialKind::Wood => [0.6, 0.3, 0.1],
            MaterialKind::Plastic => [0.2, 0.7, 0.2],
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.reflection())
    }
}
