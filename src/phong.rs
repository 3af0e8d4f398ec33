//! CPU reference for the fragment stage's lighting.
//!
//! Mirrors `shaders/phong.wgsl` term for term so the lighting can be checked
//! without a GPU.

use crate::material::MaterialKind;
use glam::Vec3;

/// A single point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
}

/// Shades one surface point.
///
/// `normal` need not be unit length. Returns
/// `(ambient + diffuse + specular) * base_color`.
pub fn shade(
    frag_pos: Vec3,
    normal: Vec3,
    light: &PointLight,
    view_pos: Vec3,
    kind: MaterialKind,
) -> Vec3 {
    let material = kind.material();
    let norm = normal.normalize();
    let light_dir = (light.position - frag_pos).normalize();

    let ambient = Vec3::from(material.ambient) * light.color;

    let diff = norm.dot(light_dir).max(0.0);
    let diffuse = diff * Vec3::from(material.diffuse) * light.color;

    let view_dir = (view_pos - frag_pos).normalize();
    let reflect_dir = reflect(-light_dir, norm);
    let spec = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
    let specular = spec * Vec3::from(material.specular) * light.color;

    (ambient + diffuse + specular) * Vec3::from(kind.base_color())
}

/// GLSL/WGSL `reflect`: `i - 2 * dot(n, i) * n`.
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn white_light(position: Vec3) -> PointLight {
        PointLight {
            position,
            color: Vec3::ONE,
        }
    }

    #[test]
    fn light_behind_surface_leaves_only_ambient() {
        let kind = MaterialKind::Wall;
        let light = white_light(Vec3::new(0.0, -5.0, 0.0));
        let color = shade(Vec3::Y, Vec3::Y, &light, Vec3::new(0.0, 5.0, 0.0), kind);

        let expected = Vec3::from(kind.material().ambient) * Vec3::from(kind.base_color());
        assert!((color - expected).abs().max_element() < EPS);
    }

    #[test]
    fn head_on_light_and_viewer_give_full_response() {
        let kind = MaterialKind::Plastic;
        let m = kind.material();
        let light = white_light(Vec3::new(0.0, 4.0, 0.0));
        let color = shade(Vec3::Y, Vec3::Y, &light, Vec3::new(0.0, 3.0, 0.0), kind);

        let expected = (Vec3::from(m.ambient) + Vec3::from(m.diffuse) + Vec3::from(m.specular))
            * Vec3::from(kind.base_color());
        assert!((color - expected).abs().max_element() < EPS);
    }

    #[test]
    fn metal_highlight_falls_off_faster_than_wall() {
        // Viewer slightly off the mirror direction.
        let light = white_light(Vec3::new(-2.0, 2.0, 0.0));
        let view = Vec3::new(2.0, 2.2, 0.0);

        let spec_share = |kind: MaterialKind| {
            let lit = shade(Vec3::ZERO, Vec3::Y, &light, view, kind);
            let m = kind.material();
            let diff = Vec3::Y.dot((light.position).normalize()).max(0.0);
            let base = Vec3::from(kind.base_color());
            let without_spec = (Vec3::from(m.ambient) + diff * Vec3::from(m.diffuse)) * base;
            ((lit - without_spec) / (Vec3::from(m.specular) * base)).x
        };

        assert!(spec_share(MaterialKind::Metal) < spec_share(MaterialKind::Wall));
    }

    #[test]
    fn unnormalized_normal_is_accepted() {
        let light = white_light(Vec3::new(1.0, 3.0, 2.0));
        let view = Vec3::new(0.0, 1.5, 3.0);
        let a = shade(Vec3::X, Vec3::X, &light, view, MaterialKind::Wood);
        let b = shade(Vec3::X, Vec3::X * 7.0, &light, view, MaterialKind::Wood);
        assert!((a - b).abs().max_element() < EPS);
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0)).length() < EPS);
    }
}
