use crate::core::geometry::Fragment;
use crate::core::pipeline::Shader;
use crate::scene::material::FlatMaterial;
use crate::scene::texture::SampleFilter;
use nalgebra::Vector3;

/// Flat technique for effect meshes: diffuse texture times vertex color.
/// No lighting, no blending.
pub struct UnlitShader<'a> {
    pub material: &'a FlatMaterial,
    pub filter: SampleFilter,
}

impl<'a> UnlitShader<'a> {
    pub fn new(material: &'a FlatMaterial, filter: SampleFilter) -> Self {
        Self { material, filter }
    }
}

impl Shader for UnlitShader<'_> {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32> {
        let varyings = &fragment.varyings;
        self.material
            .diffuse_texture
            .sample(varyings.uv, self.filter)
            .component_mul(&varyings.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Varyings;
    use crate::scene::texture::Texture;
    use nalgebra::Vector2;
    use std::sync::Arc;

    #[test]
    fn test_texture_times_vertex_color() {
        let material = FlatMaterial {
            diffuse_texture: Arc::new(Texture::solid(Vector3::new(1.0, 0.0, 1.0))),
        };
        let shader = UnlitShader::new(&material, SampleFilter::Point);
        let fragment = Fragment {
            x: 3,
            y: 4,
            depth: 0.2,
            varyings: Varyings {
                color: Vector3::new(0.5, 1.0, 0.25),
                uv: Vector2::new(0.5, 0.5),
                normal: Vector3::y(),
                tangent: Vector3::x(),
                view_direction: Vector3::z(),
            },
        };
        assert_eq!(shader.fragment(&fragment), Vector3::new(0.5, 0.0, 0.25));
    }
}
