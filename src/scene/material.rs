use crate::scene::texture::Texture;
use nalgebra::Vector3;
use std::sync::Arc;

/// Defines how an object is shaded.
#[derive(Debug, Clone)]
pub enum Material {
    /// Lit: Lambert diffuse, Phong specular and tangent-space normal mapping.
    Phong(PhongMaterial),
    /// Unlit: texture times vertex color.
    Flat(FlatMaterial),
}

impl Default for Material {
    fn default() -> Self {
        Material::Phong(PhongMaterial::default())
    }
}

/// Texture set and constants for the lit technique.
#[derive(Debug, Clone)]
pub struct PhongMaterial {
    pub diffuse_texture: Arc<Texture>,
    pub normal_texture: Arc<Texture>,
    /// Red channel scales the shininess exponent. Missing means 1.
    pub gloss_texture: Option<Arc<Texture>>,
    /// RGB specular coefficient. Missing means no specular.
    pub specular_texture: Option<Arc<Texture>>,
    pub diffuse_reflectance: f32,
    pub shininess: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            diffuse_texture: Arc::new(Texture::solid(Vector3::new(1.0, 1.0, 1.0))),
            normal_texture: Arc::new(Texture::solid(Vector3::new(0.5, 0.5, 1.0))),
            gloss_texture: None,
            specular_texture: None,
            diffuse_reflectance: 7.0,
            shininess: 25.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlatMaterial {
    pub diffuse_texture: Arc<Texture>,
}

impl Default for FlatMaterial {
    fn default() -> Self {
        Self {
            diffuse_texture: Arc::new(Texture::solid(Vector3::new(1.0, 1.0, 1.0))),
        }
    }
}
