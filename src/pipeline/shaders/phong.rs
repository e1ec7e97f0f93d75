use crate::core::geometry::Fragment;
use crate::core::pipeline::Shader;
use crate::scene::light::DirectionalLight;
use crate::scene::material::PhongMaterial;
use crate::scene::texture::SampleFilter;
use nalgebra::Vector3;
use serde::Deserialize;
use std::f32::consts::PI;

/// Which lighting terms end up in the shaded color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Lambert cosine only, as grayscale.
    ObservedArea,
    Diffuse,
    Specular,
    /// `ambient + (diffuse + specular) * observed_area`
    #[default]
    Combined,
}

impl ShadingMode {
    pub fn next(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }
}

/// Everything the lighting model needs for one fragment.
#[derive(Debug, Clone, Copy)]
pub struct ShadingInput {
    /// Shading normal, not necessarily normalized.
    pub normal: Vector3<f32>,
    /// Camera-to-surface direction, not necessarily normalized.
    pub view_direction: Vector3<f32>,
    /// Direction the light travels.
    pub light_direction: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    /// Scales the shininess exponent.
    pub gloss: f32,
    pub diffuse_reflectance: f32,
    pub shininess: f32,
    pub ambient: Vector3<f32>,
}

/// `v - 2 (n . v) n`
#[inline]
pub fn reflect(v: &Vector3<f32>, n: &Vector3<f32>) -> Vector3<f32> {
    v - n * (2.0 * n.dot(v))
}

/// Lambert diffuse plus Phong specular for a single fragment.
///
/// Pure: the same input always yields the same bits. The result is not
/// clamped.
pub fn shade(input: &ShadingInput, mode: ShadingMode) -> Vector3<f32> {
    let n = input.normal.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
    let l = input
        .light_direction
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::zeros);
    let v = input
        .view_direction
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::zeros);

    let observed_area = n.dot(&-l).clamp(0.0, 1.0);
    if mode == ShadingMode::ObservedArea {
        return Vector3::new(observed_area, observed_area, observed_area);
    }

    let diffuse = input.diffuse_color * input.diffuse_reflectance / PI;

    let cos_alpha = reflect(&-l, &n).dot(&v).max(0.0);
    let specular = input.specular_color * cos_alpha.powf(input.gloss * input.shininess);

    match mode {
        ShadingMode::Diffuse => diffuse * observed_area,
        ShadingMode::Specular => specular * observed_area,
        _ => input.ambient + (diffuse + specular) * observed_area,
    }
}

/// Tangent-space normal map sample (channels in [0, 1]) to a world-space normal.
pub fn perturb_normal(
    sample: Vector3<f32>,
    normal: &Vector3<f32>,
    tangent: &Vector3<f32>,
) -> Option<Vector3<f32>> {
    let n = normal.try_normalize(1e-12)?;
    let t = tangent.try_normalize(1e-12)?;
    let b = n.cross(&t);
    let local = sample * 2.0 - Vector3::new(1.0, 1.0, 1.0);
    (t * local.x + b * local.y + n * local.z).try_normalize(1e-12)
}

/// Fragment stage of the lit technique: samples the material's maps and
/// evaluates `shade`.
pub struct PhongShader<'a> {
    pub material: &'a PhongMaterial,
    pub light: DirectionalLight,
    pub mode: ShadingMode,
    pub use_normal_map: bool,
    pub filter: SampleFilter,
}

impl<'a> PhongShader<'a> {
    pub fn new(material: &'a PhongMaterial, light: DirectionalLight) -> Self {
        Self {
            material,
            light,
            mode: ShadingMode::Combined,
            use_normal_map: true,
            filter: SampleFilter::Point,
        }
    }

    fn shading_normal(&self, fragment: &Fragment) -> Vector3<f32> {
        let varyings = &fragment.varyings;
        if !self.use_normal_map {
            return varyings.normal;
        }
        let sample = self.material.normal_texture.sample(varyings.uv, self.filter);
        perturb_normal(sample, &varyings.normal, &varyings.tangent).unwrap_or(varyings.normal)
    }
}

impl Shader for PhongShader<'_> {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32> {
        let uv = fragment.varyings.uv;
        let material = self.material;

        let gloss = material
            .gloss_texture
            .as_ref()
            .map_or(1.0, |t| t.sample(uv, self.filter).x);
        let specular_color = material
            .specular_texture
            .as_ref()
            .map_or_else(Vector3::zeros, |t| t.sample(uv, self.filter));

        let input = ShadingInput {
            normal: self.shading_normal(fragment),
            view_direction: fragment.varyings.view_direction,
            light_direction: self.light.direction,
            diffuse_color: material.diffuse_texture.sample(uv, self.filter),
            specular_color,
            gloss,
            diffuse_reflectance: material.diffuse_reflectance,
            shininess: material.shininess,
            ambient: self.light.ambient,
        };
        shade(&input, self.mode)
    }
}
