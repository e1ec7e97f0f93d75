use nalgebra::Vector3;

/// The scene's single directional light.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Direction the light travels, normalized.
    pub direction: Vector3<f32>,
    /// Added to the lit color in combined shading.
    pub ambient: Vector3<f32>,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, 0.577), 0.025)
    }
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, ambient: f32) -> Self {
        Self {
            direction: direction.normalize(),
            ambient: Vector3::new(ambient, ambient, ambient),
        }
    }
}
